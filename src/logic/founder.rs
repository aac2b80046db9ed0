use super::tile::Tile;

/// A clump of unclaimed tiles waiting for a player to name its chain.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Founder {
    clump: Vec<Tile>,
}

impl Founder {
    pub fn new(clump: Vec<Tile>) -> Self {
        debug_assert!(clump.len() > 1, "a single tile cannot found a chain");
        Self { clump }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.clump
    }
}
