use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use super::tile::Tile;

/// The face-down draw pile.
#[derive(Debug, Clone)]
pub struct TileBag {
    // drawn from the back
    tiles: Vec<Tile>,
}

impl TileBag {
    pub fn shuffled(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut tiles: Vec<Tile> = Tile::all().collect();
        tiles.shuffle(&mut rng);
        Self { tiles }
    }

    /// A pile that deals `tiles` in the given order.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        let mut tiles = tiles;
        tiles.reverse();
        Self { tiles }
    }

    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    /// Draws up to `count` tiles, fewer if the pile runs out.
    pub fn draw_many(&mut self, count: usize) -> Vec<Tile> {
        std::iter::from_fn(|| self.draw()).take(count).collect()
    }

    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
