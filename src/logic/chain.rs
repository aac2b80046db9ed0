use std::collections::BTreeSet;
use std::fmt;

use super::{
    acquire_constants::{MAJORITY_BONUS_MULTIPLIER, MINORITY_BONUS_MULTIPLIER},
    tile::Tile,
};

/// Index of a chain in the game's roster.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct ChainId(pub usize);

/// Price tier of a chain. Higher tiers read their price further down the
/// table for the same size.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Tier {
    Economy,
    Standard,
    Luxury,
}

impl Tier {
    fn row_advantage(&self) -> usize {
        match self {
            Tier::Economy => 0,
            Tier::Standard => 1,
            Tier::Luxury => 2,
        }
    }

    fn row_from_chain_length(&self, chain_length: usize) -> usize {
        let base_row = match chain_length {
            0..=2 => 0,
            3 => 1,
            4 => 2,
            5 => 3,
            6..=10 => 4,
            11..=20 => 5,
            21..=30 => 6,
            31..=40 => 7,
            _ => 8,
        };
        base_row + self.row_advantage()
    }

    pub fn stock_value(&self, chain_length: usize) -> u32 {
        (self.row_from_chain_length(chain_length) as u32 + 2) * 100
    }

    pub fn majority_holder_bonus(&self, chain_length: usize) -> u32 {
        self.stock_value(chain_length) * MAJORITY_BONUS_MULTIPLIER
    }

    pub fn minority_holder_bonus(&self, chain_length: usize) -> u32 {
        self.stock_value(chain_length) * MINORITY_BONUS_MULTIPLIER
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Economy => "Economy",
            Tier::Standard => "Standard",
            Tier::Luxury => "Luxury",
        };
        write!(f, "{}", name)
    }
}

/// A share certificate. The price is fixed when the share is issued.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Stock {
    pub chain: ChainId,
    pub price: u32,
}

#[derive(Debug, Clone)]
pub struct Chain {
    pub id: ChainId,
    pub name: String,
    pub tier: Tier,
    tiles: BTreeSet<Tile>,
    pool_size: u32,
    unsold: u32,
    safe_size: usize,
}

impl Chain {
    pub fn new(id: ChainId, name: &str, tier: Tier, pool_size: u32, safe_size: usize) -> Self {
        Self {
            id,
            name: name.to_string(),
            tier,
            tiles: BTreeSet::new(),
            pool_size,
            unsold: pool_size,
            safe_size,
        }
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> &BTreeSet<Tile> {
        &self.tiles
    }

    pub fn is_safe(&self) -> bool {
        self.size() >= self.safe_size
    }

    pub fn stock_price(&self) -> u32 {
        self.tier.stock_value(self.size())
    }

    pub fn majority_shareholder_bonus(&self) -> u32 {
        self.tier.majority_holder_bonus(self.size())
    }

    pub fn minority_shareholder_bonus(&self) -> u32 {
        self.tier.minority_holder_bonus(self.size())
    }

    pub fn unsold_stock(&self) -> u32 {
        self.unsold
    }

    pub fn issued_stock(&self) -> u32 {
        self.pool_size - self.unsold
    }

    pub fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Returns false if the tile already belonged to the chain.
    pub(crate) fn add_tile(&mut self, tile: Tile) -> bool {
        self.tiles.insert(tile)
    }

    pub(crate) fn clear_tiles(&mut self) {
        self.tiles.clear();
    }

    /// Takes one share out of the pool at the current price.
    pub(crate) fn issue_share(&mut self) -> Option<Stock> {
        if self.unsold == 0 {
            return None;
        }
        self.unsold -= 1;
        Some(Stock {
            chain: self.id,
            price: self.stock_price(),
        })
    }

    pub(crate) fn return_share(&mut self, stock: Stock) {
        debug_assert_eq!(stock.chain, self.id, "share returned to the wrong chain");
        debug_assert!(self.unsold < self.pool_size, "{} pool overflow", self.name);
        self.unsold += 1;
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
