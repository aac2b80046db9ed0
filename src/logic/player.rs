use std::collections::BTreeMap;

use super::{
    chain::{ChainId, Stock},
    tile::Tile,
};

/// Index of a player in seating order.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct PlayerId(pub usize);

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub cash: u32,
    pub tiles: Vec<Tile>,
    stocks: Vec<Stock>,
}

impl Player {
    pub fn new(id: PlayerId, name: &str, cash: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            cash,
            tiles: Vec::new(),
            stocks: Vec::new(),
        }
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn shares_in(&self, chain: ChainId) -> u32 {
        self.stocks.iter().filter(|stock| stock.chain == chain).count() as u32
    }

    /// Share count per chain, only for chains the player holds.
    pub fn stock_profile(&self) -> BTreeMap<ChainId, u32> {
        let mut profile = BTreeMap::new();
        for stock in &self.stocks {
            *profile.entry(stock.chain).or_insert(0) += 1;
        }
        profile
    }

    pub(crate) fn add_stock(&mut self, stock: Stock) {
        self.stocks.push(stock);
    }

    /// Removes the most recently acquired share of `chain`.
    pub(crate) fn take_stock(&mut self, chain: ChainId) -> Option<Stock> {
        let index = self.stocks.iter().rposition(|stock| stock.chain == chain)?;
        Some(self.stocks.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(chain: usize, price: u32) -> Stock {
        Stock {
            chain: ChainId(chain),
            price,
        }
    }

    #[test]
    fn test_new_player() {
        let player = Player::new(PlayerId(0), "Alice", 6000);
        assert_eq!(player.cash, 6000);
        assert!(player.tiles.is_empty());
        assert!(player.stocks().is_empty());
    }

    #[test]
    fn test_stock_profile() {
        let mut player = Player::new(PlayerId(0), "Alice", 6000);
        player.add_stock(stock(0, 300));
        player.add_stock(stock(2, 400));
        player.add_stock(stock(0, 500));

        assert_eq!(player.shares_in(ChainId(0)), 2);
        assert_eq!(player.shares_in(ChainId(1)), 0);

        let profile = player.stock_profile();
        assert_eq!(profile.get(&ChainId(0)), Some(&2));
        assert_eq!(profile.get(&ChainId(2)), Some(&1));
        assert_eq!(profile.get(&ChainId(1)), None);
    }

    #[test]
    fn test_take_stock() {
        let mut player = Player::new(PlayerId(0), "Alice", 6000);
        player.add_stock(stock(0, 300));
        player.add_stock(stock(0, 500));

        assert_eq!(player.take_stock(ChainId(0)), Some(stock(0, 500)));
        assert_eq!(player.take_stock(ChainId(1)), None);
        assert_eq!(player.shares_in(ChainId(0)), 1);
    }
}
