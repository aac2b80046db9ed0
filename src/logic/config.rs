use typed_builder::TypedBuilder;

use super::{acquire_constants::*, chain::Tier};

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ChainSpec {
    pub name: String,
    pub tier: Tier,
}

impl ChainSpec {
    pub fn new(name: &str, tier: Tier) -> Self {
        Self {
            name: name.to_string(),
            tier,
        }
    }
}

/// The classic seven chains, in the order they are offered for founding.
pub fn default_chain_roster() -> Vec<ChainSpec> {
    vec![
        ChainSpec::new("Worldwide", Tier::Economy),
        ChainSpec::new("Sackson", Tier::Economy),
        ChainSpec::new("Festival", Tier::Standard),
        ChainSpec::new("Imperial", Tier::Standard),
        ChainSpec::new("American", Tier::Standard),
        ChainSpec::new("Continental", Tier::Luxury),
        ChainSpec::new("Tower", Tier::Luxury),
    ]
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct GameConfig {
    #[builder(default = default_chain_roster())]
    pub chains: Vec<ChainSpec>,
    #[builder(default = STARTING_CASH)]
    pub starting_cash: u32,
    #[builder(default = STOCK_POOL_SIZE)]
    pub stock_pool_size: u32,
    #[builder(default = SAFE_CHAIN_SIZE)]
    pub safe_chain_size: usize,
    #[builder(default = HAND_SIZE)]
    pub hand_size: usize,
    #[builder(default = STOCK_TO_BUY_PER_TURN)]
    pub stock_to_buy_per_turn: u32,
    #[builder(default = MAX_PLAYERS)]
    pub max_players: usize,
    /// Seed for the draw pile shuffle; `None` draws from entropy.
    #[builder(default, setter(strip_option))]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.chains.len(), 7);
        assert_eq!(config.starting_cash, 6000);
        assert_eq!(config.stock_pool_size, 25);
        assert_eq!(config.safe_chain_size, 11);
        assert_eq!(config.hand_size, 6);
        assert_eq!(config.stock_to_buy_per_turn, 3);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder_overrides() {
        let config = GameConfig::builder()
            .chains(vec![ChainSpec::new("Tower", Tier::Luxury)])
            .safe_chain_size(3)
            .seed(7)
            .build();
        assert_eq!(config.chains, vec![ChainSpec::new("Tower", Tier::Luxury)]);
        assert_eq!(config.safe_chain_size, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_players, MAX_PLAYERS);
    }
}
