pub const BOARD_ROWS: usize = 9;
pub const BOARD_COLS: usize = 12;

pub const SAFE_CHAIN_SIZE: usize = 11;
pub const STOCK_POOL_SIZE: u32 = 25;
pub const STARTING_CASH: u32 = 6000;
pub const HAND_SIZE: usize = 6;
pub const STOCK_TO_BUY_PER_TURN: u32 = 3;
pub const MAX_PLAYERS: usize = 6;

// bonuses are multiples of the acquired chain's stock price
pub const MAJORITY_BONUS_MULTIPLIER: u32 = 10;
pub const MINORITY_BONUS_MULTIPLIER: u32 = 5;
