use thiserror::Error;

use super::{acquire_game_state::AcquireGameState, merger::MergerPhase};

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum CellNotPlayableReason {
    #[error("the cell is off the board")]
    CellIsOffBoard,
    #[error("the cell is not empty")]
    CellIsNotEmpty,
    #[error("a founding or merger must be resolved first")]
    ResolutionPending,
    #[error("all chains are currently active, cannot start a new chain")]
    ChainsAreAllActive,
    #[error("adjacent chains are safe and cannot be acquired")]
    AdjacentChainsAreSafe,
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum StockShortfall {
    #[error("no unsold {0} stock is left")]
    PoolExhausted(String),
    #[error("no stock purchases are left this turn")]
    TurnBudgetSpent,
    #[error("the player holds no {0} stock")]
    NoSharesHeld(String),
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum AcquireError {
    #[error("invalid placement: {0}")]
    InvalidPlacement(CellNotPlayableReason),

    #[error("no player is active")]
    NoActivePlayer,

    #[error("no chain founding is pending")]
    NoPendingFounder,

    #[error("no merger is pending")]
    NoPendingMerger,

    #[error("no unfounded chain is named {0}")]
    UnknownChainName(String),

    #[error("{player} holds {held} {chain} shares, trading needs two")]
    InsufficientShares {
        player: String,
        chain: String,
        held: u32,
    },

    #[error("stock unavailable: {0}")]
    StockUnavailable(StockShortfall),

    #[error("a balance of ${balance} cannot cover ${price}")]
    InsufficientFunds { balance: u32, price: u32 },

    #[error("cannot {action} while the game is in the {state} phase")]
    WrongPhase {
        action: &'static str,
        state: AcquireGameState,
    },

    #[error("there is no tile at hand index {0}")]
    TileIndexOutOfRange(usize),

    #[error("there is no founded chain at index {0}")]
    ChainIndexOutOfRange(usize),

    #[error("the game already has the maximum of {0} players")]
    TooManyPlayers(usize),

    #[error("shareholders are still deciding what to do with their stock")]
    DecisionsPending,

    #[error("merger step is out of order at the {0} stage")]
    MergerOutOfOrder(MergerPhase),

    #[error("the hand still holds a playable tile")]
    HandStillPlayable,
}

pub type Result<T> = std::result::Result<T, AcquireError>;
