use std::fmt;

/// Phases of a game. Each phase admits only the commands that move it on:
///
/// `AddingPlayers -> PlayTile -> (FoundChain | DisposeStock)? -> BuyStock -> PlayTile ...`
///
/// with `EndGame` reachable from `PlayTile` and `BuyStock`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AcquireGameState {
    AddingPlayers,
    PlayTile,
    FoundChain,
    DisposeStock,
    BuyStock,
    EndGame,
}

impl AcquireGameState {
    pub fn is_over(&self) -> bool {
        *self == AcquireGameState::EndGame
    }
}

impl fmt::Display for AcquireGameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AcquireGameState::AddingPlayers => "adding players",
            AcquireGameState::PlayTile => "play tile",
            AcquireGameState::FoundChain => "found chain",
            AcquireGameState::DisposeStock => "dispose stock",
            AcquireGameState::BuyStock => "buy stock",
            AcquireGameState::EndGame => "end game",
        };
        write!(f, "{}", name)
    }
}
