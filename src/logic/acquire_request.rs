use super::player::PlayerId;

// This represents what the "game" is asking for
// in most cases the PlayerId stored is the player being asked
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AcquireRequest {
    AddPlayers,
    PlayTile(PlayerId),
    ChooseNewChain(PlayerId),
    // the shareholder deciding what to do with stock in the acquired chain
    DisposeStock(PlayerId),
    // every shareholder has decided, the merger can be finished
    FinalizeMerger,
    BuyStock(PlayerId),
    EndGame,
}
