#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DisposeStockChoice {
    Sell,
    Trade,
    // done deciding, hand over to the next shareholder
    Keep,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BuyStockChoice {
    // index into the founded chains
    Buy(usize),
    // end the turn
    Pass,
}

// This represents the response from the player
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AcquireResponse {
    AddPlayer(String),
    StartGame,
    // index into the current player's hand
    Tile(usize),
    ReplaceHand,
    // skip placement when nothing in hand can be played
    SkipTile,
    NewChain(String),
    DisposeStock(DisposeStockChoice),
    FinalizeMerger,
    BuyStock(BuyStockChoice),
    EndGame,
}
