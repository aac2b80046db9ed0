use std::collections::{BTreeMap, VecDeque};

use tracing::{info, warn};

use super::{
    acquire_game_state::AcquireGameState,
    acquire_request::AcquireRequest,
    acquire_response::{AcquireResponse, BuyStockChoice, DisposeStockChoice},
    chain::{Chain, ChainId, Tier},
    config::GameConfig,
    error::{AcquireError, Result, StockShortfall},
    game_board::{GameBoard, PlaceTileResult},
    game_states::buy_stock_state::BuyStockState,
    merger::Merger,
    player::{Player, PlayerId},
    scoring::Standing,
    tile::Tile,
    tile_bag::TileBag,
};

/// A chain as the front-end lists it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ChainSummary {
    pub name: String,
    pub tier: Tier,
    pub size: usize,
    pub price: u32,
    pub unsold: u32,
    pub safe: bool,
}

impl From<&Chain> for ChainSummary {
    fn from(chain: &Chain) -> Self {
        Self {
            name: chain.name.clone(),
            tier: chain.tier,
            size: chain.size(),
            price: chain.stock_price(),
            unsold: chain.unsold_stock(),
            safe: chain.is_safe(),
        }
    }
}

/// Drives a game: seats players, rotates turns and walks every turn through
/// placement, founding or merger settlement, and stock purchase.
pub struct AcquireGame {
    config: GameConfig,
    board: GameBoard,
    players: Vec<Player>,
    // front is the player whose turn it is
    turn_order: VecDeque<PlayerId>,
    current_player: Option<PlayerId>,
    tile_bag: TileBag,
    state: AcquireGameState,
    buy_stock_state: BuyStockState,
    standings: Vec<Standing>,
}

impl AcquireGame {
    pub fn new(config: GameConfig) -> Self {
        let tile_bag = TileBag::shuffled(config.seed);
        Self::with_tile_bag(config, tile_bag)
    }

    pub fn with_tile_bag(config: GameConfig, tile_bag: TileBag) -> Self {
        Self {
            board: GameBoard::new(&config),
            players: Vec::new(),
            turn_order: VecDeque::new(),
            current_player: None,
            tile_bag,
            state: AcquireGameState::AddingPlayers,
            buy_stock_state: BuyStockState::new(config.stock_to_buy_per_turn),
            standings: Vec::new(),
            config,
        }
    }

    fn expect_state(&self, action: &'static str, allowed: &[AcquireGameState]) -> Result<()> {
        match allowed.contains(&self.state) {
            true => Ok(()),
            false => Err(AcquireError::WrongPhase {
                action,
                state: self.state,
            }),
        }
    }

    fn current_id(&self) -> Result<PlayerId> {
        self.current_player.ok_or(AcquireError::NoActivePlayer)
    }

    pub fn state(&self) -> AcquireGameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.0]
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current_player.map(|id| &self.players[id.0])
    }

    pub fn tiles_left_to_draw(&self) -> usize {
        self.tile_bag.remaining()
    }

    /// What the game is waiting for, and from whom.
    pub fn request(&self) -> AcquireRequest {
        let current = match (self.state, self.current_player) {
            (AcquireGameState::EndGame, _) => return AcquireRequest::EndGame,
            (_, None) => return AcquireRequest::AddPlayers,
            (_, Some(current)) => current,
        };

        match self.state {
            AcquireGameState::AddingPlayers => AcquireRequest::AddPlayers,
            AcquireGameState::PlayTile => AcquireRequest::PlayTile(current),
            AcquireGameState::FoundChain => AcquireRequest::ChooseNewChain(current),
            AcquireGameState::DisposeStock => {
                match self.board.current_merger().and_then(Merger::current_player) {
                    Some(shareholder) => AcquireRequest::DisposeStock(shareholder),
                    None => AcquireRequest::FinalizeMerger,
                }
            }
            AcquireGameState::BuyStock => AcquireRequest::BuyStock(current),
            AcquireGameState::EndGame => AcquireRequest::EndGame,
        }
    }

    /// Applies a front-end answer to the matching command.
    pub fn respond(&mut self, response: AcquireResponse) -> Result<()> {
        let result = match &response {
            AcquireResponse::AddPlayer(name) => self.add_player(name).map(|_| ()),
            AcquireResponse::StartGame => self.start_game(),
            AcquireResponse::Tile(index) => self.place_tile(*index).map(|_| ()),
            AcquireResponse::ReplaceHand => self.give_current_player_new_hand(),
            AcquireResponse::SkipTile => self.go_to_next_player(),
            AcquireResponse::NewChain(name) => self.found_chain(name).map(|_| ()),
            AcquireResponse::DisposeStock(DisposeStockChoice::Sell) => self.sell_stock().map(|_| ()),
            AcquireResponse::DisposeStock(DisposeStockChoice::Trade) => self.trade_stock(),
            AcquireResponse::DisposeStock(DisposeStockChoice::Keep) => self.go_to_next_merging_player(),
            AcquireResponse::FinalizeMerger => self.merge_chains(),
            AcquireResponse::BuyStock(BuyStockChoice::Buy(index)) => self.buy_stock(*index),
            AcquireResponse::BuyStock(BuyStockChoice::Pass) => self.go_to_next_player(),
            AcquireResponse::EndGame => self.end_game().map(|_| ()),
        };

        if let Err(err) = &result {
            warn!(?response, %err, "command rejected");
        }
        result
    }

    pub fn add_player(&mut self, name: &str) -> Result<PlayerId> {
        self.expect_state("add a player", &[AcquireGameState::AddingPlayers])?;
        if self.players.len() >= self.config.max_players {
            return Err(AcquireError::TooManyPlayers(self.config.max_players));
        }

        let id = PlayerId(self.players.len());
        let mut player = Player::new(id, name, self.config.starting_cash);
        player.tiles = self.tile_bag.draw_many(self.config.hand_size);

        info!(player = %player.name, "player joined");
        self.players.push(player);
        self.turn_order.push_back(id);
        Ok(id)
    }

    /// Hands the first turn to the first seated player.
    pub fn start_game(&mut self) -> Result<()> {
        self.expect_state("start the game", &[AcquireGameState::AddingPlayers])?;
        self.go_to_next_player()
    }

    /// Starts the game, or ends the current turn: the hand is refilled, the
    /// turn passes to the next seat and the purchase budget resets.
    ///
    /// During placement this is a skip, allowed only when no tile in hand
    /// can be played.
    pub fn go_to_next_player(&mut self) -> Result<()> {
        match self.state {
            AcquireGameState::AddingPlayers => {
                let first = *self.turn_order.front().ok_or(AcquireError::NoActivePlayer)?;
                self.current_player = Some(first);
                self.buy_stock_state.reset();
                self.state = AcquireGameState::PlayTile;
                info!(player = %self.players[first.0].name, "game started");
                return Ok(());
            }
            AcquireGameState::PlayTile => {
                if self.has_playable_tile()? {
                    return Err(AcquireError::HandStillPlayable);
                }
            }
            AcquireGameState::BuyStock => {}
            _ => {
                return Err(AcquireError::WrongPhase {
                    action: "end the turn",
                    state: self.state,
                })
            }
        }

        let id = self.current_id()?;
        let player = &mut self.players[id.0];
        let missing = self.config.hand_size.saturating_sub(player.tiles.len());
        player.tiles.extend(self.tile_bag.draw_many(missing));

        if let Some(finished) = self.turn_order.pop_front() {
            self.turn_order.push_back(finished);
        }
        self.current_player = self.turn_order.front().copied();
        self.buy_stock_state.reset();
        self.state = AcquireGameState::PlayTile;

        if let Some(next) = self.current_player() {
            info!(player = %next.name, "turn started");
        }
        Ok(())
    }

    fn has_playable_tile(&self) -> Result<bool> {
        let id = self.current_id()?;
        Ok(self.players[id.0]
            .tiles
            .iter()
            .any(|tile| self.board.move_is_legal(*tile)))
    }

    pub fn move_is_legal(&self, tile_index: usize) -> Result<bool> {
        let id = self.current_id()?;
        let tile = self.players[id.0]
            .tiles
            .get(tile_index)
            .ok_or(AcquireError::TileIndexOutOfRange(tile_index))?;
        Ok(self.board.move_is_legal(*tile))
    }

    pub fn place_tile(&mut self, tile_index: usize) -> Result<PlaceTileResult> {
        let id = self.current_id()?;
        self.expect_state("place a tile", &[AcquireGameState::PlayTile])?;
        let tile = *self.players[id.0]
            .tiles
            .get(tile_index)
            .ok_or(AcquireError::TileIndexOutOfRange(tile_index))?;

        // shareholders decide in turn order, starting with the current player
        let players = &self.players;
        let turn_order = &self.turn_order;
        let result = self.board.place_tile(tile, |chain| {
            turn_order
                .iter()
                .copied()
                .filter(|player| players[player.0].shares_in(chain) > 0)
                .collect()
        })?;
        self.players[id.0].tiles.remove(tile_index);

        match result {
            PlaceTileResult::FoundingPending => self.state = AcquireGameState::FoundChain,
            PlaceTileResult::MergersPending(_) => self.begin_merger()?,
            PlaceTileResult::Placed | PlaceTileResult::ChainGrew(_) => {
                self.state = AcquireGameState::BuyStock
            }
        }
        Ok(result)
    }

    /// Discards an unplayable hand and deals a fresh one.
    pub fn give_current_player_new_hand(&mut self) -> Result<()> {
        let id = self.current_id()?;
        self.expect_state("replace the hand", &[AcquireGameState::PlayTile])?;
        if self.has_playable_tile()? {
            return Err(AcquireError::HandStillPlayable);
        }

        let hand = self.tile_bag.draw_many(self.config.hand_size);
        let player = &mut self.players[id.0];
        info!(player = %player.name, discarded = player.tiles.len(), "hand replaced");
        player.tiles = hand;
        Ok(())
    }

    pub fn found_chain(&mut self, name: &str) -> Result<ChainId> {
        let id = self.current_id()?;
        let chain = self.board.found_chain(name, &mut self.players[id.0])?;
        self.state = AcquireGameState::BuyStock;
        Ok(chain)
    }

    // pays the bonus of the merger now at the head of the queue
    fn begin_merger(&mut self) -> Result<()> {
        self.board.give_shareholder_bonus(&mut self.players)?;
        self.state = AcquireGameState::DisposeStock;
        Ok(())
    }

    pub fn sell_stock(&mut self) -> Result<u32> {
        self.board.sell_stock(&mut self.players)
    }

    pub fn trade_stock(&mut self) -> Result<()> {
        self.board.trade_stock(&mut self.players)
    }

    pub fn go_to_next_merging_player(&mut self) -> Result<()> {
        self.board.go_to_next_merging_player()
    }

    /// Finishes the head merger and moves on to the next one, or to stock
    /// purchase when none is left.
    pub fn merge_chains(&mut self) -> Result<()> {
        self.board.merge_chains()?;
        match self.board.merge_pending() {
            true => self.begin_merger(),
            false => {
                self.state = AcquireGameState::BuyStock;
                Ok(())
            }
        }
    }

    pub fn player_can_buy_stock(&self, chain_index: usize) -> bool {
        self.check_purchase(chain_index).is_ok()
    }

    fn check_purchase(&self, chain_index: usize) -> Result<(PlayerId, ChainId, u32)> {
        let id = self.current_id()?;
        self.expect_state("buy stock", &[AcquireGameState::BuyStock])?;
        let chain_id = *self
            .board
            .founded_chains()
            .get(chain_index)
            .ok_or(AcquireError::ChainIndexOutOfRange(chain_index))?;
        self.buy_stock_state.ensure_can_buy()?;

        let chain = self.board.chain(chain_id);
        if chain.unsold_stock() == 0 {
            return Err(AcquireError::StockUnavailable(StockShortfall::PoolExhausted(
                chain.name.clone(),
            )));
        }
        let price = chain.stock_price();
        let balance = self.players[id.0].cash;
        if balance < price {
            return Err(AcquireError::InsufficientFunds { balance, price });
        }
        Ok((id, chain_id, price))
    }

    pub fn buy_stock(&mut self, chain_index: usize) -> Result<()> {
        let (id, chain_id, price) = self.check_purchase(chain_index)?;

        let stock = self
            .board
            .issue_share(chain_id)
            .ok_or_else(|| {
                AcquireError::StockUnavailable(StockShortfall::PoolExhausted(
                    self.board.chain(chain_id).name.clone(),
                ))
            })?;
        let player = &mut self.players[id.0];
        player.cash -= price;
        player.add_stock(stock);
        self.buy_stock_state.player_has_bought_stock()?;

        info!(player = %player.name, chain = %self.board.chain(chain_id), price, "bought stock");
        Ok(())
    }

    /// Settles every account and ends the game.
    pub fn end_game(&mut self) -> Result<&[Standing]> {
        self.current_id()?;
        self.expect_state(
            "end the game",
            &[AcquireGameState::PlayTile, AcquireGameState::BuyStock],
        )?;

        let turn_order: Vec<PlayerId> = self.turn_order.iter().copied().collect();
        self.standings = self
            .board
            .settle_final_accounts(&mut self.players, &turn_order);
        self.state = AcquireGameState::EndGame;
        info!("game over");
        Ok(self.standings.as_slice())
    }

    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    pub fn player_names(&self) -> Vec<String> {
        self.turn_order
            .iter()
            .map(|id| self.players[id.0].name.clone())
            .collect()
    }

    pub fn player_balances(&self) -> Vec<u32> {
        self.turn_order.iter().map(|id| self.players[id.0].cash).collect()
    }

    /// Chain name to share count, per player in turn order.
    pub fn player_stock_profiles(&self) -> Vec<BTreeMap<String, u32>> {
        self.turn_order
            .iter()
            .map(|id| {
                self.players[id.0]
                    .stock_profile()
                    .into_iter()
                    .map(|(chain, count)| (self.board.chain(chain).name.clone(), count))
                    .collect()
            })
            .collect()
    }

    pub fn current_player_balance(&self) -> Result<u32> {
        let id = self.current_id()?;
        Ok(self.players[id.0].cash)
    }

    pub fn current_player_tiles(&self) -> Result<Vec<String>> {
        let id = self.current_id()?;
        Ok(self.players[id.0].tiles.iter().map(Tile::to_string).collect())
    }

    pub fn played_tiles(&self) -> &[Tile] {
        self.board.played_tiles()
    }

    pub fn unfounded_chains(&self) -> Vec<ChainSummary> {
        self.board
            .unfounded_chains()
            .iter()
            .map(|id| ChainSummary::from(self.board.chain(*id)))
            .collect()
    }

    pub fn founded_chains(&self) -> Vec<ChainSummary> {
        self.board
            .founded_chains()
            .iter()
            .map(|id| ChainSummary::from(self.board.chain(*id)))
            .collect()
    }

    pub fn founding_pending(&self) -> bool {
        self.board.founding_pending()
    }

    pub fn merge_pending(&self) -> bool {
        self.board.merge_pending()
    }

    pub fn current_merger(&self) -> Option<&Merger> {
        self.board.current_merger()
    }

    fn merging_player(&self) -> Result<(&Merger, &Player)> {
        let merger = self.board.current_merger().ok_or(AcquireError::NoPendingMerger)?;
        let id = merger.current_player().ok_or(AcquireError::NoActivePlayer)?;
        Ok((merger, &self.players[id.0]))
    }

    pub fn merging_player_name(&self) -> Result<&str> {
        let (_, player) = self.merging_player()?;
        Ok(&player.name)
    }

    pub fn merging_player_stock_amount(&self) -> Result<u32> {
        let (merger, player) = self.merging_player()?;
        Ok(player.shares_in(merger.acquired_chain()))
    }

    pub fn merging_stock_price(&self) -> Result<u32> {
        let merger = self.board.current_merger().ok_or(AcquireError::NoPendingMerger)?;
        Ok(self.board.chain(merger.acquired_chain()).stock_price())
    }

    pub fn stock_left_to_buy(&self) -> u32 {
        self.buy_stock_state.buys_remaining
    }
}
