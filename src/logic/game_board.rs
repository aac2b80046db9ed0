use std::collections::VecDeque;
use std::fmt::Debug;

use tracing::{debug, info};

use super::{
    acquire_constants::{BOARD_COLS, BOARD_ROWS},
    chain::{Chain, ChainId, Stock},
    config::GameConfig,
    error::{AcquireError, CellNotPlayableReason, Result},
    founder::Founder,
    merger::{Merger, MergerPhase},
    player::{Player, PlayerId},
    scoring::{self, Standing},
    tile::Tile,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Cell {
    Empty,
    Independent,
    Chain(ChainId),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PlaceTileResult {
    /// The tile joined no chain and founds nothing.
    Placed,
    ChainGrew(ChainId),
    FoundingPending,
    /// Number of mergers queued.
    MergersPending(usize),
}

// up, down, left, right; off-board coordinates wrap past the bounds
fn neighbor_coordinates(row: usize, col: usize) -> [(usize, usize); 4] {
    let (left, _) = col.overflowing_sub(1);
    let right = col + 1;

    let (up, _) = row.overflowing_sub(1);
    let down = row + 1;

    [(up, col), (down, col), (row, left), (row, right)]
}

pub struct GameBoard {
    cells: [[Cell; BOARD_COLS]; BOARD_ROWS],
    played_tiles: Vec<Tile>,
    chains: Vec<Chain>,
    // founding order, used to break ranking ties
    founded: Vec<ChainId>,
    unfounded: Vec<ChainId>,
    founder: Option<Founder>,
    mergers: VecDeque<Merger>,
}

impl GameBoard {
    pub fn new(config: &GameConfig) -> GameBoard {
        let chains: Vec<Chain> = config
            .chains
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                Chain::new(
                    ChainId(i),
                    &spec.name,
                    spec.tier,
                    config.stock_pool_size,
                    config.safe_chain_size,
                )
            })
            .collect();
        let unfounded = chains.iter().map(|chain| chain.id).collect();

        GameBoard {
            cells: [[Cell::Empty; BOARD_COLS]; BOARD_ROWS],
            played_tiles: Vec::new(),
            chains,
            founded: Vec::new(),
            unfounded,
            founder: None,
            mergers: VecDeque::new(),
        }
    }

    pub fn get_cell_state(&self, row: usize, col: usize) -> Cell {
        match row < BOARD_ROWS && col < BOARD_COLS {
            true => self.cells[row][col],
            false => Cell::Empty,
        }
    }

    pub fn get_chain_at(&self, tile: Tile) -> Option<ChainId> {
        match self.get_cell_state(tile.row, tile.col) {
            Cell::Chain(chain) => Some(chain),
            _ => None,
        }
    }

    pub fn played_tiles(&self) -> &[Tile] {
        &self.played_tiles
    }

    pub fn chain(&self, id: ChainId) -> &Chain {
        &self.chains[id.0]
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn founded_chains(&self) -> &[ChainId] {
        &self.founded
    }

    pub fn unfounded_chains(&self) -> &[ChainId] {
        &self.unfounded
    }

    pub fn founding_pending(&self) -> bool {
        self.founder.is_some()
    }

    pub fn founder(&self) -> Option<&Founder> {
        self.founder.as_ref()
    }

    pub fn merge_pending(&self) -> bool {
        !self.mergers.is_empty()
    }

    /// The merger at the head of the queue, the only one that may act.
    pub fn current_merger(&self) -> Option<&Merger> {
        self.mergers.front()
    }

    pub fn pending_mergers(&self) -> usize {
        self.mergers.len()
    }

    /// Breadth-first walk over occupied cells starting from `seeds`.
    fn scout_from(&self, seeds: &[(usize, usize)]) -> Vec<Tile> {
        let mut visited = [[false; BOARD_COLS]; BOARD_ROWS];
        let mut queue: VecDeque<(usize, usize)> = seeds.iter().copied().collect();
        let mut clump = Vec::new();

        while let Some((row, col)) = queue.pop_front() {
            if row >= BOARD_ROWS
                || col >= BOARD_COLS
                || visited[row][col]
                || self.cells[row][col] == Cell::Empty
            {
                continue;
            }
            visited[row][col] = true;
            clump.push(Tile::from((row, col)));
            queue.extend(neighbor_coordinates(row, col));
        }

        clump
    }

    /// The clump containing `tile`, empty if the tile is not on the board.
    pub fn clump_of(&self, tile: Tile) -> Vec<Tile> {
        self.scout_from(&[(tile.row, tile.col)])
    }

    /// Founded chains present in `clump`, by descending tile count. Ties
    /// keep founding order.
    pub fn rank_chains(&self, clump: &[Tile]) -> Vec<ChainId> {
        let mut frequency: Vec<(ChainId, usize)> = self.founded.iter().map(|id| (*id, 0)).collect();
        for tile in clump {
            if let Some(chain) = self.get_chain_at(*tile) {
                if let Some(entry) = frequency.iter_mut().find(|(id, _)| *id == chain) {
                    entry.1 += 1;
                }
            }
        }

        frequency.retain(|(_, count)| *count > 0);
        frequency.sort_by(|a, b| b.1.cmp(&a.1));
        frequency.into_iter().map(|(id, _)| id).collect()
    }

    pub fn is_tile_playable(&self, tile: Tile) -> std::result::Result<(), CellNotPlayableReason> {
        if !tile.is_on_board() {
            return Err(CellNotPlayableReason::CellIsOffBoard);
        }

        if self.founding_pending() || self.merge_pending() {
            return Err(CellNotPlayableReason::ResolutionPending);
        }

        if self.cells[tile.row][tile.col] != Cell::Empty {
            return Err(CellNotPlayableReason::CellIsNotEmpty);
        }

        // the clump the tile would join, minus the tile itself
        let clump = self.scout_from(&neighbor_coordinates(tile.row, tile.col));
        let ranking = self.rank_chains(&clump);

        if ranking.is_empty() && !clump.is_empty() && self.unfounded.is_empty() {
            return Err(CellNotPlayableReason::ChainsAreAllActive);
        }

        if ranking.iter().skip(1).any(|id| self.chain(*id).is_safe()) {
            return Err(CellNotPlayableReason::AdjacentChainsAreSafe);
        }

        Ok(())
    }

    pub fn move_is_legal(&self, tile: Tile) -> bool {
        self.is_tile_playable(tile).is_ok()
    }

    /// Places `tile` and classifies the clump it lands in.
    ///
    /// `shareholders_of` lists the holders of a chain in the order they will
    /// be asked to dispose of their stock; it is called once per queued
    /// merger and its result is kept as that merger's decision queue.
    pub fn place_tile<F>(&mut self, tile: Tile, shareholders_of: F) -> Result<PlaceTileResult>
    where
        F: Fn(ChainId) -> Vec<PlayerId>,
    {
        self.is_tile_playable(tile)
            .map_err(AcquireError::InvalidPlacement)?;
        debug_assert!(!self.played_tiles.contains(&tile), "{} placed twice", tile);

        self.cells[tile.row][tile.col] = Cell::Independent;
        self.played_tiles.push(tile);

        let clump = self.clump_of(tile);
        let ranking = self.rank_chains(&clump);
        debug!(%tile, clump = clump.len(), chains = ranking.len(), "scouted clump");

        match ranking.as_slice() {
            [] if clump.len() > 1 && !self.unfounded.is_empty() => {
                info!(%tile, size = clump.len(), "founding pending");
                self.founder = Some(Founder::new(clump));
                Ok(PlaceTileResult::FoundingPending)
            }
            [] => Ok(PlaceTileResult::Placed),
            [chain] => {
                let chain = *chain;
                self.absorb(chain, &clump);
                info!(%tile, chain = %self.chain(chain), size = self.chain(chain).size(), "chain grew");
                Ok(PlaceTileResult::ChainGrew(chain))
            }
            [acquiring, acquired @ ..] => {
                for chain in acquired {
                    info!(
                        acquiring = %self.chain(*acquiring),
                        acquired = %self.chain(*chain),
                        "merger queued"
                    );
                    self.mergers
                        .push_back(Merger::new(*acquiring, *chain, shareholders_of(*chain)));
                }
                Ok(PlaceTileResult::MergersPending(acquired.len()))
            }
        }
    }

    // tag every tile of the clump with the chain
    fn absorb(&mut self, chain: ChainId, clump: &[Tile]) {
        for tile in clump {
            self.cells[tile.row][tile.col] = Cell::Chain(chain);
            self.chains[chain.0].add_tile(*tile);
        }
    }

    /// Names the pending clump after the unfounded chain `name`. The founder
    /// receives one free share while the pool lasts.
    pub fn found_chain(&mut self, name: &str, founder: &mut Player) -> Result<ChainId> {
        if self.founder.is_none() {
            return Err(AcquireError::NoPendingFounder);
        }
        let position = self
            .unfounded
            .iter()
            .position(|id| self.chains[id.0].name == name)
            .ok_or_else(|| AcquireError::UnknownChainName(name.to_string()))?;
        let Some(pending) = self.founder.take() else {
            return Err(AcquireError::NoPendingFounder);
        };

        let chain = self.unfounded.remove(position);
        self.absorb(chain, pending.tiles());
        self.founded.push(chain);

        if let Some(stock) = self.chains[chain.0].issue_share() {
            founder.add_stock(stock);
        }

        info!(chain = %self.chain(chain), player = %founder.name, size = self.chain(chain).size(), "chain founded");
        Ok(chain)
    }

    pub(crate) fn issue_share(&mut self, chain: ChainId) -> Option<Stock> {
        self.chains[chain.0].issue_share()
    }

    pub(crate) fn settle_final_accounts(
        &mut self,
        players: &mut [Player],
        turn_order: &[PlayerId],
    ) -> Vec<Standing> {
        scoring::settle_final_accounts(&mut self.chains, &self.founded, players, turn_order)
    }

    pub fn give_shareholder_bonus(&mut self, players: &mut [Player]) -> Result<Vec<(PlayerId, u32)>> {
        let merger = self.mergers.front_mut().ok_or(AcquireError::NoPendingMerger)?;
        merger.give_shareholder_bonus(&self.chains, players)
    }

    pub fn sell_stock(&mut self, players: &mut [Player]) -> Result<u32> {
        let merger = self.mergers.front_mut().ok_or(AcquireError::NoPendingMerger)?;
        merger.sell_stock(&mut self.chains, players)
    }

    pub fn trade_stock(&mut self, players: &mut [Player]) -> Result<()> {
        let merger = self.mergers.front_mut().ok_or(AcquireError::NoPendingMerger)?;
        merger.trade_stock(&mut self.chains, players)
    }

    pub fn go_to_next_merging_player(&mut self) -> Result<()> {
        let merger = self.mergers.front_mut().ok_or(AcquireError::NoPendingMerger)?;
        merger.go_to_next_player()
    }

    /// Folds the head merger's acquired chain into its acquirer and returns
    /// the acquired chain to the unfounded pool.
    pub fn merge_chains(&mut self) -> Result<Merger> {
        let merger = self.mergers.front().ok_or(AcquireError::NoPendingMerger)?;
        if merger.phase() != MergerPhase::BonusPaid {
            return Err(AcquireError::MergerOutOfOrder(merger.phase()));
        }
        if merger.more_players_to_handle() {
            return Err(AcquireError::DecisionsPending);
        }
        let Some(mut merger) = self.mergers.pop_front() else {
            return Err(AcquireError::NoPendingMerger);
        };

        let acquiring = merger.acquiring_chain();
        let acquired = merger.acquired_chain();
        let clump = match self.played_tiles.last() {
            Some(tile) => self.clump_of(*tile),
            None => Vec::new(),
        };
        self.absorb(acquiring, &clump);

        self.chains[acquired.0].clear_tiles();
        self.founded.retain(|id| *id != acquired);
        self.unfounded.push(acquired);
        merger.mark_merged();

        info!(
            acquiring = %self.chain(acquiring),
            acquired = %self.chain(acquired),
            size = self.chain(acquiring).size(),
            "chains merged"
        );
        Ok(merger)
    }
}

impl Debug for GameBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                let symbol = match cell {
                    Cell::Empty => ".".to_string(),
                    Cell::Independent => "#".to_string(),
                    Cell::Chain(id) => id.0.to_string(),
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::logic::{chain::Tier, config::ChainSpec};

    fn no_holders(_: ChainId) -> Vec<PlayerId> {
        Vec::new()
    }

    fn place(board: &mut GameBoard, row: usize, col: usize) -> PlaceTileResult {
        board.place_tile(Tile::from((row, col)), no_holders).unwrap()
    }

    // lays `tiles` in order and names the chain they found `name`
    fn found(board: &mut GameBoard, player: &mut Player, tiles: &[(usize, usize)], name: &str) -> ChainId {
        for tile in tiles {
            place(board, tile.0, tile.1);
            if board.founding_pending() {
                board.found_chain(name, player).unwrap();
            }
        }
        board
            .founded_chains()
            .iter()
            .copied()
            .find(|id| board.chain(*id).name == name)
            .unwrap()
    }

    fn found_row(board: &mut GameBoard, player: &mut Player, row: usize, from: usize, to: usize, name: &str) -> ChainId {
        let tiles: Vec<(usize, usize)> = (from..=to).map(|col| (row, col)).collect();
        found(board, player, &tiles, name)
    }

    #[test]
    fn test_new_game_board() {
        let game_board = GameBoard::new(&GameConfig::default());
        assert_eq!(game_board.cells.len(), BOARD_ROWS);
        assert_eq!(game_board.cells[0].len(), BOARD_COLS);
        assert_eq!(game_board.unfounded_chains().len(), 7);
        assert!(game_board.founded_chains().is_empty());
    }

    #[test]
    fn test_get_cell_state() {
        let game_board = GameBoard::new(&GameConfig::default());
        assert_eq!(game_board.get_cell_state(0, 0), Cell::Empty);
        assert_eq!(game_board.get_cell_state(BOARD_ROWS, 0), Cell::Empty);
    }

    #[test]
    fn test_lone_tile_is_independent() {
        let mut board = GameBoard::new(&GameConfig::default());
        assert_eq!(place(&mut board, 0, 0), PlaceTileResult::Placed);
        assert_eq!(board.get_cell_state(0, 0), Cell::Independent);
        assert_eq!(board.played_tiles(), &[Tile::from((0, 0))]);
    }

    #[test]
    fn test_is_tile_playable() {
        let mut board = GameBoard::new(&GameConfig::default());
        assert_eq!(
            board.is_tile_playable(Tile::from((BOARD_ROWS, BOARD_COLS))),
            Err(CellNotPlayableReason::CellIsOffBoard)
        );
        assert_eq!(board.is_tile_playable(Tile::from((0, 0))), Ok(()));

        place(&mut board, 0, 0);
        assert_eq!(
            board.place_tile(Tile::from((0, 0)), no_holders),
            Err(AcquireError::InvalidPlacement(CellNotPlayableReason::CellIsNotEmpty))
        );
        assert_eq!(board.played_tiles().len(), 1);

        place(&mut board, 0, 1);
        assert!(board.founding_pending());
        assert_eq!(
            board.is_tile_playable(Tile::from((5, 5))),
            Err(CellNotPlayableReason::ResolutionPending)
        );
    }

    #[test]
    fn test_founding() {
        let mut board = GameBoard::new(&GameConfig::default());
        let mut player = Player::new(PlayerId(0), "Alice", 6000);

        assert_eq!(place(&mut board, 3, 3), PlaceTileResult::Placed);
        assert_eq!(place(&mut board, 4, 4), PlaceTileResult::Placed);
        assert_eq!(place(&mut board, 3, 4), PlaceTileResult::FoundingPending);
        assert_eq!(board.founder().unwrap().tiles().len(), 3);
        // nothing is tagged until the chain is named
        assert_eq!(board.get_chain_at(Tile::from((3, 3))), None);

        assert_eq!(
            board.found_chain("Luxor", &mut player),
            Err(AcquireError::UnknownChainName("Luxor".to_string()))
        );
        assert!(board.founding_pending());

        let tower = board.found_chain("Tower", &mut player).unwrap();
        assert!(!board.founding_pending());
        assert_eq!(board.chain(tower).size(), 3);
        assert_eq!(board.founded_chains(), &[tower]);
        assert!(!board.unfounded_chains().contains(&tower));
        assert_eq!(board.get_chain_at(Tile::from((4, 4))), Some(tower));
        assert_eq!(player.shares_in(tower), 1);
        assert_eq!(board.chain(tower).unsold_stock(), 24);

        assert_eq!(
            board.found_chain("Festival", &mut player),
            Err(AcquireError::NoPendingFounder)
        );
    }

    #[test]
    fn test_founding_without_stock_left() {
        let config = GameConfig::builder().stock_pool_size(0).build();
        let mut board = GameBoard::new(&config);
        let mut player = Player::new(PlayerId(0), "Alice", 6000);
        let chain = found_row(&mut board, &mut player, 0, 0, 1, "Sackson");
        assert_eq!(player.shares_in(chain), 0);
    }

    #[test]
    fn test_chain_grows_over_clump() {
        let mut board = GameBoard::new(&GameConfig::default());
        let mut player = Player::new(PlayerId(0), "Alice", 6000);
        let continental = found_row(&mut board, &mut player, 0, 0, 1, "Continental");
        place(&mut board, 0, 3);
        place(&mut board, 1, 2);

        assert_eq!(place(&mut board, 0, 2), PlaceTileResult::ChainGrew(continental));
        assert_eq!(board.chain(continental).size(), 5);
        for tile in board.clump_of(Tile::from((0, 0))) {
            assert_eq!(board.get_chain_at(tile), Some(continental));
            assert!(board.chain(continental).tiles().contains(&tile));
        }
    }

    #[test]
    fn test_no_chain_left_to_found() {
        let config = GameConfig::builder()
            .chains(vec![ChainSpec::new("Tower", Tier::Luxury)])
            .build();
        let mut board = GameBoard::new(&config);
        let mut player = Player::new(PlayerId(0), "Alice", 6000);
        found_row(&mut board, &mut player, 0, 0, 1, "Tower");

        place(&mut board, 5, 5);
        assert_eq!(
            board.is_tile_playable(Tile::from((5, 6))),
            Err(CellNotPlayableReason::ChainsAreAllActive)
        );
        assert!(!board.move_is_legal(Tile::from((5, 6))));
        // growing the existing chain is still fine
        assert!(board.move_is_legal(Tile::from((0, 2))));
        // so is a lone tile
        assert!(board.move_is_legal(Tile::from((8, 8))));
    }

    #[test]
    fn test_merger_queue() {
        let mut board = GameBoard::new(&GameConfig::default());
        let mut player = Player::new(PlayerId(0), "Alice", 6000);
        let worldwide = found(&mut board, &mut player, &[(0, 4), (1, 4), (2, 4), (3, 4)], "Worldwide");
        let sackson = found(&mut board, &mut player, &[(4, 2), (4, 3)], "Sackson");
        let festival = found(&mut board, &mut player, &[(4, 6), (4, 5), (4, 7)], "Festival");
        assert_eq!(board.chain(worldwide).size(), 4);
        assert_eq!(board.chain(festival).size(), 3);

        let holders = |chain: ChainId| vec![PlayerId(chain.0)];
        assert_eq!(
            board.place_tile(Tile::from((4, 4)), holders),
            Ok(PlaceTileResult::MergersPending(2))
        );
        assert_eq!(board.pending_mergers(), 2);

        // largest acquired chain first
        let merger = board.current_merger().unwrap();
        assert_eq!(merger.acquiring_chain(), worldwide);
        assert_eq!(merger.acquired_chain(), festival);
        assert_eq!(merger.shareholders(), &[PlayerId(festival.0)]);
        assert_eq!(board.mergers[1].acquiring_chain(), worldwide);
        assert_eq!(board.mergers[1].acquired_chain(), sackson);

        assert_eq!(
            board.is_tile_playable(Tile::from((8, 8))),
            Err(CellNotPlayableReason::ResolutionPending)
        );
    }

    #[test]
    fn test_ranking_ties_follow_founding_order() {
        let mut board = GameBoard::new(&GameConfig::default());
        let mut player = Player::new(PlayerId(0), "Alice", 6000);
        let imperial = found_row(&mut board, &mut player, 0, 0, 1, "Imperial");
        let american = found_row(&mut board, &mut player, 0, 3, 4, "American");

        assert_eq!(place(&mut board, 0, 2), PlaceTileResult::MergersPending(1));
        let merger = board.current_merger().unwrap();
        assert_eq!(merger.acquiring_chain(), imperial);
        assert_eq!(merger.acquired_chain(), american);
    }

    #[test]
    fn test_safe_chain_cannot_be_acquired() {
        let mut board = GameBoard::new(&GameConfig::default());
        let mut player = Player::new(PlayerId(0), "Alice", 6000);
        found_row(&mut board, &mut player, 0, 0, 10, "Tower");
        let festival = found_row(&mut board, &mut player, 2, 0, 10, "Festival");

        assert_eq!(
            board.is_tile_playable(Tile::from((1, 0))),
            Err(CellNotPlayableReason::AdjacentChainsAreSafe)
        );
        assert_eq!(
            board.place_tile(Tile::from((1, 0)), no_holders),
            Err(AcquireError::InvalidPlacement(CellNotPlayableReason::AdjacentChainsAreSafe))
        );
        assert_eq!(board.get_cell_state(1, 0), Cell::Empty);
        assert_eq!(board.played_tiles().len(), 22);

        // a safe chain may still acquire a small one
        let sackson = found_row(&mut board, &mut player, 4, 0, 1, "Sackson");
        assert_eq!(place(&mut board, 3, 0), PlaceTileResult::MergersPending(1));
        let merger = board.current_merger().unwrap();
        assert_eq!(merger.acquiring_chain(), festival);
        assert_eq!(merger.acquired_chain(), sackson);
    }

    #[test]
    fn test_merge_chains() {
        let mut board = GameBoard::new(&GameConfig::default());
        let mut alice = Player::new(PlayerId(0), "Alice", 6000);
        let tower = found_row(&mut board, &mut alice, 0, 0, 2, "Tower");
        let sackson = found_row(&mut board, &mut alice, 0, 4, 5, "Sackson");
        let mut players = vec![alice];

        board
            .place_tile(Tile::from((0, 3)), |_| vec![PlayerId(0)])
            .unwrap();
        assert_eq!(
            board.merge_chains(),
            Err(AcquireError::MergerOutOfOrder(MergerPhase::Created))
        );

        board.give_shareholder_bonus(&mut players).unwrap();
        assert_eq!(board.merge_chains(), Err(AcquireError::DecisionsPending));

        board.sell_stock(&mut players).unwrap();
        board.go_to_next_merging_player().unwrap();
        let merger = board.merge_chains().unwrap();
        assert_eq!(merger.phase(), MergerPhase::TilesMerged);

        assert!(!board.merge_pending());
        assert_eq!(board.chain(tower).size(), 6);
        assert_eq!(board.chain(sackson).size(), 0);
        assert_eq!(board.founded_chains(), &[tower]);
        assert!(board.unfounded_chains().contains(&sackson));
        for col in 0..6 {
            assert_eq!(board.get_chain_at(Tile::from((0, col))), Some(tower));
        }
        assert_eq!(board.merge_chains().unwrap_err(), AcquireError::NoPendingMerger);

        // the acquired chain can be founded again under its name
        found_row(&mut board, &mut players[0], 5, 5, 6, "Sackson");
        assert_eq!(board.chain(sackson).size(), 2);
    }

    #[test]
    fn test_kept_shares_survive_refounding() {
        let mut board = GameBoard::new(&GameConfig::default());
        let mut alice = Player::new(PlayerId(0), "Alice", 6000);
        found_row(&mut board, &mut alice, 0, 0, 2, "Tower");
        let sackson = found_row(&mut board, &mut alice, 0, 4, 5, "Sackson");
        let mut players = vec![alice];

        board
            .place_tile(Tile::from((0, 3)), |_| vec![PlayerId(0)])
            .unwrap();
        board.give_shareholder_bonus(&mut players).unwrap();
        // keep the share
        board.go_to_next_merging_player().unwrap();
        board.merge_chains().unwrap();

        found_row(&mut board, &mut players[0], 5, 5, 6, "Sackson");
        assert_eq!(players[0].shares_in(sackson), 2);
        assert_eq!(board.chain(sackson).issued_stock(), 2);
        assert_eq!(board.chain(sackson).unsold_stock(), 23);
    }

    // places tiles without ever naming a chain
    fn place_unclaimed(board: &mut GameBoard, tiles: &[Tile]) {
        for tile in tiles {
            board.place_tile(*tile, no_holders).unwrap();
            board.founder = None;
        }
    }

    #[test]
    fn test_clump_of() {
        let mut board = GameBoard::new(&GameConfig::default());
        place_unclaimed(
            &mut board,
            &[(0, 0).into(), (0, 1).into(), (1, 1).into(), (3, 3).into()],
        );

        let mut clump = board.clump_of(Tile::from((1, 1)));
        clump.sort();
        assert_eq!(clump, vec![Tile::from((0, 0)), Tile::from((0, 1)), Tile::from((1, 1))]);
        assert_eq!(board.clump_of(Tile::from((3, 3))), vec![Tile::from((3, 3))]);
        assert!(board.clump_of(Tile::from((5, 5))).is_empty());
    }

    // a straight run of tiles leading away from (4, 6): up, down, left or right
    fn arm(direction: usize, length: usize) -> Vec<(usize, usize)> {
        (1..=length)
            .map(|step| match direction {
                0 => (4 - step, 6),
                1 => (4 + step, 6),
                2 => (4, 6 - step),
                _ => (4, 6 + step),
            })
            .collect()
    }

    fn connected_shape() -> impl Strategy<Value = Vec<Tile>> {
        walk(Tile::from((4, 6)), 0)
    }

    // every step of a walk touches the previous tile; rows above `min_row`
    // are never entered
    fn walk(start: Tile, min_row: usize) -> impl Strategy<Value = Vec<Tile>> {
        prop::collection::vec(0..4usize, 1..20).prop_map(move |steps| {
            let mut tile = start;
            let mut shape = vec![tile];
            for step in steps {
                let (row, col) = neighbor_coordinates(tile.row, tile.col)[step];
                if row >= min_row && row < BOARD_ROWS && col < BOARD_COLS {
                    tile = Tile::from((row, col));
                    if !shape.contains(&tile) {
                        shape.push(tile);
                    }
                }
            }
            shape
        })
    }

    proptest! {
        #[test]
        fn clump_is_independent_of_insertion_order(
            (shape, order) in connected_shape().prop_flat_map(|shape| {
                let len = shape.len();
                (Just(shape), Just((0..len).collect::<Vec<usize>>()).prop_shuffle())
            })
        ) {
            let mut board = GameBoard::new(&GameConfig::default());
            let tiles: Vec<Tile> = order.iter().map(|index| shape[*index]).collect();
            place_unclaimed(&mut board, &tiles);

            let mut expected = shape.clone();
            expected.sort();
            for tile in &shape {
                let mut clump = board.clump_of(*tile);
                clump.sort();
                prop_assert_eq!(&clump, &expected);
            }
        }

        #[test]
        fn chain_grows_by_the_whole_clump(shape in walk(Tile::from((2, 6)), 2)) {
            let mut board = GameBoard::new(&GameConfig::default());
            let mut player = Player::new(PlayerId(0), "Alice", 6000);
            let tower = found_row(&mut board, &mut player, 0, 0, BOARD_COLS - 1, "Tower");
            place_unclaimed(&mut board, &shape);

            // (1, 6) joins the row of tower to the loose shape below it
            let bridge = Tile::from((1, 6));
            prop_assert_eq!(
                board.place_tile(bridge, no_holders),
                Ok(PlaceTileResult::ChainGrew(tower))
            );

            let clump = board.clump_of(bridge);
            prop_assert_eq!(clump.len(), BOARD_COLS + 1 + shape.len());
            prop_assert_eq!(board.chain(tower).size(), clump.len());
            for tile in &clump {
                prop_assert_eq!(board.get_chain_at(*tile), Some(tower));
            }
        }

        #[test]
        fn one_merger_per_acquired_chain(
            directions in prop::sample::subsequence(vec![0usize, 1, 2, 3], 2..=4),
            lengths in prop::collection::vec(2..=4usize, 4),
        ) {
            let config = GameConfig::default();
            let mut board = GameBoard::new(&config);
            let mut player = Player::new(PlayerId(0), "Alice", 6000);
            let chains: Vec<ChainId> = directions
                .iter()
                .zip(&config.chains)
                .map(|(direction, spec)| {
                    found(&mut board, &mut player, &arm(*direction, lengths[*direction]), &spec.name)
                })
                .collect();

            prop_assert_eq!(
                board.place_tile(Tile::from((4, 6)), no_holders),
                Ok(PlaceTileResult::MergersPending(chains.len() - 1))
            );
            prop_assert_eq!(board.pending_mergers(), chains.len() - 1);

            let acquiring = board.mergers[0].acquiring_chain();
            let largest = chains.iter().map(|id| board.chain(*id).size()).max();
            prop_assert_eq!(Some(board.chain(acquiring).size()), largest);

            let mut acquired = Vec::new();
            for merger in &board.mergers {
                prop_assert_eq!(merger.acquiring_chain(), acquiring);
                acquired.push(merger.acquired_chain());
            }
            acquired.sort();
            let mut others: Vec<ChainId> = chains.iter().copied().filter(|id| *id != acquiring).collect();
            others.sort();
            prop_assert_eq!(acquired, others);
        }
    }
}
