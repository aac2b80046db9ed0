use std::io::Result;

use crossterm::event::{self, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{
        block::{Position, Title},
        Block, BorderType, Borders, Paragraph,
    },
    Frame,
};
use tracing::debug;

use acquire_rules::logic::{
    acquire_constants::{BOARD_COLS, BOARD_ROWS},
    acquire_game::AcquireGame,
    acquire_request::AcquireRequest,
    acquire_response::{AcquireResponse, BuyStockChoice, DisposeStockChoice},
    chain::ChainId,
    game_board::Cell,
    tile::Tile,
};

const CHAIN_COLORS: [Color; 7] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::LightRed,
];

const CHAIN_KEYS: &str = "abcdefg";

struct InnerRects {
    game_board: Rect,
    stocks: Rect,
    available_tiles: Rect,
    cash: Rect,
}

#[derive(typed_builder::TypedBuilder)]
pub struct TuiApp {
    cell_width: u16,
    cell_height: u16,
    acquire_game: AcquireGame,
    #[builder(default)]
    exit: bool,
    // last rejected command
    #[builder(default)]
    status: String,
}

fn chain_color(chain: ChainId) -> Color {
    CHAIN_COLORS[chain.0 % CHAIN_COLORS.len()]
}

fn chain_key_index(key: char) -> Option<usize> {
    CHAIN_KEYS.find(key)
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(Title::from(title.bold()).alignment(Alignment::Center))
        .borders(Borders::ALL)
        .border_set(border::THICK)
        .border_type(BorderType::Rounded)
}

impl TuiApp {
    pub fn run(&mut self, terminal: &mut super::tui::Tui) -> Result<()> {
        while !self.exit {
            terminal.draw(|frame| self.render_frame(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn render_frame(&self, frame: &mut Frame) {
        let inner_rects = self.split_rects(frame.size());
        self.render_game_board(inner_rects.game_board, frame);
        self.render_stocks(inner_rects.stocks, frame);
        self.render_available_tiles(inner_rects.available_tiles, frame);
        self.render_cash(inner_rects.cash, frame);
    }

    fn handle_events(&mut self) -> Result<()> {
        if let event::Event::Key(event) = event::read()? {
            if event.kind != KeyEventKind::Press {
                return Ok(());
            }
            match event.code {
                KeyCode::Char('q') => self.exit = true,
                KeyCode::Char(key) => {
                    if let Some(response) = self.response_for(key) {
                        debug!(?response, "key mapped");
                        self.status = match self.acquire_game.respond(response) {
                            Ok(()) => String::new(),
                            Err(err) => err.to_string(),
                        };
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Maps a key press to an answer for whatever the game is waiting on.
    fn response_for(&self, key: char) -> Option<AcquireResponse> {
        match (self.acquire_game.request(), key) {
            (AcquireRequest::PlayTile(_), '1'..='9') => {
                key.to_digit(10).map(|digit| AcquireResponse::Tile(digit as usize - 1))
            }
            (AcquireRequest::PlayTile(_), 'x') => Some(AcquireResponse::ReplaceHand),
            (AcquireRequest::PlayTile(_), 's') => Some(AcquireResponse::SkipTile),
            (AcquireRequest::ChooseNewChain(_), key) => {
                let index = chain_key_index(key)?;
                let chains = self.acquire_game.unfounded_chains();
                chains
                    .get(index)
                    .map(|chain| AcquireResponse::NewChain(chain.name.clone()))
            }
            (AcquireRequest::DisposeStock(_), 's') => {
                Some(AcquireResponse::DisposeStock(DisposeStockChoice::Sell))
            }
            (AcquireRequest::DisposeStock(_), 't') => {
                Some(AcquireResponse::DisposeStock(DisposeStockChoice::Trade))
            }
            (AcquireRequest::DisposeStock(_), 'k') => {
                Some(AcquireResponse::DisposeStock(DisposeStockChoice::Keep))
            }
            (AcquireRequest::FinalizeMerger, 'm') => Some(AcquireResponse::FinalizeMerger),
            (AcquireRequest::BuyStock(_), 'p') => {
                Some(AcquireResponse::BuyStock(BuyStockChoice::Pass))
            }
            (AcquireRequest::BuyStock(_), key) if chain_key_index(key).is_some() => {
                chain_key_index(key).map(|index| AcquireResponse::BuyStock(BuyStockChoice::Buy(index)))
            }
            (AcquireRequest::PlayTile(_) | AcquireRequest::BuyStock(_), 'E') => {
                Some(AcquireResponse::EndGame)
            }
            _ => None,
        }
    }

    fn prompt(&self) -> String {
        let game = &self.acquire_game;
        let name = |id| game.player(id).name.clone();
        match game.request() {
            AcquireRequest::AddPlayers => "Waiting for players".to_string(),
            AcquireRequest::PlayTile(id) => {
                format!(
                    "{}: place a tile [1-{}], x new hand, s skip, E end game",
                    name(id),
                    game.config().hand_size
                )
            }
            AcquireRequest::ChooseNewChain(id) => format!("{}: pick a chain to found", name(id)),
            AcquireRequest::DisposeStock(id) => {
                let chain = game
                    .current_merger()
                    .map(|merger| game.board().chain(merger.acquired_chain()).name.clone())
                    .unwrap_or_default();
                format!(
                    "{}: {} {} shares at ${}, s sell, t trade 2:1, k keep",
                    name(id),
                    game.merging_player_stock_amount().unwrap_or(0),
                    chain,
                    game.merging_stock_price().unwrap_or(0),
                )
            }
            AcquireRequest::FinalizeMerger => "m to finish the merger".to_string(),
            AcquireRequest::BuyStock(id) => format!(
                "{}: buy stock ({} left), p pass, E end game",
                name(id),
                game.stock_left_to_buy()
            ),
            AcquireRequest::EndGame => match game.standings().first() {
                Some(winner) => format!("Game over, {} wins with ${}. q to quit", winner.name, winner.cash),
                None => "Game over. q to quit".to_string(),
            },
        }
    }

    fn split_rects(&self, rect: Rect) -> InnerRects {
        let stock_width = (self.cell_width * 6).min(rect.width);
        let available_tiles_height = (self.cell_height * 2).min(rect.height);
        let game_board_width = rect.width - stock_width;
        let game_board_height = rect.height - available_tiles_height;

        let stocks = Rect {
            x: rect.right() - stock_width,
            y: rect.y,
            width: stock_width,
            height: game_board_height,
        };

        let available_tiles = Rect {
            x: rect.x,
            y: rect.bottom() - available_tiles_height,
            width: game_board_width,
            height: available_tiles_height,
        };

        let game_board = Rect {
            x: rect.x,
            y: rect.y,
            width: game_board_width,
            height: game_board_height,
        };

        let cash = Rect {
            x: game_board.right(),
            y: game_board.bottom(),
            width: rect.width - game_board_width,
            height: available_tiles_height,
        };

        InnerRects {
            game_board,
            stocks,
            available_tiles,
            cash,
        }
    }

    fn render_game_board(&self, area: Rect, frame: &mut Frame) {
        let mut block = panel(" acTUIre ").title(
            Title::from(self.prompt())
                .position(Position::Bottom)
                .alignment(Alignment::Center),
        );
        if !self.status.is_empty() {
            block = block.title(
                Title::from(Span::styled(self.status.as_str(), Style::default().fg(Color::Red)))
                    .position(Position::Top)
                    .alignment(Alignment::Right),
            );
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cell_width = self.cell_width;
        let cell_height = self.cell_height;
        let padding = 1;

        let grid_width = (cell_width * BOARD_COLS as u16 + 2 * padding).min(inner.width);
        let grid_height = (cell_height * BOARD_ROWS as u16 + 2 * padding).min(inner.height);

        let row_constraints = vec![Constraint::Length(cell_height); BOARD_ROWS];
        let col_constraints = vec![Constraint::Length(cell_width); BOARD_COLS];

        let board_rect = Rect {
            x: inner.x + (inner.width - grid_width) / 2,
            y: inner.y + (inner.height - grid_height) / 2,
            width: grid_width,
            height: grid_height,
        };

        let board_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        frame.render_widget(board_block, board_rect);

        let row_rects = Layout::default()
            .direction(Direction::Vertical)
            .vertical_margin(1)
            .constraints(row_constraints)
            .split(board_rect);

        for (r, row_rect) in row_rects.iter().enumerate() {
            let col_rects = Layout::default()
                .direction(Direction::Horizontal)
                .horizontal_margin(1)
                .constraints(col_constraints.clone())
                .split(*row_rect);

            for (c, cell_rect) in col_rects.iter().enumerate() {
                let tile: Tile = (r, c).into();
                let style = self.get_cell_style(self.acquire_game.board().get_cell_state(r, c));

                // the label line and the two borders are never padded
                let num_pad_lines = (cell_height as usize).saturating_sub(3);
                let text = std::iter::repeat(String::new())
                    .take(num_pad_lines / 2)
                    .chain(std::iter::once(tile.to_string()))
                    .collect::<Vec<_>>()
                    .join("\n");

                let cell_text = Paragraph::new(text)
                    .block(self.get_cell_block(style))
                    .style(style)
                    .alignment(Alignment::Center);
                frame.render_widget(cell_text, *cell_rect);
            }
        }
    }

    fn get_cell_block(&self, style: Style) -> Block {
        Block::default()
            .borders(Borders::ALL)
            .style(style)
            .border_type(BorderType::Rounded)
    }

    fn get_cell_style(&self, cell: Cell) -> Style {
        match cell {
            Cell::Empty => Style::default().fg(Color::DarkGray).bg(Color::Black),
            Cell::Independent => Style::default().fg(Color::Black).bg(Color::Gray),
            Cell::Chain(chain) => Style::default()
                .fg(Color::Black)
                .bg(chain_color(chain))
                .add_modifier(Modifier::BOLD),
        }
    }

    fn render_stocks(&self, area: Rect, frame: &mut Frame) {
        let game = &self.acquire_game;
        let founding = matches!(game.request(), AcquireRequest::ChooseNewChain(_));
        let (title, ids) = match founding {
            true => (" Found a Chain ", game.board().unfounded_chains()),
            false => (" Stocks ", game.board().founded_chains()),
        };

        let holdings = game
            .current_player()
            .map(|player| player.stock_profile())
            .unwrap_or_default();

        let lines = ids
            .iter()
            .zip(CHAIN_KEYS.chars())
            .map(|(id, key)| {
                let chain = game.board().chain(*id);
                let mut spans = vec![
                    Span::raw(format!("{}) ", key)),
                    Span::styled(chain.name.clone(), Style::default().fg(chain_color(*id)).add_modifier(Modifier::BOLD)),
                ];
                match founding {
                    true => spans.push(Span::raw(format!(" ({})", chain.tier))),
                    false => {
                        spans.push(Span::raw(format!(
                            " {} tiles ${} {} left, own {}",
                            chain.size(),
                            chain.stock_price(),
                            chain.unsold_stock(),
                            holdings.get(id).copied().unwrap_or(0),
                        )));
                        if chain.is_safe() {
                            spans.push(Span::styled(" safe", Style::default().add_modifier(Modifier::ITALIC)));
                        }
                    }
                }
                Line::from(spans)
            })
            .collect::<Vec<_>>();

        frame.render_widget(Paragraph::new(Text::from(lines)).block(panel(title)), area);
    }

    fn render_available_tiles(&self, area: Rect, frame: &mut Frame) {
        let game = &self.acquire_game;
        let tiles = game.current_player().map(|player| player.tiles.clone()).unwrap_or_default();

        let spans = tiles
            .iter()
            .enumerate()
            .flat_map(|(index, tile)| {
                let style = match game.board().move_is_legal(*tile) {
                    true => Style::default().add_modifier(Modifier::BOLD),
                    false => Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                };
                [
                    Span::raw(format!(" {}:", index + 1)),
                    Span::styled(tile.to_string(), style),
                ]
            })
            .collect::<Vec<_>>();

        let title = format!(" Tiles ({} to draw) ", game.tiles_left_to_draw());
        frame.render_widget(
            Paragraph::new(Line::from(spans)).centered().block(panel(&title)),
            area,
        );
    }

    fn render_cash(&self, area: Rect, frame: &mut Frame) {
        let game = &self.acquire_game;
        let current = game.current_player().map(|player| player.id);

        let lines = game
            .players()
            .iter()
            .map(|player| {
                let style = match Some(player.id) == current {
                    true => Style::default().add_modifier(Modifier::BOLD),
                    false => Style::default(),
                };
                Line::styled(format!("{} ${}", player.name, player.cash), style)
            })
            .collect::<Vec<_>>();

        frame.render_widget(Paragraph::new(Text::from(lines)).centered().block(panel(" Cash ")), area);
    }
}
