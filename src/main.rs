use std::{fs::File, io::Result, path::PathBuf, sync::Arc};

use acquire_rules::logic::{acquire_game::AcquireGame, config::GameConfig};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;
use visuals::{tui, tui_app::TuiApp};

mod visuals;

#[derive(Debug, structopt::StructOpt)]
struct Opt {
    /// the number of players
    #[structopt(short = "-p", long, default_value = "3")]
    players: usize,

    /// Seed for the tile shuffle, for replayable games.
    #[structopt(short = "-s", long)]
    seed: Option<u64>,

    /// Where to write the game log.
    #[structopt(short = "-l", long, default_value = "acquire-rules.log", parse(from_os_str))]
    log_file: PathBuf,

    /// The width of each cell.
    #[structopt(short = "-w", long, default_value = "6")]
    cell_width: u16,

    /// The height of each cell.
    #[structopt(short = "-H", long, default_value = "3")]
    cell_height: u16,
}

fn main() -> Result<()> {
    let Opt {
        players,
        seed,
        log_file,
        cell_width,
        cell_height,
    } = Opt::from_args();

    // the terminal belongs to the board, so logs go to a file
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("acquire_rules=info")),
        )
        .with_writer(Arc::new(File::create(&log_file)?))
        .with_ansi(false)
        .init();

    let config = match seed {
        Some(seed) => GameConfig::builder().seed(seed).build(),
        None => GameConfig::builder().build(),
    };
    info!(players, ?seed, "starting game");

    let mut acquire_game = AcquireGame::new(config);
    for n in 1..=players {
        acquire_game
            .add_player(&format!("Player {}", n))
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    }
    acquire_game
        .start_game()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

    let mut terminal = tui::init()?;
    let mut tui_app = TuiApp::builder()
        .cell_width(cell_width)
        .cell_height(cell_height)
        .acquire_game(acquire_game)
        .build();

    let app_result = tui_app.run(&mut terminal);
    tui::restore()?;

    app_result
}
