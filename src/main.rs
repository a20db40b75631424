//! Breakout entry point
//!
//! Parses the command line, sets up logging, and runs the game in the terminal.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use breakout::platform::TerminalFrontend;
use breakout::{Game, GameConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Brick breaker in the terminal")]
struct Args {
    /// JSON file overriding the default game configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the per-round ball color (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here instead of stderr, which the game screen covers
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => env_logger::init(),
    }
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("{} starting with seed {}", config.title, seed);

    let frontend = TerminalFrontend::new(&config).context("failed to initialise terminal")?;
    let mut game = Game::new(frontend, config, seed);
    let result = game.run();
    // Hand the terminal back before anything is reported on it
    drop(game);
    result.context("terminal I/O failed")
}
