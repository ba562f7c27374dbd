//! MindMatch - terminal front end
//!
//! Loads configuration, picks a puzzle provider and runs the play loop.

#![warn(missing_docs)]

mod cli;
mod terminal;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use mindmatch::{
    FilePuzzleProvider, GameConfig, GameController, GameMachine, LlmClient, LlmPuzzleProvider,
    PuzzleProvider,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            topic,
            puzzle_file,
            seed,
        } => run_play(&config, topic, puzzle_file, seed).await,
        Command::Topics { config } => {
            let config = load_config(&config)?;
            for topic in config.topics() {
                println!("{}", topic);
            }
            Ok(())
        }
    }
}

/// Loads the config file, falling back to defaults when it does not exist.
#[instrument(fields(path = %path.display()))]
fn load_config(path: &Path) -> Result<GameConfig> {
    if !path.exists() {
        info!("No config file, using defaults");
        return Ok(GameConfig::default());
    }
    GameConfig::from_file(path).context("Failed to load game config")
}

/// Runs the interactive game.
#[instrument(skip_all)]
async fn run_play(
    config_path: &Path,
    topic: Option<String>,
    puzzle_file: Option<std::path::PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(topic) = topic {
        config = config.with_default_topic(topic);
    }

    let provider: Arc<dyn PuzzleProvider> = match puzzle_file {
        Some(path) => {
            info!(path = %path.display(), "Using puzzle file");
            Arc::new(FilePuzzleProvider::new(path))
        }
        None => {
            let llm_config = config
                .create_llm_config()
                .context("Cannot reach an LLM; pass --puzzle-file to play offline")?;
            let client = LlmClient::new(llm_config)?;
            Arc::new(LlmPuzzleProvider::new(client))
        }
    };

    let machine = GameMachine::from_config(&config, seed);
    let controller = GameController::new(machine, provider);

    if let Err(e) = terminal::run(&controller, config.topics()).await {
        warn!(error = %e, "Play loop ended with error");
        return Err(e);
    }
    Ok(())
}
