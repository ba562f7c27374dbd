//! Command-line interface for mindmatch.

use clap::{Parser, Subcommand};

/// MindMatch - group words by their hidden connections
#[derive(Parser, Debug)]
#[command(name = "mindmatch")]
#[command(about = "Connections-style word puzzle powered by an LLM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to game configuration file (defaults are used if missing)
        #[arg(short, long, default_value = "mindmatch.toml")]
        config: std::path::PathBuf,

        /// Topic of the first puzzle
        #[arg(short, long)]
        topic: Option<String>,

        /// Serve puzzles from a JSON file instead of an LLM
        #[arg(long)]
        puzzle_file: Option<std::path::PathBuf>,

        /// Seed for reproducible shuffles
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List the configured topics
    Topics {
        /// Path to game configuration file
        #[arg(short, long, default_value = "mindmatch.toml")]
        config: std::path::PathBuf,
    },
}
