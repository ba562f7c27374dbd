//! MindMatch library - a Connections-style word grouping puzzle
//!
//! An LLM generates four hidden categories of four words each; the player
//! selects four words at a time and submits guesses until every group is
//! solved or the mistake budget runs out.
//!
//! # Architecture
//!
//! - **Puzzle**: provider output, validation, assembly and shuffling
//! - **Game**: session state, selection, guess evaluation, state machine
//! - **LLM client**: OpenAI, Anthropic and Gemini backends
//! - **Config**: TOML settings and API key lookup
//!
//! # Example
//!
//! ```no_run
//! use mindmatch::{FilePuzzleProvider, GameMachine, GameStatus};
//!
//! # async fn example() {
//! let provider = FilePuzzleProvider::new("puzzles/sample.json");
//! let mut machine = GameMachine::new("History", 4);
//! let session = machine.start_game(&provider, "History").await;
//! assert_eq!(session.status(), GameStatus::Playing);
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod error;
mod game;
mod puzzle;

/// LLM API clients.
pub mod llm_client;

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_TOPICS, GameConfig};

// Crate-level exports - Errors
pub use error::{GameError, ProviderError};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Puzzle data and providers
pub use puzzle::{
    Category, CategoryColor, FilePuzzleProvider, LlmPuzzleProvider, PUZZLE_SIZE, PuzzleProvider,
    RawCategory, RawPuzzle, SYSTEM_PROMPT, WORD_COUNT, WordEntry, WordId, assemble,
    parse_puzzle_response, puzzle_prompt, puzzle_response_schema, shuffle_words, validate,
};

// Crate-level exports - Game state machine
pub use game::{
    Evaluation, GameController, GameEvent, GameMachine, GameStatus, GuessOutcome, LoadResolution,
    LoadTicket, MAX_LIVES, SELECTION_LIMIT, Selection, Session, WordView, evaluate, is_one_away,
};
