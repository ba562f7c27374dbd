//! Error types for the puzzle core.

use derive_more::{Display, Error};
use tracing::{error, instrument};

use crate::game::GameStatus;
use crate::puzzle::WordId;

/// Failure reported by a puzzle provider.
///
/// Opaque to the game core: any provider failure ends up as a
/// user-facing message on the session, never as a crash.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Provider error: {} at {}:{}", message, file, line)]
pub struct ProviderError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ProviderError {
    /// Creates a new provider error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(error_message = %message, "Provider error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<crate::llm_client::LlmError> for ProviderError {
    #[track_caller]
    fn from(err: crate::llm_client::LlmError) -> Self {
        Self::new(err.message)
    }
}

/// Errors surfaced by the game core.
///
/// Expected game conditions (full selection, guessing while not ready,
/// acting outside `playing`) are no-ops and never produce one of these.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// The provider returned data that cannot form a 4×4 puzzle.
    #[display("Malformed puzzle: {}", _0)]
    MalformedPuzzle(#[error(not(source))] String),

    /// A guess was evaluated without exactly four selected words.
    #[display("A guess needs exactly 4 words, got {}", _0)]
    InvalidGuessSize(#[error(not(source))] usize),

    /// A guess named a word that is not on the board.
    #[display("Word {} is not on the board", _0)]
    UnknownWord(#[error(not(source))] WordId),

    /// A guess was evaluated against a session that is not `playing`.
    #[display("Cannot evaluate a guess while {}", _0)]
    NotPlaying(#[error(not(source))] GameStatus),

    /// The provider call itself failed.
    #[display("{}", _0)]
    Provider(ProviderError),
}

impl From<ProviderError> for GameError {
    fn from(err: ProviderError) -> Self {
        GameError::Provider(err)
    }
}

impl GameError {
    /// Message shown to the player when a puzzle cannot be loaded.
    pub fn user_message(&self) -> &'static str {
        match self {
            GameError::MalformedPuzzle(_) | GameError::Provider(_) => {
                "Failed to generate puzzle. Please try again."
            }
            GameError::InvalidGuessSize(_) | GameError::UnknownWord(_) => {
                "Select exactly 4 words before submitting."
            }
            GameError::NotPlaying(_) => "Start a new game to keep playing.",
        }
    }
}
