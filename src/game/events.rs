//! Domain events emitted by the state machine.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Something the presentation layer may want to react to.
///
/// Events are informational; the session is already updated when they are
/// recorded.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum GameEvent {
    /// A provider request was issued.
    #[display("Generating a puzzle about {}...", topic)]
    LoadStarted {
        /// Requested topic.
        topic: String,
        /// Generation tag of the request.
        generation: u64,
    },
    /// A puzzle arrived and is on the board.
    #[display("Puzzle ready: {}", topic)]
    PuzzleLoaded {
        /// Topic of the puzzle.
        topic: String,
    },
    /// The request failed or returned an unusable puzzle.
    #[display("{}", message)]
    LoadFailed {
        /// User-facing message.
        message: String,
    },
    /// A response arrived for a superseded request and was dropped.
    #[display("Discarded stale puzzle response")]
    StaleResponseDiscarded {
        /// Generation tag of the dropped response.
        generation: u64,
    },
    /// A category was solved.
    #[display("Solved: {}", name)]
    CategorySolved {
        /// Category name.
        name: String,
    },
    /// An incorrect guess cost a life.
    #[display("Not quite. {} mistakes remaining", lives_left)]
    Mistake {
        /// Lives remaining.
        lives_left: u8,
    },
    /// Three of the four guessed words shared a category.
    #[display("One away!")]
    OneAway,
    /// Every category is solved.
    #[display("You solved the puzzle!")]
    Won,
    /// No lives left.
    #[display("Game over. Better luck next time.")]
    Lost,
}
