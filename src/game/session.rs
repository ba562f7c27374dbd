//! The authoritative session aggregate.

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::instrument;

use super::Selection;
use crate::puzzle::{Category, PUZZLE_SIZE, RawPuzzle, WORD_COUNT, WordEntry, WordId};

/// Mistakes allowed per puzzle unless configured otherwise.
pub const MAX_LIVES: u8 = 4;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameStatus {
    /// Nothing loaded yet, or the last load failed.
    #[default]
    Idle,
    /// A puzzle request is in flight.
    Loading,
    /// Accepting selections and guesses.
    Playing,
    /// Every category solved.
    Won,
    /// Out of lives.
    Lost,
}

/// A roster entry paired with its derived selection flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordView<'a> {
    /// The underlying word.
    pub entry: &'a WordEntry,
    /// Whether the word is in the current selection.
    pub is_selected: bool,
}

/// Everything the presentation layer needs to render a game.
///
/// Mutated only by [`GameMachine`](super::GameMachine) and the guess
/// evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) status: GameStatus,
    pub(crate) active_words: Vec<WordEntry>,
    pub(crate) solved: Vec<Category>,
    pub(crate) lives: u8,
    pub(crate) max_lives: u8,
    pub(crate) topic: String,
    pub(crate) last_error: Option<String>,
    pub(crate) selection: Selection,
    pub(crate) puzzle: Option<RawPuzzle>,
}

impl Session {
    /// Creates an idle session holding `topic`.
    #[instrument(skip(topic))]
    pub fn new(topic: impl Into<String>, max_lives: u8) -> Self {
        let max_lives = max_lives.max(1);
        Self {
            status: GameStatus::Idle,
            active_words: Vec::new(),
            solved: Vec::new(),
            lives: max_lives,
            max_lives,
            topic: topic.into(),
            last_error: None,
            selection: Selection::new(),
            puzzle: None,
        }
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Unsolved words in board order.
    pub fn active_words(&self) -> &[WordEntry] {
        &self.active_words
    }

    /// Solved categories in solve order.
    pub fn solved_categories(&self) -> &[Category] {
        &self.solved
    }

    /// Remaining mistakes.
    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// Lives at the start of a puzzle.
    pub fn max_lives(&self) -> u8 {
        self.max_lives
    }

    /// Topic of the current or next puzzle.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// User-facing message from the last failed load.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns true if `id` is in the current selection.
    pub fn is_selected(&self, id: WordId) -> bool {
        self.selection.contains(id)
    }

    /// Board view: every active word with its selection flag.
    pub fn board(&self) -> Vec<WordView<'_>> {
        self.active_words
            .iter()
            .map(|entry| WordView {
                entry,
                is_selected: self.selection.contains(*entry.id()),
            })
            .collect()
    }

    /// Looks up an active word.
    pub fn word(&self, id: WordId) -> Option<&WordEntry> {
        self.active_words.iter().find(|w| *w.id() == id)
    }

    /// Description the provider gave for `category_name`, if any.
    pub fn description_of(&self, category_name: &str) -> String {
        self.puzzle
            .as_ref()
            .and_then(|p| p.categories.iter().find(|c| c.name == category_name))
            .map(|c| c.description.clone())
            .unwrap_or_default()
    }

    /// Checks the roster/solved accounting while a puzzle is on the board.
    pub fn is_consistent(&self) -> bool {
        match self.status {
            GameStatus::Playing | GameStatus::Won => {
                self.active_words.len() + PUZZLE_SIZE * self.solved.len() == WORD_COUNT
                    && self.lives <= self.max_lives
                    && (self.status == GameStatus::Won) == self.active_words.is_empty()
            }
            GameStatus::Lost => self.lives == 0,
            GameStatus::Idle | GameStatus::Loading => {
                self.active_words.is_empty() && self.selection.is_empty()
            }
        }
    }

    /// Clears the board for a new puzzle and enters `loading`.
    pub(crate) fn reset_for_load(&mut self, topic: String) {
        self.status = GameStatus::Loading;
        self.active_words.clear();
        self.solved.clear();
        self.lives = self.max_lives;
        self.topic = topic;
        self.last_error = None;
        self.selection.clear();
        self.puzzle = None;
    }
}
