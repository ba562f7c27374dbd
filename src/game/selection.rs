//! Selection of words for the next guess.

use tracing::{debug, instrument};

use crate::puzzle::{PUZZLE_SIZE, WordId};

/// Maximum number of words that can be selected at once.
pub const SELECTION_LIMIT: usize = PUZZLE_SIZE;

/// Ids of the words chosen for the next guess, in pick order.
///
/// This is the only record of selection; board views derive each word's
/// selected flag from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<WordId>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or removes `id`.
    ///
    /// Removing is always allowed. Adding to a full selection is ignored.
    #[instrument(skip(self), fields(id = %id, size = self.ids.len()))]
    pub fn toggle(&mut self, id: WordId) -> &Self {
        if let Some(index) = self.ids.iter().position(|selected| *selected == id) {
            self.ids.remove(index);
            debug!("Deselected word");
        } else if self.ids.len() < SELECTION_LIMIT {
            self.ids.push(id);
            debug!("Selected word");
        } else {
            debug!("Selection full, ignoring");
        }
        self
    }

    /// Removes every id.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Returns true if `id` is selected.
    pub fn contains(&self, id: WordId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of selected words.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns true if a guess can be submitted.
    pub fn is_full(&self) -> bool {
        self.ids.len() == SELECTION_LIMIT
    }

    /// Selected ids in pick order.
    pub fn ids(&self) -> &[WordId] {
        &self.ids
    }
}
