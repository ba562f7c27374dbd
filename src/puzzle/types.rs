//! Core domain types for a word-grouping puzzle.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

use super::CategoryColor;

/// Stable identity of a word within one puzzle.
///
/// Derived from the owning category's index and the item's index in the
/// provider output, so assembling the same raw puzzle twice yields the
/// same ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("word-{}-{}", category, item)]
pub struct WordId {
    /// Index of the owning category in the provider output.
    pub category: u8,
    /// Index of the item within its category.
    pub item: u8,
}

impl WordId {
    /// Creates a word id from category and item indices.
    pub fn new(category: u8, item: u8) -> Self {
        Self { category, item }
    }
}

/// One selectable word on the board.
///
/// Selection membership is not stored here; see `Session::words` for the
/// derived view that pairs each entry with its selection flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct WordEntry {
    id: WordId,
    text: String,
    category_name: String,
}

/// A category as returned by a puzzle provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct RawCategory {
    /// The hidden category title.
    pub name: String,
    /// Short explanation of the connection.
    #[serde(default)]
    pub description: String,
    /// Items belonging to the category.
    pub items: Vec<String>,
}

/// Unvalidated provider output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct RawPuzzle {
    /// Categories in provider order.
    pub categories: Vec<RawCategory>,
}

/// A solved category, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Category {
    name: String,
    /// Words in the order the provider declared them.
    words: Vec<String>,
    description: String,
    color: CategoryColor,
}
