//! Turns provider output into a shuffled roster of word entries.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};

use super::{RawCategory, RawPuzzle, WordEntry, WordId};
use crate::GameError;

/// Number of categories in a puzzle, and of items in each category.
pub const PUZZLE_SIZE: usize = 4;

/// Total number of words on a fresh board.
pub const WORD_COUNT: usize = PUZZLE_SIZE * PUZZLE_SIZE;

/// Checks the 4×4 shape of a raw puzzle and returns a trimmed copy.
///
/// # Errors
///
/// Returns [`GameError::MalformedPuzzle`] if the category count or any item
/// count is not four, if a name or item is blank, or if two categories
/// share a name.
#[instrument(skip(raw), fields(categories = raw.categories.len()))]
pub fn validate(raw: &RawPuzzle) -> Result<RawPuzzle, GameError> {
    if raw.categories.len() != PUZZLE_SIZE {
        warn!("Wrong category count");
        return Err(GameError::MalformedPuzzle(format!(
            "expected {} categories, got {}",
            PUZZLE_SIZE,
            raw.categories.len()
        )));
    }

    let mut seen = HashSet::new();
    let mut categories = Vec::with_capacity(PUZZLE_SIZE);

    for (index, category) in raw.categories.iter().enumerate() {
        let name = category.name.trim();
        if name.is_empty() {
            return Err(GameError::MalformedPuzzle(format!(
                "category {} has an empty name",
                index
            )));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(GameError::MalformedPuzzle(format!(
                "duplicate category name '{}'",
                name
            )));
        }
        if category.items.len() != PUZZLE_SIZE {
            return Err(GameError::MalformedPuzzle(format!(
                "category '{}' has {} items, expected {}",
                name,
                category.items.len(),
                PUZZLE_SIZE
            )));
        }

        let items: Vec<String> = category
            .items
            .iter()
            .map(|item| item.trim().to_string())
            .collect();
        if items.iter().any(String::is_empty) {
            return Err(GameError::MalformedPuzzle(format!(
                "category '{}' has an empty item",
                name
            )));
        }

        categories.push(RawCategory::new(
            name.to_string(),
            category.description.trim().to_string(),
            items,
        ));
    }

    debug!("Puzzle shape valid");
    Ok(RawPuzzle::new(categories))
}

/// Builds the shuffled roster for a puzzle.
///
/// Ids come from category and item indices; the order comes from `rng`.
///
/// # Errors
///
/// Returns [`GameError::MalformedPuzzle`] if [`validate`] rejects the puzzle.
#[instrument(skip(raw, rng))]
pub fn assemble<R: Rng + ?Sized>(
    raw: &RawPuzzle,
    rng: &mut R,
) -> Result<Vec<WordEntry>, GameError> {
    let puzzle = validate(raw)?;
    Ok(roster(&puzzle, rng))
}

/// Builds the shuffled roster for a puzzle that already passed [`validate`].
#[instrument(skip(puzzle, rng))]
pub(crate) fn roster<R: Rng + ?Sized>(puzzle: &RawPuzzle, rng: &mut R) -> Vec<WordEntry> {
    let mut words: Vec<WordEntry> = puzzle
        .categories
        .iter()
        .enumerate()
        .flat_map(|(c, category)| {
            category.items.iter().enumerate().map(move |(i, text)| {
                // Both indices are < PUZZLE_SIZE after validation.
                WordEntry::new(WordId::new(c as u8, i as u8), text.clone(), category.name.clone())
            })
        })
        .collect();

    shuffle_words(&mut words, rng);
    info!(words = words.len(), "Assembled puzzle roster");
    words
}

/// Uniformly permutes the roster in place (Fisher–Yates).
#[instrument(skip(words, rng), fields(count = words.len()))]
pub fn shuffle_words<R: Rng + ?Sized>(words: &mut [WordEntry], rng: &mut R) {
    words.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn category(name: &str, items: &[&str]) -> RawCategory {
        RawCategory::new(
            name.to_string(),
            String::new(),
            items.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_validate_trims_whitespace() {
        let raw = RawPuzzle::new(vec![
            category("  A ", &["a1 ", "a2", "a3", "a4"]),
            category("B", &["b1", "b2", "b3", "b4"]),
            category("C", &["c1", "c2", "c3", "c4"]),
            category("D", &["d1", "d2", "d3", "d4"]),
        ]);
        let puzzle = validate(&raw).expect("valid puzzle");
        assert_eq!(puzzle.categories[0].name, "A");
        assert_eq!(puzzle.categories[0].items[0], "a1");
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let raw = RawPuzzle::new(vec![
            category("A", &["a1", "a2", "a3", "a4"]),
            category("a", &["b1", "b2", "b3", "b4"]),
            category("C", &["c1", "c2", "c3", "c4"]),
            category("D", &["d1", "d2", "d3", "d4"]),
        ]);
        assert!(matches!(validate(&raw), Err(GameError::MalformedPuzzle(_))));
    }

    #[test]
    fn test_ids_follow_provider_indices() {
        let raw = RawPuzzle::new(vec![
            category("A", &["a1", "a2", "a3", "a4"]),
            category("B", &["b1", "b2", "b3", "b4"]),
            category("C", &["c1", "c2", "c3", "c4"]),
            category("D", &["d1", "d2", "d3", "d4"]),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        let words = assemble(&raw, &mut rng).expect("valid puzzle");
        let b3 = words
            .iter()
            .find(|w| w.text() == "b3")
            .expect("b3 on the board");
        assert_eq!(b3.id().to_string(), "word-1-2");
        assert_eq!(b3.category_name(), "B");
    }
}
