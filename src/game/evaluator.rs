//! Guess evaluation: a pure function from session and selection to the
//! next session.

use std::collections::HashMap;

use tracing::{debug, info, instrument};

use super::{GameStatus, Session};
use crate::GameError;
use crate::puzzle::{Category, CategoryColor, PUZZLE_SIZE, WordEntry, WordId};

/// Result of judging one guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// All four words share a category.
    Correct {
        /// The newly solved category.
        category: Category,
    },
    /// The words span more than one category.
    Incorrect {
        /// Three of the four words share a category.
        one_away: bool,
        /// Lives remaining after the mistake.
        lives_left: u8,
    },
}

impl GuessOutcome {
    /// Returns true for a correct guess.
    pub fn is_correct(&self) -> bool {
        matches!(self, GuessOutcome::Correct { .. })
    }

    /// Returns true for an incorrect guess that was one word off.
    pub fn is_one_away(&self) -> bool {
        matches!(self, GuessOutcome::Incorrect { one_away: true, .. })
    }
}

/// Outcome plus the session to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// What the guess was.
    pub outcome: GuessOutcome,
    /// Session after applying the guess.
    pub next: Session,
}

/// Returns true if some category appears exactly three times among `words`.
#[instrument(skip(words), fields(count = words.len()))]
pub fn is_one_away(words: &[&WordEntry]) -> bool {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in words {
        *counts.entry(word.category_name().as_str()).or_default() += 1;
    }
    counts.values().any(|&count| count == PUZZLE_SIZE - 1)
}

/// Judges a guess of `selected` against `session`.
///
/// Does not touch `session`; the caller commits [`Evaluation::next`].
///
/// # Errors
///
/// Returns [`GameError::NotPlaying`] unless the session is `playing`,
/// [`GameError::InvalidGuessSize`] unless `selected` names exactly four
/// distinct words, and [`GameError::UnknownWord`] if one of them is not on
/// the board.
#[instrument(skip(session, selected), fields(selected = selected.len(), lives = session.lives()))]
pub fn evaluate(session: &Session, selected: &[WordId]) -> Result<Evaluation, GameError> {
    if session.status() != GameStatus::Playing {
        return Err(GameError::NotPlaying(session.status()));
    }

    let mut ids = selected.to_vec();
    ids.sort();
    ids.dedup();
    if ids.len() != PUZZLE_SIZE || selected.len() != PUZZLE_SIZE {
        return Err(GameError::InvalidGuessSize(selected.len()));
    }

    let words = selected
        .iter()
        .map(|id| session.word(*id).ok_or(GameError::UnknownWord(*id)))
        .collect::<Result<Vec<_>, _>>()?;

    let first = words[0].category_name();
    let all_same = words.iter().all(|w| w.category_name() == first);

    let mut next = session.clone();
    next.selection.clear();

    if all_same {
        let mut group = words.clone();
        group.sort_by_key(|w| w.id().item);
        let category = Category::new(
            first.clone(),
            group.iter().map(|w| w.text().clone()).collect(),
            session.description_of(first),
            CategoryColor::for_solve_index(session.solved_categories().len()),
        );

        next.active_words.retain(|w| !ids.contains(w.id()));
        next.solved.push(category.clone());
        next.status = if next.active_words.is_empty() {
            GameStatus::Won
        } else {
            GameStatus::Playing
        };

        info!(category = %category.name(), status = %next.status, "Category solved");
        return Ok(Evaluation {
            outcome: GuessOutcome::Correct { category },
            next,
        });
    }

    let one_away = is_one_away(&words);
    next.lives = next.lives.saturating_sub(1);
    next.status = if next.lives == 0 {
        GameStatus::Lost
    } else {
        GameStatus::Playing
    };

    debug!(one_away, lives = next.lives, status = %next.status, "Incorrect guess");
    Ok(Evaluation {
        outcome: GuessOutcome::Incorrect {
            one_away,
            lives_left: next.lives,
        },
        next,
    })
}
