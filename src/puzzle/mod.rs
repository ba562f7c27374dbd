//! Puzzle data, assembly, and providers.

mod assembler;
mod color;
mod prompt;
mod provider;
mod types;

pub use assembler::{PUZZLE_SIZE, WORD_COUNT, assemble, shuffle_words, validate};
pub(crate) use assembler::roster;
pub use color::CategoryColor;
pub use prompt::{SYSTEM_PROMPT, parse_puzzle_response, puzzle_prompt, puzzle_response_schema};
pub use provider::{FilePuzzleProvider, LlmPuzzleProvider, PuzzleProvider};
pub use types::{Category, RawCategory, RawPuzzle, WordEntry, WordId};
