//! Display palette for solved categories.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::instrument;

/// Color token assigned to a solved category by solve order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CategoryColor {
    /// First category solved.
    Yellow,
    /// Second category solved.
    Green,
    /// Third category solved.
    Blue,
    /// Fourth category solved.
    Purple,
}

impl CategoryColor {
    /// Picks the color for the category solved at `index` (zero-based).
    ///
    /// Wraps around the palette if a puzzle ever has more categories.
    #[instrument]
    pub fn for_solve_index(index: usize) -> Self {
        let palette: Vec<Self> = Self::iter().collect();
        palette[index % palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_order_palette() {
        assert_eq!(CategoryColor::for_solve_index(0), CategoryColor::Yellow);
        assert_eq!(CategoryColor::for_solve_index(3), CategoryColor::Purple);
        assert_eq!(CategoryColor::for_solve_index(4), CategoryColor::Yellow);
    }

    #[test]
    fn test_token_is_lowercase() {
        assert_eq!(CategoryColor::Green.to_string(), "green");
    }
}
