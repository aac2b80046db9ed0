use core::fmt;

use super::acquire_constants::{BOARD_COLS, BOARD_ROWS};

/// A board coordinate. `col` runs over the 12 columns (1..=12 when
/// displayed), `row` over the 9 rows (A..=I when displayed).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
}

impl Tile {
    pub fn is_on_board(&self) -> bool {
        self.row < BOARD_ROWS && self.col < BOARD_COLS
    }

    /// Every tile of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..BOARD_ROWS).flat_map(|row| (0..BOARD_COLS).map(move |col| Tile { row, col }))
    }
}

impl From<(usize, usize)> for Tile {
    fn from(value: (usize, usize)) -> Self {
        Self {
            row: value.0,
            col: value.1,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // row is a letter, col is a number
        // use the ASCII value of 'A' to get the letter
        write!(f, "{}-{}", self.col + 1, (b'A' + self.row as u8) as char)
    }
}
