//! Binary cell state.

use std::fmt;

/// State of a single cell.
///
/// The discriminants are the live-neighbour contribution of the cell, so a
/// neighbourhood sum is a plain `u8` addition over `cell as u8`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    /// Dead cell (`'0'` in the text format).
    #[default]
    Dead = 0,
    /// Live cell (`'1'` in the text format).
    Alive = 1,
}

impl Cell {
    /// Parse a cell from its text digit. Returns `None` for anything other
    /// than `'0'` or `'1'`.
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::Dead),
            '1' => Some(Self::Alive),
            _ => None,
        }
    }

    /// The text digit for this cell.
    pub fn as_digit(self) -> char {
        match self {
            Self::Dead => '0',
            Self::Alive => '1',
        }
    }

    /// Whether the cell is alive.
    pub fn is_alive(self) -> bool {
        self == Self::Alive
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_digit())
    }
}

/// Render a row of cells as contiguous digits, e.g. `"0110"`.
pub fn row_to_string(row: &[Cell]) -> String {
    row.iter().map(|c| c.as_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_round_trip() {
        assert_eq!(Cell::from_digit('0'), Some(Cell::Dead));
        assert_eq!(Cell::from_digit('1'), Some(Cell::Alive));
        assert_eq!(Cell::Alive.as_digit(), '1');
        assert_eq!(Cell::Dead.as_digit(), '0');
    }

    #[test]
    fn rejects_other_characters() {
        assert_eq!(Cell::from_digit('2'), None);
        assert_eq!(Cell::from_digit('.'), None);
        assert_eq!(Cell::from_digit(' '), None);
    }

    #[test]
    fn discriminant_is_neighbour_weight() {
        assert_eq!(Cell::Dead as u8, 0);
        assert_eq!(Cell::Alive as u8, 1);
    }

    #[test]
    fn row_renders_without_separators() {
        let row = [Cell::Dead, Cell::Alive, Cell::Alive, Cell::Dead];
        assert_eq!(row_to_string(&row), "0110");
    }
}
