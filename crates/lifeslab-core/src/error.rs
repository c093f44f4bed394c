//! Error types for grid construction and shape checks.

use std::fmt;

/// Errors arising from building a grid or slice, or from feeding buffers of
/// the wrong shape to an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The board has no rows, or its first row has no cells.
    Empty,
    /// A row's length differs from the first row's.
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A character other than `'0'` or `'1'` appeared in the text.
    InvalidCell {
        /// Zero-based row of the character.
        row: usize,
        /// Zero-based column of the character.
        column: usize,
        /// The character found.
        found: char,
    },
    /// A buffer did not have the length its dimensions require.
    ShapeMismatch {
        /// What was being checked, e.g. `"halo row"`.
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Actual length.
        found: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid must have at least one row and one column"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => {
                write!(f, "row {row} has {found} cells, expected {expected}")
            }
            Self::InvalidCell { row, column, found } => {
                write!(
                    f,
                    "invalid cell {found:?} at row {row}, column {column} (expected '0' or '1')"
                )
            }
            Self::ShapeMismatch {
                what,
                expected,
                found,
            } => {
                write!(f, "{what} has {found} cells, expected {expected}")
            }
        }
    }
}

impl std::error::Error for GridError {}
