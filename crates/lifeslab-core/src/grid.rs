//! The full board, held only by the coordinating worker.

use std::fmt;

use crate::cell::{row_to_string, Cell};
use crate::error::GridError;
use crate::slice::Slice;

/// A rectangular `rows x columns` board of cells.
///
/// Construction guarantees the board is non-empty and rectangular. Nothing
/// here requires even dimensions; the engine treats that as an unchecked
/// precondition.
///
/// # Examples
///
/// ```
/// use lifeslab_core::Grid;
///
/// let grid = Grid::parse("0100\n0100\n0100\n0000\n").unwrap();
/// assert_eq!((grid.rows(), grid.columns()), (4, 4));
/// assert_eq!(grid.population(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Slice,
}

impl Grid {
    /// Parse the text format: one line per row, each character `'0'` (dead)
    /// or `'1'` (alive), no header.
    ///
    /// `\r\n` line endings and trailing blank lines are accepted. Any other
    /// character, a ragged row, or an empty board is an error.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let mut rows = Vec::with_capacity(lines.len());
        for (r, line) in lines.iter().enumerate() {
            let row = line
                .chars()
                .enumerate()
                .map(|(c, ch)| {
                    Cell::from_digit(ch).ok_or(GridError::InvalidCell {
                        row: r,
                        column: c,
                        found: ch,
                    })
                })
                .collect::<Result<Vec<Cell>, GridError>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Build a grid from explicit rows.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let columns = rows.first().map_or(0, Vec::len);
        if columns == 0 {
            return Err(GridError::Empty);
        }
        for (r, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(GridError::RaggedRow {
                    row: r,
                    expected: columns,
                    found: row.len(),
                });
            }
        }
        let height = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Ok(Self {
            cells: Slice::from_cells(height, columns, cells)?,
        })
    }

    /// Reassemble a grid from vertically stacked slices, top to bottom.
    pub fn from_slices<'a>(slices: impl IntoIterator<Item = &'a Slice>) -> Result<Self, GridError> {
        let rows = slices
            .into_iter()
            .flat_map(|s| s.iter_rows().map(<[Cell]>::to_vec))
            .collect();
        Self::from_rows(rows)
    }

    /// An all-dead grid.
    ///
    /// Returns [`GridError::Empty`] if either dimension is zero.
    pub fn dead(rows: usize, columns: usize) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            cells: Slice::dead(rows, columns),
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.cells.columns()
    }

    /// Row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= self.rows()`.
    pub fn row(&self, r: usize) -> &[Cell] {
        self.cells.row(r)
    }

    /// Cell at `(r, c)`, or `None` if out of bounds.
    pub fn get(&self, r: usize, c: usize) -> Option<Cell> {
        self.cells.get(r, c)
    }

    /// Set the cell at `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `(r, c)` is out of bounds.
    pub fn set(&mut self, r: usize, c: usize, cell: Cell) {
        self.cells.set(r, c, cell);
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.population()
    }

    /// Copy rows `[start, start + count)` into a new slice.
    ///
    /// # Panics
    ///
    /// Panics if the band extends past the last row.
    pub fn band(&self, start: usize, count: usize) -> Slice {
        let columns = self.columns();
        let cells = self.cells.as_cells()[start * columns..(start + count) * columns].to_vec();
        Slice::from_cells(count, columns, cells).expect("band length is count * columns")
    }

    /// View the whole board as a single slice.
    pub fn as_slice(&self) -> &Slice {
        &self.cells
    }

    /// Consume the grid, returning it as a single slice.
    pub fn into_slice(self) -> Slice {
        self.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter_rows() {
            writeln!(f, "{}", row_to_string(row))?;
        }
        Ok(())
    }
}
