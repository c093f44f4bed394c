//! Per-worker row bands and the halo rows exchanged between them.

use crate::cell::{row_to_string, Cell};
use crate::error::GridError;

/// A contiguous band of rows owned by exactly one worker.
///
/// Stored row-major in a single buffer of `rows * columns` cells. A worker
/// allocates two of these per run (current and next generation) and swaps
/// them after every update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slice {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Slice {
    /// An all-dead slice of the given dimensions.
    pub fn dead(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![Cell::Dead; rows * columns],
        }
    }

    /// Wrap a row-major cell buffer.
    ///
    /// Returns [`GridError::ShapeMismatch`] if `cells.len() != rows * columns`.
    pub fn from_cells(rows: usize, columns: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        let expected = rows * columns;
        if cells.len() != expected {
            return Err(GridError::ShapeMismatch {
                what: "slice",
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Number of rows in the slice.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the slice holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row `r` as a cell slice.
    ///
    /// # Panics
    ///
    /// Panics if `r >= self.rows()`.
    pub fn row(&self, r: usize) -> &[Cell] {
        let start = r * self.columns;
        &self.cells[start..start + self.columns]
    }

    /// Mutable access to row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= self.rows()`.
    pub fn row_mut(&mut self, r: usize) -> &mut [Cell] {
        let start = r * self.columns;
        &mut self.cells[start..start + self.columns]
    }

    /// Iterate rows top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        // chunks_exact(0) panics; a zero-width slice has no rows to show.
        self.cells.chunks_exact(self.columns.max(1))
    }

    /// The first (topmost) row.
    pub fn first_row(&self) -> &[Cell] {
        self.row(0)
    }

    /// The last (bottommost) row.
    pub fn last_row(&self) -> &[Cell] {
        self.row(self.rows - 1)
    }

    /// Cell at `(r, c)`, or `None` if out of bounds.
    pub fn get(&self, r: usize, c: usize) -> Option<Cell> {
        if r < self.rows && c < self.columns {
            Some(self.cells[r * self.columns + c])
        } else {
            None
        }
    }

    /// Set the cell at `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `(r, c)` is out of bounds.
    pub fn set(&mut self, r: usize, c: usize, cell: Cell) {
        assert!(
            r < self.rows && c < self.columns,
            "({r}, {c}) out of bounds for {}x{} slice",
            self.rows,
            self.columns
        );
        self.cells[r * self.columns + c] = cell;
    }

    /// The underlying row-major buffer.
    pub fn as_cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Rows rendered as digit strings, top to bottom.
    pub fn to_lines(&self) -> Vec<String> {
        self.iter_rows().map(row_to_string).collect()
    }
}

/// A copy of a neighbour's edge row, read-only during an update.
///
/// An all-dead halo row stands in for the missing neighbour at the global
/// top and bottom edges (solid wall).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HaloRow(Vec<Cell>);

impl HaloRow {
    /// An all-dead row of `columns` cells.
    pub fn dead(columns: usize) -> Self {
        Self(vec![Cell::Dead; columns])
    }

    /// Copy a row out of a slice.
    pub fn copy_from(row: &[Cell]) -> Self {
        Self(row.to_vec())
    }

    /// Reset every cell to dead, keeping the allocation.
    pub fn fill_dead(&mut self) {
        self.0.fill(Cell::Dead);
    }

    /// The row's cells.
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row holds no cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Cell>> for HaloRow {
    fn from(cells: Vec<Cell>) -> Self {
        Self(cells)
    }
}
