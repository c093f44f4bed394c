//! Reusable Life patterns placed on dead boards.
//!
//! - [`block`]: 2x2 still life.
//! - [`blinker_horizontal`] / [`blinker_vertical`]: the two phases of the
//!   period-2 blinker.
//! - [`glider`]: the smallest spaceship, heading down-right.
//!
//! Each pattern is centred on `(rows / 2, columns / 2)` unless noted.

use lifeslab_core::{Cell, Grid};

fn with_cells(rows: usize, columns: usize, live: &[(usize, usize)]) -> Grid {
    let mut grid = Grid::dead(rows, columns).expect("pattern board must be non-empty");
    for &(r, c) in live {
        grid.set(r, c, Cell::Alive);
    }
    grid
}

/// 2x2 block straddling the centre. Needs at least 2x2.
pub fn block(rows: usize, columns: usize) -> Grid {
    let (r, c) = (rows / 2 - 1, columns / 2 - 1);
    with_cells(rows, columns, &[(r, c), (r, c + 1), (r + 1, c), (r + 1, c + 1)])
}

/// Three live cells in a row. Needs at least 3x3.
pub fn blinker_horizontal(rows: usize, columns: usize) -> Grid {
    let (r, c) = (rows / 2, columns / 2);
    with_cells(rows, columns, &[(r, c - 1), (r, c), (r, c + 1)])
}

/// Three live cells in a column. Needs at least 3x3.
pub fn blinker_vertical(rows: usize, columns: usize) -> Grid {
    let (r, c) = (rows / 2, columns / 2);
    with_cells(rows, columns, &[(r - 1, c), (r, c), (r + 1, c)])
}

/// Glider in the top-left corner, moving towards the bottom-right.
/// Needs at least 3x3.
///
/// ```text
/// 010
/// 001
/// 111
/// ```
pub fn glider(rows: usize, columns: usize) -> Grid {
    with_cells(rows, columns, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)])
}

/// The glider after four generations: the same shape shifted by `(1, 1)`.
pub fn glider_shifted(rows: usize, columns: usize) -> Grid {
    with_cells(rows, columns, &[(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)])
}
