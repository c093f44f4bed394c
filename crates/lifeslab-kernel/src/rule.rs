//! Cell transition rules.

use lifeslab_core::Cell;

/// A totalistic transition: next state from current state and live-neighbour
/// count.
///
/// Implementations must be pure; the kernel may call them in any order.
pub trait Rule: Send + Sync {
    /// Next state of a cell with `live_neighbours` live cells among its
    /// eight neighbours (`0..=8`).
    fn next_state(&self, cell: Cell, live_neighbours: u8) -> Cell;
}

/// Conway's Game of Life, B3/S23.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifeRule;

impl Rule for LifeRule {
    fn next_state(&self, cell: Cell, live_neighbours: u8) -> Cell {
        match (cell, live_neighbours) {
            (Cell::Alive, 2 | 3) => Cell::Alive,
            (Cell::Dead, 3) => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}
