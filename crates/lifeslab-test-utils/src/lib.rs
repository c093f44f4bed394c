//! Test utilities for lifeslab development.
//!
//! Provides compact board construction from string literals, the standard
//! still-life/oscillator/spaceship [`patterns`], and seeded random boards
//! for partition-invariance and benchmark runs.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod patterns;

use lifeslab_core::Grid;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Build a grid from `'0'`/`'1'` string rows.
///
/// # Panics
///
/// Panics if the rows are not a valid board; fixtures are expected to be
/// well-formed.
pub fn grid_from_lines(lines: &[&str]) -> Grid {
    Grid::parse(&lines.join("\n")).expect("fixture rows must form a valid grid")
}

/// Seeded random board with roughly `density_percent` live cells.
///
/// The same `(rows, columns, seed, density_percent)` always yields the same
/// board.
pub fn random_grid(rows: usize, columns: usize, seed: u64, density_percent: u32) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = Grid::dead(rows, columns).expect("random grid dimensions must be non-zero");
    for r in 0..rows {
        for c in 0..columns {
            let alive = rng.next_u32() % 100 < density_percent;
            grid.set(r, c, alive.into());
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_grid_is_deterministic() {
        let a = random_grid(16, 12, 7, 35);
        let b = random_grid(16, 12, 7, 35);
        assert_eq!(a, b);
        assert_ne!(a, random_grid(16, 12, 8, 35));
    }

    #[test]
    fn density_extremes() {
        assert_eq!(random_grid(8, 8, 1, 0).population(), 0);
        assert_eq!(random_grid(8, 8, 1, 100).population(), 64);
    }
}
