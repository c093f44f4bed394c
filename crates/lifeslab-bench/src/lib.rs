//! Benchmark boards and run configurations for lifeslab.
//!
//! - [`reference_board`]: 256x256 board at 30% density
//! - [`stress_board`]: 1024x1024 board for scaling runs
//! - [`group_config`]: a [`RunConfig`] for a given worker count

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use lifeslab_core::Grid;
use lifeslab_engine::RunConfig;
use lifeslab_test_utils::random_grid;

/// Rows and columns of [`reference_board`].
pub const REFERENCE_SIZE: usize = 256;

/// Rows and columns of [`stress_board`].
pub const STRESS_SIZE: usize = 1024;

/// Worker counts that divide both board sizes.
pub const WORKER_COUNTS: [usize; 5] = [1, 2, 4, 8, 16];

/// A 256x256 board, 30% alive, reproducible from `seed`.
pub fn reference_board(seed: u64) -> Grid {
    random_grid(REFERENCE_SIZE, REFERENCE_SIZE, seed, 30)
}

/// A 1024x1024 board, 30% alive, reproducible from `seed`.
pub fn stress_board(seed: u64) -> Grid {
    random_grid(STRESS_SIZE, STRESS_SIZE, seed, 30)
}

/// Run configuration for `workers` workers and `generations` generations.
pub fn group_config(workers: usize, generations: u32) -> RunConfig {
    RunConfig::new(workers, i64::from(generations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boards_divide_evenly() {
        for w in WORKER_COUNTS {
            assert_eq!(REFERENCE_SIZE % w, 0);
            assert_eq!(STRESS_SIZE % w, 0);
        }
    }

    #[test]
    fn reference_board_is_reproducible() {
        let a = reference_board(7);
        assert_eq!(a, reference_board(7));
        assert_eq!(a.rows(), REFERENCE_SIZE);
        assert!(a.population() > 0);
    }

    #[test]
    fn configs_validate() {
        for w in WORKER_COUNTS {
            assert!(group_config(w, 10).validate().is_ok());
        }
    }
}
