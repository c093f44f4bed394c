//! lifeslab: Conway's Game of Life on a board split into horizontal slices,
//! one per worker, with boundary rows exchanged between neighbours every
//! generation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the lifeslab sub-crates. It also ships the `lifeslab` binary.
//!
//! # Quick start
//!
//! ```rust
//! use lifeslab::prelude::*;
//!
//! let board = Grid::parse("0100\n0100\n0100\n0000\n").unwrap();
//! let outcome = run_group(&RunConfig::new(2, 1), &board).unwrap();
//! assert_eq!(
//!     outcome.report.to_string(),
//!     "0: 0000\n0: 1110\n1: 0000\n1: 0000\n"
//! );
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lifeslab-core` | Cells, slices, halo rows, the board and its text format |
//! | [`kernel`] | `lifeslab-kernel` | The B3/S23 rule and the local update kernel |
//! | [`engine`] | `lifeslab-engine` | Partitioning, halo exchange, gathering, worker groups |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Board data types (`lifeslab-core`).
///
/// [`types::Grid`] is the whole board; [`types::Slice`] is one worker's
/// rows and [`types::HaloRow`] a neighbour's boundary row.
pub use lifeslab_core as types;

/// Update rule and kernel (`lifeslab-kernel`).
///
/// [`kernel::step_grid`] advances a whole board on one worker and is the
/// reference for distributed runs.
pub use lifeslab_kernel as kernel;

/// Distributed engine (`lifeslab-engine`).
///
/// [`engine::run_group`] runs a complete group of in-process workers;
/// [`engine::WorkerDriver`] runs one worker over any
/// [`engine::Communicator`].
pub use lifeslab_engine as engine;

/// Common imports for typical lifeslab usage.
///
/// ```rust
/// use lifeslab::prelude::*;
/// ```
pub mod prelude {
    // Board types
    pub use lifeslab_core::{Cell, Grid, HaloRow, SimulationParameters, Slice};

    // Kernel
    pub use lifeslab_kernel::{step_grid, LifeRule, Rule, UpdateKernel};

    // Engine
    pub use lifeslab_engine::{
        run_group, GridSource, GroupOutcome, Report, RunConfig, TextFileSource, WorkerMetrics,
    };

    // Errors
    pub use lifeslab_core::GridError;
    pub use lifeslab_engine::{CommError, ConfigError, RunError};
}
