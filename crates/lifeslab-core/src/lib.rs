//! Core types for the lifeslab engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! board-level data model shared by the update kernel and the distributed
//! engine: cell states, the global [`Grid`], per-worker [`Slice`]s, the
//! [`HaloRow`]s exchanged between neighbours, and the
//! [`SimulationParameters`] broadcast before a run.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod grid;
pub mod params;
pub mod slice;

pub use cell::Cell;
pub use error::GridError;
pub use grid::Grid;
pub use params::SimulationParameters;
pub use slice::{HaloRow, Slice};
