//! Local update kernel for lifeslab.
//!
//! [`UpdateKernel`] advances one worker's [`Slice`](lifeslab_core::Slice)
//! by a single generation, reading neighbours across the slice boundary from
//! the two [`HaloRow`](lifeslab_core::HaloRow)s supplied by the halo
//! exchange. [`step_grid`] applies the same kernel to a whole board with
//! dead halos and serves as the single-worker reference.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod kernel;
pub mod rule;

pub use kernel::{step_grid, UpdateKernel};
pub use rule::{LifeRule, Rule};
