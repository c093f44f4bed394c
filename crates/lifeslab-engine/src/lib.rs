//! Distributed stencil engine for lifeslab.
//!
//! A fixed group of workers, each owning one horizontal [`Slice`] of the
//! board, advance the board in lockstep. Every generation each worker swaps
//! its edge rows with the workers directly above and below it
//! ([`HaloExchanger`]), then updates its slice locally
//! ([`UpdateKernel`](lifeslab_kernel::UpdateKernel)). Rank 0 doubles as the
//! coordinator: it loads the board from a [`GridSource`], distributes the
//! slices ([`GridPartitioner`]), and gathers the final slices into a
//! [`Report`] ([`ResultCollector`]).
//!
//! Workers talk only through a [`Communicator`]. [`ChannelGroup`] provides
//! an in-process implementation where each rank is a thread, and
//! [`run_group`] wires a whole run together.
//!
//! [`Slice`]: lifeslab_core::Slice

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod collect;
pub mod comm;
pub mod config;
pub mod driver;
pub mod error;
pub mod group;
pub mod halo;
pub mod metrics;
pub mod partition;
pub mod source;

pub use collect::{Report, ReportBlock, ResultCollector};
pub use comm::{ChannelCommunicator, ChannelGroup, CommError, Communicator, Message, Tag};
pub use config::{ConfigError, RunConfig};
pub use driver::{WorkerDriver, WorkerOutcome};
pub use error::RunError;
pub use group::{run_group, GroupOutcome};
pub use halo::HaloExchanger;
pub use metrics::WorkerMetrics;
pub use partition::{GridPartitioner, Partition};
pub use source::{GridSource, TextFileSource};

/// Rank of the coordinating worker.
pub const COORDINATOR: usize = 0;
