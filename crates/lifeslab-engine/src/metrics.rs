//! Per-worker run metrics.
//!
//! [`WorkerMetrics`] is filled in by the driver as the worker runs and is
//! returned in its [`WorkerOutcome`](crate::WorkerOutcome).

use std::time::Duration;

/// Counters and timings collected by one worker over a run.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkerMetrics {
    /// Rank of the worker that produced these metrics.
    pub rank: usize,
    /// Generations completed.
    pub generations: u32,
    /// Halo rows sent to neighbours.
    pub rows_sent: u64,
    /// Halo rows received from neighbours.
    pub rows_received: u64,
    /// Time spent in halo exchange, including waits on neighbours.
    pub exchange_us: u64,
    /// Time spent in the update kernel.
    pub update_us: u64,
    /// Time spent sending or gathering final slices.
    pub gather_us: u64,
}

impl WorkerMetrics {
    /// Zeroed metrics for `rank`.
    pub fn new(rank: usize) -> Self {
        Self {
            rank,
            ..Self::default()
        }
    }
}

pub(crate) fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
