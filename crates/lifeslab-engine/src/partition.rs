//! Splitting the board into equal row slices and handing them out.

use lifeslab_core::{Grid, SimulationParameters, Slice};
use tracing::{debug, warn};

use crate::comm::{CommError, Communicator, Message};
use crate::config::ConfigError;

/// The board cut into one slice per worker, plus the parameters every
/// worker needs before its first generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    params: SimulationParameters,
    slices: Vec<Slice>,
}

impl Partition {
    /// The broadcast parameters.
    pub fn params(&self) -> SimulationParameters {
        self.params
    }

    /// Slices in rank order; slice `i` belongs to rank `i`.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }
}

/// Cuts a board into `workers` horizontal slices of equal height.
#[derive(Clone, Copy, Debug)]
pub struct GridPartitioner {
    workers: usize,
}

impl GridPartitioner {
    /// A partitioner for a group of `workers`.
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    /// Assign rank `i` the rows `[i * slice_rows, (i + 1) * slice_rows)`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoWorkers`] for an empty group and
    /// [`ConfigError::IndivisibleRows`] unless the row count is a multiple
    /// of the worker count. Odd dimensions are accepted with a warning.
    pub fn partition(&self, grid: &Grid, generations: u32) -> Result<Partition, ConfigError> {
        let workers = self.workers;
        if workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        let rows = grid.rows();
        if rows % workers != 0 {
            return Err(ConfigError::IndivisibleRows { rows, workers });
        }
        if rows % 2 != 0 || grid.columns() % 2 != 0 {
            warn!(
                rows,
                columns = grid.columns(),
                "board dimensions are not both even"
            );
        }

        let slice_rows = rows / workers;
        let params = SimulationParameters {
            columns: grid.columns(),
            slice_rows,
            generations,
        };
        let slices = (0..workers)
            .map(|i| grid.band(i * slice_rows, slice_rows))
            .collect();
        debug!(workers, slice_rows, columns = params.columns, "partitioned board");
        Ok(Partition { params, slices })
    }

    /// Send the parameters to every rank (this one included), then each
    /// rank its slice, both in rank order.
    pub fn distribute<C: Communicator>(comm: &C, partition: Partition) -> Result<(), CommError> {
        debug_assert_eq!(comm.size(), partition.slices.len());
        for dest in 0..comm.size() {
            comm.send(dest, Message::Parameters(partition.params))?;
        }
        for (dest, slice) in partition.slices.into_iter().enumerate() {
            comm.send(dest, Message::InitialSlice(slice))?;
        }
        Ok(())
    }
}
