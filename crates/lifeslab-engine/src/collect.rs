//! Gathering final slices at the coordinator.
//!
//! Ranks were handed slices in ascending row order, so collecting blocks in
//! ascending rank order reconstructs the board top to bottom regardless of
//! which worker finished first.

use std::fmt;

use lifeslab_core::cell::row_to_string;
use lifeslab_core::{Grid, GridError, SimulationParameters, Slice};

use crate::comm::{CommError, Communicator, Message, Tag};
use crate::COORDINATOR;

/// One worker's rows in a [`Report`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportBlock {
    /// Rank the rows are attributed to.
    pub rank: usize,
    /// The rows, top to bottom.
    pub slice: Slice,
}

/// The board as reported by the coordinator: rank-tagged blocks of rows in
/// ascending rank order.
///
/// `Display` renders one line per row as `<rank>: <cells>`, e.g.
/// `1: 0110`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    blocks: Vec<ReportBlock>,
}

impl Report {
    /// The unmodified initial board, every row attributed to the
    /// coordinator. Used when zero generations are requested.
    pub fn initial(grid: &Grid) -> Self {
        Self {
            blocks: vec![ReportBlock {
                rank: COORDINATOR,
                slice: grid.as_slice().clone(),
            }],
        }
    }

    /// Blocks in output order.
    pub fn blocks(&self) -> &[ReportBlock] {
        &self.blocks
    }

    /// Reassemble the board from the blocks.
    pub fn to_grid(&self) -> Result<Grid, GridError> {
        Grid::from_slices(self.blocks.iter().map(|b| &b.slice))
    }

    /// Output lines without trailing newlines.
    pub fn lines(&self) -> Vec<String> {
        self.blocks
            .iter()
            .flat_map(|b| {
                b.slice
                    .iter_rows()
                    .map(move |row| format!("{}: {}", b.rank, row_to_string(row)))
            })
            .collect()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            for row in block.slice.iter_rows() {
                writeln!(f, "{}: {}", block.rank, row_to_string(row))?;
            }
        }
        Ok(())
    }
}

/// Final-generation gather protocol.
pub struct ResultCollector;

impl ResultCollector {
    /// Coordinator side: own slice first, then every other rank's final
    /// slice, received in increasing rank order.
    pub fn collect<C: Communicator>(
        comm: &C,
        params: &SimulationParameters,
        own: &Slice,
    ) -> Result<Report, CommError> {
        let mut blocks = Vec::with_capacity(comm.size());
        blocks.push(ReportBlock {
            rank: comm.rank(),
            slice: own.clone(),
        });
        for source in (0..comm.size()).filter(|&r| r != comm.rank()) {
            let slice = comm.recv_slice(source, Tag::FinalSlice, params)?;
            blocks.push(ReportBlock {
                rank: source,
                slice,
            });
        }
        Ok(Report { blocks })
    }

    /// Worker side: hand the final slice to the coordinator.
    pub fn submit<C: Communicator>(comm: &C, own: Slice) -> Result<(), CommError> {
        comm.send(COORDINATOR, Message::FinalSlice(own))
    }
}
