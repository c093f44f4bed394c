//! Per-generation boundary row exchange between vertical neighbours.
//!
//! Every worker runs the same four steps in the same order:
//!
//! 1. send the bottom row down to `rank + 1` (the last rank instead resets
//!    its "below" halo to dead),
//! 2. receive the "above" halo from `rank - 1` (the first rank resets it to
//!    dead),
//! 3. send the top row up to `rank - 1`,
//! 4. receive the "below" halo from `rank + 1`.
//!
//! Each step pairs one sender with one receiver at fixed ranks, and all
//! downward traffic of a generation is matched before any upward traffic,
//! so no cycle of waits can form. The dead rows at the first and last rank
//! are the solid wall: nothing lives beyond the board's top and bottom.

use lifeslab_core::{HaloRow, Slice};

use crate::comm::{CommError, Communicator, Message, Tag};

/// Holds one worker's halo rows between exchange and update.
///
/// A row received from a neighbour replaces the held row; rows at a global
/// edge are reset to dead in place.
#[derive(Clone, Debug)]
pub struct HaloExchanger {
    rank: usize,
    size: usize,
    columns: usize,
    above: HaloRow,
    below: HaloRow,
    rows_sent: u64,
    rows_received: u64,
}

impl HaloExchanger {
    /// An exchanger for `rank` in a group of `size`, with rows of `columns`
    /// cells. Both halos start dead.
    pub fn new(rank: usize, size: usize, columns: usize) -> Self {
        Self {
            rank,
            size,
            columns,
            above: HaloRow::dead(columns),
            below: HaloRow::dead(columns),
            rows_sent: 0,
            rows_received: 0,
        }
    }

    /// Rank owning the slice directly above, if any.
    pub fn upper_neighbour(&self) -> Option<usize> {
        self.rank.checked_sub(1)
    }

    /// Rank owning the slice directly below, if any.
    pub fn lower_neighbour(&self) -> Option<usize> {
        let next = self.rank + 1;
        (next < self.size).then_some(next)
    }

    /// Run one generation's exchange for `slice`.
    ///
    /// Blocks until both neighbours have sent their rows.
    pub fn exchange<C: Communicator>(&mut self, comm: &C, slice: &Slice) -> Result<(), CommError> {
        let up = self.upper_neighbour();
        let down = self.lower_neighbour();

        // 1. bottom row down
        match down {
            Some(down) => {
                comm.send(down, Message::HaloDown(HaloRow::copy_from(slice.last_row())))?;
                self.rows_sent += 1;
            }
            None => self.below.fill_dead(),
        }

        // 2. above halo from the upper neighbour's bottom row
        match up {
            Some(up) => {
                self.above = comm.recv_row(up, Tag::HaloDown, self.columns)?;
                self.rows_received += 1;
            }
            None => self.above.fill_dead(),
        }

        // 3. top row up
        if let Some(up) = up {
            comm.send(up, Message::HaloUp(HaloRow::copy_from(slice.first_row())))?;
            self.rows_sent += 1;
        }

        // 4. below halo from the lower neighbour's top row
        if let Some(down) = down {
            self.below = comm.recv_row(down, Tag::HaloUp, self.columns)?;
            self.rows_received += 1;
        }

        Ok(())
    }

    /// Halo row logically above this worker's first row.
    pub fn above(&self) -> &HaloRow {
        &self.above
    }

    /// Halo row logically below this worker's last row.
    pub fn below(&self) -> &HaloRow {
        &self.below
    }

    /// Rows sent so far.
    pub fn rows_sent(&self) -> u64 {
        self.rows_sent
    }

    /// Rows received so far.
    pub fn rows_received(&self) -> u64 {
        self.rows_received
    }
}
