//! Run parameters broadcast from the coordinator to every worker.

/// The immutable `(columns, slice_rows, generations)` triple every worker
/// receives before its first generation.
///
/// Every slice has exactly `slice_rows` rows; there is no remainder worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SimulationParameters {
    /// Cells per row (board width).
    pub columns: usize,
    /// Rows owned by each worker.
    pub slice_rows: usize,
    /// Generations to simulate. Zero means report the initial board.
    pub generations: u32,
}

impl SimulationParameters {
    /// `(rows, columns)` of one worker's slice.
    pub fn slice_shape(&self) -> (usize, usize) {
        (self.slice_rows, self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_shape_is_rows_by_columns() {
        let p = SimulationParameters {
            columns: 6,
            slice_rows: 4,
            generations: 3,
        };
        assert_eq!(p.slice_shape(), (4, 6));
    }
}
