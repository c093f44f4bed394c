//! Eight-neighbour stencil over a slice and its halo rows.

use lifeslab_core::{Grid, GridError, HaloRow, Slice};

use crate::rule::{LifeRule, Rule};

/// All 8 offsets: N, S, W, E, NW, NE, SW, SE.
const OFFSETS_8: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Computes the next generation of one slice.
///
/// Row `-1` of the slice is read from the `above` halo and row `rows` from
/// the `below` halo. Columns outside `[0, columns)` do not exist, so the
/// left and right edges behave as solid walls. The output is written to a
/// separate buffer; the input slice is never mutated during the scan.
#[derive(Clone, Debug, Default)]
pub struct UpdateKernel<R = LifeRule> {
    rule: R,
}

impl<R: Rule> UpdateKernel<R> {
    /// A kernel applying `rule`.
    pub fn new(rule: R) -> Self {
        Self { rule }
    }

    /// Live-neighbour count of cell `(x, y)` of `current`.
    pub fn live_neighbours(
        &self,
        current: &Slice,
        above: &HaloRow,
        below: &HaloRow,
        x: usize,
        y: usize,
    ) -> u8 {
        let rows = current.rows() as isize;
        let columns = current.columns() as isize;
        let mut sum = 0u8;
        for (dx, dy) in OFFSETS_8 {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if ny < 0 || ny >= columns {
                continue;
            }
            let ny = ny as usize;
            let cell = if nx < 0 {
                above.cells()[ny]
            } else if nx >= rows {
                below.cells()[ny]
            } else {
                current.row(nx as usize)[ny]
            };
            sum += cell as u8;
        }
        sum
    }

    /// Write the successor of `current` into `next`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] if either halo row is not
    /// `current.columns()` wide or `next` does not have `current`'s
    /// dimensions. `next` is untouched on error.
    pub fn step(
        &self,
        current: &Slice,
        above: &HaloRow,
        below: &HaloRow,
        next: &mut Slice,
    ) -> Result<(), GridError> {
        let columns = current.columns();
        for halo in [above, below] {
            if halo.len() != columns {
                return Err(GridError::ShapeMismatch {
                    what: "halo row",
                    expected: columns,
                    found: halo.len(),
                });
            }
        }
        if next.rows() != current.rows() || next.columns() != columns {
            return Err(GridError::ShapeMismatch {
                what: "output slice",
                expected: current.len(),
                found: next.len(),
            });
        }

        for x in 0..current.rows() {
            for y in 0..columns {
                let live = self.live_neighbours(current, above, below, x, y);
                next.row_mut(x)[y] = self.rule.next_state(current.row(x)[y], live);
            }
        }
        Ok(())
    }
}

/// Advance a whole board `generations` times on a single worker.
///
/// Both halos are permanently dead, so this is the partition-free reference
/// that any distributed run of the same board must reproduce.
pub fn step_grid(grid: &Grid, generations: u32) -> Grid {
    let kernel = UpdateKernel::<LifeRule>::default();
    let dead = HaloRow::dead(grid.columns());
    let mut current = grid.as_slice().clone();
    let mut next = Slice::dead(current.rows(), current.columns());
    for _ in 0..generations {
        kernel
            .step(&current, &dead, &dead, &mut next)
            .expect("buffers share the grid's shape");
        std::mem::swap(&mut current, &mut next);
    }
    Grid::from_slices([&current]).expect("grid shape is preserved")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeslab_core::Cell;
    use lifeslab_test_utils::{grid_from_lines, patterns, random_grid};
    use proptest::prelude::*;

    fn kernel() -> UpdateKernel {
        UpdateKernel::default()
    }

    #[test]
    fn interior_cell_counts_all_eight() {
        let s = grid_from_lines(&["111", "111", "111"]).into_slice();
        let dead = HaloRow::dead(3);
        assert_eq!(kernel().live_neighbours(&s, &dead, &dead, 1, 1), 8);
    }

    #[test]
    fn corner_cell_sees_only_in_bounds_neighbours() {
        let s = grid_from_lines(&["111", "111", "111"]).into_slice();
        let dead = HaloRow::dead(3);
        assert_eq!(kernel().live_neighbours(&s, &dead, &dead, 0, 0), 3);
        assert_eq!(kernel().live_neighbours(&s, &dead, &dead, 2, 2), 3);
        assert_eq!(kernel().live_neighbours(&s, &dead, &dead, 0, 1), 5);
    }

    #[test]
    fn halo_rows_contribute_above_and_below() {
        let s = Slice::dead(1, 3);
        let live = HaloRow::copy_from(&[Cell::Alive; 3]);
        let dead = HaloRow::dead(3);
        assert_eq!(kernel().live_neighbours(&s, &live, &dead, 0, 1), 3);
        assert_eq!(kernel().live_neighbours(&s, &dead, &live, 0, 1), 3);
        assert_eq!(kernel().live_neighbours(&s, &live, &live, 0, 0), 4);
    }

    #[test]
    fn halo_row_births_a_cell() {
        // Three live cells directly above the slice produce a birth in the
        // middle of the first local row.
        let s = Slice::dead(2, 3);
        let above = HaloRow::copy_from(&[Cell::Alive; 3]);
        let below = HaloRow::dead(3);
        let mut next = Slice::dead(2, 3);
        kernel().step(&s, &above, &below, &mut next).unwrap();
        assert_eq!(next.to_lines(), vec!["010", "000"]);
    }

    #[test]
    fn step_does_not_mutate_input() {
        let s = patterns::blinker_horizontal(5, 5).into_slice();
        let before = s.clone();
        let dead = HaloRow::dead(5);
        let mut next = Slice::dead(5, 5);
        kernel().step(&s, &dead, &dead, &mut next).unwrap();
        assert_eq!(s, before);
        assert_ne!(next, before);
    }

    #[test]
    fn step_rejects_wrong_halo_width() {
        let s = Slice::dead(2, 4);
        let mut next = Slice::dead(2, 4);
        let err = kernel()
            .step(&s, &HaloRow::dead(3), &HaloRow::dead(4), &mut next)
            .unwrap_err();
        assert_eq!(
            err,
            GridError::ShapeMismatch {
                what: "halo row",
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn step_rejects_wrong_output_shape() {
        let s = Slice::dead(2, 4);
        let mut next = Slice::dead(4, 2);
        let dead = HaloRow::dead(4);
        assert!(kernel().step(&s, &dead, &dead, &mut next).is_err());
    }

    #[test]
    fn vertical_blinker_becomes_horizontal() {
        let g = grid_from_lines(&["0100", "0100", "0100", "0000"]);
        let next = step_grid(&g, 1);
        assert_eq!(next, grid_from_lines(&["0000", "1110", "0000", "0000"]));
    }

    #[test]
    fn zero_generations_is_identity() {
        let g = patterns::glider(8, 8);
        assert_eq!(step_grid(&g, 0), g);
    }

    #[test]
    fn block_is_still_life() {
        let g = patterns::block(6, 6);
        for n in [1, 2, 7] {
            assert_eq!(step_grid(&g, n), g);
        }
    }

    #[test]
    fn blinker_has_period_two() {
        let h = patterns::blinker_horizontal(6, 6);
        let v = step_grid(&h, 1);
        assert_ne!(v, h);
        assert_eq!(v, patterns::blinker_vertical(6, 6));
        assert_eq!(step_grid(&h, 2), h);
    }

    #[test]
    fn top_edge_has_no_wraparound() {
        // A horizontal blinker on the top row would wrap on a torus; with
        // solid walls it loses its upper arm.
        let g = grid_from_lines(&["0111", "0000", "0000", "0000"]);
        let next = step_grid(&g, 1);
        assert_eq!(next, grid_from_lines(&["0010", "0010", "0000", "0000"]));
    }

    proptest! {
        #[test]
        fn two_bands_with_shared_halos_match_whole_board(
            seed in any::<u64>(),
            top_rows in 1usize..6,
            bottom_rows in 1usize..6,
            columns in 1usize..10,
            density in 0u32..100,
        ) {
            let grid = random_grid(top_rows + bottom_rows, columns, seed, density);
            let top = grid.band(0, top_rows);
            let bottom = grid.band(top_rows, bottom_rows);
            let dead = HaloRow::dead(columns);

            let mut next_top = Slice::dead(top_rows, columns);
            let mut next_bottom = Slice::dead(bottom_rows, columns);
            kernel()
                .step(&top, &dead, &HaloRow::copy_from(bottom.first_row()), &mut next_top)
                .unwrap();
            kernel()
                .step(&bottom, &HaloRow::copy_from(top.last_row()), &dead, &mut next_bottom)
                .unwrap();

            let stitched = Grid::from_slices([&next_top, &next_bottom]).unwrap();
            prop_assert_eq!(stitched, step_grid(&grid, 1));
        }

        #[test]
        fn neighbour_count_is_at_most_eight(
            seed in any::<u64>(),
            rows in 1usize..8,
            columns in 1usize..8,
            density in 0u32..=100,
        ) {
            let slice = random_grid(rows, columns, seed, density).into_slice();
            let full = HaloRow::from(vec![Cell::Alive; columns]);
            for x in 0..rows {
                for y in 0..columns {
                    let n = kernel().live_neighbours(&slice, &full, &full, x, y);
                    prop_assert!(n <= 8);
                    let own = u8::from(slice.get(x, y) == Some(Cell::Alive));
                    // Every cell in the 3x3 block is live except possibly itself.
                    let wide = u8::from(y > 0) + 1 + u8::from(y + 1 < columns);
                    prop_assert!(n + own <= 3 * wide);
                }
            }
        }
    }
}
