//! Integration test: whole-group runs over in-process channels.
//!
//! Covers the reported output format, known patterns crossing slice
//! boundaries, and agreement with the single-process kernel.

use lifeslab_core::Grid;
use lifeslab_engine::{run_group, GroupOutcome, RunConfig};
use lifeslab_kernel::step_grid;
use lifeslab_test_utils::patterns::{
    blinker_horizontal, blinker_vertical, block, glider, glider_shifted,
};
use lifeslab_test_utils::{grid_from_lines, random_grid};

fn run(grid: &Grid, workers: usize, generations: i64) -> GroupOutcome {
    run_group(&RunConfig::new(workers, generations), grid).unwrap()
}

#[test]
fn vertical_blinker_on_two_workers() {
    let grid = grid_from_lines(&["0100", "0100", "0100", "0000"]);
    let outcome = run(&grid, 2, 1);
    assert_eq!(
        outcome.report.lines(),
        vec!["0: 0000", "0: 1110", "1: 0000", "1: 0000"]
    );
}

#[test]
fn zero_generations_reproduces_input() {
    let grid = grid_from_lines(&["1010", "0101", "1100", "0011"]);
    for workers in [1, 2, 4] {
        let outcome = run(&grid, workers, 0);
        assert_eq!(outcome.report.to_grid().unwrap(), grid);
        assert!(outcome.report.lines().iter().all(|l| l.starts_with("0: ")));
        assert!(outcome.workers.iter().all(|m| m.generations == 0));
    }
}

#[test]
fn block_is_still_across_boundaries() {
    // On 8 rows and 4 workers the block straddles the rank 1 / rank 2
    // boundary.
    let grid = block(8, 8);
    for workers in [1, 2, 4] {
        let outcome = run(&grid, workers, 5);
        assert_eq!(outcome.report.to_grid().unwrap(), grid, "workers={workers}");
    }
}

#[test]
fn blinker_oscillates() {
    let h = blinker_horizontal(8, 8);
    let v = blinker_vertical(8, 8);
    for workers in [2, 4, 8] {
        assert_eq!(run(&h, workers, 1).report.to_grid().unwrap(), v);
        assert_eq!(run(&h, workers, 2).report.to_grid().unwrap(), h);
    }
}

#[test]
fn glider_travels_through_every_slice() {
    let mut grid = glider(8, 8);
    let mut expected = glider_shifted(8, 8);
    for _ in 0..2 {
        let outcome = run(&grid, 4, 4);
        assert_eq!(outcome.report.to_grid().unwrap(), expected);
        grid = expected;
        expected = step_grid(&grid, 4);
    }
}

#[test]
fn rows_are_tagged_with_owning_rank() {
    let grid = random_grid(6, 4, 11, 40);
    let outcome = run(&grid, 3, 2);
    let ranks: Vec<usize> = outcome.report.blocks().iter().map(|b| b.rank).collect();
    assert_eq!(ranks, vec![0, 1, 2]);
    let prefixes: Vec<String> = outcome
        .report
        .lines()
        .iter()
        .map(|l| l.split(':').next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(prefixes, vec!["0", "0", "1", "1", "2", "2"]);
}

#[test]
fn matches_single_process_kernel() {
    for seed in 0..8 {
        let grid = random_grid(16, 12, seed, 35);
        let expected = step_grid(&grid, 7);
        for workers in [1, 2, 4, 8, 16] {
            let report = run(&grid, workers, 7).report;
            assert_eq!(
                report.to_grid().unwrap(),
                expected,
                "seed={seed} workers={workers}"
            );
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let grid = random_grid(12, 10, 99, 50);
    let first = run(&grid, 4, 9).report;
    for _ in 0..5 {
        assert_eq!(run(&grid, 4, 9).report, first);
    }
}

#[test]
fn halo_traffic_matches_topology() {
    // Interior ranks swap two rows per generation in each direction, edge
    // ranks one.
    let grid = random_grid(8, 6, 3, 30);
    let outcome = run(&grid, 4, 5);
    let sent: Vec<u64> = outcome.workers.iter().map(|m| m.rows_sent).collect();
    let received: Vec<u64> = outcome.workers.iter().map(|m| m.rows_received).collect();
    assert_eq!(sent, vec![5, 10, 10, 5]);
    assert_eq!(received, sent);
}
