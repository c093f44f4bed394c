//! lifeslab CLI.
//!
//! Reads a `'0'`/`'1'` board from a file, advances it the requested number
//! of generations on a group of workers, and prints the final board as
//! `<rank>: <cells>` lines.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use lifeslab::engine::{run_group, RunConfig, TextFileSource};

#[derive(Parser)]
#[command(name = "lifeslab")]
#[command(version)]
#[command(about = "Conway's Game of Life on horizontally partitioned workers")]
struct Cli {
    /// Board file: one line per row, '0' dead and '1' alive
    input: PathBuf,

    /// Number of generations to simulate
    #[arg(allow_negative_numbers = true)]
    generations: i64,

    /// Number of workers; must divide the board's row count
    #[arg(short, long, default_value = "1")]
    workers: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = RunConfig::new(cli.workers, cli.generations);
    let source = TextFileSource::new(&cli.input);
    let outcome = run_group(&config, &source)
        .with_context(|| format!("simulation of {} failed", cli.input.display()))?;

    for m in &outcome.workers {
        debug!(
            rank = m.rank,
            generations = m.generations,
            rows_sent = m.rows_sent,
            rows_received = m.rows_received,
            exchange_us = m.exchange_us,
            update_us = m.update_us,
            gather_us = m.gather_us,
            "worker metrics"
        );
    }

    let mut out = io::stdout().lock();
    write!(out, "{}", outcome.report).context("failed to write report")?;
    out.flush().context("failed to write report")?;
    info!(
        population = outcome.report.to_grid().map(|g| g.population()).unwrap_or(0),
        "done"
    );
    Ok(())
}
