//! Running a whole worker group in-process.
//!
//! Each rank gets its own named thread and its own [`ChannelCommunicator`].
//! A worker that fails drops its communicator on the way out, so every
//! peer blocked on it sees [`CommError::Disconnected`](crate::CommError)
//! and stops too. The group therefore either produces one report or
//! fails as a whole.

use std::thread;

use tracing::{debug, info, warn};

use crate::collect::Report;
use crate::comm::{ChannelCommunicator, ChannelGroup, Communicator};
use crate::config::RunConfig;
use crate::driver::{WorkerDriver, WorkerOutcome};
use crate::error::RunError;
use crate::metrics::WorkerMetrics;
use crate::source::GridSource;
use crate::COORDINATOR;

/// Result of a successful run.
#[derive(Clone, Debug)]
pub struct GroupOutcome {
    /// The coordinator's report of the final board.
    pub report: Report,
    /// Per-worker metrics, in rank order.
    pub workers: Vec<WorkerMetrics>,
}

/// Run `config.worker_count` workers over the board from `source` and
/// return the coordinator's report.
///
/// # Errors
///
/// Fails if the config is invalid or any worker fails. When several
/// workers fail, the error that started the cascade is returned rather
/// than the disconnects it caused in its peers.
pub fn run_group(config: &RunConfig, source: &dyn GridSource) -> Result<GroupOutcome, RunError> {
    config.validate()?;
    let size = config.worker_count;
    let generations = config.generations;
    info!(workers = size, generations, "starting worker group");

    let (spawn_error, results) = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(size);
        let mut spawn_error = None;
        for comm in ChannelGroup::mesh(size) {
            let rank = comm.rank();
            let spawned = thread::Builder::new()
                .name(format!("lifeslab-worker-{rank}"))
                .spawn_scoped(scope, move || run_worker(comm, source, generations));
            match spawned {
                Ok(handle) => handles.push((rank, handle)),
                Err(e) => {
                    // Leaving the loop drops the unspawned communicators,
                    // which releases the workers already running.
                    spawn_error = Some(RunError::ThreadSpawnFailed {
                        rank,
                        reason: e.to_string(),
                    });
                    break;
                }
            }
        }

        let results: Vec<(usize, Result<WorkerOutcome, RunError>)> = handles
            .into_iter()
            .map(|(rank, handle)| {
                let result = handle
                    .join()
                    .unwrap_or(Err(RunError::WorkerPanicked { rank }));
                (rank, result)
            })
            .collect();
        (spawn_error, results)
    });

    if let Some(e) = spawn_error {
        return Err(e);
    }

    let mut outcomes = Vec::with_capacity(size);
    let mut failures = Vec::new();
    for (rank, result) in results {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => failures.push((rank, e)),
        }
    }
    if let Some(e) = root_cause(failures) {
        return Err(e);
    }

    outcomes.sort_by_key(|o| o.rank);
    let mut report = None;
    let mut workers = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        if outcome.rank == COORDINATOR {
            report = outcome.report;
        }
        workers.push(outcome.metrics);
    }
    let report = report.ok_or(RunError::MissingReport)?;
    info!(workers = size, "worker group finished");
    Ok(GroupOutcome { report, workers })
}

fn run_worker(
    comm: ChannelCommunicator,
    source: &dyn GridSource,
    generations: i64,
) -> Result<WorkerOutcome, RunError> {
    let rank = comm.rank();
    let result = if rank == COORDINATOR {
        WorkerDriver::coordinator(&comm, source, generations)
            .map_err(RunError::from)
            .and_then(WorkerDriver::run)
    } else {
        WorkerDriver::worker(&comm).run()
    };
    match &result {
        Err(e) if e.is_disconnect() => debug!(rank, error = %e, "worker stopped after peer exit"),
        Err(e) => warn!(rank, error = %e, "worker failed"),
        Ok(_) => {}
    }
    result
}

/// The error that started a failure cascade: the lowest-ranked failure
/// that is not a disconnect, or the lowest-ranked failure otherwise.
fn root_cause(mut failures: Vec<(usize, RunError)>) -> Option<RunError> {
    failures.sort_by_key(|(rank, _)| *rank);
    let pos = failures
        .iter()
        .position(|(_, e)| !e.is_disconnect())
        .unwrap_or(0);
    (!failures.is_empty()).then(|| failures.swap_remove(pos).1)
}
