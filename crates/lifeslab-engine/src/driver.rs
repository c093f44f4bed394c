//! One worker's lifetime as an explicit state machine.
//!
//! ```text
//! AwaitingParameters → AwaitingSlice → (Exchanging → Updating) × generations → Reporting → Done
//! ```
//!
//! The coordinator loads and distributes the board before entering
//! `AwaitingParameters`, then receives its own parameters and slice like
//! any other worker. With zero generations the loop and the gather are
//! skipped: `AwaitingSlice` goes straight to `Done` and the coordinator's
//! outcome is the initial board.
//!
//! Generation `g` finishes its exchange and update before generation
//! `g + 1` starts; the update reads the halo rows the exchange just
//! received.

use std::ops::ControlFlow;
use std::time::Instant;

use lifeslab_core::{SimulationParameters, Slice};
use lifeslab_kernel::UpdateKernel;
use tracing::{debug, debug_span, info, trace};

use crate::collect::{Report, ResultCollector};
use crate::comm::{Communicator, Tag};
use crate::config::{checked_generations, ConfigError};
use crate::error::RunError;
use crate::halo::HaloExchanger;
use crate::metrics::{micros, WorkerMetrics};
use crate::partition::GridPartitioner;
use crate::source::GridSource;
use crate::COORDINATOR;

/// What a worker hands back when it finishes.
#[derive(Clone, Debug)]
pub struct WorkerOutcome {
    /// The worker's rank.
    pub rank: usize,
    /// The board report. Only the coordinator has one.
    pub report: Option<Report>,
    /// Counters and timings for the run.
    pub metrics: WorkerMetrics,
}

/// Buffers owned by a worker for the whole loop: two slices swapped every
/// generation and the halo rows.
struct Workspace {
    params: SimulationParameters,
    current: Slice,
    next: Slice,
    exchanger: HaloExchanger,
}

/// A live phase of the driver. Finishing is `ControlFlow::Break` carrying
/// the report, so a finished worker has no `Step`.
enum Step {
    AwaitingParameters,
    AwaitingSlice(SimulationParameters),
    Exchanging(Workspace, u32),
    Updating(Workspace, u32),
    Reporting(Workspace),
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Self::AwaitingParameters => "awaiting-parameters",
            Self::AwaitingSlice(_) => "awaiting-slice",
            Self::Exchanging(..) => "exchanging",
            Self::Updating(..) => "updating",
            Self::Reporting(_) => "reporting",
        }
    }
}

/// The coordinator's extra duties: where the board comes from and how many
/// generations were requested.
struct Coordination<'a> {
    source: &'a dyn GridSource,
    generations: i64,
}

/// Runs one worker from first receive to final report.
pub struct WorkerDriver<'a, C> {
    comm: &'a C,
    coordination: Option<Coordination<'a>>,
    kernel: UpdateKernel,
    metrics: WorkerMetrics,
    initial_report: Option<Report>,
}

impl<'a, C: Communicator> WorkerDriver<'a, C> {
    /// A plain worker: receives everything from the coordinator.
    pub fn worker(comm: &'a C) -> Self {
        Self {
            comm,
            coordination: None,
            kernel: UpdateKernel::default(),
            metrics: WorkerMetrics::new(comm.rank()),
            initial_report: None,
        }
    }

    /// The coordinating worker. It loads the board from `source`,
    /// validates `generations`, and distributes before working.
    ///
    /// Returns [`ConfigError::NotCoordinator`] unless `comm` is rank
    /// [`COORDINATOR`].
    pub fn coordinator(
        comm: &'a C,
        source: &'a dyn GridSource,
        generations: i64,
    ) -> Result<Self, ConfigError> {
        if comm.rank() != COORDINATOR {
            return Err(ConfigError::NotCoordinator { rank: comm.rank() });
        }
        let mut driver = Self::worker(comm);
        driver.coordination = Some(Coordination {
            source,
            generations,
        });
        Ok(driver)
    }

    /// Run to completion.
    pub fn run(mut self) -> Result<WorkerOutcome, RunError> {
        let rank = self.comm.rank();
        let _span = debug_span!("worker", rank).entered();

        if let Some(coordination) = self.coordination.take() {
            self.distribute(coordination)?;
        }

        let mut step = Step::AwaitingParameters;
        let report = loop {
            trace!(state = step.name(), "advancing");
            match self.advance(step)? {
                ControlFlow::Continue(next) => step = next,
                ControlFlow::Break(report) => break report,
            }
        };
        debug!(generations = self.metrics.generations, "worker done");
        Ok(WorkerOutcome {
            rank,
            report,
            metrics: self.metrics,
        })
    }

    fn distribute(&mut self, coordination: Coordination<'_>) -> Result<(), RunError> {
        let grid = coordination.source.load()?;
        let generations = checked_generations(coordination.generations)?;
        let partition = GridPartitioner::new(self.comm.size()).partition(&grid, generations)?;
        info!(
            rows = grid.rows(),
            columns = grid.columns(),
            workers = self.comm.size(),
            generations,
            "distributing board"
        );
        if generations == 0 {
            self.initial_report = Some(Report::initial(&grid));
        }
        GridPartitioner::distribute(self.comm, partition)?;
        Ok(())
    }

    /// Run one phase. `Break` carries the worker's report, if it has one.
    fn advance(&mut self, step: Step) -> Result<ControlFlow<Option<Report>, Step>, RunError> {
        let comm = self.comm;
        let next = match step {
            Step::AwaitingParameters => Step::AwaitingSlice(comm.recv_parameters(COORDINATOR)?),

            Step::AwaitingSlice(params) => {
                let current = comm.recv_slice(COORDINATOR, Tag::InitialSlice, &params)?;
                if params.generations == 0 {
                    return Ok(ControlFlow::Break(self.initial_report.take()));
                }
                let (rows, columns) = params.slice_shape();
                let ws = Workspace {
                    params,
                    next: Slice::dead(rows, columns),
                    current,
                    exchanger: HaloExchanger::new(comm.rank(), comm.size(), columns),
                };
                Step::Exchanging(ws, 1)
            }

            Step::Exchanging(mut ws, generation) => {
                let started = Instant::now();
                ws.exchanger.exchange(comm, &ws.current)?;
                self.metrics.exchange_us = self
                    .metrics
                    .exchange_us
                    .saturating_add(micros(started.elapsed()));
                Step::Updating(ws, generation)
            }

            Step::Updating(mut ws, generation) => {
                let started = Instant::now();
                self.kernel.step(
                    &ws.current,
                    ws.exchanger.above(),
                    ws.exchanger.below(),
                    &mut ws.next,
                )?;
                std::mem::swap(&mut ws.current, &mut ws.next);
                self.metrics.update_us = self
                    .metrics
                    .update_us
                    .saturating_add(micros(started.elapsed()));
                self.metrics.generations = generation;
                trace!(generation, population = ws.current.population(), "generation done");

                if generation == ws.params.generations {
                    Step::Reporting(ws)
                } else {
                    Step::Exchanging(ws, generation + 1)
                }
            }

            Step::Reporting(ws) => {
                self.metrics.rows_sent = ws.exchanger.rows_sent();
                self.metrics.rows_received = ws.exchanger.rows_received();
                let started = Instant::now();
                let report = if comm.rank() == COORDINATOR {
                    Some(ResultCollector::collect(comm, &ws.params, &ws.current)?)
                } else {
                    ResultCollector::submit(comm, ws.current)?;
                    None
                };
                self.metrics.gather_us = micros(started.elapsed());
                return Ok(ControlFlow::Break(report));
            }
        };
        Ok(ControlFlow::Continue(next))
    }
}
