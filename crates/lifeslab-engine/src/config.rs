//! Run configuration, validation, and configuration errors.
//!
//! [`RunConfig`] is checked once before any worker is spawned. The checks
//! that need the board itself (generation count, divisibility) run on the
//! coordinator before distribution; either way a [`ConfigError`] aborts the
//! whole run with no partial output.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use lifeslab_core::GridError;

/// Upper bound on the worker count. Each worker is an OS thread holding a
/// full mesh of channel endpoints, so the group grows as `workers^2`.
pub const MAX_WORKERS: usize = 256;

// ── ConfigError ────────────────────────────────────────────────────

/// Fatal configuration errors, detected before any simulation work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The worker count is zero.
    NoWorkers,
    /// The worker count exceeds [`MAX_WORKERS`].
    TooManyWorkers {
        /// The configured count.
        requested: usize,
        /// The maximum allowed.
        max: usize,
    },
    /// The input board could not be opened or read.
    Unreadable {
        /// Path that was read.
        path: PathBuf,
        /// The underlying I/O failure.
        reason: String,
    },
    /// The input board is malformed.
    Grid(GridError),
    /// The requested generation count is negative.
    NegativeGenerations {
        /// The requested value.
        requested: i64,
    },
    /// The requested generation count does not fit the generation counter.
    GenerationsOverflow {
        /// The requested value.
        requested: i64,
    },
    /// The board's rows cannot be split into equal slices.
    IndivisibleRows {
        /// Board height.
        rows: usize,
        /// Worker count.
        workers: usize,
    },
    /// A coordinator role was requested on a rank other than
    /// [`COORDINATOR`](crate::COORDINATOR).
    NotCoordinator {
        /// The offending rank.
        rank: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWorkers => write!(f, "worker count must be at least 1"),
            Self::TooManyWorkers { requested, max } => {
                write!(f, "worker count {requested} exceeds maximum of {max}")
            }
            Self::Unreadable { path, reason } => {
                write!(f, "cannot read input file {}: {reason}", path.display())
            }
            Self::Grid(e) => write!(f, "malformed grid: {e}"),
            Self::NegativeGenerations { requested } => {
                write!(
                    f,
                    "number of generations must be a non-negative integer, got {requested}"
                )
            }
            Self::GenerationsOverflow { requested } => {
                write!(
                    f,
                    "number of generations {requested} exceeds maximum of {}",
                    u32::MAX
                )
            }
            Self::IndivisibleRows { rows, workers } => {
                write!(
                    f,
                    "{rows} rows cannot be split evenly across {workers} workers"
                )
            }
            Self::NotCoordinator { rank } => {
                write!(f, "rank {rank} cannot act as coordinator")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Convert a requested generation count into the counter type.
pub fn checked_generations(requested: i64) -> Result<u32, ConfigError> {
    if requested < 0 {
        return Err(ConfigError::NegativeGenerations { requested });
    }
    u32::try_from(requested).map_err(|_| ConfigError::GenerationsOverflow { requested })
}

// ── RunConfig ──────────────────────────────────────────────────────

/// Configuration for one run of a worker group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of workers (ranks) in the group.
    pub worker_count: usize,
    /// Requested generations, as given by the caller. Validated by the
    /// coordinator, so a negative value is reported as a
    /// [`ConfigError::NegativeGenerations`] rather than rejected here.
    pub generations: i64,
}

impl RunConfig {
    /// A config for `worker_count` workers and `generations` generations.
    pub fn new(worker_count: usize, generations: i64) -> Self {
        Self {
            worker_count,
            generations,
        }
    }

    /// Validate the worker count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.worker_count > MAX_WORKERS {
            return Err(ConfigError::TooManyWorkers {
                requested: self.worker_count,
                max: MAX_WORKERS,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_passes() {
        assert!(RunConfig::new(1, 0).validate().is_ok());
        assert!(RunConfig::new(MAX_WORKERS, 10).validate().is_ok());
    }

    #[test]
    fn zero_workers_fails() {
        assert_eq!(RunConfig::new(0, 1).validate(), Err(ConfigError::NoWorkers));
    }

    #[test]
    fn too_many_workers_fails() {
        assert_eq!(
            RunConfig::new(MAX_WORKERS + 1, 1).validate(),
            Err(ConfigError::TooManyWorkers {
                requested: MAX_WORKERS + 1,
                max: MAX_WORKERS
            })
        );
    }

    #[test]
    fn negative_generations_left_to_coordinator() {
        assert!(RunConfig::new(2, -5).validate().is_ok());
    }

    #[test]
    fn checked_generations_bounds() {
        assert_eq!(checked_generations(0), Ok(0));
        assert_eq!(checked_generations(42), Ok(42));
        assert_eq!(
            checked_generations(-1),
            Err(ConfigError::NegativeGenerations { requested: -1 })
        );
        let huge = i64::from(u32::MAX) + 1;
        assert_eq!(
            checked_generations(huge),
            Err(ConfigError::GenerationsOverflow { requested: huge })
        );
    }

    #[test]
    fn grid_error_is_source() {
        let err = ConfigError::from(GridError::Empty);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("malformed grid"));
    }
}
