//! Per-worker and per-run error type.

use std::error::Error;
use std::fmt;

use lifeslab_core::GridError;

use crate::comm::CommError;
use crate::config::ConfigError;

/// Why a worker (or the whole run) stopped without a result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunError {
    /// Fatal configuration error found before distribution.
    Config(ConfigError),
    /// Messaging with a peer failed.
    Comm(CommError),
    /// A local buffer had the wrong shape.
    Grid(GridError),
    /// The coordinator finished without producing a report.
    MissingReport,
    /// A worker thread panicked.
    WorkerPanicked {
        /// Rank of the worker.
        rank: usize,
    },
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Rank of the worker.
        rank: usize,
        /// The spawn failure.
        reason: String,
    },
}

impl RunError {
    /// Whether this error is only a consequence of a peer going away, as
    /// opposed to the original cause of a failed run.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::Comm(CommError::Disconnected { .. }))
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Comm(e) => write!(f, "communication error: {e}"),
            Self::Grid(e) => write!(f, "grid error: {e}"),
            Self::MissingReport => write!(f, "coordinator produced no report"),
            Self::WorkerPanicked { rank } => write!(f, "worker {rank} panicked"),
            Self::ThreadSpawnFailed { rank, reason } => {
                write!(f, "failed to spawn worker {rank}: {reason}")
            }
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Comm(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<CommError> for RunError {
    fn from(e: CommError) -> Self {
        Self::Comm(e)
    }
}

impl From<GridError> for RunError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disconnect_classification() {
        assert!(RunError::from(CommError::Disconnected { peer: 0 }).is_disconnect());
        assert!(!RunError::from(ConfigError::NoWorkers).is_disconnect());
        assert!(!RunError::WorkerPanicked { rank: 1 }.is_disconnect());
    }

    #[test]
    fn config_error_message_is_preserved() {
        let err = RunError::from(ConfigError::NegativeGenerations { requested: -3 });
        assert!(err.to_string().contains("non-negative"));
        assert!(err.source().is_some());
    }
}
