//! Error types for the solver.
//!
//! Every fallible constructor returns [`TspResult`]. Configuration problems
//! are reported before any generation runs; nothing is raised mid-run.

use thiserror::Error;

/// Result type alias for solver operations.
pub type TspResult<T> = Result<T, TspError>;

/// Unified error type for the distance model and the GA engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TspError {
    /// A construction-time parameter is out of range.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the violated constraint.
        message: String,
    },

    /// The requested input path exists in the API but is not implemented.
    #[error("unsupported input: {message}")]
    UnsupportedInput {
        /// Description of the unsupported request.
        message: String,
    },

    /// `solve` was called on an engine that already ran.
    #[error("engine has already completed a run")]
    AlreadySolved,

    /// The background solver thread panicked before returning a result.
    #[error("solver worker panicked")]
    WorkerPanicked,
}

impl TspError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TspError::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        TspError::UnsupportedInput {
            message: message.into(),
        }
    }

    /// Returns `true` for errors caused by invalid parameters.
    pub fn is_configuration(&self) -> bool {
        matches!(self, TspError::InvalidConfiguration { .. })
    }
}
