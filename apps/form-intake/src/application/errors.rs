//! Submission errors returned by the intake use cases.

use crate::application::ports::GatewayError;
use crate::domain::shared::ValidationError;

/// Why a submission was not stored.
///
/// Whatever the variant, nothing was persisted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// The submission was rejected before reaching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store could not be reached when the request started.
    #[error("Store unavailable: {message}")]
    Connection {
        /// Underlying driver message.
        message: String,
    },

    /// The insert failed or timed out.
    #[error("Storage failed: {message}")]
    Storage {
        /// Underlying driver message.
        message: String,
        /// Whether the failure was a statement timeout.
        timed_out: bool,
    },
}

impl SubmissionError {
    /// Storage failure that was not a timeout.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            timed_out: false,
        }
    }
}

impl From<GatewayError> for SubmissionError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Connection { message } => Self::Connection { message },
            GatewayError::Statement { message } => Self::storage(message),
            GatewayError::Timeout { .. } => Self::Storage {
                message: err.to_string(),
                timed_out: true,
            },
        }
    }
}
