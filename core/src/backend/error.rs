//! Backend Errors
//!
//! Every way a classification can fail. The orchestrator folds all of them
//! into the same user-facing reason; the variants only matter for logs.

use std::fmt;

use thiserror::Error;

/// Diagnostic grouping of a failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Network unreachable, timeout, DNS failure
    Transport,
    /// Unexpected status or payload
    Protocol,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Protocol => write!(f, "protocol"),
        }
    }
}

/// Errors from a classification request
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The request never produced an HTTP response
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("service returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The body was not JSON or had no `sentiment` string
    #[error("malformed response payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// The request task ended without delivering a result
    #[error("request task ended without a result")]
    Dropped,
}

impl ClassifyError {
    /// Diagnostic grouping of this error
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) | Self::Dropped => FailureKind::Transport,
            Self::Status { .. } | Self::MalformedPayload(_) => FailureKind::Protocol,
        }
    }
}
