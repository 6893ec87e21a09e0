//! Request State
//!
//! The values the orchestrator publishes to whatever surface renders them.
//! Surfaces never build these themselves; they only observe them.
//!
//! # Invariant
//!
//! Exactly one [`RequestState`] variant is active at any time, and only the
//! [`RequestOrchestrator`](crate::orchestrator::RequestOrchestrator) moves
//! between them.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Shown for every failed classification, whatever the cause
pub const FAILURE_REASON: &str = "Error analyzing sentiment";

/// Global counter for submission IDs
static SUBMISSION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identifier of one accepted submission (diagnostics only)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionId(pub u64);

impl SubmissionId {
    /// Allocate the next submission ID
    #[must_use]
    pub fn next() -> Self {
        Self(SUBMISSION_COUNTER.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A classification returned by the remote service, used verbatim
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentimentLabel(String);

impl SentimentLabel {
    /// Wrap a label string
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Styling tone for this label
    #[must_use]
    pub fn tone(&self) -> Tone {
        match self.0.as_str() {
            "Positive" => Tone::Positive,
            "Negative" => Tone::Negative,
            _ => Tone::Neutral,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SentimentLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// How a settled outcome should be styled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    /// "Positive" label
    Positive,
    /// "Negative" label
    Negative,
    /// Any other label
    Neutral,
    /// The request failed
    Error,
}

/// Lifecycle of the single user-initiated classification round-trip
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A request is in flight
    Pending,
    /// The service answered with a label
    Succeeded(SentimentLabel),
    /// The request failed; carries the fixed user-facing reason
    Failed(String),
}

impl RequestState {
    /// Failed state with the fixed user-facing reason
    #[must_use]
    pub fn failed() -> Self {
        Self::Failed(FAILURE_REASON.to_string())
    }

    /// Whether a request is in flight
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the state is `Succeeded` or `Failed`
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    /// The text to display for a settled state
    #[must_use]
    pub fn display_text(&self) -> Option<DisplayText> {
        match self {
            Self::Succeeded(label) => Some(DisplayText {
                text: label.as_str().to_string(),
                tone: label.tone(),
            }),
            Self::Failed(reason) => Some(DisplayText {
                text: reason.clone(),
                tone: Tone::Error,
            }),
            Self::Idle | Self::Pending => None,
        }
    }

    /// Short status description
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Pending => "Analyzing...",
            Self::Succeeded(_) => "Done",
            Self::Failed(_) => "Failed",
        }
    }
}

/// A settled outcome as the result line shows it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayText {
    /// The string handed to the reveal engine
    pub text: String,
    /// Styling hint
    pub tone: Tone,
}

/// Result of a `submit` call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The request was issued
    Accepted {
        /// ID of the new submission
        submission: SubmissionId,
    },
    /// A request was already in flight; nothing happened
    Ignored,
}

impl SubmitOutcome {
    /// Whether the submission was accepted
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
