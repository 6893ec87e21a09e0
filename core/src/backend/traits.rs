//! Backend Traits
//!
//! The single operation the core needs from the outside world. Implement
//! [`SentimentBackend`] to plug in a different transport or a test double.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::ClassifyError;
use crate::state::SentimentLabel;

/// Body of `POST /analyze`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Text to classify (may be empty)
    pub text: String,
}

impl AnalyzeRequest {
    /// Create a request for the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Successful body of `POST /analyze`
///
/// Extra fields are ignored; a missing `sentiment` fails deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// The classification, used verbatim
    pub sentiment: String,
}

/// Remote classification service
#[async_trait]
pub trait SentimentBackend: Send + Sync {
    /// Get the backend name (for logs)
    fn name(&self) -> &str;

    /// Classify `text`, returning the service's label verbatim
    async fn classify(&self, text: &str) -> Result<SentimentLabel, ClassifyError>;
}
