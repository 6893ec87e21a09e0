//! HTTP Backend Implementation
//!
//! Talks to the sentiment service over HTTP with `reqwest`.
//!
//! The core does not enforce a deadline on the round-trip. A timeout, when
//! configured, lives here in the transport and surfaces as
//! [`ClassifyError::Transport`].

use std::time::Duration;

use async_trait::async_trait;

use super::error::ClassifyError;
use super::traits::{AnalyzeRequest, AnalyzeResponse, SentimentBackend};
use crate::config::ApiConfig;
use crate::state::SentimentLabel;

/// Sentiment service client
#[derive(Clone, Debug)]
pub struct HttpBackend {
    /// Base URL without trailing slash
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend for `base_url` with no transport timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, None)
    }

    /// Create a backend with an optional transport timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: builder.build()?,
        })
    }

    /// Create from the `[api]` configuration section
    pub fn from_config(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        Self::with_timeout(config.url.clone(), config.timeout)
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the analyze endpoint URL
    fn analyze_url(&self) -> String {
        format!("{}/analyze", self.base_url)
    }
}

/// Decode a 2xx body into a label
fn parse_body(body: &[u8]) -> Result<SentimentLabel, ClassifyError> {
    let parsed: AnalyzeResponse =
        serde_json::from_slice(body).map_err(ClassifyError::MalformedPayload)?;
    Ok(SentimentLabel::new(parsed.sentiment))
}

#[async_trait]
impl SentimentBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    async fn classify(&self, text: &str) -> Result<SentimentLabel, ClassifyError> {
        let url = self.analyze_url();
        tracing::debug!(url = %url, chars = text.chars().count(), "Sending classification request");

        let response = self
            .http_client
            .post(&url)
            .json(&AnalyzeRequest::new(text))
            .send()
            .await
            .map_err(ClassifyError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(ClassifyError::Transport)?;
        parse_body(&body)
    }
}
