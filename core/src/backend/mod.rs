//! Classification Backend
//!
//! Abstracted access to the remote sentiment service through a common trait
//! so the orchestrator can be driven by the real HTTP service or a test
//! double without changing core logic.
//!
//! # Remote Contract
//!
//! - `POST <base-url>/analyze` with `{ "text": <string> }`
//! - 2xx with `{ "sentiment": <string> }` is success
//! - anything else is a failure
//!
//! # Usage
//!
//! ```ignore
//! use sentiment_core::backend::{HttpBackend, SentimentBackend};
//!
//! let backend = HttpBackend::new("http://127.0.0.1:5000")?;
//! let label = backend.classify("I am so happy today").await?;
//! ```

mod error;
mod http;
mod traits;

pub use error::{ClassifyError, FailureKind};
pub use http::HttpBackend;
pub use traits::{AnalyzeRequest, AnalyzeResponse, SentimentBackend};
