//! Sentiment Core - Headless Request Orchestration and Text Reveal
//!
//! This crate holds everything the sentiment client does that is not
//! drawing: talking to the classification service, tracking the one
//! request that may be in flight, and turning a settled result into
//! animated reveal frames. It can drive a terminal UI, a test harness, or
//! any other surface.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UI Surfaces                           │
//! │        ┌─────────────┐            ┌──────────────────┐       │
//! │        │     TUI     │            │  Headless/Tests  │       │
//! │        │  (ratatui)  │            │                  │       │
//! │        └──────┬──────┘            └────────┬─────────┘       │
//! │               └──────────────┬─────────────┘                 │
//! │              submit(text) ▲  │  ▼ RequestState / frames      │
//! └──────────────────────────────┼───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┼───────────────────────────────┐
//! │                        SENTIMENT CORE                        │
//! │  ┌───────────────────────────┴────────────────────────────┐  │
//! │  │ RequestOrchestrator ──► SentimentBackend (HTTP)        │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │ Revealer ──► RevealTask ──► WordReveal / ScrambleReveal │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`RequestOrchestrator`]: Submits text and owns the request state
//! - [`RequestState`]: Idle, Pending, Succeeded or Failed
//! - [`SentimentBackend`]: The remote classification service
//! - [`Revealer`]: Restarts a reveal whenever the shown text changes
//! - [`WordReveal`] / [`ScrambleReveal`]: The two reveal strategies
//!
//! # Quick Start
//!
//! ```ignore
//! use sentiment_core::{HttpBackend, RequestOrchestrator, Revealer, RevealConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = HttpBackend::new("http://127.0.0.1:5000")?;
//!     let mut orchestrator = RequestOrchestrator::new(backend);
//!     let mut result = Revealer::scramble(&RevealConfig::default());
//!
//!     orchestrator.submit("I am so happy today");
//!
//!     // Frame loop
//!     loop {
//!         orchestrator.poll();
//!         if let Some(shown) = orchestrator.current_state().display_text() {
//!             result.show(&shown.text);
//!         }
//!         // draw result.frame() ...
//!     }
//! }
//! ```
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod config;
pub mod orchestrator;
pub mod reveal;
pub mod state;

// Re-exports for convenience
pub use backend::{
    AnalyzeRequest, AnalyzeResponse, ClassifyError, FailureKind, HttpBackend, SentimentBackend,
};
pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with_env, ApiConfig,
    ClientConfig, ConfigError, ConfigOverrides, ConfigSource, RevealConfig,
};
pub use orchestrator::RequestOrchestrator;
pub use reveal::{
    EasingFunction, Entrance, EntranceDirection, Granularity, RevealEngine, RevealSnapshot,
    RevealTask, Revealer, ScrambleFrame, ScrambleOrder, ScrambleReveal, WordFrame, WordReveal,
    WordToken,
};
pub use state::{
    DisplayText, RequestState, SentimentLabel, SubmissionId, SubmitOutcome, Tone, FAILURE_REASON,
};
