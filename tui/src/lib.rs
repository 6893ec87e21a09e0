//! Sentiment TUI - Terminal client for the sentiment service
//!
//! A single full-screen form: type a sentence, press Enter, and watch the
//! classification scramble into place.
//!
//! # Architecture
//!
//! - **App**: Event loop and layout; a thin client over the core
//! - **Display**: Request state turned into reveals and fade timers
//! - **Widgets**: Input box and reveal line renderers
//! - **Theme**: Dark/light palettes and tone colors

pub mod app;
pub mod display;
pub mod theme;
pub mod widgets;

pub use app::App;
