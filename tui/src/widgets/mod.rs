//! Custom Widgets

pub mod input;
pub mod reveal;

pub use input::{InputBox, InputState};
pub use reveal::{ScrambleLine, WordRevealLine};
