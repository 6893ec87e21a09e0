//! Word-Staged Reveal
//!
//! Shows a string one token per tick. Each token records when it appeared
//! so a surface can play its entrance (fade + slide) on its own clock.
//!
//! Tokens keep their trailing whitespace, so joining every token gives back
//! the source exactly.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use super::timing::{EasingFunction, Entrance, EntranceDirection};
use super::{RevealEngine, Revealer};
use crate::config::RevealConfig;

/// What counts as one token
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// A word plus its trailing whitespace
    #[default]
    Words,
    /// A single character
    Letters,
}

/// Split `source` into tokens whose concatenation equals `source`
///
/// Leading whitespace belongs to the first token. A whitespace-only source
/// is a single token.
#[must_use]
pub fn tokenize(source: &str, granularity: Granularity) -> Vec<String> {
    match granularity {
        Granularity::Letters => source.chars().map(String::from).collect(),
        Granularity::Words => {
            let mut tokens = Vec::new();
            let mut current = String::new();
            let mut seen_word = false;
            let mut trailing = false;

            for c in source.chars() {
                if c.is_whitespace() {
                    trailing = seen_word;
                    current.push(c);
                } else {
                    if trailing {
                        tokens.push(std::mem::take(&mut current));
                        trailing = false;
                    }
                    seen_word = true;
                    current.push(c);
                }
            }

            if !current.is_empty() {
                tokens.push(current);
            }
            tokens
        }
    }
}

/// A token and when it became visible
#[derive(Clone, Debug, PartialEq)]
pub struct WordToken {
    /// Token text including trailing whitespace
    pub text: String,
    /// When the stage timer revealed it (None = not yet)
    pub revealed_at: Option<Instant>,
}

impl WordToken {
    /// Whether this token is visible
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.revealed_at.is_some()
    }
}

/// Snapshot of a staged reveal
#[derive(Clone, Debug, PartialEq)]
pub struct WordFrame {
    /// All tokens of the source, in order
    pub tokens: Vec<WordToken>,
    /// Number of visible tokens (always a prefix)
    pub visible: usize,
    entrance: Duration,
    direction: EntranceDirection,
    easing: EasingFunction,
}

impl WordFrame {
    /// Number of tokens in the source
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Whether every token is visible
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.visible >= self.tokens.len()
    }

    /// Concatenated text of the visible tokens
    #[must_use]
    pub fn visible_text(&self) -> String {
        self.tokens
            .iter()
            .take(self.visible)
            .map(|t| t.text.as_str())
            .collect()
    }

    /// Entrance state of token `index` at `now` (None if not visible)
    #[must_use]
    pub fn entrance(&self, index: usize, now: Instant) -> Option<Entrance> {
        let revealed_at = self.tokens.get(index)?.revealed_at?;
        Some(Entrance::at(
            now.saturating_duration_since(revealed_at),
            self.entrance,
            self.direction,
            self.easing,
        ))
    }
}

/// Token-at-a-time reveal engine
#[derive(Clone, Debug)]
pub struct WordReveal {
    tokens: Vec<String>,
    revealed_at: Vec<Instant>,
    granularity: Granularity,
    entrance: Duration,
    direction: EntranceDirection,
    easing: EasingFunction,
}

impl WordReveal {
    /// Create an engine with the given granularity and default entrance
    #[must_use]
    pub fn new(granularity: Granularity) -> Self {
        let defaults = RevealConfig::default();
        Self {
            tokens: Vec::new(),
            revealed_at: Vec::new(),
            granularity,
            entrance: defaults.entrance,
            direction: defaults.entrance_direction,
            easing: EasingFunction::default(),
        }
    }

    /// Create an engine from the reveal configuration
    #[must_use]
    pub fn from_config(config: &RevealConfig) -> Self {
        Self::new(config.granularity)
            .with_entrance(config.entrance, config.entrance_direction)
    }

    /// Set the entrance duration and direction
    #[must_use]
    pub fn with_entrance(mut self, duration: Duration, direction: EntranceDirection) -> Self {
        self.entrance = duration;
        self.direction = direction;
        self
    }

    /// Set the entrance easing
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Number of visible tokens
    #[must_use]
    pub fn visible(&self) -> usize {
        self.revealed_at.len()
    }

    /// Number of tokens in the current source
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

impl Default for WordReveal {
    fn default() -> Self {
        Self::new(Granularity::Words)
    }
}

impl RevealEngine for WordReveal {
    type Frame = WordFrame;

    fn restart(&mut self, source: &str) {
        self.tokens = tokenize(source, self.granularity);
        self.revealed_at.clear();
    }

    fn tick(&mut self) {
        if self.revealed_at.len() < self.tokens.len() {
            self.revealed_at.push(Instant::now());
        }
    }

    fn is_complete(&self) -> bool {
        self.revealed_at.len() >= self.tokens.len()
    }

    fn frame(&self) -> WordFrame {
        let tokens = self
            .tokens
            .iter()
            .enumerate()
            .map(|(i, text)| WordToken {
                text: text.clone(),
                revealed_at: self.revealed_at.get(i).copied(),
            })
            .collect();

        WordFrame {
            tokens,
            visible: self.revealed_at.len(),
            entrance: self.entrance,
            direction: self.direction,
            easing: self.easing,
        }
    }
}

impl Revealer<WordReveal> {
    /// Staged reveal host ticking at the configured word delay
    #[must_use]
    pub fn words(config: &RevealConfig) -> Self {
        Self::new(WordReveal::from_config(config), config.word_delay)
    }
}
