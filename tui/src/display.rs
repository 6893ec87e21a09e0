//! Display State
//!
//! What the screen shows, derived from the orchestrator's [`RequestState`].
//! The TUI never decides outcomes; it only turns state into reveals.
//!
//! - The headline reveals word by word once, at startup
//! - The subtitle and the input panel fade in on fixed delays
//! - Each new settled value restarts the result scramble; the previous
//!   result stays on screen while a request is pending

use std::time::Duration;

use sentiment_core::{
    Entrance, EntranceDirection, EasingFunction, RequestState, RevealConfig, Revealer,
    ScrambleReveal, Tone, WordReveal,
};

/// Headline text
pub const HEADLINE: &str = "How do you feel today?";

/// Text under the headline
pub const SUBTITLE: &str = "Type a sentence and let AI determine your sentiment with style.";

/// When the subtitle starts fading in
pub const SUBTITLE_DELAY: Duration = Duration::from_millis(1000);

/// When the input panel starts fading in
pub const PANEL_DELAY: Duration = Duration::from_millis(1500);

/// Fade-in duration for the subtitle and panel
pub const FADE_DURATION: Duration = Duration::from_millis(500);

/// Button label when idle
pub const BUTTON_IDLE: &str = "Analyze Sentiment";

/// Button label while a request is in flight
pub const BUTTON_BUSY: &str = "Analyzing...";

/// The full display state for the TUI
pub struct DisplayState {
    /// Last state seen from the orchestrator
    pub request: RequestState,
    /// Tone of the result currently shown
    pub result_tone: Option<Tone>,
    /// Headline reveal
    pub headline: Revealer<WordReveal>,
    /// Result reveal
    pub result: Revealer<ScrambleReveal>,
    /// Time since startup
    pub elapsed: Duration,
}

impl DisplayState {
    /// Create the display and start the headline reveal
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(config: &RevealConfig) -> Self {
        let mut headline = Revealer::words(config);
        headline.show(HEADLINE);

        Self {
            request: RequestState::Idle,
            result_tone: None,
            headline,
            result: Revealer::scramble(config),
            elapsed: Duration::ZERO,
        }
    }

    /// Apply a new request state
    ///
    /// Returns true if the result reveal restarted.
    pub fn apply_state(&mut self, state: RequestState) -> bool {
        let restarted = match state.display_text() {
            Some(shown) => {
                self.result_tone = Some(shown.tone);
                self.result.show(&shown.text)
            }
            None => false,
        };

        if restarted {
            tracing::debug!(state = state.description(), "Result reveal restarted");
        }
        self.request = state;
        restarted
    }

    /// Advance display timers
    pub fn update(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    /// Whether a request is in flight
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.request.is_pending()
    }

    /// Button label for the current state
    #[must_use]
    pub fn button_label(&self) -> &'static str {
        if self.is_in_flight() {
            BUTTON_BUSY
        } else {
            BUTTON_IDLE
        }
    }

    /// Subtitle entrance (None before it starts)
    #[must_use]
    pub fn subtitle_entrance(&self) -> Option<Entrance> {
        self.entrance_after(SUBTITLE_DELAY)
    }

    /// Input panel entrance (None before it starts)
    #[must_use]
    pub fn panel_entrance(&self) -> Option<Entrance> {
        self.entrance_after(PANEL_DELAY)
    }

    fn entrance_after(&self, delay: Duration) -> Option<Entrance> {
        let since = self.elapsed.checked_sub(delay)?;
        Some(Entrance::at(
            since,
            FADE_DURATION,
            EntranceDirection::Bottom,
            EasingFunction::EaseOut,
        ))
    }
}
