//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize)
//! - RequestOrchestrator for the classification round-trip
//! - DisplayState for rendering
//!
//! Each frame the App polls the orchestrator, applies any state change to
//! the display, and redraws. Request state is never modified here.

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use tokio::sync::watch;
use tokio::time::Instant;

use sentiment_core::{
    ClientConfig, RequestOrchestrator, RequestState, SentimentBackend, SubmitOutcome,
};

use crate::display::{DisplayState, SUBTITLE};
use crate::theme::{button_gradient, fade, tone_color, Palette, ThemeMode};
use crate::widgets::{InputBox, InputState, ScrambleLine, WordRevealLine};

/// Input box height (5 text rows plus border)
const INPUT_HEIGHT: u16 = 7;

/// Narrowest content column
const MIN_COLUMN_WIDTH: u16 = 44;

/// Frame pacing (~20 FPS)
const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Shown in the empty input box
const PLACEHOLDER: &str = "Type your sentence here...";

/// Label before the result
const RESULT_PREFIX: &str = "Sentiment: ";

/// Button text color
const BUTTON_TEXT: Color = Color::Rgb(255, 255, 255);

/// Main application state
pub struct App<B: SentimentBackend + 'static> {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Orchestration ===
    /// Owns the request and its state
    orchestrator: RequestOrchestrator<B>,
    /// Request state observer
    state_rx: watch::Receiver<RequestState>,
    /// Display state derived from the request state
    display: DisplayState,

    // === Input State ===
    /// Text being typed
    input: InputState,

    // === Misc State ===
    /// Active palette
    theme: ThemeMode,
    /// Last frame time (for animations)
    last_frame: Instant,
}

impl<B: SentimentBackend + 'static> App<B> {
    /// Create a new App instance
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(backend: B, config: &ClientConfig) -> Self {
        let orchestrator = RequestOrchestrator::new(backend);
        let state_rx = orchestrator.subscribe();

        Self {
            running: true,
            orchestrator,
            state_rx,
            display: DisplayState::new(&config.reveal),
            input: InputState::default(),
            theme: ThemeMode::default(),
            last_frame: Instant::now(),
        }
    }

    /// Main event loop
    pub async fn run<T: Backend>(&mut self, terminal: &mut Terminal<T>) -> anyhow::Result<()> {
        // Create async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| self.draw(frame))?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                // Check for terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key);
                        }
                        // Resize is picked up by the next draw
                        Some(Ok(_)) => {}
                        Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                        None => {
                            tracing::info!("Terminal event stream closed");
                            self.running = false;
                        }
                    }
                }

                // Frame tick
                () = tokio::time::sleep(Duration::from_millis(16)) => {}
            }

            self.update();
            terminal.draw(|frame| self.draw(frame))?;

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_DURATION {
                tokio::time::sleep(FRAME_DURATION - elapsed).await;
            }
        }

        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            // Quit
            KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),

            // Theme
            KeyCode::F(2) => {
                self.theme = self.theme.toggled();
                tracing::debug!(theme = ?self.theme, "Theme toggled");
            }

            // Submit, or newline with Alt
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.input.insert_newline();
            }
            KeyCode::Enter => self.submit(),

            // Typing
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert_char(c);
            }
            KeyCode::Backspace => self.input.backspace(),

            _ => {}
        }
    }

    /// Poll the orchestrator and advance display timers
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        self.orchestrator.poll();
        self.sync_state();
        self.display.update(delta);
    }

    /// Render the whole screen
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let palette = self.theme.palette();
        let area = frame.area();

        frame.render_widget(
            Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
            area,
        );

        let [main, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let [_, column, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(column_width(main.width)),
            Constraint::Fill(1),
        ])
        .areas(main);
        let [_, headline, subtitle, _, input, button, _, result, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(column);

        self.draw_headline(frame, headline, palette);
        self.draw_subtitle(frame, subtitle, palette);

        if let Some(entrance) = self.display.panel_entrance() {
            let opacity = entrance.opacity;
            self.draw_input(frame, input, palette, opacity);
            self.draw_button(frame.buffer_mut(), button, palette, opacity);
            self.draw_result(frame, result, palette, opacity);
        }

        self.draw_status(frame, status, palette);
    }

    /// Is the app still running?
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Active palette
    #[must_use]
    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// Display state
    #[must_use]
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Input state
    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// The orchestrator
    #[must_use]
    pub fn orchestrator(&self) -> &RequestOrchestrator<B> {
        &self.orchestrator
    }

    fn quit(&mut self) {
        tracing::info!("Quit requested");
        self.running = false;
    }

    fn submit(&mut self) {
        match self.orchestrator.submit(self.input.text()) {
            SubmitOutcome::Accepted { submission } => {
                tracing::debug!(submission = %submission, "Submitted");
            }
            SubmitOutcome::Ignored => tracing::debug!("Still analyzing, submission ignored"),
        }
        self.sync_state();
    }

    /// Apply the orchestrator's state to the display if it changed
    fn sync_state(&mut self) {
        if self.state_rx.has_changed().unwrap_or(false) {
            let state = self.state_rx.borrow_and_update().clone();
            self.display.apply_state(state);
        }
    }

    fn draw_headline(&self, frame: &mut Frame<'_>, area: Rect, palette: Palette) {
        if let Some(words) = self.display.headline.frame() {
            frame.render_widget(
                WordRevealLine::new(&words, Instant::now())
                    .colors(palette.foreground, palette.background),
                area,
            );
        }
    }

    fn draw_subtitle(&self, frame: &mut Frame<'_>, area: Rect, palette: Palette) {
        let Some(entrance) = self.display.subtitle_entrance() else {
            return;
        };

        let shift = u16::try_from(entrance.offset.max(0))
            .unwrap_or(0)
            .min(area.height);
        let area = Rect {
            y: area.y + shift,
            height: area.height - shift,
            ..area
        };

        let style = Style::default().fg(fade(palette.muted, palette.background, entrance.opacity));
        frame.render_widget(
            Paragraph::new(SUBTITLE)
                .style(style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn draw_input(&mut self, frame: &mut Frame<'_>, area: Rect, palette: Palette, opacity: f32) {
        let bg = palette.background;
        let widget = InputBox::new(PLACEHOLDER)
            .text_style(
                Style::default()
                    .fg(fade(palette.foreground, bg, opacity))
                    .bg(fade(palette.input_bg, bg, opacity)),
            )
            .placeholder_style(Style::default().fg(fade(palette.dim, bg, opacity)))
            .border_style(Style::default().fg(fade(palette.border, bg, opacity)));
        frame.render_stateful_widget(widget, area, &mut self.input);
    }

    fn draw_button(&self, buf: &mut Buffer, area: Rect, palette: Palette, opacity: f32) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let busy = self.display.is_in_flight();
        let strength = if busy { opacity * 0.5 } else { opacity };

        let span = f32::from(area.width.saturating_sub(1).max(1));
        for i in 0..area.width {
            let bg = fade(button_gradient(f32::from(i) / span), palette.background, strength);
            buf[(area.x + i, area.y)].set_bg(bg);
        }

        let label = self.display.button_label();
        let label_width = u16::try_from(label.len()).unwrap_or(area.width);
        let x = area.x + area.width.saturating_sub(label_width) / 2;
        let mut style = Style::default()
            .fg(fade(BUTTON_TEXT, palette.background, strength))
            .add_modifier(Modifier::BOLD);
        if busy {
            style = style.add_modifier(Modifier::DIM);
        }
        buf.set_stringn(x, area.y, label, area.width as usize, style);
    }

    fn draw_result(&self, frame: &mut Frame<'_>, area: Rect, palette: Palette, opacity: f32) {
        let bg = palette.background;
        let tone = self
            .display
            .result_tone
            .map_or(palette.foreground, tone_color);
        let scramble = self.display.result.frame();

        frame.render_widget(
            ScrambleLine::new(RESULT_PREFIX, scramble.as_ref())
                .label_style(Style::default().fg(fade(palette.foreground, bg, opacity)))
                .final_style(
                    Style::default()
                        .fg(fade(tone, bg, opacity))
                        .add_modifier(Modifier::BOLD),
                )
                .filler_style(Style::default().fg(fade(palette.dim, bg, opacity))),
            area,
        );
    }

    fn draw_status(&self, frame: &mut Frame<'_>, area: Rect, palette: Palette) {
        let status = format!(
            " {} | Enter analyze | Alt+Enter newline | F2 theme | Esc quit",
            self.display.request.description()
        );
        frame.render_widget(
            Paragraph::new(status).style(Style::default().fg(palette.dim)),
            area,
        );
    }
}

/// Content column width for the available width
fn column_width(available: u16) -> u16 {
    (available / 2).max(MIN_COLUMN_WIDTH).min(available)
}
