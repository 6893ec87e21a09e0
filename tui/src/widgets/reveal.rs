//! Reveal Widgets
//!
//! Draw reveal frames from the core engines into a ratatui buffer.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;
use tokio::time::Instant;
use unicode_width::UnicodeWidthStr;

use sentiment_core::{ScrambleFrame, WordFrame};

use crate::theme::fade;

/// Centered word-by-word headline
///
/// The layout is computed from the full source so words don't shift as they
/// appear. Needs three rows: the baseline is the middle one, entering words
/// sit one row above or below it.
pub struct WordRevealLine<'a> {
    frame: &'a WordFrame,
    now: Instant,
    color: Color,
    background: Color,
    modifier: Modifier,
}

impl<'a> WordRevealLine<'a> {
    /// Draw `frame` as it looks at `now`
    #[must_use]
    pub fn new(frame: &'a WordFrame, now: Instant) -> Self {
        Self {
            frame,
            now,
            color: Color::White,
            background: Color::Black,
            modifier: Modifier::BOLD,
        }
    }

    /// Settled text color and the background it fades from
    #[must_use]
    pub fn colors(mut self, color: Color, background: Color) -> Self {
        self.color = color;
        self.background = background;
        self
    }
}

impl Widget for WordRevealLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let total: usize = self.frame.tokens.iter().map(|t| t.text.width()).sum();
        let start = area.x + area.width.saturating_sub(clamp_u16(total)) / 2;
        let right = area.right();
        let baseline = area.y + area.height / 2;

        let mut x = start;
        for (i, token) in self.frame.tokens.iter().enumerate() {
            if x >= right {
                break;
            }
            let width = clamp_u16(token.text.width());

            if let Some(entrance) = self.frame.entrance(i, self.now) {
                let row = i32::from(baseline) + i32::from(entrance.offset);
                let row = row.clamp(i32::from(area.y), i32::from(area.bottom()) - 1);
                let style = Style::default()
                    .fg(fade(self.color, self.background, entrance.opacity))
                    .add_modifier(self.modifier);

                #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                buf.set_stringn(
                    x,
                    row as u16,
                    token.text.trim_end(),
                    usize::from(right - x),
                    style,
                );
            }

            x = x.saturating_add(width);
        }
    }
}

/// `"Sentiment: "` followed by a scramble frame
pub struct ScrambleLine<'a> {
    prefix: &'a str,
    frame: Option<&'a ScrambleFrame>,
    label_style: Style,
    final_style: Style,
    filler_style: Style,
}

impl<'a> ScrambleLine<'a> {
    /// Line with `prefix` and an optional frame
    #[must_use]
    pub fn new(prefix: &'a str, frame: Option<&'a ScrambleFrame>) -> Self {
        Self {
            prefix,
            frame,
            label_style: Style::default(),
            final_style: Style::default().add_modifier(Modifier::BOLD),
            filler_style: Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Style of the prefix
    #[must_use]
    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    /// Style of locked characters
    #[must_use]
    pub fn final_style(mut self, style: Style) -> Self {
        self.final_style = style;
        self
    }

    /// Style of filler characters
    #[must_use]
    pub fn filler_style(mut self, style: Style) -> Self {
        self.filler_style = style;
        self
    }
}

impl Widget for ScrambleLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let right = area.right();
        let (mut x, _) = buf.set_stringn(
            area.x,
            area.y,
            self.prefix,
            area.width as usize,
            self.label_style,
        );

        let Some(frame) = self.frame else {
            return;
        };

        let mut glyph = [0u8; 4];
        for (c, finalized) in frame.cells() {
            if x >= right {
                break;
            }
            let style = if finalized {
                self.final_style
            } else {
                self.filler_style
            };
            let text: &str = c.encode_utf8(&mut glyph);
            let (next, _) = buf.set_stringn(x, area.y, text, usize::from(right - x), style);
            // Zero-width glyphs still take a cell so positions stay aligned
            x = next.max(x + 1);
        }
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
