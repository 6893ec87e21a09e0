//! InputBox Widget
//!
//! A bordered, soft-wrapped text entry area that keeps the cursor line in
//! view.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, StatefulWidget, Widget};
use textwrap::wrap;

/// Cursor glyph drawn after the last character
const CURSOR: char = '_';

/// Text being typed, plus scroll bookkeeping
#[derive(Debug, Default)]
pub struct InputState {
    /// Current text (may contain newlines)
    text: String,
    /// First visible wrapped line
    pub scroll_offset: usize,
    /// Wrapped line count at last render
    pub total_lines: usize,
}

impl InputState {
    /// Current text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether nothing has been typed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a character
    pub fn insert_char(&mut self, c: char) {
        self.text.push(c);
    }

    /// Append a line break
    pub fn insert_newline(&mut self) {
        self.text.push('\n');
    }

    /// Delete the last character
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Replace the whole text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Wrap `text` plus cursor to `width` columns
    fn wrapped_lines(&self, width: usize) -> Vec<String> {
        let mut content = self.text.clone();
        content.push(CURSOR);

        content
            .split('\n')
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    wrap(line, width.max(1))
                        .into_iter()
                        .map(|cow| cow.to_string())
                        .collect()
                }
            })
            .collect()
    }
}

/// Bordered input area with a placeholder
pub struct InputBox<'a> {
    placeholder: &'a str,
    text_style: Style,
    placeholder_style: Style,
    border_style: Style,
}

impl<'a> InputBox<'a> {
    /// Create an input box showing `placeholder` when empty
    #[must_use]
    pub fn new(placeholder: &'a str) -> Self {
        Self {
            placeholder,
            text_style: Style::default(),
            placeholder_style: Style::default(),
            border_style: Style::default(),
        }
    }

    /// Style of typed text (and the box fill)
    #[must_use]
    pub fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    /// Style of the placeholder
    #[must_use]
    pub fn placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }

    /// Style of the border
    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }
}

impl StatefulWidget for InputBox<'_> {
    type State = InputState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.border_style)
            .style(self.text_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if state.is_empty() {
            state.total_lines = 0;
            state.scroll_offset = 0;
            buf.set_stringn(
                inner.x,
                inner.y,
                self.placeholder,
                inner.width as usize,
                self.placeholder_style,
            );
            return;
        }

        let wrapped = state.wrapped_lines(inner.width as usize);
        state.total_lines = wrapped.len();

        // Keep the cursor (last line) in view
        state.scroll_offset = state.total_lines.saturating_sub(inner.height as usize);

        for (i, line) in wrapped
            .iter()
            .skip(state.scroll_offset)
            .take(inner.height as usize)
            .enumerate()
        {
            #[allow(clippy::cast_possible_truncation)]
            let y = inner.y + i as u16;
            buf.set_stringn(inner.x, y, line, inner.width as usize, self.text_style);
        }
    }
}
