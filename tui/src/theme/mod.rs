//! Theme and Colors
//!
//! Dark and light palettes for the sentiment screen, plus the color blend
//! used to fade text in against the background.

use ratatui::style::Color;

use sentiment_core::Tone;

// ============================================================================
// Tone Colors
// ============================================================================

/// "Positive" - green
pub const TONE_POSITIVE: Color = Color::Rgb(34, 197, 94);

/// "Negative" - red
pub const TONE_NEGATIVE: Color = Color::Rgb(239, 68, 68);

/// Any other label, and the failure message - yellow
pub const TONE_NEUTRAL: Color = Color::Rgb(234, 179, 8);

// ============================================================================
// Accent Colors
// ============================================================================

/// Button gradient start
pub const ACCENT_BLUE: Color = Color::Rgb(59, 130, 246);

/// Button gradient middle
pub const ACCENT_INDIGO: Color = Color::Rgb(99, 102, 241);

/// Button gradient end
pub const ACCENT_FUCHSIA: Color = Color::Rgb(217, 70, 239);

/// Which palette is active
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    /// Light text on near-black
    #[default]
    Dark,
    /// Dark text on white
    Light,
}

impl ThemeMode {
    /// The other mode
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Colors for this mode
    #[must_use]
    pub fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                background: Color::Rgb(12, 14, 20),
                foreground: Color::Rgb(255, 255, 255),
                muted: Color::Rgb(209, 213, 219),
                dim: Color::Rgb(107, 114, 128),
                border: Color::Rgb(75, 85, 99),
                input_bg: Color::Rgb(55, 65, 81),
            },
            Self::Light => Palette {
                background: Color::Rgb(255, 255, 255),
                foreground: Color::Rgb(17, 24, 39),
                muted: Color::Rgb(75, 85, 99),
                dim: Color::Rgb(156, 163, 175),
                border: Color::Rgb(209, 213, 219),
                input_bg: Color::Rgb(243, 244, 246),
            },
        }
    }
}

/// Colors of one mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Screen background
    pub background: Color,
    /// Headline and input text
    pub foreground: Color,
    /// Subtitle
    pub muted: Color,
    /// Placeholders, scramble filler, status bar
    pub dim: Color,
    /// Input box border
    pub border: Color,
    /// Input box fill
    pub input_bg: Color,
}

/// Color for a settled outcome
#[must_use]
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => TONE_POSITIVE,
        Tone::Negative => TONE_NEGATIVE,
        Tone::Neutral | Tone::Error => TONE_NEUTRAL,
    }
}

/// Blend `fg` over `bg` at `opacity` (0.0..=1.0)
///
/// Only RGB colors blend; anything else snaps at half opacity.
#[must_use]
pub fn fade(fg: Color, bg: Color, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => Color::Rgb(
            mix(fr, br, opacity),
            mix(fg_, bg_, opacity),
            mix(fb, bb, opacity),
        ),
        _ if opacity >= 0.5 => fg,
        _ => bg,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mix(fg: u8, bg: u8, t: f32) -> u8 {
    (f32::from(bg) + (f32::from(fg) - f32::from(bg)) * t).round() as u8
}

/// Color along the blue-indigo-fuchsia button gradient, `t` in 0.0..=1.0
#[must_use]
pub fn button_gradient(t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        fade(ACCENT_INDIGO, ACCENT_BLUE, t * 2.0)
    } else {
        fade(ACCENT_FUCHSIA, ACCENT_INDIGO, (t - 0.5) * 2.0)
    }
}
