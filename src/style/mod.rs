//! Style engine used to colour alert boxes.
//!
//! The alert model never builds escape sequences itself: it hands text and a
//! [`Paint`] to a [`StyleEngine`] and measures the result through the same
//! engine, so swapping the engine keeps layout and styling consistent.

use crossterm::style::{Attribute, Color, ContentStyle};

use crate::width::display_width;

/// Style attributes applied to a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paint {
    pub foreground: Option<Color>,
    pub bold: bool,
}

impl Paint {
    pub fn fg(color: Color) -> Self {
        Self {
            foreground: Some(color),
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn is_plain(&self) -> bool {
        self.foreground.is_none() && !self.bold
    }
}

pub trait StyleEngine: Send + Sync {
    /// Return `text` styled with `paint`.
    fn paint(&self, text: &str, paint: Paint) -> String;

    /// Cells occupied by `text` once printed, ignoring escape sequences.
    fn display_width(&self, text: &str) -> usize {
        display_width(text)
    }
}

/// ANSI escape styling via crossterm.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyle;

impl StyleEngine for AnsiStyle {
    fn paint(&self, text: &str, paint: Paint) -> String {
        if text.is_empty() || paint.is_plain() {
            return text.to_string();
        }
        let mut style = ContentStyle::new();
        style.foreground_color = paint.foreground;
        if paint.bold {
            style.attributes.set(Attribute::Bold);
        }
        style.apply(text).to_string()
    }
}

/// Leaves text untouched. Useful for NO_COLOR terminals and snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl StyleEngine for PlainStyle {
    fn paint(&self, text: &str, _paint: Paint) -> String {
        text.to_string()
    }
}

/// Parse `#RRGGBB` (leading `#` optional) into a true-colour value.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}
