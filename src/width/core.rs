use crate::style::StyleEngine;

use super::ansi::{Segment, segments};

/// Cells an alert box adds around its message: a border cell and a spacer on
/// each side, plus the glyph slot and the spacer after it.
pub const BOX_PADDING: u16 = 7;

/// Cells reserved for the kind glyph.
pub const GLYPH_CELLS: u16 = 2;

/// Narrowest box that still fits one double-width character of message text.
pub const MIN_BOX_WIDTH: u16 = BOX_PADDING + 2;

/// Sizes and wraps alert messages using the style engine's notion of width.
#[derive(Clone, Copy)]
pub struct TextMeasurer<'a> {
    engine: &'a dyn StyleEngine,
}

impl<'a> TextMeasurer<'a> {
    pub fn new(engine: &'a dyn StyleEngine) -> Self {
        Self { engine }
    }

    /// Width of the widest message line.
    pub fn message_width(&self, message: &str) -> usize {
        message
            .split('\n')
            .map(|line| self.engine.display_width(line))
            .max()
            .unwrap_or(0)
    }

    /// Box width for `message`: its natural width plus padding, clamped to
    /// `[min_width, max_width]`. A `min_width` above `max_width` is pinned.
    pub fn compute_width(&self, message: &str, min_width: u16, max_width: u16) -> u16 {
        let min = usize::from(min_width.min(max_width));
        let natural = self.message_width(message) + usize::from(BOX_PADDING);
        // `natural` is clamped into u16 range by `max_width`.
        natural.clamp(min, usize::from(max_width)) as u16
    }

    /// Greedy word wrap at `width` cells. Words wider than `width` are broken
    /// across lines; newlines in `message` always start a new line.
    pub fn wrap(&self, message: &str, width: usize) -> Vec<String> {
        let width = width.max(1);
        let mut lines = Vec::new();

        for paragraph in message.trim_end_matches('\n').split('\n') {
            let mut line = String::new();
            let mut line_width = 0usize;

            for word in paragraph.split_whitespace() {
                let word_width = self.engine.display_width(word);

                if word_width > width {
                    if line_width > 0 {
                        lines.push(std::mem::take(&mut line));
                    }
                    let mut chunks = hard_break(word, width);
                    let (last, last_width) = chunks.pop().unwrap_or_default();
                    lines.extend(chunks.into_iter().map(|(chunk, _)| chunk));
                    line = last;
                    line_width = last_width;
                    continue;
                }

                if line_width > 0 && line_width + 1 + word_width > width {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                if line_width > 0 {
                    line.push(' ');
                    line_width += 1;
                }
                line.push_str(word);
                line_width += word_width;
            }

            lines.push(line);
        }

        lines
    }
}

/// Split a single word into chunks of at most `width` cells.
fn hard_break(word: &str, width: usize) -> Vec<(String, usize)> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for segment in segments(word) {
        match segment {
            Segment::Escape(seq) => current.push_str(seq),
            Segment::Text(grapheme, cells) => {
                if current_width > 0 && current_width + cells > width {
                    chunks.push((std::mem::take(&mut current), current_width));
                    current_width = 0;
                }
                current.push_str(grapheme);
                current_width += cells;
            }
        }
    }

    if !current.is_empty() {
        chunks.push((current, current_width));
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{AnsiStyle, Paint, PlainStyle};
    use crate::width::display_width;
    use unicode_segmentation::UnicodeSegmentation;

    fn measurer() -> TextMeasurer<'static> {
        TextMeasurer::new(&PlainStyle)
    }

    #[test]
    fn width_is_clamped_into_range() {
        let m = measurer();
        assert_eq!(m.compute_width("Shortest", 15, 50), 15);
        assert_eq!(m.compute_width("Medium length message", 15, 50), 21 + BOX_PADDING);
        assert_eq!(m.compute_width(&"x".repeat(80), 15, 50), 50);
    }

    #[test]
    fn width_property_holds_for_many_lengths() {
        let m = measurer();
        for len in 0..120 {
            let message = "a".repeat(len);
            let width = m.compute_width(&message, 12, 40);
            assert!((12..=40).contains(&width));
            let expected = (len + BOX_PADDING as usize).clamp(12, 40) as u16;
            assert_eq!(width, expected);
        }
    }

    #[test]
    fn inverted_range_pins_min_to_max() {
        assert_eq!(measurer().compute_width("hi", 30, 20), 20);
    }

    #[test]
    fn styled_message_measures_visible_cells() {
        let engine = AnsiStyle;
        let m = TextMeasurer::new(&engine);
        let styled = engine.paint("Shortest but styled", Paint::fg(crossterm::style::Color::Red));
        assert_eq!(m.compute_width(&styled, 0, 80), 19 + BOX_PADDING);
    }

    #[test]
    fn wraps_greedily_on_words() {
        let lines = measurer().wrap("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn long_words_are_hard_broken() {
        let lines = measurer().wrap("ab abcdefghijkl cd", 5);
        assert_eq!(lines, vec!["ab", "abcde", "fghij", "kl cd"]);
        assert!(lines.iter().all(|l| display_width(l) <= 5));
    }

    #[test]
    fn newlines_and_blank_messages() {
        let m = measurer();
        assert_eq!(m.wrap("one\ntwo", 20), vec!["one", "two"]);
        assert_eq!(m.wrap("", 20), vec![String::new()]);
        assert_eq!(m.wrap("a\n\nb", 20), vec!["a", "", "b"]);
    }

    #[test]
    fn wide_characters_respect_width() {
        let lines = measurer().wrap("日本語のテキスト", 6);
        assert_eq!(lines, vec!["日本語", "のテキ", "スト"]);
    }

    #[test]
    fn hard_break_never_splits_a_cluster() {
        let coder = "\u{1f469}\u{200d}\u{1f4bb}";
        let word = coder.repeat(5);
        let lines = measurer().wrap(&word, 4);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(line.graphemes(true).all(|g| g == coder), "{line:?}");
            assert!(display_width(line) <= 4);
        }
    }

    #[test]
    fn variation_selector_emoji_measured_as_cluster() {
        let message = "\u{26a0}\u{fe0f} disk low";
        let expected = display_width(message) + usize::from(BOX_PADDING);
        assert_eq!(usize::from(measurer().compute_width(message, 9, 50)), expected);
        assert_eq!(measurer().wrap(message, 40), vec![message.to_string()]);
    }
}
