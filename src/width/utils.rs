//! Terminal display width helpers.
//!
//! Provides ANSI-aware width calculation for rendered content so alert boxes
//! and the content beneath them stay column aligned.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Compute the display width of a string after stripping ANSI escapes.
///
/// Sums [`grapheme_width`] over grapheme clusters, the same unit the column
/// splitter walks, so placement and splicing agree on every row.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    clean_str.graphemes(true).map(grapheme_width).sum()
}

/// Cells occupied by one grapheme cluster.
pub fn grapheme_width(grapheme: &str) -> usize {
    grapheme.width()
}

/// Right-pad `text` with spaces until it covers `width` cells.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = display_width(text);
    let mut padded = String::with_capacity(text.len() + width.saturating_sub(current));
    padded.push_str(text);
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(current)));
    padded
}
