//! Column-aware slicing of text that may carry ANSI escape sequences.

use unicode_segmentation::UnicodeSegmentation;

use super::grapheme_width;

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Style reset emitted around spliced regions.
pub const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Zero-width control sequence, kept verbatim.
    Escape(&'a str),
    /// Grapheme cluster and the number of cells it occupies.
    Text(&'a str, usize),
}

/// Iterator over the escape sequences and grapheme clusters of a string.
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
    /// End of the escape-free run starting at or before `pos`.
    run_end: usize,
}

pub fn segments(text: &str) -> Segments<'_> {
    Segments {
        text,
        pos: 0,
        run_end: 0,
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let mut chars = rest.char_indices();
        let (_, first) = chars.next()?;

        if first != ESC {
            if self.run_end <= self.pos {
                self.run_end = self.pos + rest.find(ESC).unwrap_or(rest.len());
            }
            let run = &self.text[self.pos..self.run_end];
            let grapheme = run.graphemes(true).next().unwrap_or(run);
            self.pos += grapheme.len();
            return Some(Segment::Text(grapheme, grapheme_width(grapheme)));
        }

        let end = match chars.next() {
            None => rest.len(),
            // CSI: parameters up to a final byte in 0x40..=0x7E.
            Some((_, '[')) => chars
                .find(|(_, c)| ('\x40'..='\x7e').contains(c))
                .map(|(idx, c)| idx + c.len_utf8())
                .unwrap_or(rest.len()),
            // OSC: terminated by BEL or ST (ESC \).
            Some((_, ']')) => {
                let mut end = rest.len();
                while let Some((idx, c)) = chars.next() {
                    if c == BEL {
                        end = idx + 1;
                        break;
                    }
                    if c == ESC {
                        end = match chars.next() {
                            Some((next_idx, '\\')) => next_idx + 1,
                            _ => idx,
                        };
                        break;
                    }
                }
                end
            }
            Some((idx, c)) => idx + c.len_utf8(),
        };

        let escape = &rest[..end];
        self.pos += end;
        Some(Segment::Escape(escape))
    }
}

/// A line cut at a display column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSplit {
    /// Everything left of the column, escapes included.
    pub head: String,
    /// Cells covered by `head`; smaller than the column when the line is short
    /// or a wide character straddles the cut.
    pub head_width: usize,
    /// Every escape sequence found in `head` and the straddling character, in order.
    pub escapes: String,
    /// Cells of a straddling wide character that fall right of the column.
    pub overhang: usize,
    /// Everything right of the column after the straddling character.
    pub tail: String,
}

/// Split `line` so that `head` covers at most `column` cells.
pub fn split_at_column(line: &str, column: usize) -> ColumnSplit {
    let mut split = ColumnSplit::default();
    let mut iter = segments(line);
    let mut consumed = 0usize;

    for segment in iter.by_ref() {
        match segment {
            Segment::Escape(seq) => {
                consumed += seq.len();
                split.head.push_str(seq);
                split.escapes.push_str(seq);
            }
            Segment::Text(grapheme, width) => {
                if split.head_width + width <= column {
                    consumed += grapheme.len();
                    split.head.push_str(grapheme);
                    split.head_width += width;
                    continue;
                }
                if split.head_width < column {
                    consumed += grapheme.len();
                    split.overhang = split.head_width + width - column;
                }
                break;
            }
        }
    }

    split.tail = line[consumed..].to_string();
    split
}

/// Keep at most `columns` cells of `text`.
pub fn truncate(text: &str, columns: usize) -> String {
    split_at_column(text, columns).head
}
