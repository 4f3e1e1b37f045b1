use std::io::Write;

use blake3::Hash;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use crate::error::Result;
use crate::geometry::Size;
use crate::width::ansi::{RESET, split_at_column};

/// Writes composed frames to a terminal handle, skipping unchanged frames.
#[derive(Debug, Default)]
pub struct AnsiRenderer {
    last_frame: Option<Hash>,
}

impl AnsiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the last frame so the next call repaints unconditionally.
    pub fn invalidate(&mut self) {
        self.last_frame = None;
    }

    /// Paint `frame` clipped to `size`. Returns `false` when the frame is
    /// identical to the previous one and nothing was written.
    pub fn render(&mut self, writer: &mut impl Write, frame: &str, size: Size) -> Result<bool> {
        let hash = blake3::hash(frame.as_bytes());
        if self.last_frame == Some(hash) {
            return Ok(false);
        }
        self.last_frame = Some(hash);

        let width = usize::from(size.width);
        let mut rows = 0u16;
        for (row, line) in frame.split('\n').take(usize::from(size.height)).enumerate() {
            let clipped = clip_line(line, width);
            // `take` bounds `row` by a u16 height.
            queue!(
                writer,
                MoveTo(0, row as u16),
                Print(clipped),
                Clear(ClearType::UntilNewLine)
            )?;
            rows = row as u16 + 1;
        }
        if rows < size.height {
            queue!(writer, MoveTo(0, rows), Clear(ClearType::FromCursorDown))?;
        }

        writer.flush()?;
        Ok(true)
    }
}

fn clip_line(line: &str, width: usize) -> String {
    let split = split_at_column(line, width);
    if split.tail.is_empty() {
        return split.head;
    }
    let mut clipped = split.head;
    if !split.escapes.is_empty() {
        clipped.push_str(RESET);
    }
    clipped
}
