use crate::geometry::{Position, Rect, Size};
use crate::width::ansi::{RESET, split_at_column};
use crate::width::display_width;

/// Draw `overlay` over `base` at `position`.
///
/// Both blocks are split on `\n`. Only the cells under the overlay change;
/// escape sequences active on a base line are reset before the overlay and
/// replayed after it. An overlay larger than `base` is clipped.
pub fn composite(base: &str, overlay: &str, position: Position) -> String {
    let base_lines: Vec<&str> = base.split('\n').collect();
    let overlay_lines: Vec<&str> = overlay.split('\n').collect();

    let area = Size::new(block_width(&base_lines), cells(base_lines.len()));
    let block = Size::new(block_width(&overlay_lines), cells(overlay_lines.len()));
    let rect = position.place(area, block);

    if rect.width == 0 || rect.height == 0 {
        return base.to_string();
    }

    let mut out = String::with_capacity(base.len() + overlay.len());
    for (row, line) in base_lines.iter().enumerate() {
        if row > 0 {
            out.push('\n');
        }
        match overlay_row(&rect, row) {
            Some(offset) => out.push_str(&splice(line, overlay_lines[offset], &rect)),
            None => out.push_str(line),
        }
    }
    out
}

fn overlay_row(rect: &Rect, row: usize) -> Option<usize> {
    let top = usize::from(rect.y);
    (row >= top && row < usize::from(rect.bottom())).then(|| row - top)
}

fn splice(line: &str, patch: &str, rect: &Rect) -> String {
    let x = usize::from(rect.x);
    let width = usize::from(rect.width);
    let left = split_at_column(line, x);
    let right = split_at_column(line, x + width);

    let mut out = String::with_capacity(line.len() + patch.len());
    out.push_str(&left.head);
    push_spaces(&mut out, x - left.head_width);
    if !left.escapes.is_empty() {
        out.push_str(RESET);
    }

    out.push_str(&fit(patch, width));

    if right.overhang > 0 || !right.tail.is_empty() {
        out.push_str(&right.escapes);
        push_spaces(&mut out, right.overhang);
        out.push_str(&right.tail);
    }
    out
}

/// Clip or pad a patch line to exactly `width` cells.
fn fit(patch: &str, width: usize) -> String {
    let split = split_at_column(patch, width);
    let mut fitted = split.head;
    if !split.tail.is_empty() && !split.escapes.is_empty() {
        fitted.push_str(RESET);
    }
    push_spaces(&mut fitted, width - split.head_width);
    fitted
}

fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n(' ', count));
}

fn block_width(lines: &[&str]) -> u16 {
    cells(lines.iter().map(|line| display_width(line)).max().unwrap_or(0))
}

fn cells(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
