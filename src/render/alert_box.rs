use crate::registry::{AlertDefinition, FontMode};
use crate::style::{Paint, StyleEngine};
use crate::width::ansi::truncate;
use crate::width::{BOX_PADDING, GLYPH_CELLS, MIN_BOX_WIDTH, pad_to_width};

/// Box drawing characters for one font mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub horizontal: &'static str,
    pub vertical: &'static str,
}

pub const ROUNDED_BORDER: BorderSet = BorderSet {
    top_left: "╭",
    top_right: "╮",
    bottom_left: "╰",
    bottom_right: "╯",
    horizontal: "─",
    vertical: "│",
};

pub const ASCII_BORDER: BorderSet = BorderSet {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    horizontal: "-",
    vertical: "|",
};

impl BorderSet {
    pub fn for_mode(mode: FontMode) -> &'static BorderSet {
        match mode {
            FontMode::Unicode | FontMode::NerdFont => &ROUNDED_BORDER,
            FontMode::Ascii => &ASCII_BORDER,
        }
    }
}

/// A bordered alert ready to be composited.
#[derive(Debug, Clone, Copy)]
pub struct AlertBox<'a> {
    pub definition: &'a AlertDefinition,
    pub font_mode: FontMode,
    pub width: u16,
    pub lines: &'a [String],
}

impl AlertBox<'_> {
    /// Box height in rows: the message lines plus top and bottom border.
    pub fn height(&self) -> usize {
        self.lines.len().max(1) + 2
    }

    pub fn render(&self, engine: &dyn StyleEngine) -> String {
        let width = usize::from(self.width.max(MIN_BOX_WIDTH));
        let inner = width - usize::from(BOX_PADDING);
        let border = BorderSet::for_mode(self.font_mode);
        let paint = Paint::fg(self.definition.color);

        let mut rows = Vec::with_capacity(self.height());
        rows.push(self.top_border(engine, border, paint, width));

        let vertical = engine.paint(border.vertical, paint);
        let glyph = pad_to_width(
            &truncate(self.definition.glyph(self.font_mode), usize::from(GLYPH_CELLS)),
            usize::from(GLYPH_CELLS),
        );
        let blank_glyph = " ".repeat(usize::from(GLYPH_CELLS));

        let empty = [String::new()];
        let lines = if self.lines.is_empty() {
            &empty[..]
        } else {
            self.lines
        };

        for (idx, line) in lines.iter().enumerate() {
            let slot = if idx == 0 {
                engine.paint(&glyph, paint.bold())
            } else {
                blank_glyph.clone()
            };
            let text = pad_to_width(&truncate(line, inner), inner);
            rows.push(format!("{vertical} {slot} {text} {vertical}"));
        }

        let bottom = format!(
            "{}{}{}",
            border.bottom_left,
            border.horizontal.repeat(width - 2),
            border.bottom_right
        );
        rows.push(engine.paint(&bottom, paint));
        rows.join("\n")
    }

    /// Top border, carrying the kind label when there is room for it.
    fn top_border(
        &self,
        engine: &dyn StyleEngine,
        border: &BorderSet,
        paint: Paint,
        width: usize,
    ) -> String {
        let span = width - 2;
        let label = self.definition.label.as_str();
        let label_width = engine.display_width(label);

        if label.is_empty() || label_width + 4 > span {
            let line = format!(
                "{}{}{}",
                border.top_left,
                border.horizontal.repeat(span),
                border.top_right
            );
            return engine.paint(&line, paint);
        }

        let lead = format!("{}{} ", border.top_left, border.horizontal);
        let trail = format!(
            " {}{}",
            border.horizontal.repeat(span - label_width - 3),
            border.top_right
        );
        format!(
            "{}{}{}",
            engine.paint(&lead, paint),
            engine.paint(label, paint.bold()),
            engine.paint(&trail, paint)
        )
    }
}
