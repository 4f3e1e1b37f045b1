//! Text measurement for alert boxes.
//!
//! `utils` holds the raw ANSI-aware width function, `ansi` slices styled lines
//! at display columns, and the private `core` module sizes and wraps messages.

pub mod ansi;
mod core;
mod utils;

pub use self::core::{BOX_PADDING, GLYPH_CELLS, MIN_BOX_WIDTH, TextMeasurer};
pub use utils::{display_width, grapheme_width, pad_to_width};
