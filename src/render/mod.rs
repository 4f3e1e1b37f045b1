//! Rendering: alert boxes, overlay compositing and terminal output.

mod alert_box;
mod core;
mod terminal;

pub use self::core::composite;
pub use alert_box::{ASCII_BORDER, AlertBox, BorderSet, ROUNDED_BORDER};
pub use terminal::AnsiRenderer;
