use std::time::Duration;

use crate::error::{AlertError, Result};
use crate::geometry::Position;
use crate::registry::FontMode;
use crate::timer::DEFAULT_TICK_INTERVAL;
use crate::width::MIN_BOX_WIDTH;

pub const DEFAULT_MAX_WIDTH: u16 = 50;
pub const DEFAULT_DURATION_TICKS: u32 = 10;

/// Alert settings as a plain value. Every `with_*` call returns a new
/// value; an alert keeps the settings it was created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertConfig {
    max_width: u16,
    min_width: u16,
    font_mode: FontMode,
    duration_ticks: u32,
    allow_esc_to_close: bool,
    position: Position,
    tick_interval: Duration,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            min_width: MIN_BOX_WIDTH,
            font_mode: FontMode::Ascii,
            duration_ticks: DEFAULT_DURATION_TICKS,
            allow_esc_to_close: false,
            position: Position::default(),
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl AlertConfig {
    pub fn new(max_width: u16, font_mode: FontMode, duration_ticks: u32) -> Self {
        Self::default()
            .with_max_width(max_width)
            .with_font_mode(font_mode)
            .with_duration(duration_ticks)
    }

    /// Fails with [`AlertError::InvalidWidthRange`] when `min > max`.
    pub fn check_widths(min: u16, max: u16) -> Result<()> {
        if min > max {
            return Err(AlertError::InvalidWidthRange { min, max });
        }
        Ok(())
    }

    /// Widest box allowed; never below [`MIN_BOX_WIDTH`]. Pulls `min_width`
    /// down with it when needed.
    pub fn with_max_width(mut self, max_width: u16) -> Self {
        self.max_width = max_width.max(MIN_BOX_WIDTH);
        self.min_width = self.min_width.min(self.max_width);
        self
    }

    /// Narrowest box allowed. A value above `max_width` is pinned to it.
    pub fn with_min_width(mut self, min_width: u16) -> Self {
        let min_width = min_width.max(MIN_BOX_WIDTH);
        self.min_width = match Self::check_widths(min_width, self.max_width) {
            Ok(()) => min_width,
            Err(_) => self.max_width,
        };
        self
    }

    pub fn with_font_mode(mut self, font_mode: FontMode) -> Self {
        self.font_mode = font_mode;
        self
    }

    pub fn with_unicode_prefix(self) -> Self {
        self.with_font_mode(FontMode::Unicode)
    }

    /// Ticks an alert stays visible; at least one.
    pub fn with_duration(mut self, duration_ticks: u32) -> Self {
        self.duration_ticks = duration_ticks.max(1);
        self
    }

    pub fn with_allow_esc_to_close(self) -> Self {
        self.with_esc_to_close(true)
    }

    pub fn with_esc_to_close(mut self, allow: bool) -> Self {
        self.allow_esc_to_close = allow;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Parse a position name; unrecognised names keep the current position.
    pub fn with_position_name(self, name: &str) -> Self {
        match name.parse::<Position>() {
            Ok(position) => self.with_position(position),
            Err(_) => self,
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn max_width(&self) -> u16 {
        self.max_width
    }

    pub fn min_width(&self) -> u16 {
        self.min_width
    }

    pub fn font_mode(&self) -> FontMode {
        self.font_mode
    }

    pub fn duration_ticks(&self) -> u32 {
        self.duration_ticks
    }

    pub fn allow_esc_to_close(&self) -> bool {
        self.allow_esc_to_close
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}
