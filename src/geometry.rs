use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AlertError;

/// Integer size measured in terminal character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Rectangle area anchored within the terminal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Screen anchor an alert box is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    TopLeft,
    #[default]
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top_left",
            Position::TopCenter => "top_center",
            Position::TopRight => "top_right",
            Position::BottomLeft => "bottom_left",
            Position::BottomCenter => "bottom_center",
            Position::BottomRight => "bottom_right",
        }
    }

    /// Place a block of `overlay` size inside `area`.
    ///
    /// The returned rect is clipped to `area`, so its size can be smaller than
    /// `overlay` when the block does not fit.
    pub fn place(self, area: Size, overlay: Size) -> Rect {
        let x = match self {
            Position::TopLeft | Position::BottomLeft => 0,
            Position::TopCenter | Position::BottomCenter => {
                area.width.saturating_sub(overlay.width) / 2
            }
            Position::TopRight | Position::BottomRight => area.width.saturating_sub(overlay.width),
        };
        let y = match self {
            Position::TopLeft | Position::TopCenter | Position::TopRight => 0,
            Position::BottomLeft | Position::BottomCenter | Position::BottomRight => {
                area.height.saturating_sub(overlay.height)
            }
        };

        let width = overlay.width.min(area.width.saturating_sub(x));
        let height = overlay.height.min(area.height.saturating_sub(y));
        Rect::new(x, y, width, height)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = AlertError;

    /// Accepts `top-left`, `top_left`, `TopLeft` and similar spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "topleft" => Ok(Position::TopLeft),
            "topcenter" | "top" => Ok(Position::TopCenter),
            "topright" => Ok(Position::TopRight),
            "bottomleft" => Ok(Position::BottomLeft),
            "bottomcenter" | "bottom" => Ok(Position::BottomCenter),
            "bottomright" => Ok(Position::BottomRight),
            _ => Err(AlertError::InvalidPosition(s.to_string())),
        }
    }
}
