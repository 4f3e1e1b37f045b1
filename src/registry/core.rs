use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crossterm::style::Color;
use serde::Serialize;

use crate::error::{AlertError, Result};

/// Identifier of an alert category. Built-in kinds are associated consts;
/// any other string names a custom kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AlertKind(Cow<'static, str>);

impl AlertKind {
    pub const INFO: AlertKind = AlertKind(Cow::Borrowed("info"));
    pub const WARNING: AlertKind = AlertKind(Cow::Borrowed("warning"));
    pub const ERROR: AlertKind = AlertKind(Cow::Borrowed("error"));
    pub const DEBUG: AlertKind = AlertKind(Cow::Borrowed("debug"));

    pub const BUILTIN: [AlertKind; 4] = [
        AlertKind::INFO,
        AlertKind::WARNING,
        AlertKind::ERROR,
        AlertKind::DEBUG,
    ];

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_builtin(&self) -> bool {
        Self::BUILTIN.contains(self)
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AlertKind {
    fn from(name: &str) -> Self {
        Self(Cow::Owned(name.to_string()))
    }
}

impl From<String> for AlertKind {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// Glyph family used for alert icons and box borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontMode {
    Unicode,
    NerdFont,
    Ascii,
}

impl FontMode {
    pub const ALL: [FontMode; 3] = [FontMode::Unicode, FontMode::NerdFont, FontMode::Ascii];

    fn index(self) -> usize {
        match self {
            FontMode::Unicode => 0,
            FontMode::NerdFont => 1,
            FontMode::Ascii => 2,
        }
    }
}

/// One glyph per font mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSet {
    glyphs: [String; 3],
}

impl GlyphSet {
    pub fn new(
        unicode: impl Into<String>,
        nerd_font: impl Into<String>,
        ascii: impl Into<String>,
    ) -> Self {
        Self {
            glyphs: [unicode.into(), nerd_font.into(), ascii.into()],
        }
    }

    /// Same glyph in every mode.
    pub fn uniform(glyph: impl Into<String>) -> Self {
        let glyph = glyph.into();
        Self::new(glyph.clone(), glyph.clone(), glyph)
    }

    pub fn get(&self, mode: FontMode) -> &str {
        &self.glyphs[mode.index()]
    }
}

/// How an alert kind is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDefinition {
    pub glyphs: GlyphSet,
    pub color: Color,
    pub label: String,
}

impl AlertDefinition {
    pub fn new(label: impl Into<String>, color: Color, glyphs: GlyphSet) -> Self {
        Self {
            glyphs,
            color,
            label: label.into(),
        }
    }

    pub fn glyph(&self, mode: FontMode) -> &str {
        self.glyphs.get(mode)
    }
}

fn builtin_definitions() -> [(AlertKind, AlertDefinition); 4] {
    [
        (
            AlertKind::INFO,
            AlertDefinition::new(
                "Info",
                Color::Rgb {
                    r: 0x5f,
                    g: 0xaf,
                    b: 0xff,
                },
                GlyphSet::new("\u{24d8}", "\u{f05a}", "i"),
            ),
        ),
        (
            AlertKind::WARNING,
            AlertDefinition::new(
                "Warning",
                Color::Rgb {
                    r: 0xff,
                    g: 0xd7,
                    b: 0x00,
                },
                GlyphSet::new("\u{26a0}", "\u{f071}", "!"),
            ),
        ),
        (
            AlertKind::ERROR,
            AlertDefinition::new(
                "Error",
                Color::Rgb {
                    r: 0xff,
                    g: 0x5f,
                    b: 0x5f,
                },
                GlyphSet::new("\u{2716}", "\u{f057}", "x"),
            ),
        ),
        (
            AlertKind::DEBUG,
            AlertDefinition::new(
                "Debug",
                Color::Rgb {
                    r: 0xaf,
                    g: 0x87,
                    b: 0xff,
                },
                GlyphSet::new("\u{2699}", "\u{f188}", "?"),
            ),
        ),
    ]
}

/// Mapping from alert kind to its definition. Built-ins are always present.
#[derive(Debug, Clone)]
pub struct AlertKindRegistry {
    definitions: HashMap<AlertKind, AlertDefinition>,
}

impl Default for AlertKindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertKindRegistry {
    pub fn new() -> Self {
        Self {
            definitions: builtin_definitions().into_iter().collect(),
        }
    }

    /// Insert or overwrite the definition for `kind`.
    pub fn register(&mut self, kind: impl Into<AlertKind>, definition: AlertDefinition) {
        self.definitions.insert(kind.into(), definition);
    }

    pub fn lookup(&self, kind: &AlertKind) -> Result<&AlertDefinition> {
        self.definitions
            .get(kind)
            .ok_or_else(|| AlertError::UnknownAlertKind(kind.clone()))
    }

    pub fn glyph(&self, kind: &AlertKind, mode: FontMode) -> Result<&str> {
        self.lookup(kind).map(|definition| definition.glyph(mode))
    }

    pub fn contains(&self, kind: &AlertKind) -> bool {
        self.definitions.contains_key(kind)
    }

    /// Registered kinds in name order.
    pub fn kinds(&self) -> Vec<&AlertKind> {
        let mut kinds: Vec<_> = self.definitions.keys().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
