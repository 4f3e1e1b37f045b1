//! Alert kind registry: which glyph, colour and label each kind renders with.

mod core;

pub use self::core::{AlertDefinition, AlertKind, AlertKindRegistry, FontMode, GlyphSet};
