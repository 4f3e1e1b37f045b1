//! Transient toast alerts for terminal applications.
//!
//! An [`AlertModel`] keeps at most one alert alive, counts it down with a
//! self-rescheduling tick and composites a bordered box over whatever the
//! host renders. [`AlertRuntime`] wires the model into a crossterm loop for
//! hosts that do not bring their own.

pub mod error;
pub mod geometry;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod registry;
pub mod render;
pub mod runtime;
pub mod style;
pub mod timer;
pub mod width;

pub use error::{AlertError, Result};
pub use geometry::{Position, Rect, Size};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, NullSink,
};
pub use metrics::{AlertMetrics, MetricSnapshot};
pub use model::{
    ActiveAlert, AlertCommand, AlertConfig, AlertEvent, AlertModel, AlertState, EventFlow,
    ShowAlert, Transition,
};
pub use registry::{AlertDefinition, AlertKind, AlertKindRegistry, FontMode, GlyphSet};
pub use render::{AlertBox, AnsiRenderer, BorderSet, composite};
pub use runtime::driver::cli::{CliDriver, CliDriverError, DriverResult};
pub use runtime::{AlertApp, AlertRuntime, AppContext, RuntimeConfig, RuntimeEvent};
pub use style::{AnsiStyle, Paint, PlainStyle, StyleEngine, parse_hex_color};
pub use timer::{AlertTimer, DEFAULT_TICK_INTERVAL, TickEvent, TickOutcome, TickRequest};
pub use width::{TextMeasurer, display_width};
