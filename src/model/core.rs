use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use serde::Serialize;
use serde_json::json;

use crate::error::Result;
use crate::geometry::Position;
use crate::logging::{LogLevel, Logger, MODEL_TARGET, event_with_fields, json_kv};
use crate::metrics::AlertMetrics;
use crate::registry::{AlertDefinition, AlertKind, AlertKindRegistry, FontMode};
use crate::render::{AlertBox, composite};
use crate::style::{AnsiStyle, StyleEngine};
use crate::timer::{AlertTimer, TickEvent, TickOutcome, TickRequest};
use crate::width::{BOX_PADDING, TextMeasurer};

use super::config::AlertConfig;

/// Request to show an alert, carried as a command and delivered back as an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowAlert {
    pub kind: AlertKind,
    pub message: String,
}

/// Events understood by [`AlertModel::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertEvent {
    Show(ShowAlert),
    Tick(TickEvent),
    Key(KeyEvent),
}

/// Outgoing request the host must turn back into an [`AlertEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertCommand {
    /// Deliver `AlertEvent::Show` right away.
    Show(ShowAlert),
    /// Deliver `AlertEvent::Tick` once `delay` has passed.
    Tick(TickRequest),
}

impl AlertCommand {
    pub fn delay(&self) -> Duration {
        match self {
            AlertCommand::Show(_) => Duration::ZERO,
            AlertCommand::Tick(request) => request.delay,
        }
    }

    pub fn into_event(self) -> AlertEvent {
        match self {
            AlertCommand::Show(show) => AlertEvent::Show(show),
            AlertCommand::Tick(request) => AlertEvent::Tick(request.event()),
        }
    }
}

/// Control the propagation of an event back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Continue,
    Consumed,
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub command: Option<AlertCommand>,
    pub flow: EventFlow,
}

impl Transition {
    fn consumed(command: Option<AlertCommand>) -> Self {
        Self {
            command,
            flow: EventFlow::Consumed,
        }
    }

    fn ignored() -> Self {
        Self {
            command: None,
            flow: EventFlow::Continue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    Idle,
    Showing,
}

/// The alert currently on screen, laid out with the settings in force when
/// it was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAlert {
    kind: AlertKind,
    message: String,
    width: u16,
    lines: Vec<String>,
    position: Position,
    font_mode: FontMode,
    closable: bool,
}

impl ActiveAlert {
    pub fn kind(&self) -> &AlertKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn font_mode(&self) -> FontMode {
        self.font_mode
    }

    pub fn closable(&self) -> bool {
        self.closable
    }
}

/// Alert state machine: Idle until an alert is shown, Showing until its
/// countdown runs out or it is closed.
#[derive(Clone)]
pub struct AlertModel {
    config: AlertConfig,
    registry: AlertKindRegistry,
    engine: Arc<dyn StyleEngine>,
    timer: AlertTimer,
    active: Option<ActiveAlert>,
    logger: Option<Logger>,
    metrics: AlertMetrics,
}

impl fmt::Debug for AlertModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertModel")
            .field("config", &self.config)
            .field("active", &self.active)
            .field("timer", &self.timer)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl Default for AlertModel {
    fn default() -> Self {
        Self::from_config(AlertConfig::default())
    }
}

impl AlertModel {
    /// Model with boxes at most `max_width` cells wide that stay up for
    /// `default_duration_ticks` ticks. Glyphs come from NerdFont when
    /// `use_nerd_font` is set and ASCII otherwise; see
    /// [`with_unicode_prefix`](Self::with_unicode_prefix).
    pub fn new(max_width: u16, use_nerd_font: bool, default_duration_ticks: u32) -> Self {
        let font_mode = if use_nerd_font {
            FontMode::NerdFont
        } else {
            FontMode::Ascii
        };
        Self::from_config(AlertConfig::new(max_width, font_mode, default_duration_ticks))
    }

    pub fn from_config(config: AlertConfig) -> Self {
        Self {
            timer: AlertTimer::new(config.tick_interval()),
            config,
            registry: AlertKindRegistry::new(),
            engine: Arc::new(AnsiStyle),
            active: None,
            logger: None,
            metrics: AlertMetrics::new(),
        }
    }

    pub fn with_config(mut self, config: AlertConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_min_width(self, min_width: u16) -> Self {
        self.map_config(|config| config.with_min_width(min_width))
    }

    pub fn with_max_width(self, max_width: u16) -> Self {
        self.map_config(|config| config.with_max_width(max_width))
    }

    pub fn with_position(self, position: Position) -> Self {
        self.map_config(|config| config.with_position(position))
    }

    pub fn with_position_name(self, name: &str) -> Self {
        self.map_config(|config| config.with_position_name(name))
    }

    pub fn with_allow_esc_to_close(self) -> Self {
        self.map_config(AlertConfig::with_allow_esc_to_close)
    }

    pub fn with_unicode_prefix(self) -> Self {
        self.map_config(AlertConfig::with_unicode_prefix)
    }

    pub fn with_font_mode(self, font_mode: FontMode) -> Self {
        self.map_config(|config| config.with_font_mode(font_mode))
    }

    pub fn with_duration(self, duration_ticks: u32) -> Self {
        self.map_config(|config| config.with_duration(duration_ticks))
    }

    pub fn with_tick_interval(self, interval: Duration) -> Self {
        self.map_config(|config| config.with_tick_interval(interval))
    }

    pub fn with_style_engine<E>(mut self, engine: E) -> Self
    where
        E: StyleEngine + 'static,
    {
        self.engine = Arc::new(engine);
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_alert_type(mut self, kind: impl Into<AlertKind>, definition: AlertDefinition) -> Self {
        self.register_alert_type(kind, definition);
        self
    }

    fn map_config(mut self, f: impl FnOnce(AlertConfig) -> AlertConfig) -> Self {
        self.configure(f);
        self
    }

    /// Replace the configuration in place. Applies to the next alert.
    pub fn configure(&mut self, f: impl FnOnce(AlertConfig) -> AlertConfig) {
        let config = std::mem::take(&mut self.config);
        self.config = f(config);
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    pub fn register_alert_type(&mut self, kind: impl Into<AlertKind>, definition: AlertDefinition) {
        let kind = kind.into();
        self.log(
            LogLevel::Debug,
            "alert_type_registered",
            [
                json_kv("kind", json!(kind)),
                json_kv("label", json!(definition.label)),
            ],
        );
        self.registry.register(kind, definition);
    }

    pub fn registry(&self) -> &AlertKindRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &AlertMetrics {
        &self.metrics
    }

    pub fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }

    /// Command that shows `message` once the host delivers it back.
    pub fn new_alert_cmd(
        &self,
        kind: impl Into<AlertKind>,
        message: impl Into<String>,
    ) -> Result<AlertCommand> {
        let kind = kind.into();
        self.registry.lookup(&kind)?;
        Ok(AlertCommand::Show(ShowAlert {
            kind,
            message: message.into(),
        }))
    }

    /// Show an alert now, replacing any current one, and return the first
    /// tick request for its countdown.
    pub fn new_alert(
        &mut self,
        kind: impl Into<AlertKind>,
        message: impl Into<String>,
    ) -> Result<TickRequest> {
        let kind = kind.into();
        if let Err(err) = self.registry.lookup(&kind) {
            self.metrics.record_rejected();
            self.log(
                LogLevel::Warn,
                "unknown_alert_kind",
                [json_kv("kind", json!(kind))],
            );
            return Err(err);
        }

        let message = message.into();
        let measurer = TextMeasurer::new(self.engine.as_ref());
        let width =
            measurer.compute_width(&message, self.config.min_width(), self.config.max_width());
        let lines = measurer.wrap(&message, usize::from(width.saturating_sub(BOX_PADDING)));

        let replaced = self.active.is_some();
        self.timer.cancel();
        self.timer.set_interval(self.config.tick_interval());
        let request = self.timer.arm(self.config.duration_ticks());

        let alert = ActiveAlert {
            kind,
            message,
            width,
            lines,
            position: self.config.position(),
            font_mode: self.config.font_mode(),
            closable: self.config.allow_esc_to_close(),
        };
        self.metrics.record_shown(replaced);
        self.log(
            LogLevel::Info,
            if replaced { "alert_replaced" } else { "alert_shown" },
            [
                json_kv("kind", json!(alert.kind)),
                json_kv("width", json!(alert.width)),
                json_kv("lines", json!(alert.lines.len())),
                json_kv("position", json!(alert.position)),
                json_kv("ticks", json!(self.timer.remaining())),
            ],
        );
        self.active = Some(alert);
        Ok(request)
    }

    /// Close the current alert early, regardless of the Esc setting.
    /// Returns `false` when nothing was showing.
    pub fn dismiss(&mut self) -> bool {
        let Some(alert) = self.active.take() else {
            return false;
        };
        self.timer.cancel();
        self.metrics.record_dismissed();
        self.log(
            LogLevel::Info,
            "alert_dismissed",
            [json_kv("kind", json!(alert.kind))],
        );
        true
    }

    /// Reducer entry point: consume the model and an event, return the new
    /// model and the request to schedule, if any.
    pub fn update(mut self, event: AlertEvent) -> (Self, Option<AlertCommand>) {
        let transition = self.handle(&event);
        (self, transition.command)
    }

    /// Apply one event in place.
    pub fn handle(&mut self, event: &AlertEvent) -> Transition {
        match event {
            // `new_alert` logs and counts the rejection of an unknown kind.
            AlertEvent::Show(show) => match self.new_alert(show.kind.clone(), show.message.clone()) {
                Ok(request) => Transition::consumed(Some(AlertCommand::Tick(request))),
                Err(_) => Transition::ignored(),
            },
            AlertEvent::Tick(tick) => self.on_tick(*tick),
            AlertEvent::Key(key) => self.on_key(key),
        }
    }

    fn on_tick(&mut self, tick: TickEvent) -> Transition {
        match self.timer.on_tick(tick) {
            TickOutcome::Stale => {
                self.metrics.record_tick(true);
                self.log(
                    LogLevel::Trace,
                    "stray_tick",
                    [json_kv("generation", json!(tick.generation))],
                );
                Transition::consumed(None)
            }
            TickOutcome::Continue { next, .. } => {
                self.metrics.record_tick(false);
                Transition::consumed(Some(AlertCommand::Tick(next)))
            }
            TickOutcome::Expired => {
                self.metrics.record_tick(false);
                if let Some(alert) = self.active.take() {
                    self.metrics.record_expired();
                    self.log(
                        LogLevel::Info,
                        "alert_expired",
                        [json_kv("kind", json!(alert.kind))],
                    );
                }
                Transition::consumed(None)
            }
        }
    }

    fn on_key(&mut self, key: &KeyEvent) -> Transition {
        let closable = self.active.as_ref().is_some_and(ActiveAlert::closable);
        if closable && key.code == KeyCode::Esc && key.kind == KeyEventKind::Press {
            self.dismiss();
            return Transition::consumed(None);
        }
        Transition::ignored()
    }

    pub fn has_active_alert(&self) -> bool {
        self.active.is_some()
    }

    pub fn state(&self) -> AlertState {
        if self.active.is_some() {
            AlertState::Showing
        } else {
            AlertState::Idle
        }
    }

    pub fn active_alert(&self) -> Option<&ActiveAlert> {
        self.active.as_ref()
    }

    pub fn remaining_ticks(&self) -> Option<u32> {
        self.active.as_ref().map(|_| self.timer.remaining())
    }

    /// Draw the active alert over `base`. Returns `base` unchanged when idle.
    pub fn render(&self, base: &str) -> String {
        let Some(alert) = self.active.as_ref() else {
            return base.to_string();
        };
        let Ok(definition) = self.registry.lookup(&alert.kind) else {
            return base.to_string();
        };

        let overlay = AlertBox {
            definition,
            font_mode: alert.font_mode,
            width: alert.width,
            lines: &alert.lines,
        }
        .render(self.engine.as_ref());
        composite(base, &overlay, alert.position)
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let _ = logger.log_event(event_with_fields(level, MODEL_TARGET, message, fields));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlertError;
    use crate::logging::MemorySink;
    use crate::registry::GlyphSet;
    use crate::style::PlainStyle;
    use crate::width::{MIN_BOX_WIDTH, display_width};
    use crossterm::event::KeyModifiers;
    use crossterm::style::Color;

    fn esc() -> AlertEvent {
        AlertEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
    }

    fn tick_of(command: Option<AlertCommand>) -> AlertEvent {
        match command {
            Some(command @ AlertCommand::Tick(_)) => command.into_event(),
            other => panic!("expected a tick request, got {other:?}"),
        }
    }

    fn background(rows: usize, cols: usize) -> String {
        vec![".".repeat(cols); rows].join("\n")
    }

    fn demo_model() -> AlertModel {
        AlertModel::new(50, false, 10)
            .with_min_width(15)
            .with_style_engine(PlainStyle)
    }

    #[test]
    fn shortest_message_uses_min_width() {
        let mut model = demo_model();
        model.new_alert(AlertKind::DEBUG, "Shortest").unwrap();

        assert_eq!(model.state(), AlertState::Showing);
        let alert = model.active_alert().unwrap();
        assert_eq!(alert.width(), 15);
        assert_eq!(model.remaining_ticks(), Some(10));
    }

    #[test]
    fn ten_ticks_return_to_idle() {
        let mut model = demo_model();
        let mut event = AlertEvent::Tick(model.new_alert(AlertKind::DEBUG, "Shortest").unwrap().event());

        for remaining in (1..10).rev() {
            let transition = model.handle(&event);
            assert!(model.has_active_alert());
            assert_eq!(model.remaining_ticks(), Some(remaining));
            event = tick_of(transition.command);
        }

        let last = model.handle(&event);
        assert!(last.command.is_none());
        assert!(!model.has_active_alert());
        assert_eq!(model.state(), AlertState::Idle);
        assert_eq!(model.metrics().snapshot(Duration::ZERO).expired, 1);
    }

    #[test]
    fn long_error_wraps_within_max_width() {
        let mut model = demo_model();
        let message = "This is an error message that is longer to show dynamic width and wrapping!!!!!!";
        assert_eq!(message.len(), 80);
        model.new_alert(AlertKind::ERROR, message).unwrap();

        let alert = model.active_alert().unwrap();
        assert_eq!(alert.width(), 50);
        assert!(alert.lines().len() >= 2);

        let rendered = model.render(&background(20, 80));
        for row in rendered.split('\n') {
            assert_eq!(display_width(row), 80);
        }
        let overlay_rows: Vec<&str> = rendered.split('\n').take(alert.lines().len() + 2).collect();
        for row in overlay_rows {
            let boxed = row.trim_matches('.');
            assert!(display_width(boxed) <= 50, "{boxed:?}");
        }
    }

    #[test]
    fn unknown_kind_leaves_state_untouched() {
        let mut model = demo_model();
        let err = model.new_alert("custom-unregistered", "nope").unwrap_err();
        assert!(matches!(err, AlertError::UnknownAlertKind(_)));
        assert_eq!(model.state(), AlertState::Idle);
        assert!(model.new_alert_cmd("custom-unregistered", "nope").is_err());

        model.new_alert(AlertKind::INFO, "kept").unwrap();
        let before = model.active_alert().cloned();
        let remaining = model.remaining_ticks();
        assert!(model.new_alert("custom-unregistered", "nope").is_err());
        assert_eq!(model.active_alert().cloned(), before);
        assert_eq!(model.remaining_ticks(), remaining);
        assert_eq!(model.metrics().snapshot(Duration::ZERO).rejected, 2);
    }

    #[test]
    fn show_event_with_unknown_kind_is_not_handled() {
        let sink = MemorySink::new();
        let mut model = demo_model().with_logger(Logger::new(sink.clone()));
        let event = AlertEvent::Show(ShowAlert {
            kind: AlertKind::from("custom-unregistered"),
            message: "nope".to_string(),
        });

        let transition = model.handle(&event);
        assert_eq!(transition.flow, EventFlow::Continue);
        assert_eq!(transition.command, None);
        assert_eq!(model.state(), AlertState::Idle);

        let warned = sink.events();
        assert_eq!(warned.len(), 1);
        assert_eq!(warned[0].message, "unknown_alert_kind");
        assert_eq!(warned[0].level, LogLevel::Warn);
        assert_eq!(model.metrics().snapshot(Duration::ZERO).rejected, 1);
    }

    #[test]
    fn emoji_clusters_keep_every_row_aligned() {
        let warn = "\u{26a0}\u{fe0f}";
        let coder = "\u{1f469}\u{200d}\u{1f4bb}";
        let mut model = AlertModel::new(40, false, 3)
            .with_style_engine(PlainStyle)
            .with_position(Position::TopRight);
        model
            .new_alert(AlertKind::INFO, format!("{warn} disk low on {coder} build box"))
            .unwrap();
        let alert = model.active_alert().unwrap();
        assert!((MIN_BOX_WIDTH..=40).contains(&alert.width()));

        let rows: Vec<String> = (0..6)
            .map(|row| {
                if row % 2 == 0 {
                    format!("{warn}{}", ".".repeat(38))
                } else {
                    format!("{coder}{}", "-".repeat(38))
                }
            })
            .collect();
        let base = rows.join("\n");
        let base_width = display_width(&rows[0]);
        assert_eq!(display_width(&rows[1]), base_width);

        let rendered = model.render(&base);
        for (idx, row) in rendered.split('\n').enumerate() {
            assert_eq!(display_width(row), base_width, "row {idx}: {row:?}");
        }
        let boxed: Vec<&str> = rendered.split('\n').take(alert.lines().len() + 2).collect();
        assert!(boxed[1].contains(warn), "{:?}", boxed[1]);
        assert!(boxed.iter().all(|row| row.ends_with('+') || row.ends_with('|')));
    }

    #[test]
    fn esc_closes_only_when_allowed() {
        let mut closable = demo_model().with_allow_esc_to_close();
        closable.new_alert(AlertKind::INFO, "bye").unwrap();
        let transition = closable.handle(&esc());
        assert_eq!(transition.flow, EventFlow::Consumed);
        assert!(!closable.has_active_alert());

        let mut sticky = demo_model();
        sticky.new_alert(AlertKind::INFO, "stay").unwrap();
        let transition = sticky.handle(&esc());
        assert_eq!(transition.flow, EventFlow::Continue);
        assert!(sticky.has_active_alert());
        assert_eq!(sticky.remaining_ticks(), Some(10));
    }

    #[test]
    fn esc_while_idle_is_passed_through() {
        let mut model = demo_model().with_allow_esc_to_close();
        assert_eq!(model.handle(&esc()).flow, EventFlow::Continue);
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut model = demo_model().with_allow_esc_to_close();
        model.new_alert(AlertKind::INFO, "hi").unwrap();
        let key = AlertEvent::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(model.handle(&key).flow, EventFlow::Continue);
        assert!(model.has_active_alert());
    }

    #[test]
    fn render_when_idle_is_identity() {
        let model = AlertModel::new(40, true, 3);
        let base = "\x1b[1mstyled\x1b[0m\nplain\n\n trailing ";
        assert_eq!(model.render(base), base);
    }

    #[test]
    fn replacement_ignores_ticks_of_previous_alert() {
        let mut model = demo_model();
        let old = model.new_alert(AlertKind::INFO, "first").unwrap();
        let old_next = tick_of(model.handle(&AlertEvent::Tick(old.event())).command);
        assert_eq!(model.remaining_ticks(), Some(9));

        model.new_alert(AlertKind::WARNING, "second").unwrap();
        assert_eq!(model.remaining_ticks(), Some(10));

        let transition = model.handle(&old_next);
        assert!(transition.command.is_none());
        assert_eq!(model.remaining_ticks(), Some(10));
        assert_eq!(model.active_alert().unwrap().kind(), &AlertKind::WARNING);

        let snapshot = model.metrics().snapshot(Duration::ZERO);
        assert_eq!(snapshot.replaced, 1);
        assert_eq!(snapshot.stray_ticks, 1);
    }

    #[test]
    fn stray_tick_after_close_is_noop() {
        let mut model = demo_model().with_allow_esc_to_close();
        let request = model.new_alert(AlertKind::INFO, "hi").unwrap();
        model.handle(&esc());
        let transition = model.handle(&AlertEvent::Tick(request.event()));
        assert!(transition.command.is_none());
        assert!(!model.has_active_alert());
    }

    #[test]
    fn show_command_round_trips_through_update() {
        let model = demo_model();
        let command = model.new_alert_cmd(AlertKind::WARNING, "Medium length message").unwrap();
        assert_eq!(command.delay(), Duration::ZERO);

        let (model, next) = model.update(command.into_event());
        assert!(model.has_active_alert());
        assert!(matches!(next, Some(AlertCommand::Tick(TickRequest { delay, .. })) if delay == Duration::from_secs(1)));
    }

    #[test]
    fn config_changes_do_not_touch_active_alert() {
        let mut model = demo_model().with_position(Position::TopLeft);
        model.new_alert(AlertKind::INFO, "pinned").unwrap();
        model.configure(|config| {
            config
                .with_position(Position::BottomRight)
                .with_allow_esc_to_close()
                .with_max_width(20)
        });

        let alert = model.active_alert().unwrap();
        assert_eq!(alert.position(), Position::TopLeft);
        assert!(!alert.closable());
        assert_eq!(model.handle(&esc()).flow, EventFlow::Continue);

        model.new_alert(AlertKind::INFO, "moved").unwrap();
        assert_eq!(model.active_alert().unwrap().position(), Position::BottomRight);
    }

    #[test]
    fn render_places_box_at_anchor() {
        let mut model = demo_model().with_position(Position::BottomRight);
        model.new_alert(AlertKind::DEBUG, "Shortest").unwrap();
        let rendered = model.render(&background(6, 30));
        let rows: Vec<&str> = rendered.split('\n').collect();
        assert_eq!(rows[0], ".".repeat(30));
        assert_eq!(rows[3], format!("{}+- Debug -----+", ".".repeat(15)));
        assert_eq!(rows[4], format!("{}| ?  Shortest |", ".".repeat(15)));
        assert_eq!(rows[5], format!("{}+-------------+", ".".repeat(15)));
    }

    #[test]
    fn custom_kinds_render_with_their_glyph() {
        let mut model = demo_model()
            .with_unicode_prefix()
            .with_position(Position::TopLeft)
            .with_alert_type(
                "deploy",
                AlertDefinition::new("Deploy", Color::Green, GlyphSet::new("🚀", "\u{f135}", ">")),
            );
        model.new_alert("deploy", "shipped").unwrap();
        let rendered = model.render(&background(4, 30));
        let second = rendered.split('\n').nth(1).unwrap();
        assert!(second.starts_with("│ 🚀 shipped"), "{second:?}");
    }

    #[test]
    fn lifecycle_is_logged() {
        let sink = MemorySink::new();
        let mut model = demo_model()
            .with_allow_esc_to_close()
            .with_logger(Logger::new(sink.clone()));
        model.new_alert(AlertKind::INFO, "one").unwrap();
        model.new_alert(AlertKind::INFO, "two").unwrap();
        model.handle(&esc());
        let _ = model.new_alert("missing", "three");

        assert_eq!(
            sink.messages(),
            vec![
                "alert_shown".to_string(),
                "alert_replaced".to_string(),
                "alert_dismissed".to_string(),
                "unknown_alert_kind".to_string(),
            ]
        );
        let shown = &sink.events()[0];
        assert_eq!(shown.target, MODEL_TARGET);
        assert_eq!(shown.field("width"), Some(&json!(15)));
    }
}
