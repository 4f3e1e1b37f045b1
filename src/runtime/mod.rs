//! Cooperative host loop for applications that show alerts.
//!
//! The runtime owns an [`AlertModel`] next to the host [`AlertApp`]. Terminal
//! events go to the model first and reach the app only when the model lets
//! them through. Commands returned by the model are kept on a due-time queue
//! and fed back to it as events, which is how alert countdowns advance
//! without threads or blocking waits.

use std::io::Write;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use serde_json::json;

use crate::logging::{LogLevel, Logger, METRICS_TARGET, RUNTIME_TARGET, event_with_fields, json_kv};
use crate::model::{AlertCommand, AlertConfig, AlertEvent, AlertModel, EventFlow};
use crate::registry::{AlertDefinition, AlertKind};
use crate::render::AnsiRenderer;
use crate::{Result, Size};

pub mod driver;

/// Configuration knobs for the runtime loop.
#[derive(Clone)]
pub struct RuntimeConfig {
    /// Interval between synthetic tick events delivered to the app.
    pub tick_interval: Duration,
    /// Optional structured logger used by the runtime.
    pub logger: Option<Logger>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(200),
            logger: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: METRICS_TARGET.to_string(),
        }
    }
}

/// Events delivered to the host application.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    Tick { elapsed: Duration },
    Key(KeyEvent),
    Mouse(MouseEvent),
    Paste(String),
    FocusGained,
    FocusLost,
    Resize(Size),
}

/// Handle the app uses to talk to the alert model during a callback.
pub struct AppContext<'a> {
    alerts: &'a mut AlertModel,
    size: Size,
    commands: Vec<AlertCommand>,
    redraw_requested: bool,
    exit_requested: bool,
}

impl<'a> AppContext<'a> {
    fn new(alerts: &'a mut AlertModel, size: Size) -> Self {
        Self {
            alerts,
            size,
            commands: Vec::new(),
            redraw_requested: false,
            exit_requested: false,
        }
    }

    /// Queue an alert. Unknown kinds fail here and nothing is queued.
    pub fn show_alert(
        &mut self,
        kind: impl Into<AlertKind>,
        message: impl Into<String>,
    ) -> Result<()> {
        let command = self.alerts.new_alert_cmd(kind, message)?;
        self.commands.push(command);
        self.redraw_requested = true;
        Ok(())
    }

    /// Change alert settings for alerts shown from now on.
    pub fn configure_alerts(&mut self, f: impl FnOnce(AlertConfig) -> AlertConfig) {
        self.alerts.configure(f);
    }

    pub fn register_alert_type(&mut self, kind: impl Into<AlertKind>, definition: AlertDefinition) {
        self.alerts.register_alert_type(kind, definition);
    }

    pub fn has_active_alert(&self) -> bool {
        self.alerts.has_active_alert()
    }

    pub fn alerts(&self) -> &AlertModel {
        self.alerts
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Request that the renderer runs even if no alert changed.
    pub fn request_render(&mut self) {
        self.redraw_requested = true;
    }

    /// Signal to the runtime that execution should terminate at the end of the frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn into_outcome(self) -> ContextOutcome {
        ContextOutcome {
            commands: self.commands,
            redraw_requested: self.redraw_requested,
            exit_requested: self.exit_requested,
        }
    }
}

struct ContextOutcome {
    commands: Vec<AlertCommand>,
    redraw_requested: bool,
    exit_requested: bool,
}

/// Host application driven by [`AlertRuntime`].
pub trait AlertApp {
    fn name(&self) -> &str {
        "alert_app"
    }

    fn init(&mut self, _ctx: &mut AppContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_event(&mut self, _ctx: &mut AppContext<'_>, _event: &RuntimeEvent) -> Result<EventFlow> {
        Ok(EventFlow::Continue)
    }

    /// Full-screen content the alert is drawn over.
    fn view(&self, size: Size) -> String;
}

#[derive(Debug)]
struct Scheduled {
    due: Duration,
    event: AlertEvent,
}

pub struct AlertRuntime<A: AlertApp> {
    app: A,
    alerts: AlertModel,
    renderer: AnsiRenderer,
    config: RuntimeConfig,
    size: Size,
    scheduled: Vec<Scheduled>,
    clock: Duration,
    should_exit: bool,
    redraw_requested: bool,
    last_metrics_emit: Duration,
    last_frame: String,
}

impl<A: AlertApp> AlertRuntime<A> {
    pub fn new(app: A, alerts: AlertModel, initial_size: Size) -> Self {
        Self {
            app,
            alerts,
            renderer: AnsiRenderer::new(),
            config: RuntimeConfig::default(),
            size: initial_size,
            scheduled: Vec::new(),
            clock: Duration::ZERO,
            should_exit: false,
            redraw_requested: true,
            last_metrics_emit: Duration::ZERO,
            last_frame: String::new(),
        }
    }

    pub fn config_mut(&mut self) -> &mut RuntimeConfig {
        &mut self.config
    }

    pub fn alerts(&self) -> &AlertModel {
        &self.alerts
    }

    pub fn alerts_mut(&mut self) -> &mut AlertModel {
        &mut self.alerts
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    /// Last frame written, alert included.
    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }

    /// Time since [`start`](Self::start), real or scripted.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Alert events waiting for their due time.
    pub fn pending(&self) -> usize {
        self.scheduled.len()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn resize(&mut self, size: Size) -> Result<()> {
        self.handle_resize(size);
        Ok(())
    }

    pub fn run(&mut self, stdout: &mut impl Write) -> Result<()> {
        let started = Instant::now();
        self.start(stdout)?;
        let mut last_tick = Instant::now();

        while !self.should_exit {
            self.clock = started.elapsed();
            let until_tick = self
                .config
                .tick_interval
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO);
            let timeout = match self.next_due() {
                Some(due) => until_tick.min(due.saturating_sub(self.clock)),
                None => until_tick,
            };

            if event::poll(timeout)? {
                let runtime_event = self.map_event(event::read()?);
                self.dispatch_event(runtime_event)?;
            }

            self.clock = started.elapsed();
            self.deliver_due();

            if last_tick.elapsed() >= self.config.tick_interval {
                let now = Instant::now();
                let elapsed = now.duration_since(last_tick);
                last_tick = now;
                self.dispatch_event(RuntimeEvent::Tick { elapsed })?;
            }

            self.render_if_needed(stdout)?;
            self.maybe_emit_metrics();
        }

        self.finalize();
        Ok(())
    }

    pub fn run_scripted<I>(&mut self, stdout: &mut impl Write, events: I) -> Result<()>
    where
        I: IntoIterator<Item = RuntimeEvent>,
    {
        self.start(stdout)?;
        for event in events {
            self.step(stdout, event)?;
            if self.should_exit {
                break;
            }
        }
        self.finalize();
        Ok(())
    }

    /// Initialise the app and paint the first frame.
    pub fn start(&mut self, stdout: &mut impl Write) -> Result<()> {
        self.should_exit = false;
        self.redraw_requested = true;
        self.clock = Duration::ZERO;
        self.last_metrics_emit = Duration::ZERO;
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_started",
            [
                json_kv("app", json!(self.app.name())),
                json_kv("width", json!(self.size.width)),
                json_kv("height", json!(self.size.height)),
            ],
        );

        let outcome = {
            let mut ctx = AppContext::new(&mut self.alerts, self.size);
            self.app.init(&mut ctx)?;
            ctx.into_outcome()
        };
        self.apply_outcome(outcome);
        self.deliver_due();
        self.render_if_needed(stdout)
    }

    /// Process one scripted event. Tick events advance the clock first, so
    /// alert countdowns follow scripted time.
    pub fn step(&mut self, stdout: &mut impl Write, event: RuntimeEvent) -> Result<()> {
        if let RuntimeEvent::Tick { elapsed } = &event {
            self.clock += *elapsed;
            self.deliver_due();
        }
        self.dispatch_event(event)?;
        self.render_if_needed(stdout)?;
        self.maybe_emit_metrics();
        Ok(())
    }

    fn dispatch_event(&mut self, event: RuntimeEvent) -> Result<()> {
        if let RuntimeEvent::Resize(size) = &event {
            self.handle_resize(*size);
        }

        let mut flow = EventFlow::Continue;
        if let RuntimeEvent::Key(key) = &event {
            let transition = self.alerts.handle(&AlertEvent::Key(*key));
            self.schedule(transition.command);
            if transition.flow == EventFlow::Consumed {
                self.redraw_requested = true;
                flow = EventFlow::Consumed;
            }
        }

        if flow == EventFlow::Continue {
            let (app_flow, outcome) = {
                let mut ctx = AppContext::new(&mut self.alerts, self.size);
                let app_flow = self.app.on_event(&mut ctx, &event)?;
                (app_flow, ctx.into_outcome())
            };
            self.apply_outcome(outcome);
            flow = app_flow;
        }

        self.deliver_due();
        self.log_runtime_event(
            LogLevel::Debug,
            "event_dispatched",
            [
                json_kv("event", json!(Self::describe_event(&event))),
                json_kv("consumed", json!(flow == EventFlow::Consumed)),
            ],
        );
        Ok(())
    }

    fn apply_outcome(&mut self, outcome: ContextOutcome) {
        let ContextOutcome {
            commands,
            redraw_requested,
            exit_requested,
        } = outcome;

        for command in commands {
            self.schedule(Some(command));
        }

        if redraw_requested {
            self.redraw_requested = true;
        }

        if exit_requested {
            self.should_exit = true;
            self.log_runtime_event(LogLevel::Info, "exit_requested", std::iter::empty());
        }
    }

    fn schedule(&mut self, command: Option<AlertCommand>) {
        let Some(command) = command else {
            return;
        };
        if matches!(command, AlertCommand::Tick(_)) {
            self.scheduled
                .retain(|pending| !matches!(pending.event, AlertEvent::Tick(_)));
        }
        let due = self.clock + command.delay();
        let idx = self.scheduled.partition_point(|pending| pending.due <= due);
        self.scheduled.insert(
            idx,
            Scheduled {
                due,
                event: command.into_event(),
            },
        );
    }

    fn next_due(&self) -> Option<Duration> {
        self.scheduled.first().map(|pending| pending.due)
    }

    /// Feed every alert event whose due time has passed back to the model.
    fn deliver_due(&mut self) {
        while self
            .scheduled
            .first()
            .is_some_and(|pending| pending.due <= self.clock)
        {
            let pending = self.scheduled.remove(0);
            let transition = self.alerts.handle(&pending.event);
            self.schedule(transition.command);
            self.redraw_requested = true;
        }

        if !self.alerts.has_active_alert() {
            self.scheduled
                .retain(|pending| !matches!(pending.event, AlertEvent::Tick(_)));
        }
    }

    fn render_if_needed(&mut self, stdout: &mut impl Write) -> Result<()> {
        if !self.redraw_requested {
            return Ok(());
        }
        self.redraw_requested = false;

        let frame = self.alerts.render(&self.app.view(self.size));
        if self.renderer.render(stdout, &frame, self.size)? {
            self.log_runtime_event(
                LogLevel::Trace,
                "frame_written",
                [json_kv("alert", json!(self.alerts.state()))],
            );
        }
        self.last_frame = frame;
        Ok(())
    }

    fn map_event(&self, event: CrosstermEvent) -> RuntimeEvent {
        match event {
            CrosstermEvent::Key(key) => RuntimeEvent::Key(key),
            CrosstermEvent::Mouse(mouse) => RuntimeEvent::Mouse(mouse),
            CrosstermEvent::Paste(data) => RuntimeEvent::Paste(data),
            CrosstermEvent::FocusGained => RuntimeEvent::FocusGained,
            CrosstermEvent::FocusLost => RuntimeEvent::FocusLost,
            CrosstermEvent::Resize(width, height) => RuntimeEvent::Resize(Size::new(width, height)),
        }
    }

    fn handle_resize(&mut self, size: Size) {
        self.size = size;
        self.renderer.invalidate();
        self.redraw_requested = true;
        self.log_runtime_event(
            LogLevel::Info,
            "resized",
            [
                json_kv("width", json!(size.width)),
                json_kv("height", json!(size.height)),
            ],
        );
    }

    fn finalize(&mut self) {
        self.emit_metrics();
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_stopped",
            [json_kv("uptime_ms", json!(self.clock.as_millis() as u64))],
        );
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics_interval.is_zero() {
            return;
        }
        if self.clock.saturating_sub(self.last_metrics_emit) < self.config.metrics_interval {
            return;
        }
        self.last_metrics_emit = self.clock;
        self.emit_metrics();
    }

    fn emit_metrics(&self) {
        if let Some(logger) = self.config.logger.as_ref() {
            let snapshot = self.alerts.metrics().snapshot(self.clock);
            let _ = logger.log_event(snapshot.to_log_event(&self.config.metrics_target));
        }
    }

    fn log_runtime_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, RUNTIME_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn describe_event(event: &RuntimeEvent) -> &'static str {
        match event {
            RuntimeEvent::Tick { .. } => "tick",
            RuntimeEvent::Key(_) => "key",
            RuntimeEvent::Mouse(_) => "mouse",
            RuntimeEvent::Paste(_) => "paste",
            RuntimeEvent::FocusGained => "focus_gained",
            RuntimeEvent::FocusLost => "focus_lost",
            RuntimeEvent::Resize(_) => "resize",
        }
    }
}
