use std::time::Duration;

use crossterm::event::{KeyCode, KeyEventKind};
use room_alerts::logging::{FileSink, LogLevel, Logger};
use room_alerts::{
    AlertApp, AlertKind, AlertModel, AlertRuntime, AppContext, CliDriver, EventFlow, FontMode,
    Position, Result, RuntimeEvent, Size,
};

const LOG_ENV: &str = "ROOM_ALERTS_LOG";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let logger = match std::env::var(LOG_ENV) {
        Ok(path) => Some(Logger::new(FileSink::new(path, 1 << 20)?).with_min_level(LogLevel::Debug)),
        Err(_) => None,
    };

    let mut alerts = AlertModel::new(50, false, 10)
        .with_min_width(20)
        .with_allow_esc_to_close()
        .with_tick_interval(Duration::from_secs(1));
    if let Some(logger) = logger.clone() {
        alerts = alerts.with_logger(logger);
    }

    let mut runtime = AlertRuntime::new(Showcase::default(), alerts, Size::new(80, 24));
    runtime.config_mut().logger = logger;
    runtime.config_mut().tick_interval = Duration::from_millis(100);

    CliDriver::new(runtime).run()?;
    Ok(())
}

#[derive(Default)]
struct Showcase {
    last_error: Option<String>,
}

impl Showcase {
    fn trigger(key: char) -> Option<(AlertKind, Position, &'static str)> {
        let entry = match key {
            'i' => (AlertKind::INFO, Position::TopLeft, "Short message"),
            'w' => (AlertKind::WARNING, Position::TopCenter, "Medium length message"),
            'e' => (
                AlertKind::ERROR,
                Position::TopRight,
                "This is an error message that is longer to show dynamic width and wrapping",
            ),
            'd' => (AlertKind::DEBUG, Position::BottomLeft, "Shortest"),
            'I' => (AlertKind::INFO, Position::BottomCenter, "Medium message here"),
            'W' => (
                AlertKind::WARNING,
                Position::BottomRight,
                "Another long warning to demonstrate width variation when the text is super long so it will wrap on three (3) lines",
            ),
            _ => return None,
        };
        Some(entry)
    }
}

impl AlertApp for Showcase {
    fn name(&self) -> &str {
        "alert_demo"
    }

    fn on_event(&mut self, ctx: &mut AppContext<'_>, event: &RuntimeEvent) -> Result<EventFlow> {
        let RuntimeEvent::Key(key) = event else {
            if matches!(event, RuntimeEvent::Resize(_)) {
                ctx.request_render();
            }
            return Ok(EventFlow::Continue);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(EventFlow::Continue);
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => ctx.request_exit(),
            KeyCode::Char(ch @ ('N' | 'U' | 'A')) => {
                let mode = match ch {
                    'N' => FontMode::NerdFont,
                    'U' => FontMode::Unicode,
                    _ => FontMode::Ascii,
                };
                ctx.configure_alerts(|config| config.with_font_mode(mode));
                ctx.request_render();
            }
            KeyCode::Char(ch) => match Self::trigger(ch) {
                Some((kind, position, message)) => {
                    ctx.configure_alerts(|config| config.with_position(position));
                    if let Err(err) = ctx.show_alert(kind, message) {
                        self.last_error = Some(err.to_string());
                    }
                }
                None => return Ok(EventFlow::Continue),
            },
            _ => return Ok(EventFlow::Continue),
        }
        Ok(EventFlow::Consumed)
    }

    fn view(&self, size: Size) -> String {
        let width = usize::from(size.width);
        let mut rows = vec![
            "room alerts demo".to_string(),
            String::new(),
            "  i  info    top left        d  debug    bottom left".to_string(),
            "  w  warning top center      I  info     bottom center".to_string(),
            "  e  error   top right       W  warning  bottom right".to_string(),
            "  N/U/A  nerd font, unicode or ascii glyphs".to_string(),
            "  Esc closes the alert, q quits".to_string(),
        ];
        if let Some(err) = &self.last_error {
            rows.push(String::new());
            rows.push(format!("last error: {err}"));
        }
        let filler = "·".repeat(width);
        while rows.len() < usize::from(size.height) {
            rows.push(filler.clone());
        }
        rows.truncate(usize::from(size.height));
        rows.join("\n")
    }
}
