use std::io;
use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use room_alerts::{
    AlertApp, AlertBox, AlertKind, AlertModel, AlertRuntime, AnsiStyle, AppContext, EventFlow,
    Position, Result, RuntimeEvent, Size, TextMeasurer, composite,
};

const LONG_MESSAGE: &str = "This is an error message that is longer to show dynamic width and \
wrapping, repeated until it needs several lines inside the box to fit the configured maximum";

fn base_screen(width: usize, height: usize) -> String {
    let row = format!("\x1b[34m{}\x1b[0m", "·".repeat(width));
    vec![row; height].join("\n")
}

fn wrap_long_message(c: &mut Criterion) {
    let measurer = TextMeasurer::new(&AnsiStyle);
    c.bench_function("wrap_long_message", |b| {
        b.iter(|| measurer.wrap(black_box(LONG_MESSAGE), black_box(43)));
    });
}

fn composite_styled_base(c: &mut Criterion) {
    let base = base_screen(120, 40);
    let mut model = AlertModel::new(50, true, 10).with_position(Position::BottomCenter);
    model
        .new_alert(AlertKind::ERROR, LONG_MESSAGE)
        .expect("builtin kind");
    let alert = model.active_alert().expect("alert shown");
    let overlay = AlertBox {
        definition: model.registry().lookup(alert.kind()).expect("builtin kind"),
        font_mode: alert.font_mode(),
        width: alert.width(),
        lines: alert.lines(),
    }
    .render(&AnsiStyle);
    assert!(overlay.lines().count() >= 3);

    c.bench_function("composite_styled_base", |b| {
        b.iter(|| composite(black_box(&base), black_box(&overlay), Position::BottomCenter));
    });
    c.bench_function("model_render_over_base", |b| {
        b.iter(|| model.render(black_box(&base)));
    });
}

struct Burst;

impl AlertApp for Burst {
    fn on_event(&mut self, ctx: &mut AppContext<'_>, event: &RuntimeEvent) -> Result<EventFlow> {
        if let RuntimeEvent::Key(key) = event {
            if let KeyCode::Char(ch) = key.code {
                let kind = match ch {
                    'w' => AlertKind::WARNING,
                    'e' => AlertKind::ERROR,
                    _ => AlertKind::INFO,
                };
                ctx.show_alert(kind, LONG_MESSAGE)?;
                return Ok(EventFlow::Consumed);
            }
        }
        Ok(EventFlow::Continue)
    }

    fn view(&self, size: Size) -> String {
        base_screen(usize::from(size.width), usize::from(size.height))
    }
}

fn scripted_events() -> Vec<RuntimeEvent> {
    let mut events = Vec::new();
    for ch in ['i', 'w', 'e'] {
        events.push(RuntimeEvent::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::NONE,
        )));
        for _ in 0..4 {
            events.push(RuntimeEvent::Tick {
                elapsed: Duration::from_millis(250),
            });
        }
    }
    events
}

fn runtime_alert_script(c: &mut Criterion) {
    let script = scripted_events();
    c.bench_function("runtime_alert_script", |b| {
        b.iter(|| {
            let alerts = AlertModel::new(50, false, 3)
                .with_position(Position::BottomRight)
                .with_tick_interval(Duration::from_millis(250));
            let mut runtime = AlertRuntime::new(Burst, alerts, Size::new(100, 30));
            let mut sink = io::sink();
            runtime
                .run_scripted(&mut sink, black_box(script.clone()))
                .expect("scripted run");
        });
    });
}

criterion_group!(
    benches,
    wrap_long_message,
    composite_styled_base,
    runtime_alert_script
);
criterion_main!(benches);
