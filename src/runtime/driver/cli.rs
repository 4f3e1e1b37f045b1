use std::io::{self, Write};
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use thiserror::Error;

use crate::model::AlertConfig;
use crate::runtime::{AlertApp, AlertRuntime};
use crate::{AlertError, Size};

pub type DriverResult<T> = std::result::Result<T, CliDriverError>;

#[derive(Debug, Error)]
pub enum CliDriverError {
    #[error("runtime error: {0}")]
    Runtime(#[from] AlertError),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Runs an [`AlertRuntime`] on the real terminal.
///
/// Alerts wider than the terminal are capped before the first frame, and the
/// terminal is handed back in cooked mode on the main screen however the
/// loop ends, panics included when [`with_panic_hook`](Self::with_panic_hook)
/// is set.
pub struct CliDriver<A: AlertApp> {
    runtime: AlertRuntime<A>,
    panic_hook: bool,
}

impl<A: AlertApp> CliDriver<A> {
    pub fn new(runtime: AlertRuntime<A>) -> Self {
        Self {
            runtime,
            panic_hook: false,
        }
    }

    /// Restore the terminal before the panic message is printed.
    pub fn with_panic_hook(mut self) -> Self {
        self.panic_hook = true;
        self
    }

    /// Run until the app requests exit and hand the runtime back for inspection.
    pub fn run(mut self) -> DriverResult<AlertRuntime<A>> {
        let size = terminal_size()?;
        if self.panic_hook {
            install_restore_hook();
        }

        let mut stdout = io::stdout();
        let guard = TerminalGuard::enter(&mut stdout)?;
        self.runtime
            .alerts_mut()
            .configure(|config| fit_to_terminal(config, size));
        self.runtime.resize(size)?;
        let result = self.runtime.run(&mut stdout);
        drop(guard);

        result?;
        Ok(self.runtime)
    }
}

/// Cap the alert width at the terminal width so boxes are never clipped.
fn fit_to_terminal(config: AlertConfig, size: Size) -> AlertConfig {
    if config.max_width() <= size.width {
        return config;
    }
    config.with_max_width(size.width)
}

fn terminal_size() -> DriverResult<Size> {
    let (width, height) =
        terminal::size().map_err(|err| CliDriverError::Terminal(err.to_string()))?;
    if width == 0 || height == 0 {
        return Err(CliDriverError::Terminal(format!(
            "terminal reports an empty {width}x{height} screen"
        )));
    }
    Ok(Size::new(width, height))
}

/// Raw mode plus alternate screen for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut impl Write) -> DriverResult<Self> {
        terminal::enable_raw_mode().map_err(|err| CliDriverError::Terminal(err.to_string()))?;
        let guard = TerminalGuard;
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal(&mut io::stdout());
    }
}

fn restore_terminal(stdout: &mut impl Write) {
    execute!(stdout, Show, LeaveAlternateScreen).ok();
    terminal::disable_raw_mode().ok();
}

fn install_restore_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal(&mut io::stdout());
        previous(info);
    }));
}
