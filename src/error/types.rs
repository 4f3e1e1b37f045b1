use thiserror::Error;

use crate::registry::AlertKind;

/// Unified result type for the alert overlay crate.
pub type Result<T> = std::result::Result<T, AlertError>;

/// Errors surfaced by the alert model and its host runtime.
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("alert kind `{0}` is not registered")]
    UnknownAlertKind(AlertKind),
    #[error("`{0}` is not a valid alert position")]
    InvalidPosition(String),
    #[error("min width {min} exceeds max width {max}")]
    InvalidWidthRange { min: u16, max: u16 },
    #[error("terminal backend error: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
