//! Alert state machine and its configuration value.

mod config;
mod core;

pub use self::core::{
    ActiveAlert, AlertCommand, AlertEvent, AlertModel, AlertState, EventFlow, ShowAlert,
    Transition,
};
pub use config::{AlertConfig, DEFAULT_DURATION_TICKS, DEFAULT_MAX_WIDTH};
