//! Subcommand handlers.

pub mod calendar;
pub mod config_cmd;
pub mod debounce;
pub mod queue;
