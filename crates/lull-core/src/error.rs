// ── Core error types ──
//
// Queue and notifier operations are total and never fail. The variants
// below belong to configuration and the small helper surfaces.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    // ── Calendar errors ──────────────────────────────────────────────
    #[error("Invalid day of month {day}: expected 1..=31 (negated to search backwards)")]
    InvalidDay { day: i32 },

    #[error("Invalid weekday {weekday}: expected 1 (Sunday) ..= 7 (Saturday)")]
    InvalidWeekday { weekday: i32 },

    #[error("No date matching the search was found within {max_steps} steps")]
    DateNotFound { max_steps: u32 },

    #[error("Date search left the supported calendar range")]
    DateOutOfRange,

    // ── Property bag errors ──────────────────────────────────────────
    #[error("Property bag has no backing dictionary; cannot set '{name}'")]
    DetachedPropertyBag { name: String },
}
