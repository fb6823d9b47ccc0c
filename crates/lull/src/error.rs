//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use lull_config::ConfigError;
use lull_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(lull::validation))]
    Validation { field: String, reason: String },

    // ── Calendar ─────────────────────────────────────────────────────
    #[error("No matching date: {reason}")]
    #[diagnostic(
        code(lull::date_not_found),
        help("Try a different --from date, or drop one of --day / --weekday.")
    )]
    DateNotFound { reason: String },

    // ── Notifier ─────────────────────────────────────────────────────
    #[error("No change batch was delivered within {waited_ms}ms")]
    #[diagnostic(
        code(lull::no_batch),
        help("The notifier drains every interval; raise --interval-ms only if the host is heavily loaded.")
    )]
    NoBatch { waited_ms: u64 },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(lull::config),
        help("Inspect the effective settings with: lull config show")
    )]
    Config(#[from] ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(lull::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            Self::DateNotFound { .. } => exit_code::NOT_FOUND,
            Self::NoBatch { .. } => exit_code::TIMEOUT,
            Self::Io(_) | Self::Json(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidConfig { field, reason } => CliError::Validation { field, reason },
            CoreError::InvalidDay { .. } => CliError::Validation {
                field: "--day".into(),
                reason: err.to_string(),
            },
            CoreError::InvalidWeekday { .. } => CliError::Validation {
                field: "--weekday".into(),
                reason: err.to_string(),
            },
            CoreError::DateNotFound { .. } | CoreError::DateOutOfRange => CliError::DateNotFound {
                reason: err.to_string(),
            },
            CoreError::DetachedPropertyBag { .. } => CliError::Validation {
                field: "property".into(),
                reason: err.to_string(),
            },
        }
    }
}
