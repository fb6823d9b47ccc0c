//! Clap derive structures for the `lull` CLI.
//!
//! Defines the command tree, global flags, and value parsers.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lull -- ordered queues and debounced change notification
#[derive(Debug, Parser)]
#[command(
    name = "lull",
    version,
    about = "Drive lull's ordered queue, debounced notifier and date search from the shell",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config dir)
    #[arg(long, env = "LULL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', env = "LULL_OUTPUT", default_value = "plain", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines (default)
    Plain,
    /// Pretty-printed JSON
    Json,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sort values through an ordered queue and dequeue from the head
    #[command(alias = "q")]
    Queue(QueueArgs),

    /// Record key=value changes and print the first debounced batch
    #[command(alias = "d")]
    Debounce(DebounceArgs),

    /// Find the nearest date on a given day of month and/or weekday
    #[command(alias = "cal")]
    Calendar(CalendarArgs),

    /// Inspect configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  QUEUE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct QueueArgs {
    /// Values to enqueue, in insertion order
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
    pub values: Vec<i64>,

    /// Dequeue up to N values from the head
    #[arg(long, short = 'n', default_value_t = 0)]
    pub dequeue: usize,

    /// Only dequeue while the head is strictly below this value
    #[arg(long, allow_negative_numbers = true)]
    pub below: Option<i64>,

    /// Use the unsynchronized single-thread queue
    #[arg(long)]
    pub local: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEBOUNCE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DebounceArgs {
    /// Changes as KEY=VALUE; later values for a key replace earlier ones
    #[arg(required = true, num_args = 1.., value_parser = parse_change)]
    pub changes: Vec<(String, String)>,

    /// Drain interval in milliseconds (overrides config)
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

/// Parse a `KEY=VALUE` pair. The key must be non-empty; the value may be.
pub fn parse_change(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CALENDAR
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Start date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Day of month 1..=31; negative searches backwards
    #[arg(long, allow_negative_numbers = true)]
    pub day: Option<i32>,

    /// Weekday 1 (Sunday) ..= 7 (Saturday); negative searches backwards
    #[arg(long, allow_negative_numbers = true)]
    pub weekday: Option<i32>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,

    /// Print the config file path in use
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
