//! Output formatting: plain text or JSON, selected by `--output`.

use std::io::{self, Write};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render `data` as JSON, or with `plain_fn` for human output.
pub fn render<T>(format: OutputFormat, data: &T, plain_fn: impl Fn(&T) -> String) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Plain => Ok(plain_fn(data)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Space-separated list for plain output.
pub fn join<T: ToString>(values: &[T]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}
