//! Config subcommand handlers.

use lull_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let rendered = match args.command {
        ConfigCommand::Show => match global.output {
            OutputFormat::Plain => config.to_toml()?,
            OutputFormat::Json => serde_json::to_string_pretty(config)?,
        },
        ConfigCommand::Path => global
            .config
            .clone()
            .unwrap_or_else(lull_config::config_path)
            .display()
            .to_string(),
    };
    output::print_output(rendered.trim_end(), global.quiet);
    Ok(())
}
