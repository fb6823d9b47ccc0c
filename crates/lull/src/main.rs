mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Completions need neither config nor runtime state
    if let Command::Completions(args) = &cli.command {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "lull", &mut std::io::stdout());
        return Ok(());
    }

    let config = lull_config::load_config(cli.global.config.as_deref())?;
    tracing::debug!(command = ?cli.command, "dispatching command");

    match &cli.command {
        Command::Queue(args) => commands::queue::handle(args, &config, &cli.global),
        Command::Debounce(args) => commands::debounce::handle(args, &config, &cli.global).await,
        Command::Calendar(args) => commands::calendar::handle(args, &cli.global),
        Command::Config(args) => commands::config_cmd::handle(args, &config, &cli.global),
        Command::Completions(_) => Ok(()),
    }
}
