//! isoprobe CLI entry point
//!
//! Parses arguments, loads configuration, installs logging and dispatches
//! to one handler per subcommand. The process exit code comes from
//! [`CliError::exit_code`].

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use isoprobe_core::config::IsoprobeConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            e.exit_code()
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // `config validate` still reports a broken file, so load errors surface per command
    let loaded = IsoprobeConfig::load_or_default(&cli.config).await;

    let mut general = loaded
        .as_ref()
        .map(|c| c.general.clone())
        .unwrap_or_default();
    logging::apply_log_level(&mut general, cli.log_level.as_deref())?;
    logging::init_tracing(&general).map_err(|e| CliError::Command(e.to_string()))?;

    tracing::debug!(config = %cli.config.display(), "isoprobe starting");

    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
        Commands::List => commands::list::execute(&writer),
        Commands::Run(args) => {
            let config = loaded?;
            commands::run::execute(args, &config, cli.output, &writer)
        }
    }
}
