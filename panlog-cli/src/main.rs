use clap::Parser;

use panlog_cli::cli::{Cli, Commands};
use panlog_cli::commands;
use panlog_cli::error::CliError;
use panlog_cli::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = commands::load_config(cli.config.as_deref()).await?;
    if let Some(level) = cli.log_level {
        config.general.log_level = level;
    }

    logging::init_tracing(&config.general).map_err(|e| CliError::Config(e.to_string()))?;
    panlog_core::metrics::describe_all();

    tracing::debug!(command = ?cli.command, "panlog starting");

    match cli.command {
        Commands::Parse(args) => commands::parse::execute(args, &config).await,
        Commands::Templates(args) => commands::templates::execute(args, &config, cli.output),
    }
}
