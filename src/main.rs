//! Peach Pit StateModel Visualizer

use clap::Parser;
use pit2graph::{Config, Result, VERSION, cli, init_logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = cli::Cli::parse();

    let level = if args.verbose { "debug" } else { "info" };
    init_logging(level);

    tracing::info!("Peach Pit StateModel Visualizer v{}", VERSION);
    tracing::debug!("Parsed arguments: {:?}", args);

    let config = if let Some(config_path) = &args.config {
        Config::from_file(config_path)?
    } else {
        Config::load()?
    };

    tracing::debug!("Loaded configuration: {:?}", config);

    cli::execute(args, config)?;

    Ok(())
}
