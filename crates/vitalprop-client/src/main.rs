//! vitalprop CLI entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use vitalprop_client::cli::{Cli, Command, ConfigAction};
use vitalprop_client::commands;
use vitalprop_client::config::ClientConfig;
use vitalprop_client::error::{ClientError, ClientResult};
use vitalprop_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, config_path) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    }
    .with_format(cli.log_format.unwrap_or(config.log_format));
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }

    match run(cli.command, &config, &config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Loads `--config` when given, the default file otherwise.
fn load_config(cli: &Cli) -> ClientResult<(ClientConfig, PathBuf)> {
    match cli.config {
        Some(ref path) => {
            let config = ClientConfig::load_from(path).map_err(ClientError::Config)?;
            Ok((config, path.clone()))
        }
        None => {
            let config = ClientConfig::load().map_err(ClientError::Config)?;
            Ok((config, ClientConfig::default_path()))
        }
    }
}

async fn run(command: Command, config: &ClientConfig, config_path: &Path) -> ClientResult<()> {
    match command {
        Command::Export(args) => commands::export::run(args, config).await,
        Command::Book(args) => commands::book::run(args, config).await,
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(config, config_path),
            ConfigAction::Validate => commands::config::validate(config),
            ConfigAction::Path => commands::config::path(config_path),
        },
    }
}
