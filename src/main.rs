//! Cachemux CLI entry point.

use clap::Parser;

use cachemux::cli::{Cli, Commands};
use cachemux::infrastructure::logging::{LogConfig, LoggerImpl};
use cachemux::ConfigLoader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let mut config = match config {
        Ok(config) => config,
        Err(err) => cachemux::cli::handle_error(err, cli.json),
    };
    if let Some(path) = &cli.tenants_file {
        config.source.tenants_file = path.display().to_string();
    }

    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => cachemux::cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Drivers => cachemux::cli::commands::drivers::execute(cli.json).await,
        Commands::Check(args) => {
            cachemux::cli::commands::check::execute(args, &config, cli.json).await
        }
        Commands::Run(args) => cachemux::cli::commands::run::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        cachemux::cli::handle_error(err, cli.json);
    }
}
