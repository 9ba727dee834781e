//! Projectsmith CLI entry point.

use clap::Parser;

use projectsmith::cli::{self, Cli, Commands};
use projectsmith::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let config = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => cli::handle_error(err, json),
    };

    // held until exit so file output is flushed
    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };

    let result = match cli.command {
        Commands::Analyze(args) => cli::commands::analyze::execute(args, json),
        Commands::Generate(args) => cli::commands::generate::execute(args, config, json).await,
        Commands::Config(args) => cli::commands::config::execute(args, config, json),
    };

    if let Err(err) = result {
        cli::handle_error(err, json);
    }
}
