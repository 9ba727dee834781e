//! Command-line interface.

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

use commands::analyze::AnalyzeArgs;
use commands::config::ConfigArgs;
use commands::generate::GenerateArgs;

#[derive(Parser, Debug)]
#[command(
    name = "projectsmith",
    version,
    about = "Turn a project brief into an installable frontend/backend project"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (default: .projectsmith/config.yaml)
    #[arg(short, long, global = true, env = "PROJECTSMITH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Break a brief into tasks and print the execution plan
    Analyze(AnalyzeArgs),

    /// Generate code for a brief and write the assembled project
    Generate(GenerateArgs),

    /// Configuration commands
    Config(ConfigArgs),
}

/// Load configuration from an explicit file or the project defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Print an error in the requested format and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let payload = serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "causes": chain,
        });
        println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
    } else {
        eprintln!("{} {err:#}", console::style("Error:").red().bold());
    }
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "projectsmith",
            "--json",
            "generate",
            "A todo app",
            "--name",
            "todo",
            "--fallback-only",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.brief.description.as_deref(), Some("A todo app"));
                assert_eq!(args.name.as_deref(), Some("todo"));
                assert!(args.fallback_only);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_analyze_with_requirements() {
        let cli = Cli::try_parse_from([
            "projectsmith",
            "analyze",
            "Team chat",
            "--requirement",
            "threads",
            "--requirement",
            "search",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze(args) => assert_eq!(args.brief.requirement, vec!["threads", "search"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
