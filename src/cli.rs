use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// roomconf - Smart-home room configurator
#[derive(Parser)]
#[command(name = "roomconf")]
#[command(about = "Configure rooms, sensors and devices for a smart-home order")]
#[command(version)]
pub struct Cli {
    /// Engine configuration file (JSON). Defaults are used when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog items and prices
    Catalog,
    /// Replay a JSON array of wizard events and print the final view
    Run {
        /// Path to the events file
        events: PathBuf,

        /// Append submitted orders to this file instead of stdout
        #[arg(short, long)]
        orders: Option<PathBuf>,
    },
    /// Validate an engine configuration file
    ValidateConfig {
        /// Path to configuration file to validate
        file: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_catalog() {
        let cli = Cli::try_parse_from(["roomconf", "catalog"]).unwrap();
        assert!(matches!(cli.command, Commands::Catalog));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_run_with_orders() {
        let cli = Cli::try_parse_from([
            "roomconf",
            "run",
            "events.json",
            "--orders",
            "orders.jsonl",
            "--config",
            "engine.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { events, orders } => {
                assert_eq!(events, PathBuf::from("events.json"));
                assert_eq!(orders, Some(PathBuf::from("orders.jsonl")));
            }
            _ => panic!("expected run"),
        }
        assert_eq!(cli.config, Some(PathBuf::from("engine.json")));
    }

    #[test]
    fn test_cli_validate_config() {
        let result = Cli::try_parse_from(["roomconf", "validate-config", "engine.json"]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["roomconf"]).is_err());
        assert!(Cli::try_parse_from(["roomconf", "run"]).is_err());
    }
}
