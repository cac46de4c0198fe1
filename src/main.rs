//! roomconf - Main entry point
//!
//! Thin command-line driver around the configurator engine.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use roomconf::catalog;
use roomconf::cli::{Cli, Commands};
use roomconf::config::EngineConfig;
use roomconf::order_sink::{JsonLinesSink, OrderSink};
use roomconf::session::{Configurator, EventOutcome, WizardEvent};

/// Initialize the logger with appropriate settings
fn init_logger() {
    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    match cli.command {
        Commands::Catalog => print_catalog(),
        Commands::ValidateConfig { file } => {
            info!("Validating configuration file: {:?}", file);
            match EngineConfig::load_from_file(&file) {
                Ok(config) => {
                    info!("Configuration validation successful");
                    println!("✓ Configuration file is valid: {:?}", config);
                }
                Err(e) => {
                    error!("Configuration validation failed: {:#}", e);
                    eprintln!("✗ Configuration validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Run { events, orders } => {
            let config = match &cli.config {
                Some(path) => EngineConfig::load_from_file(path)?,
                None => EngineConfig::default(),
            };

            let result = match orders {
                Some(path) => {
                    let file = OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(&path)
                        .with_context(|| format!("Failed to open orders file {:?}", path))?;
                    run_events(config, &events, &mut JsonLinesSink::new(file))
                }
                None => run_events(config, &events, &mut JsonLinesSink::new(io::stdout())),
            };

            if let Err(e) = result {
                error!("Event replay failed: {:#}", e);
                eprintln!("✗ {:#}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_catalog() {
    println!("Sensors (per room, on/off):");
    for item in catalog::SELECTABLES {
        println!("  {:<14} {:>6}  {}", item.id, item.unit_price, item.label);
    }
    println!("Devices (per room, by quantity):");
    for item in catalog::QUANTITIES {
        println!("  {:<14} {:>6}  {}", item.id, item.unit_price, item.label);
    }
}

/// Replay an events file through a fresh session, delivering any orders to `sink`
fn run_events(config: EngineConfig, events_path: &Path, sink: &mut impl OrderSink) -> Result<()> {
    let content = fs::read_to_string(events_path)
        .with_context(|| format!("Failed to read events from {:?}", events_path))?;
    let events: Vec<WizardEvent> =
        serde_json::from_str(&content).context("Failed to parse events JSON")?;
    info!(count = events.len(), "replaying events");

    let mut session = Configurator::try_new(config)?;
    let mut submitted = 0;
    for (index, event) in events.into_iter().enumerate() {
        let outcome = session
            .dispatch(event)
            .with_context(|| format!("Event #{} was rejected", index + 1))?;

        match outcome {
            EventOutcome::Submitted(order) => {
                sink.deliver(&order)?;
                submitted += 1;
            }
            EventOutcome::StepBlocked(failure) => eprintln!("✗ {}", failure),
            EventOutcome::FieldsRejected(errors) => eprintln!("✗ {}", errors),
            EventOutcome::Applied => {}
        }
    }

    let projection = serde_json::to_string_pretty(&session.projection())
        .context("Failed to serialize projection")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", projection).context("Failed to write projection")?;

    info!(submitted, "replay finished");
    Ok(())
}
