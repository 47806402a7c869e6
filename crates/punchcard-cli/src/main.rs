use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use punchcard_core::ReconcileConfig;
use tracing_subscriber::EnvFilter;

use punchcard_cli::commands::{marks, reconcile, thresholds};
use punchcard_cli::input::{OnInvalid, read_punches};
use punchcard_cli::{Cli, Commands, config};

/// Load the effective thresholds for a command invocation.
fn load_config(config_path: Option<&Path>) -> Result<ReconcileConfig> {
    let config = config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Reconcile {
            input,
            json,
            skip_invalid,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let on_invalid = if *skip_invalid {
                OnInvalid::Skip
            } else {
                OnInvalid::Fail
            };
            let events = read_punches(input.as_deref(), on_invalid)?;
            reconcile::run(&mut std::io::stdout(), &events, &config, *json)?;
        }
        Some(Commands::Marks { input, json }) => {
            let config = load_config(cli.config.as_deref())?;
            let events = read_punches(input.as_deref(), OnInvalid::Fail)?;
            marks::run(&mut std::io::stdout(), &events, &config, *json)?;
        }
        Some(Commands::Thresholds { json }) => {
            let config = load_config(cli.config.as_deref())?;
            thresholds::run(&mut std::io::stdout(), &config, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
