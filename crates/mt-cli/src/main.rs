use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mt_cli::commands::{config, heats, meet, text};
use mt_cli::{Cli, Commands, Config, TimingArgs};

/// Load config and apply per-invocation timing overrides.
fn load_config(config_path: Option<&Path>, timing: &TimingArgs) -> Result<Config> {
    let config = Config::load_from(config_path)
        .context("failed to load configuration")?
        .with_overrides(timing)?;
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
    // Logs go to stderr so stdout stays clean for reports and JSON
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Text { input, output }) => {
            let config = load_config(cli.config.as_deref(), &cli.timing)?;
            text::run(&mut stdout, input.as_deref(), &config, output.json)?;
        }
        Some(Commands::Heats { input, output }) => {
            let config = load_config(cli.config.as_deref(), &cli.timing)?;
            heats::run(&mut stdout, input, &config, output.json)?;
        }
        Some(Commands::Meet {
            events,
            docs,
            output,
        }) => {
            let config = load_config(cli.config.as_deref(), &cli.timing)?;
            meet::run(&mut stdout, events, docs, &config, output.json)?;
        }
        Some(Commands::Config) => {
            let config = load_config(cli.config.as_deref(), &cli.timing)?;
            config::run(&mut stdout, &config)?;
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
