//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Meet duration estimator.
///
/// Reads a heat sheet (or structured heat listings) and estimates how long the
/// meet will run from the slowest seed time of every heat.
#[derive(Debug, Parser)]
#[command(name = "mt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub timing: TimingArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Per-invocation overrides of the timing policy.
#[derive(Debug, Clone, Default, Args)]
pub struct TimingArgs {
    /// Seconds between consecutive relay heats.
    #[arg(long, global = true, value_name = "SECONDS")]
    pub relay_gap: Option<f64>,

    /// Seconds between consecutive individual heats.
    #[arg(long, global = true, value_name = "SECONDS")]
    pub heat_gap: Option<f64>,

    /// Seconds of overhead after each event.
    #[arg(long, global = true, value_name = "SECONDS")]
    pub transition: Option<f64>,
}

/// Output options shared by the estimate commands.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct OutputArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Estimate from heat sheet text (PDF or OCR output).
    Text {
        /// Text file to read; stdin when omitted or `-`.
        input: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Estimate from a JSON array of events with heat-numbered times.
    Heats {
        /// JSON file to read; stdin when `-`.
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Estimate from a meet's event listing and per-event heat-list documents.
    Meet {
        /// JSON array of `{id, category, name}` event listings.
        #[arg(long)]
        events: PathBuf,

        /// Directory holding one `<id>.json` heat-list document per event.
        #[arg(long)]
        docs: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the effective configuration.
    Config,
}
