//! Meet duration estimator CLI library.
//!
//! This crate provides the CLI interface for the estimator. Every command
//! gathers text or heat data, hands it to `mt-core` and prints the result.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, OutputArgs, TimingArgs};
pub use config::Config;
