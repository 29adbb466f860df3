//! CLI subcommand implementations.

pub mod config;
pub mod heats;
pub mod meet;
pub mod text;
mod util;
