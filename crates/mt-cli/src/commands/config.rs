//! Config command for showing the effective configuration.

use std::io::Write;

use anyhow::Result;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let output = serde_json::to_string_pretty(config)?;
    writeln!(writer, "{output}")?;
    Ok(())
}
