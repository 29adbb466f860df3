//! Heats command: estimate from structured, heat-numbered time listings.
//!
//! Input is a JSON array of events:
//!
//! ```json
//! [{"name": "4x100 Relay", "relay": true, "heats": {"1": ["49.10", "50.02"], "2": ["48.75"]}}]
//! ```

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use mt_core::StructuredEvent;

use super::util::{read_input, render};
use crate::Config;

pub fn run<W: Write>(writer: &mut W, input: &Path, config: &Config, json: bool) -> Result<()> {
    let text = read_input(Some(input))?;
    let events = parse_events(&text)
        .with_context(|| format!("invalid heat listing in {}", input.display()))?;
    estimate_events(writer, &events, config, json)
}

fn parse_events(text: &str) -> Result<Vec<StructuredEvent>> {
    Ok(serde_json::from_str(text)?)
}

/// Adapts structured events and writes the estimate.
pub fn estimate_events<W: Write>(
    writer: &mut W,
    events: &[StructuredEvent],
    config: &Config,
    json: bool,
) -> Result<()> {
    let model = mt_core::adapt(events);
    tracing::debug!(events = model.len(), heats = model.heat_count(), "heat listings adapted");
    render(writer, &model, &config.timing, json, &[])
}
