//! Shared utilities for CLI commands.

use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use mt_core::{DurationBreakdown, EstimateConfig, EventEstimate, ScheduleModel};
use serde::Serialize;

/// Reads a whole input, from stdin when the path is absent or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub events: &'a [EventEstimate],
    pub total_seconds: f64,
    pub duration: DurationBreakdown,
    #[serde(skip_serializing_if = "nothing_skipped")]
    pub skipped: &'a [String],
}

fn nothing_skipped(skipped: &&[String]) -> bool {
    skipped.is_empty()
}

/// Estimates the model and writes either the text breakdown or JSON.
///
/// `skipped` names events left out of the model by the caller.
pub fn render<W: Write>(
    writer: &mut W,
    model: &ScheduleModel,
    config: &EstimateConfig,
    json: bool,
    skipped: &[String],
) -> Result<()> {
    let estimate = mt_core::estimate(model, config);

    if json {
        let report = JsonReport {
            events: &estimate.events,
            total_seconds: estimate.total_seconds,
            duration: DurationBreakdown::from_seconds(estimate.total_seconds),
            skipped,
        };
        let output = serde_json::to_string_pretty(&report)?;
        writeln!(writer, "{output}")?;
    } else {
        let output = mt_core::format_report(model, estimate.total_seconds);
        write!(writer, "{output}")?;
        if !skipped.is_empty() {
            writeln!(writer, "Skipped (no heats): {}", skipped.join(", "))?;
        }
    }

    Ok(())
}
