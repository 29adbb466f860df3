//! Text command: estimate from heat sheet text.
//!
//! The text is whatever a PDF extractor or OCR pass produced. Only line order
//! matters; layout is ignored.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::util::{read_input, render};
use crate::Config;

pub fn run<W: Write>(writer: &mut W, input: Option<&Path>, config: &Config, json: bool) -> Result<()> {
    let text = read_input(input)?;
    estimate_text(writer, &text, config, json)
}

/// Segments heat sheet text and writes the estimate.
pub fn estimate_text<W: Write>(writer: &mut W, text: &str, config: &Config, json: bool) -> Result<()> {
    let model = mt_core::segment_text(text).context("failed to segment heat sheet")?;
    tracing::debug!(events = model.len(), heats = model.heat_count(), "heat sheet segmented");
    render(writer, &model, &config.timing, json, &[])
}
