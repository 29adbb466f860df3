//! Heat sheet segmentation.
//!
//! Heat sheets interleave structure (event headers, heat markers) with noise
//! (column headings, names, teams, page furniture). The [`Segmenter`] walks the
//! text one line at a time and keeps two pieces of state: the current event and
//! a buffer of times for the heat in progress.
//!
//! Per line, in source order:
//! 1. `#<n> <name> [Finals]` starts an event, flushing any buffered heat first.
//! 2. `Heat ...` closes the buffered heat, if any. It carries no times itself.
//! 3. Anything else contributes its times to the buffer, once an event is open.
//!
//! At end of input the buffered heat is flushed so a trailing heat is never lost.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::SegmentError;
use crate::model::{Event, Heat, ScheduleModel};
use crate::time::{TimeValue, extract_times};

static EVENT_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9]+)\s+(.+)$").expect("event header pattern is valid"));

static FINALS_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\bfinals\s*$").expect("finals pattern is valid"));

static HEAT_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^heat").expect("heat marker pattern is valid"));

/// What a single line did to the segmenter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// An event header opened a new current event.
    EventStarted { name: String, flushed_heat: bool },
    /// A heat marker closed the heat in progress, if there was one.
    HeatMarker { flushed_heat: bool },
    /// Times were appended to the heat in progress.
    TimesBuffered(usize),
    /// Times were seen before any event header and dropped.
    TimesDiscarded(usize),
    /// The line had no structure and no times.
    Noise,
}

/// Line-at-a-time heat sheet state machine.
#[derive(Debug, Default)]
pub struct Segmenter {
    model: ScheduleModel,
    current_event: Option<String>,
    heat_buffer: Vec<TimeValue>,
    line_number: usize,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the event currently receiving heats.
    pub fn current_event(&self) -> Option<&str> {
        self.current_event.as_deref()
    }

    /// Times collected for the heat in progress.
    pub fn buffered_times(&self) -> &[TimeValue] {
        &self.heat_buffer
    }

    /// The model built so far, excluding the heat in progress.
    pub const fn model(&self) -> &ScheduleModel {
        &self.model
    }

    /// Applies one line of input.
    pub fn process_line(&mut self, line: &str) -> Result<Transition, SegmentError> {
        self.line_number += 1;
        let line = line.trim();

        if let Some(name) = parse_event_header(line) {
            let flushed_heat = self.flush_heat();
            self.heat_buffer.clear();
            self.model.upsert_event(Event::new(name.clone()));
            self.current_event = Some(name.clone());
            return Ok(Transition::EventStarted { name, flushed_heat });
        }

        if HEAT_MARKER_RE.is_match(line) {
            let flushed_heat = self.flush_heat();
            return Ok(Transition::HeatMarker { flushed_heat });
        }

        let times = extract_times(line).map_err(|source| SegmentError::GrammarMismatch {
            line_number: self.line_number,
            line: line.to_string(),
            source,
        })?;

        if times.is_empty() {
            return Ok(Transition::Noise);
        }

        let count = times.len();
        if self.current_event.is_none() {
            tracing::debug!(line = self.line_number, count, "discarding times before first event");
            return Ok(Transition::TimesDiscarded(count));
        }

        self.heat_buffer.extend(times);
        Ok(Transition::TimesBuffered(count))
    }

    /// Flushes the trailing heat and returns the finished model.
    pub fn finish(mut self) -> ScheduleModel {
        self.flush_heat();
        tracing::debug!(
            lines = self.line_number,
            events = self.model.len(),
            heats = self.model.heat_count(),
            "segmentation finished"
        );
        self.model
    }

    /// Moves buffered times into a new heat on the current event.
    ///
    /// Returns whether a heat was appended. Empty buffers never become heats.
    fn flush_heat(&mut self) -> bool {
        if self.heat_buffer.is_empty() {
            return false;
        }
        let Some(event) = self
            .current_event
            .as_deref()
            .and_then(|name| self.model.event_mut(name))
        else {
            return false;
        };
        let Ok(heat) = Heat::new(std::mem::take(&mut self.heat_buffer)) else {
            return false;
        };
        event.push_heat(heat);
        true
    }
}

/// Extracts a normalized event name from a header line such as
/// `#3 100 Yard Freestyle Finals`.
///
/// The trailing `Finals` marker is optional and stripped; whitespace is collapsed.
fn parse_event_header(line: &str) -> Option<String> {
    let caps = EVENT_HEADER_RE.captures(line)?;
    let stripped = FINALS_SUFFIX_RE.replace(&caps[2], "");
    let name = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if name.is_empty() {
        Some(format!("Event {}", &caps[1]))
    } else {
        Some(name)
    }
}

/// Segments a sequence of heat sheet lines into a schedule model.
pub fn segment<I, S>(lines: I) -> Result<ScheduleModel, SegmentError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segmenter = Segmenter::new();
    for line in lines {
        segmenter.process_line(line.as_ref())?;
    }
    Ok(segmenter.finish())
}

/// Segments heat sheet text, splitting it into lines first.
pub fn segment_text(text: &str) -> Result<ScheduleModel, SegmentError> {
    segment(text.lines())
}
