//! Human-readable meet breakdown.

use std::fmt::{self, Write};

use serde::Serialize;

use crate::model::{EventKind, ScheduleModel};

/// A duration split into whole hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationBreakdown {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationBreakdown {
    /// Splits a number of seconds, dropping any fraction.
    /// Negative and non-finite inputs become zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_seconds(total_seconds: f64) -> Self {
        let whole = if total_seconds.is_finite() && total_seconds > 0.0 {
            total_seconds.floor() as u64
        } else {
            0
        };
        Self {
            hours: whole / 3600,
            minutes: (whole % 3600) / 60,
            seconds: whole % 60,
        }
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}

/// Renders each event's heats with their slowest times, then the total.
pub fn format_report(model: &ScheduleModel, total_seconds: f64) -> String {
    let mut output = String::new();

    writeln!(output, "MEET BREAKDOWN").unwrap();
    writeln!(output, "──────────────").unwrap();

    if model.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No events found.").unwrap();
    }

    for event in model {
        writeln!(output).unwrap();
        match event.kind() {
            EventKind::Relay => writeln!(output, "{} (relay)", event.name()).unwrap(),
            EventKind::Individual => writeln!(output, "{}", event.name()).unwrap(),
        }

        if event.heats().is_empty() {
            writeln!(output, "  (no heats)").unwrap();
        }

        for (idx, heat) in event.heats().iter().enumerate() {
            let label = heat
                .number()
                .map_or_else(|| (idx + 1).to_string(), |n| n.to_string());
            let slowest = heat.slowest().map_or(0.0, |t| t.seconds());
            writeln!(output, "  Heat {label}: slowest time {slowest:.2}s").unwrap();
        }
    }

    writeln!(output).unwrap();
    writeln!(
        output,
        "Estimated total meet time: {}",
        DurationBreakdown::from_seconds(total_seconds)
    )
    .unwrap();

    output
}
