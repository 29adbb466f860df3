//! Meet duration estimation.
//!
//! For each event, in model order:
//! 1. Every heat contributes its slowest time.
//! 2. Every heat but the last is followed by a gap (longer for relays).
//! 3. The event is followed by a fixed transition, even if it has no heats.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{Event, EventKind, ScheduleModel};

/// Timing policy for the estimator, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateConfig {
    /// Gap between consecutive relay heats.
    /// Default: 90.
    pub relay_gap_seconds: f64,

    /// Gap between consecutive individual heats.
    /// Default: 60.
    pub normal_gap_seconds: f64,

    /// Overhead added once per event.
    /// Default: 180.
    pub transition_seconds: f64,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            relay_gap_seconds: 90.0,
            normal_gap_seconds: 60.0,
            transition_seconds: 180.0,
        }
    }
}

impl EstimateConfig {
    /// Checks every duration is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("relay_gap_seconds", self.relay_gap_seconds),
            ("normal_gap_seconds", self.normal_gap_seconds),
            ("transition_seconds", self.transition_seconds),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidSeconds { field, value });
            }
        }
        Ok(())
    }

    /// Inter-heat gap for an event kind.
    pub const fn heat_gap(&self, kind: EventKind) -> f64 {
        match kind {
            EventKind::Relay => self.relay_gap_seconds,
            EventKind::Individual => self.normal_gap_seconds,
        }
    }
}

/// The pacing time of one heat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatEstimate {
    /// Heat number from the source, or 1-based position for free text.
    pub heat: u32,
    pub slowest_seconds: f64,
}

/// One event's share of the meet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventEstimate {
    pub name: String,
    pub kind: EventKind,
    pub heats: Vec<HeatEstimate>,
    /// Sum of slowest times.
    pub race_seconds: f64,
    /// Sum of inter-heat gaps.
    pub gap_seconds: f64,
    pub transition_seconds: f64,
    pub total_seconds: f64,
}

/// Estimated meet duration with a per-event breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeetEstimate {
    pub events: Vec<EventEstimate>,
    pub total_seconds: f64,
}

/// Estimates one event.
///
/// A heat with no times cannot be built, but if one shows up it is logged and
/// counted as zero so the rest of the meet still gets an estimate.
pub fn estimate_event(event: &Event, config: &EstimateConfig) -> EventEstimate {
    let gap = config.heat_gap(event.kind());
    let heat_count = event.heats().len();

    let mut heats = Vec::with_capacity(heat_count);
    let mut race_seconds = 0.0;
    let mut gap_seconds = 0.0;

    for (idx, heat) in event.heats().iter().enumerate() {
        let slowest_seconds = heat.slowest().map_or_else(
            || {
                tracing::error!(event = event.name(), heat = idx + 1, "heat has no times, counting as zero");
                0.0
            },
            |t| t.seconds(),
        );

        race_seconds += slowest_seconds;
        if idx + 1 < heat_count {
            gap_seconds += gap;
        }

        let position = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        heats.push(HeatEstimate {
            heat: heat.number().unwrap_or(position),
            slowest_seconds,
        });
    }

    EventEstimate {
        name: event.name().to_string(),
        kind: event.kind(),
        heats,
        race_seconds,
        gap_seconds,
        transition_seconds: config.transition_seconds,
        total_seconds: race_seconds + gap_seconds + config.transition_seconds,
    }
}

/// Estimates the whole meet. Does not modify the model.
pub fn estimate(model: &ScheduleModel, config: &EstimateConfig) -> MeetEstimate {
    let events: Vec<EventEstimate> = model
        .iter()
        .map(|event| estimate_event(event, config))
        .collect();
    let total_seconds: f64 = events.iter().map(|e| e.total_seconds).sum();

    tracing::debug!(events = events.len(), total_seconds, "meet estimated");
    MeetEstimate {
        events,
        total_seconds,
    }
}

/// Total estimated meet duration in seconds.
pub fn estimate_duration(model: &ScheduleModel, config: &EstimateConfig) -> f64 {
    estimate(model, config).total_seconds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Heat;
    use crate::time::TimeValue;

    fn heat(times: &[f64]) -> Heat {
        Heat::new(
            times
                .iter()
                .map(|&s| TimeValue::from_seconds(s).unwrap())
                .collect(),
        )
        .unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn two_event_meet() -> ScheduleModel {
        let mut model = ScheduleModel::new();
        let free = model.upsert_event(Event::new("50 Yard Freestyle"));
        free.push_heat(heat(&[58.10]));
        free.push_heat(heat(&[57.00]));
        model
            .upsert_event(Event::new("100 Yard Relay"))
            .push_heat(heat(&[102.00]));
        model
    }

    #[test]
    fn individual_event_adds_gaps_between_heats() {
        let model = two_event_meet();
        let est = estimate(&model, &EstimateConfig::default());

        let free = &est.events[0];
        assert_close(free.race_seconds, 115.10);
        assert_close(free.gap_seconds, 60.0);
        assert_close(free.total_seconds, 355.10);
    }

    #[test]
    fn single_heat_relay_has_no_gap() {
        let model = two_event_meet();
        let est = estimate(&model, &EstimateConfig::default());

        let relay = &est.events[1];
        assert_eq!(relay.kind, EventKind::Relay);
        assert_close(relay.gap_seconds, 0.0);
        assert_close(relay.total_seconds, 282.0);
    }

    #[test]
    fn total_sums_events() {
        let model = two_event_meet();
        assert_close(
            estimate_duration(&model, &EstimateConfig::default()),
            637.10,
        );
    }

    #[test]
    fn relay_heats_use_relay_gap() {
        let mut model = ScheduleModel::new();
        let relay = model.upsert_event(Event::new("4x400 Relay"));
        relay.push_heat(heat(&[240.0]));
        relay.push_heat(heat(&[250.0, 245.0]));
        relay.push_heat(heat(&[230.0]));

        // 240 + 90 + 250 + 90 + 230 + 180
        assert_close(estimate_duration(&model, &EstimateConfig::default()), 1080.0);
    }

    #[test]
    fn zero_heat_event_costs_one_transition() {
        let mut model = ScheduleModel::new();
        model.upsert_event(Event::new("Diving"));
        assert_close(estimate_duration(&model, &EstimateConfig::default()), 180.0);
    }

    #[test]
    fn empty_model_is_zero() {
        assert_close(
            estimate_duration(&ScheduleModel::new(), &EstimateConfig::default()),
            0.0,
        );
    }

    #[test]
    fn custom_policy_changes_total() {
        let config = EstimateConfig {
            relay_gap_seconds: 120.0,
            normal_gap_seconds: 30.0,
            transition_seconds: 0.0,
        };
        // 58.10 + 30 + 57.00, then 102.00
        assert_close(estimate_duration(&two_event_meet(), &config), 247.10);
    }

    #[test]
    fn estimation_does_not_touch_model() {
        let model = two_event_meet();
        let before = model.clone();
        let _ = estimate(&model, &EstimateConfig::default());
        assert_eq!(model, before);
    }

    #[test]
    fn heat_labels_prefer_source_numbers() {
        let mut model = ScheduleModel::new();
        let event = model.upsert_event(Event::new("800 Meter Run"));
        event.push_heat(Heat::numbered(3, vec![TimeValue::from_seconds(150.0).unwrap()]).unwrap());
        event.push_heat(heat(&[160.0]));

        let est = estimate(&model, &EstimateConfig::default());
        let labels: Vec<_> = est.events[0].heats.iter().map(|h| h.heat).collect();
        assert_eq!(labels, vec![3, 2]);
    }

    #[test]
    fn config_validation() {
        assert!(EstimateConfig::default().validate().is_ok());

        let config = EstimateConfig {
            normal_gap_seconds: -1.0,
            ..EstimateConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSeconds {
                field: "normal_gap_seconds",
                value: -1.0
            })
        );

        let config = EstimateConfig {
            transition_seconds: f64::INFINITY,
            ..EstimateConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: EstimateConfig = serde_json::from_str(r#"{"relay_gap_seconds": 75}"#).unwrap();
        assert_close(config.relay_gap_seconds, 75.0);
        assert_close(config.normal_gap_seconds, 60.0);
        assert_close(config.transition_seconds, 180.0);
    }
}
