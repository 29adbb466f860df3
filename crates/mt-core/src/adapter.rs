//! Structured heat data to schedule model.
//!
//! Structured sources already know which heat every entry belongs to, so no
//! segmentation is needed: heats are ordered by heat number and each raw time
//! token goes through the same token parser as free text. Unparseable entries
//! (scratches, `NT`, `DQ`) are skipped one at a time; a heat left with no times
//! is dropped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Event, EventKind, Heat, ScheduleModel};
use crate::time::TimeValue;

/// One event as delivered by a structured source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredEvent {
    pub name: String,

    /// Explicit classification from the source.
    #[serde(default)]
    pub relay: bool,

    /// Raw time tokens keyed by heat number.
    #[serde(default)]
    pub heats: HashMap<u32, Vec<String>>,
}

impl StructuredEvent {
    pub fn new(name: impl Into<String>, relay: bool) -> Self {
        Self {
            name: name.into(),
            relay,
            heats: HashMap::new(),
        }
    }

    /// Appends a raw time token to a heat.
    pub fn push_entry(&mut self, heat_number: u32, token: impl Into<String>) {
        self.heats.entry(heat_number).or_default().push(token.into());
    }
}

/// Normalizes one structured event, ordering heats by ascending heat number.
pub fn adapt_event(source: &StructuredEvent) -> Event {
    let mut event = Event::with_kind(&source.name, EventKind::from_relay_flag(source.relay));

    let mut numbers: Vec<u32> = source.heats.keys().copied().collect();
    numbers.sort_unstable();

    for number in numbers {
        let tokens = &source.heats[&number];
        let times: Vec<TimeValue> = tokens
            .iter()
            .filter_map(|token| match token.parse::<TimeValue>() {
                Ok(time) => Some(time),
                Err(err) => {
                    tracing::debug!(event = %source.name, heat = number, %err, "skipping entry");
                    None
                }
            })
            .collect();

        match Heat::numbered(number, times) {
            Ok(heat) => event.push_heat(heat),
            Err(_) => {
                tracing::debug!(event = %source.name, heat = number, "dropping heat with no usable times");
            }
        }
    }

    event
}

/// Normalizes structured events into a schedule model, keeping source event order.
pub fn adapt<'a, I>(events: I) -> ScheduleModel
where
    I: IntoIterator<Item = &'a StructuredEvent>,
{
    let mut model = ScheduleModel::new();
    for source in events {
        model.upsert_event(adapt_event(source));
    }
    model
}
