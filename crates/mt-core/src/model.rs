//! Normalized meet schedule: events owning ordered heats of recorded times.

use std::fmt;

use serde::Serialize;

use crate::error::ModelError;
use crate::time::TimeValue;

/// How an event is run, which decides the gap between its heats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Individual,
    Relay,
}

impl EventKind {
    /// Classifies an event from its name: any name containing "relay"
    /// (case-insensitive) is a relay, everything else is individual.
    pub fn classify(name: &str) -> Self {
        if name.to_lowercase().contains("relay") {
            Self::Relay
        } else {
            Self::Individual
        }
    }

    /// Maps an explicit relay flag from a structured source.
    pub const fn from_relay_flag(relay: bool) -> Self {
        if relay { Self::Relay } else { Self::Individual }
    }

    pub const fn is_relay(self) -> bool {
        matches!(self, Self::Relay)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Relay => "relay",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One race: the times recorded for its competitors.
///
/// Always holds at least one time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heat {
    /// Heat number from a structured source; `None` for heats found in free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<u32>,
    times: Vec<TimeValue>,
}

impl Heat {
    /// Creates a heat from document order.
    pub fn new(times: Vec<TimeValue>) -> Result<Self, ModelError> {
        if times.is_empty() {
            return Err(ModelError::EmptyHeat);
        }
        Ok(Self {
            number: None,
            times,
        })
    }

    /// Creates a heat carrying an explicit heat number.
    pub fn numbered(number: u32, times: Vec<TimeValue>) -> Result<Self, ModelError> {
        let mut heat = Self::new(times)?;
        heat.number = Some(number);
        Ok(heat)
    }

    pub const fn number(&self) -> Option<u32> {
        self.number
    }

    pub fn times(&self) -> &[TimeValue] {
        &self.times
    }

    /// The longest time in the heat, which paces when the next race can start.
    ///
    /// `None` only if the non-empty invariant has been broken.
    pub fn slowest(&self) -> Option<TimeValue> {
        self.times
            .iter()
            .copied()
            .max_by(|a, b| a.seconds().total_cmp(&b.seconds()))
    }
}

/// A named unit of competition and its heats, in running order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    name: String,
    kind: EventKind,
    heats: Vec<Heat>,
}

impl Event {
    /// Creates an event with no heats, classifying it by name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = EventKind::classify(&name);
        Self::with_kind(name, kind)
    }

    /// Creates an event with no heats and an explicit classification.
    pub fn with_kind(name: impl Into<String>, kind: EventKind) -> Self {
        Self {
            name: name.into(),
            kind,
            heats: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn heats(&self) -> &[Heat] {
        &self.heats
    }

    pub fn push_heat(&mut self, heat: Heat) {
        self.heats.push(heat);
    }
}

/// Events in order of first appearance, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScheduleModel {
    events: Vec<Event>,
}

impl ScheduleModel {
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Inserts an event, or replaces a same-named one in place.
    ///
    /// A replaced event keeps its original position but loses its heats; heat
    /// sheets occasionally repeat a header and the later listing wins.
    /// Returns the stored event.
    pub fn upsert_event(&mut self, event: Event) -> &mut Event {
        let index = match self.position(event.name()) {
            Some(index) => {
                tracing::warn!(event = event.name(), "duplicate event name, replacing earlier listing");
                self.events[index] = event;
                index
            }
            None => {
                self.events.push(event);
                self.events.len() - 1
            }
        };
        &mut self.events[index]
    }

    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.name == name)
    }

    pub fn event_mut(&mut self, name: &str) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.name == name)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total number of heats across all events.
    pub fn heat_count(&self) -> usize {
        self.events.iter().map(|e| e.heats.len()).sum()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.events.iter().position(|e| e.name == name)
    }
}

impl<'a> IntoIterator for &'a ScheduleModel {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
