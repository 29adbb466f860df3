//! Heat-list documents from live meet results sites.
//!
//! Each event is published as a JSON document whose `_source` holds one entry
//! per competitor (`it`, individual events) or per team (`rtn`, relays):
//!
//! ```json
//! {"_source": {"it": [{"hn": 1, "s": "12.40"}, {"hn": "2", "s": "1:01.22"}]}}
//! ```
//!
//! `hn` is the heat number (number or numeric string) and `s` the seed time.
//! Decoding is lenient per entry: one malformed entry is skipped, not fatal.
//! Fetching the documents is the caller's job; this module only reads them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::adapter::StructuredEvent;

/// A heat number as published: a JSON integer, float or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeatNumber {
    Number(u64),
    Float(f64),
    Text(String),
}

impl HeatNumber {
    /// The heat number, if it is a positive integer.
    pub fn value(&self) -> Option<u32> {
        let n = match self {
            Self::Number(n) => u32::try_from(*n).ok()?,
            Self::Float(f) => whole_number(*f)?,
            Self::Text(s) => s.trim().parse().ok()?,
        };
        // Heats are numbered from 1; 0 marks an unassigned entry.
        (n > 0).then_some(n)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(f: f64) -> Option<u32> {
    (f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f)).then(|| f as u32)
}

/// Decodes a field, turning a value of the wrong type into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decodes an entry list. Entries that are not objects become empty entries and
/// anything other than an array becomes an empty list.
fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<HeatEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let serde_json::Value::Array(values) = serde_json::Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(values
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap_or_default())
        .collect())
}

/// One seeded entry in a heat list.
///
/// Fields of the wrong type decode as `None` so the entry is skipped on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatEntry {
    /// Heat number.
    #[serde(default, deserialize_with = "lenient")]
    pub hn: Option<HeatNumber>,
    /// Seed time token.
    #[serde(default, deserialize_with = "lenient")]
    pub s: Option<String>,
}

/// Entry lists of a heat-list document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatListSource {
    /// Individual entries.
    #[serde(default, deserialize_with = "lenient_entries")]
    pub it: Vec<HeatEntry>,
    /// Relay team entries.
    #[serde(default, deserialize_with = "lenient_entries")]
    pub rtn: Vec<HeatEntry>,
}

/// A per-event heat-list document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatListDocument {
    #[serde(rename = "_source", default)]
    pub source: HeatListSource,
}

impl HeatListDocument {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The entry list that applies to the event type.
    pub fn entries(&self, relay: bool) -> &[HeatEntry] {
        if relay {
            &self.source.rtn
        } else {
            &self.source.it
        }
    }

    /// Groups entries by heat number.
    ///
    /// Entries without a usable heat number or with a blank or non-string time are
    /// left out.
    pub fn to_structured(&self, name: impl Into<String>, relay: bool) -> StructuredEvent {
        let mut event = StructuredEvent::new(name, relay);
        let mut skipped = 0_usize;

        for entry in self.entries(relay) {
            let heat = entry.hn.as_ref().and_then(HeatNumber::value);
            let time = entry.s.as_deref().map(str::trim).filter(|s| !s.is_empty());
            match (heat, time) {
                (Some(heat), Some(time)) => event.push_entry(heat, time),
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(event = %event.name, skipped, "entries without heat or time");
        }
        event
    }
}

/// An event as listed on a meet's event page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListing {
    pub id: String,
    /// `relay`, `rel` or `individual`.
    pub category: String,
    pub name: String,
}

impl EventListing {
    pub fn is_relay(&self) -> bool {
        matches!(self.category.to_ascii_lowercase().as_str(), "relay" | "rel")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "_id": "356535",
        "_source": {
            "it": [
                {"hn": 2, "s": "12.90", "ln": 3},
                {"hn": "1", "s": "12.40"},
                {"hn": 1, "s": "1:01.00"},
                {"hn": 1, "s": ""},
                {"s": "12.00"},
                {"hn": 0, "s": "11.00"}
            ],
            "rtn": [
                {"hn": 1, "s": "48.20"}
            ]
        }
    }"#;

    #[test]
    fn individual_events_read_it_entries() {
        let doc = HeatListDocument::from_json(DOC).unwrap();
        let event = doc.to_structured("100 Meter Dash", false);

        assert!(!event.relay);
        assert_eq!(event.heats.len(), 2);
        assert_eq!(event.heats[&1], vec!["12.40", "1:01.00"]);
        assert_eq!(event.heats[&2], vec!["12.90"]);
    }

    #[test]
    fn relay_events_read_rtn_entries() {
        let doc = HeatListDocument::from_json(DOC).unwrap();
        let event = doc.to_structured("4x100 Meter Relay", true);

        assert!(event.relay);
        assert_eq!(event.heats.len(), 1);
        assert_eq!(event.heats[&1], vec!["48.20"]);
    }

    #[test]
    fn missing_source_is_empty() {
        let doc = HeatListDocument::from_json("{}").unwrap();
        assert!(doc.to_structured("x", false).heats.is_empty());
    }

    #[test]
    fn mixed_type_entries_are_skipped_one_by_one() {
        let doc = HeatListDocument::from_json(
            r#"{"_source": {"it": [
                {"hn": 1, "s": "12.40"},
                {"hn": 1, "s": 12.9},
                {"hn": 2.0, "s": "13.00"},
                {"hn": true, "s": "14.00"},
                {"hn": 2, "s": null},
                "scratched",
                {"hn": 2.5, "s": "15.00"}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(doc.source.it.len(), 7);

        let event = doc.to_structured("100 Meter Dash", false);
        assert_eq!(event.heats.len(), 2);
        assert_eq!(event.heats[&1], vec!["12.40"]);
        assert_eq!(event.heats[&2], vec!["13.00"]);
    }

    #[test]
    fn non_array_entry_list_is_empty() {
        let doc = HeatListDocument::from_json(r#"{"_source": {"it": null, "rtn": 5}}"#).unwrap();
        assert!(doc.source.it.is_empty());
        assert!(doc.source.rtn.is_empty());
    }

    #[test]
    fn heat_number_forms() {
        assert_eq!(HeatNumber::Number(3).value(), Some(3));
        assert_eq!(HeatNumber::Float(2.0).value(), Some(2));
        assert_eq!(HeatNumber::Float(2.5).value(), None);
        assert_eq!(HeatNumber::Float(-1.0).value(), None);
        assert_eq!(HeatNumber::Text(" 12 ".to_string()).value(), Some(12));
        assert_eq!(HeatNumber::Text("A".to_string()).value(), None);
        assert_eq!(HeatNumber::Number(0).value(), None);
    }

    #[test]
    fn listing_categories() {
        let listing = |category: &str| EventListing {
            id: "1".to_string(),
            category: category.to_string(),
            name: "x".to_string(),
        };
        assert!(listing("relay").is_relay());
        assert!(listing("rel").is_relay());
        assert!(!listing("individual").is_relay());
    }
}
