//! Meet command: estimate from an event listing plus per-event heat-list documents.
//!
//! The listing is a JSON array of `{id, category, name}`; each event's heat
//! list is read from `<docs>/<id>.json`. Events with no document, or whose
//! document yields no heats, are left out and reported as skipped.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use mt_core::{EventListing, HeatListDocument, ScheduleModel};

use super::util::{read_input, render};
use crate::Config;

pub fn run<W: Write>(
    writer: &mut W,
    events_path: &Path,
    docs_dir: &Path,
    config: &Config,
    json: bool,
) -> Result<()> {
    let text = read_input(Some(events_path))?;
    let listings: Vec<EventListing> = serde_json::from_str(&text)
        .with_context(|| format!("invalid event listing in {}", events_path.display()))?;

    let (model, skipped) = build_model(&listings, docs_dir)?;
    render(writer, &model, &config.timing, json, &skipped)
}

/// Loads every listed event's heat list, returning the model and the names of
/// events that contributed no heats.
pub fn build_model(listings: &[EventListing], docs_dir: &Path) -> Result<(ScheduleModel, Vec<String>)> {
    let mut model = ScheduleModel::new();
    let mut skipped = Vec::new();

    for listing in listings {
        let path = docs_dir.join(format!("{}.json", listing.id));
        if !path.exists() {
            tracing::warn!(event = %listing.name, path = %path.display(), "no heat list document");
            skipped.push(listing.name.clone());
            continue;
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let document = HeatListDocument::from_json(&text)
            .with_context(|| format!("invalid heat list document {}", path.display()))?;

        let event = mt_core::adapt_event(&document.to_structured(&listing.name, listing.is_relay()));
        if event.heats().is_empty() {
            tracing::warn!(event = %listing.name, "no heats found");
            skipped.push(listing.name.clone());
            continue;
        }
        model.upsert_event(event);
    }

    Ok((model, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, category: &str, name: &str) -> EventListing {
        EventListing {
            id: id.to_string(),
            category: category.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn builds_model_from_documents() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join("101.json"),
            r#"{"_source": {"it": [{"hn": 1, "s": "5:10.00"}, {"hn": 2, "s": "4:58.20"}]}}"#,
        )
        .unwrap();
        std::fs::write(
            temp.path().join("202.json"),
            r#"{"_source": {"rtn": [{"hn": "1", "s": "3:40.00"}], "it": [{"hn": 1, "s": "59.00"}]}}"#,
        )
        .unwrap();
        std::fs::write(
            temp.path().join("303.json"),
            r#"{"_source": {"it": [{"hn": 1, "s": "NH"}]}}"#,
        )
        .unwrap();

        let listings = vec![
            listing("101", "individual", "1600 Meter Run"),
            listing("202", "rel", "4x400 Meter Relay"),
            listing("303", "individual", "High Jump"),
            listing("404", "individual", "Pole Vault"),
        ];

        let (model, skipped) = build_model(&listings, temp.path()).unwrap();
        assert_eq!(model.len(), 2);
        assert_eq!(model.event("1600 Meter Run").unwrap().heats().len(), 2);

        let relay = model.event("4x400 Meter Relay").unwrap();
        assert!(relay.kind().is_relay());
        assert!((relay.heats()[0].slowest().unwrap().seconds() - 220.0).abs() < 1e-9);

        assert_eq!(skipped, vec!["High Jump", "Pole Vault"]);
    }

    #[test]
    fn skipped_events_are_listed_in_text_output() {
        let temp = tempfile::tempdir().unwrap();
        let events_path = temp.path().join("events.json");
        std::fs::write(&events_path, r#"[{"id": "9", "category": "individual", "name": "Discus"}]"#)
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &events_path, temp.path(), &Config::default(), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("No events found."));
        assert!(output.ends_with("Skipped (no heats): Discus\n"));
    }

    #[test]
    fn malformed_entries_do_not_drop_the_event() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join("7.json"),
            r#"{"_source": {"it": [{"hn": 1, "s": "12.40"}, {"hn": 1, "s": 12.9}, {"hn": 2.0, "s": "13.00"}]}}"#,
        )
        .unwrap();

        let (model, skipped) = build_model(&[listing("7", "individual", "100 Meter Dash")], temp.path()).unwrap();
        assert!(skipped.is_empty());

        let heats = model.event("100 Meter Dash").unwrap().heats();
        assert_eq!(heats.len(), 2);
        assert_eq!(heats[0].number(), Some(1));
        assert_eq!(heats[1].number(), Some(2));
        assert_eq!(heats[0].times().len(), 1);
    }

    #[test]
    fn invalid_document_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("1.json"), "not json").unwrap();

        let err = build_model(&[listing("1", "individual", "Javelin")], temp.path()).unwrap_err();
        assert!(err.to_string().contains("invalid heat list document"));
    }
}
