//! Rebuilding an event store from saved data.
//!
//! # Responsibility
//! - Decode blobs written by any client version, one entry at a time.
//!
//! # Invariants
//! - One unreadable event or day never discards the rest of the blob.
//! - Day keys come back as `YYYY-MM-DD`; lists whose keys name the same day
//!   are concatenated in key order.
//! - An event id is kept only at its first occurrence.

use crate::model::event::Event;
use crate::store::event_store::EventStore;
use crate::week::iso_date;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

// Accepts unpadded month and day fields as well as the strict form.
const LOOSE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Saved blob, decoded without validating individual entries.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct SavedStore {
    days: BTreeMap<String, Value>,
}

/// Counts of what a restore kept and left out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub kept_events: usize,
    /// Events that failed to decode, repeated an id, or sat under a bad key.
    pub dropped_events: usize,
    /// Entries whose key is not a date or whose value is not a list.
    pub dropped_days: usize,
    /// Keys rewritten to the padded form.
    pub normalized_keys: usize,
}

impl RestoreReport {
    /// True when every saved event was kept.
    pub fn is_lossless(&self) -> bool {
        self.dropped_events == 0 && self.dropped_days == 0
    }
}

impl SavedStore {
    /// Builds the store, skipping entries that cannot be kept.
    pub fn restore(self) -> (EventStore, RestoreReport) {
        let mut report = RestoreReport::default();
        let mut seen = HashSet::new();
        let mut days: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();

        for (key, day) in self.days {
            let date = NaiveDate::parse_from_str(key.trim(), LOOSE_DATE_FORMAT).ok();
            let (date, items) = match (date, day) {
                (Some(date), Value::Array(items)) => (date, items),
                (_, day) => {
                    report.dropped_days += 1;
                    if let Value::Array(items) = day {
                        report.dropped_events += items.len();
                    }
                    continue;
                }
            };
            if iso_date(date) != key {
                report.normalized_keys += 1;
            }

            let list = days.entry(date).or_default();
            for item in items {
                match serde_json::from_value::<Event>(item) {
                    Ok(event) if seen.insert(event.id.clone()) => {
                        list.push(event);
                        report.kept_events += 1;
                    }
                    _ => report.dropped_events += 1,
                }
            }
        }

        (EventStore::from_days(days), report)
    }
}

#[cfg(test)]
mod tests {
    use super::{RestoreReport, SavedStore};
    use crate::store::event_store::EventStore;
    use crate::week::parse_iso_date;
    use chrono::NaiveDate;

    fn restore(raw: &str) -> (EventStore, RestoreReport) {
        serde_json::from_str::<SavedStore>(raw)
            .expect("blob should be a JSON object")
            .restore()
    }

    fn date(value: &str) -> NaiveDate {
        parse_iso_date(value).expect("test date should parse")
    }

    fn ids(store: &EventStore, day: NaiveDate) -> Vec<String> {
        store
            .events_for(day)
            .iter()
            .map(|event| event.id.to_string())
            .collect()
    }

    #[test]
    fn clean_blob_restores_everything_in_order() {
        let (store, report) = restore(
            r#"{"2024-02-07":[
                {"id":"b","title":"B","time":"10:00"},
                {"id":"a","title":"A","time":"09:00"}
            ],"2024-02-08":[]}"#,
        );

        assert_eq!(ids(&store, date("2024-02-07")), vec!["b", "a"]);
        assert_eq!(store.dates().count(), 2);
        assert!(report.is_lossless());
        assert_eq!(report.kept_events, 2);
    }

    #[test]
    fn unreadable_events_are_skipped_individually() {
        let (store, report) = restore(
            r#"{"2024-02-07":[
                {"id":"a","title":"A","time":"09:00"},
                {"id":"x","title":"no time","time":""},
                {"id":"b","title":"B","time":"10:00"},
                42
            ]}"#,
        );

        assert_eq!(ids(&store, date("2024-02-07")), vec!["a", "b"]);
        assert_eq!(report.dropped_events, 2);
        assert!(!report.is_lossless());
    }

    #[test]
    fn unpadded_keys_merge_into_the_padded_day() {
        let (store, report) = restore(
            r#"{"2024-2-7":[{"id":"late","title":"L","time":"11:00"}],
                "2024-02-07":[{"id":"early","title":"E","time":"08:00"}]}"#,
        );

        assert_eq!(ids(&store, date("2024-02-07")), vec!["early", "late"]);
        assert_eq!(store.dates().count(), 1);
        assert_eq!(report.normalized_keys, 1);
        assert!(report.is_lossless());
    }

    #[test]
    fn repeated_ids_keep_the_first_day_only() {
        let (store, report) = restore(
            r#"{"2024-02-07":[{"id":"a","title":"first","time":"09:00"}],
                "2024-02-08":[{"id":"a","title":"copy","time":"09:00"}]}"#,
        );

        assert_eq!(store.total_len(), 1);
        assert_eq!(store.events_for(date("2024-02-07"))[0].title, "first");
        assert!(store.events_for(date("2024-02-08")).is_empty());
        assert_eq!(report.dropped_events, 1);
    }

    #[test]
    fn bad_keys_and_non_list_days_are_dropped() {
        let (store, report) = restore(
            r#"{"someday":[{"id":"a","title":"A","time":"09:00"}],
                "2024-02-07":"oops",
                "2024-02-08":[{"id":"b","title":"B","time":"09:00"}]}"#,
        );

        assert_eq!(store.total_len(), 1);
        assert_eq!(report.dropped_days, 2);
        assert_eq!(report.dropped_events, 1);
    }
}
