//! Per-day add-event form state.

use chrono::NaiveDate;
use std::collections::HashMap;

/// Unsaved `{title, time}` pair typed into one day's form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftEntry {
    pub title: String,
    pub time: String,
}

/// Draft entries for every day that has been typed into.
///
/// Days never edited read back as an empty entry.
#[derive(Debug, Clone, Default)]
pub struct DraftEntries {
    entries: HashMap<NaiveDate, DraftEntry>,
}

impl DraftEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft for `date` (empty when never edited).
    pub fn get(&self, date: NaiveDate) -> DraftEntry {
        self.entries.get(&date).cloned().unwrap_or_default()
    }

    pub fn set_title(&mut self, date: NaiveDate, title: impl Into<String>) {
        self.entries.entry(date).or_default().title = title.into();
    }

    pub fn set_time(&mut self, date: NaiveDate, time: impl Into<String>) {
        self.entries.entry(date).or_default().time = time.into();
    }

    /// Resets `date` back to an empty entry.
    pub fn clear(&mut self, date: NaiveDate) {
        self.entries.remove(&date);
    }
}
