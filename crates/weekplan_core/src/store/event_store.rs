//! In-memory event store keyed by day.
//!
//! # Responsibility
//! - Hold every event in exactly one day list.
//! - Apply add, delete, and move mutations with positional semantics.
//!
//! # Invariants
//! - An event id appears in at most one day list at any time.
//! - `move_event` conserves the total event count.
//! - `revision` increases on every mutation that changed state.
//! - Day lists emptied by a move or delete are kept as empty lists.

use crate::model::event::{Event, EventId, EventValidationError};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Ordered day → events mapping.
///
/// Serialized as a flat JSON object keyed by `YYYY-MM-DD`. Saved data is read
/// back through `restore::SavedStore`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct EventStore {
    days: BTreeMap<NaiveDate, Vec<Event>>,
    #[serde(skip)]
    revision: u64,
}

/// Equality covers content only; `revision` is session-local.
impl PartialEq for EventStore {
    fn eq(&self, other: &Self) -> bool {
        self.days == other.days
    }
}

impl Eq for EventStore {}

/// Errors from positional move operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    SourceOutOfRange {
        date: NaiveDate,
        index: usize,
        len: usize,
    },
}

impl Display for MoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceOutOfRange { date, index, len } => write!(
                f,
                "source index {index} is out of range for {date} ({len} event(s))"
            ),
        }
    }
}

impl Error for MoveError {}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_days(days: BTreeMap<NaiveDate, Vec<Event>>) -> Self {
        Self { days, revision: 0 }
    }

    /// Monotonic change counter for view-layer change detection.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Total number of events across all days.
    pub fn total_len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// True when no day holds any event.
    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }

    /// Events of one day in display order (empty slice when none).
    pub fn events_for(&self, date: NaiveDate) -> &[Event] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days that currently have a list, including emptied ones.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Adds one event built from raw input and re-sorts that day by time.
    ///
    /// # Contract
    /// - Store is unchanged when validation fails.
    /// - Sorting is stable: events with equal times keep insertion order.
    ///
    /// # Errors
    /// - Returns `EventValidationError` for blank title or non-`HH:MM` time.
    pub fn add(
        &mut self,
        date: NaiveDate,
        title: &str,
        time: &str,
    ) -> Result<EventId, EventValidationError> {
        let event = Event::new(title, time)?;
        let id = event.id.clone();

        let events = self.days.entry(date).or_default();
        events.push(event);
        events.sort_by_key(|event| event.time);
        self.touch();

        Ok(id)
    }

    /// Removes the event with `id` from `date`.
    ///
    /// Returns the removed event, or `None` when it is not in that day.
    pub fn delete(&mut self, date: NaiveDate, id: &EventId) -> Option<Event> {
        let events = self.days.get_mut(&date)?;
        let index = events.iter().position(|event| &event.id == id)?;
        let removed = events.remove(index);
        self.touch();
        Some(removed)
    }

    /// Moves one event by position.
    ///
    /// # Contract
    /// - Same day: the event is removed, then reinserted at `dest_index`
    ///   counted against the shortened list.
    /// - Different days: the event is inserted into `dest` at `dest_index`.
    /// - `dest_index` is clamped to the target list length.
    ///
    /// # Errors
    /// - `SourceOutOfRange` when `source_index` does not address an event.
    pub fn move_event(
        &mut self,
        source: NaiveDate,
        source_index: usize,
        dest: NaiveDate,
        dest_index: usize,
    ) -> Result<(), MoveError> {
        let source_len = self.events_for(source).len();
        if source_index >= source_len {
            return Err(MoveError::SourceOutOfRange {
                date: source,
                index: source_index,
                len: source_len,
            });
        }

        if source == dest {
            let events = self.days.entry(source).or_default();
            let target = dest_index.min(events.len() - 1);
            if target == source_index {
                return Ok(());
            }
            let moved = events.remove(source_index);
            events.insert(target, moved);
        } else {
            let moved = self.days.entry(source).or_default().remove(source_index);
            let events = self.days.entry(dest).or_default();
            let target = dest_index.min(events.len());
            events.insert(target, moved);
        }

        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
