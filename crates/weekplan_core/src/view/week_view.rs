//! Week board view model.
//!
//! # Responsibility
//! - Build the seven day columns shown for the week containing `today`.
//!
//! # Invariants
//! - Columns run Sunday through Saturday.
//! - Events appear in stored order; sorting only happens when events are
//!   added, so drag reorders stay visible.
//! - Exactly one column is flagged `is_today`.

use crate::model::event::Event;
use crate::store::delete_confirm::{DeleteConfirmation, PendingDelete};
use crate::store::draft::{DraftEntries, DraftEntry};
use crate::store::event_store::EventStore;
use crate::view::route::Route;
use crate::week::{iso_date, week_containing, weekday_label};
use chrono::NaiveDate;

/// One rendered day column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    pub date: NaiveDate,
    /// `YYYY-MM-DD`; also the column's droppable id.
    pub key: String,
    pub label: &'static str,
    pub is_today: bool,
    pub events: Vec<Event>,
    pub draft: DraftEntry,
    pub detail_route: Route,
}

/// Whole board for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub today: NaiveDate,
    pub days: Vec<DayColumn>,
    /// Staged delete; the UI shows the confirmation modal while set.
    pub pending_delete: Option<PendingDelete>,
    /// Store revision this view was built from.
    pub revision: u64,
}

/// Builds the board for the week containing `today`.
pub fn build_week_view(
    store: &EventStore,
    drafts: &DraftEntries,
    confirmation: &DeleteConfirmation,
    today: NaiveDate,
) -> WeekView {
    let dates = week_containing(today);
    let week_start = dates[0];
    let days = dates
        .into_iter()
        .map(|date| DayColumn {
            date,
            key: iso_date(date),
            label: weekday_label(date),
            is_today: date == today,
            events: store.events_for(date).to_vec(),
            draft: drafts.get(date),
            detail_route: Route::for_date(date),
        })
        .collect();

    WeekView {
        week_start,
        today,
        days,
        pending_delete: confirmation.pending().cloned(),
        revision: store.revision(),
    }
}
