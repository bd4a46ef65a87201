//! Board controller: the single owner of calendar state.
//!
//! # Responsibility
//! - Apply user intents (form submit, drop, delete/confirm) to board state.
//! - Mirror the event store to its repository after every change.
//! - Rehydrate the store on open, recovering from unreadable data.
//!
//! # Invariants
//! - The store is saved after every mutation that changed it, including
//!   when it becomes empty.
//! - Rejected input never mutates the store or clears the draft.
//! - A failed save keeps the in-memory state and reports the error.
//! - Event titles are never written to logs.

use crate::model::event::{Event, EventId, EventValidationError};
use crate::repo::event_store_repo::{EventStoreRepository, RepoError};
use crate::store::delete_confirm::{DeleteConfirmation, PendingDelete};
use crate::store::draft::{DraftEntries, DraftEntry};
use crate::store::drop::{apply_drop, DropOutcome, DropResult};
use crate::store::event_store::{EventStore, MoveError};
use crate::view::week_view::{build_week_view, WeekView};
use chrono::NaiveDate;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CalendarResult<T> = Result<T, CalendarError>;

/// Errors surfaced by controller operations.
#[derive(Debug)]
pub enum CalendarError {
    /// Add-event input was rejected; nothing changed.
    Validation(EventValidationError),
    /// Drop referred to a position that does not exist; nothing changed.
    Move(MoveError),
    /// State changed in memory but could not be saved.
    Persist(RepoError),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Move(err) => write!(f, "{err}"),
            Self::Persist(err) => write!(f, "failed to save events: {err}"),
        }
    }
}

impl Error for CalendarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Move(err) => Some(err),
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<EventValidationError> for CalendarError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<MoveError> for CalendarError {
    fn from(value: MoveError) -> Self {
        Self::Move(value)
    }
}

impl From<RepoError> for CalendarError {
    fn from(value: RepoError) -> Self {
        Self::Persist(value)
    }
}

/// How the store was obtained when the controller opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing was saved yet.
    Fresh,
    /// Saved events were restored.
    Restored,
    /// Saved data could not be read; started from an empty store.
    Recovered,
}

/// Owns the event store, drafts, and delete confirmation for one board.
pub struct CalendarController<R: EventStoreRepository> {
    repo: R,
    store: EventStore,
    drafts: DraftEntries,
    confirmation: DeleteConfirmation,
    load_status: LoadStatus,
}

impl<R: EventStoreRepository> CalendarController<R> {
    /// Opens the board, rehydrating events from `repo`.
    ///
    /// Never fails: unreadable saved data is logged and replaced by an empty
    /// store, which is written back on the next change.
    pub fn open(repo: R) -> Self {
        let (store, load_status) = match repo.load_store() {
            Ok(Some(store)) => {
                info!(
                    "event=store_load module=controller status=ok days={} events={}",
                    store.dates().count(),
                    store.total_len()
                );
                (store, LoadStatus::Restored)
            }
            Ok(None) => {
                info!("event=store_load module=controller status=ok days=0 events=0 fresh=true");
                (EventStore::new(), LoadStatus::Fresh)
            }
            Err(err) => {
                warn!(
                    "event=store_load module=controller status=fallback error_code=store_unreadable error={}",
                    err
                );
                (EventStore::new(), LoadStatus::Recovered)
            }
        };

        Self {
            repo,
            store,
            drafts: DraftEntries::new(),
            confirmation: DeleteConfirmation::default(),
            load_status,
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    pub fn draft(&self, date: NaiveDate) -> DraftEntry {
        self.drafts.get(date)
    }

    pub fn set_draft_title(&mut self, date: NaiveDate, title: impl Into<String>) {
        self.drafts.set_title(date, title);
    }

    pub fn set_draft_time(&mut self, date: NaiveDate, time: impl Into<String>) {
        self.drafts.set_time(date, time);
    }

    /// Adds an event from the day's draft entry.
    ///
    /// # Errors
    /// - `Validation` when the draft title/time is rejected.
    /// - `Persist` when the event was added but could not be saved.
    pub fn submit_draft(&mut self, date: NaiveDate) -> CalendarResult<EventId> {
        let draft = self.drafts.get(date);
        self.add_event(date, &draft.title, &draft.time)
    }

    /// Adds an event to `date` and clears that day's draft.
    ///
    /// # Errors
    /// - `Validation` when the title/time is rejected; draft is kept.
    /// - `Persist` when the event was added but could not be saved.
    pub fn add_event(
        &mut self,
        date: NaiveDate,
        title: &str,
        time: &str,
    ) -> CalendarResult<EventId> {
        let id = match self.store.add(date, title, time) {
            Ok(id) => id,
            Err(err) => {
                debug!(
                    "event=event_add module=controller status=rejected date={} reason={}",
                    date, err
                );
                return Err(err.into());
            }
        };
        self.drafts.clear(date);

        debug!(
            "event=event_add module=controller status=ok date={} id={} day_events={}",
            date,
            id,
            self.store.events_for(date).len()
        );
        self.persist("event_add")?;
        Ok(id)
    }

    /// Applies one completed drag gesture.
    ///
    /// # Errors
    /// - `Move` when the source position does not exist.
    /// - `Persist` when the move happened but could not be saved.
    pub fn on_drag_end(&mut self, drop: &DropResult) -> CalendarResult<DropOutcome> {
        let before = self.store.revision();
        let outcome = apply_drop(&mut self.store, drop).map_err(|err| {
            warn!(
                "event=event_move module=controller status=rejected source={} index={} error={}",
                drop.source.droppable_id, drop.source.index, err
            );
            err
        })?;

        debug!(
            "event=event_move module=controller status=ok outcome={:?} source={} index={}",
            outcome, drop.source.droppable_id, drop.source.index
        );
        if self.store.revision() != before {
            self.persist("event_move")?;
        }
        Ok(outcome)
    }

    /// Stages a delete for confirmation.
    pub fn open_delete(&mut self, date: NaiveDate, event_id: EventId) {
        debug!(
            "event=delete_open module=controller status=ok date={} id={}",
            date, event_id
        );
        self.confirmation.open(date, event_id);
    }

    /// Drops the staged delete without touching the store.
    pub fn cancel_delete(&mut self) {
        debug!("event=delete_cancel module=controller status=ok");
        self.confirmation.cancel();
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.confirmation.pending()
    }

    /// Commits the staged delete, if any, and returns to idle.
    ///
    /// Returns the removed event; `None` when nothing was staged or the
    /// staged event no longer exists.
    pub fn confirm_delete(&mut self) -> CalendarResult<Option<Event>> {
        let Some(pending) = self.confirmation.take() else {
            return Ok(None);
        };
        self.delete_event(pending.date, &pending.event_id)
    }

    /// Deletes one event immediately, bypassing confirmation.
    pub fn delete_event(&mut self, date: NaiveDate, id: &EventId) -> CalendarResult<Option<Event>> {
        let removed = self.store.delete(date, id);
        debug!(
            "event=event_delete module=controller status=ok date={} id={} removed={}",
            date,
            id,
            removed.is_some()
        );
        if removed.is_some() {
            self.persist("event_delete")?;
        }
        Ok(removed)
    }

    /// Builds the week board for the week containing `today`.
    pub fn week_view(&self, today: NaiveDate) -> WeekView {
        build_week_view(&self.store, &self.drafts, &self.confirmation, today)
    }

    fn persist(&self, operation: &str) -> CalendarResult<()> {
        match self.repo.save_store(&self.store) {
            Ok(()) => {
                debug!(
                    "event=store_save module=controller status=ok op={} revision={} events={}",
                    operation,
                    self.store.revision(),
                    self.store.total_len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=controller status=error op={} error_code=store_save_failed error={}",
                    operation, err
                );
                Err(err.into())
            }
        }
    }
}
