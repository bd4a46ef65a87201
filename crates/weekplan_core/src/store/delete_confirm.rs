//! Two-step delete confirmation state.
//!
//! # Invariants
//! - At most one delete is staged at a time; staging again replaces it.
//! - Both cancel and confirm leave the state `Idle`.

use crate::model::event::EventId;
use chrono::NaiveDate;

/// Delete staged by the user and awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub date: NaiveDate,
    pub event_id: EventId,
}

/// `Idle → Pending → Idle` toggle behind the confirmation modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    Pending(PendingDelete),
}

impl DeleteConfirmation {
    /// Stages a delete request.
    pub fn open(&mut self, date: NaiveDate, event_id: EventId) {
        *self = Self::Pending(PendingDelete { date, event_id });
    }

    /// Drops the staged request, if any.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Takes the staged request for commit, leaving the state idle.
    pub fn take(&mut self) -> Option<PendingDelete> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Pending(pending) => Some(pending),
        }
    }

    pub fn pending(&self) -> Option<&PendingDelete> {
        match self {
            Self::Idle => None,
            Self::Pending(pending) => Some(pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DeleteConfirmation, PendingDelete};
    use crate::model::event::EventId;
    use chrono::NaiveDate;

    #[test]
    fn open_then_take_returns_to_idle() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 7).unwrap();
        let mut state = DeleteConfirmation::default();
        state.open(day, EventId::from("e1"));
        assert_eq!(
            state.pending(),
            Some(&PendingDelete {
                date: day,
                event_id: EventId::from("e1")
            })
        );

        let taken = state.take().unwrap();
        assert_eq!(taken.event_id, EventId::from("e1"));
        assert_eq!(state, DeleteConfirmation::Idle);
        assert!(state.take().is_none());
    }

    #[test]
    fn reopening_replaces_staged_request() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 7).unwrap();
        let mut state = DeleteConfirmation::default();
        state.open(day, EventId::from("e1"));
        state.open(day, EventId::from("e2"));
        assert_eq!(state.pending().unwrap().event_id, EventId::from("e2"));
        state.cancel();
        assert!(state.pending().is_none());
    }
}
