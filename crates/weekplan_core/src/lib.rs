//! Core domain logic for the weekly planning board.
//! This crate is the single source of truth for board invariants; UI shells
//! only render its view models and forward user intents.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;
pub mod week;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventId, EventTime, EventValidationError};
pub use repo::event_store_repo::{
    EventStoreRepository, RepoError, RepoResult, SqliteEventStoreRepository, EVENT_STORE_KEY,
};
pub use service::calendar_controller::{
    CalendarController, CalendarError, CalendarResult, LoadStatus,
};
pub use store::delete_confirm::{DeleteConfirmation, PendingDelete};
pub use store::draft::{DraftEntries, DraftEntry};
pub use store::drop::{apply_drop, DragLocation, DropOutcome, DropResult};
pub use store::event_store::{EventStore, MoveError};
pub use store::restore::{RestoreReport, SavedStore};
pub use view::route::{DayDetail, Route};
pub use view::week_view::{build_week_view, DayColumn, WeekView};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
