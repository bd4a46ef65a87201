//! FFI use-case API for the Flutter board shell.
//!
//! # Responsibility
//! - Expose board intents (draft edits, add, drop, delete/confirm) and the
//!   render model as sync FRB calls.
//! - Hold one process-wide board controller so UI events stay atomic.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every mutating call answers with an `ok` flag and a message instead of
//!   throwing.
//! - Dates cross the boundary as `YYYY-MM-DD` strings.

use log::warn;
use std::sync::{Mutex, MutexGuard};
use weekplan_core::config::resolve_db_path;
use weekplan_core::db::open_db;
use weekplan_core::week::{iso_date, parse_iso_date, today};
use weekplan_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CalendarController, DayColumn, DragLocation, DropOutcome, DropResult, Event, EventId, Route,
    SqliteEventStoreRepository, WeekView,
};

type Board = CalendarController<SqliteEventStoreRepository>;

static BOARD: Mutex<Option<Board>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One event row inside a day column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub id: String,
    pub title: String,
    /// `HH:MM`.
    pub time: String,
}

/// One rendered day column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumnItem {
    /// `YYYY-MM-DD`; also the droppable id to report back in `calendar_drop`.
    pub date: String,
    pub label: String,
    pub is_today: bool,
    pub events: Vec<EventItem>,
    pub draft_title: String,
    pub draft_time: String,
    /// Navigation path for the day header.
    pub detail_path: String,
}

/// Delete awaiting confirmation; the shell shows its modal while present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeleteItem {
    pub date: String,
    pub event_id: String,
}

/// Render model envelope for the week board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekViewResponse {
    pub ok: bool,
    pub message: String,
    pub week_start: String,
    pub days: Vec<DayColumnItem>,
    pub pending_delete: Option<PendingDeleteItem>,
    /// Changes whenever the event store changes; cheap re-render check.
    pub revision: u64,
}

impl WeekViewResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            week_start: String::new(),
            days: Vec::new(),
            pending_delete: None,
            revision: 0,
        }
    }
}

/// Generic action response envelope for board intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarActionResponse {
    /// Whether the intent was applied.
    pub ok: bool,
    /// Affected event id, when the intent targets one event.
    pub event_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl CalendarActionResponse {
    fn success(message: impl Into<String>, event_id: Option<String>) -> Self {
        Self {
            ok: true,
            event_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            event_id: None,
            message: message.into(),
        }
    }
}

/// Screen addressed by a navigation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteResponse {
    /// `week`, `day`, or `unknown`.
    pub screen: String,
    /// Date segment verbatim, for `day`.
    pub date: Option<String>,
    /// Path of the back action, for `day`.
    pub back_path: Option<String>,
}

/// Builds the board for the week containing `today` (`None` = local today).
///
/// # FFI contract
/// - Sync call; the first call opens the board database.
/// - Never panics; `ok=false` with a message on bad input or DB failure.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_week_view(today_date: Option<String>) -> WeekViewResponse {
    let today_date = match today_date {
        Some(raw) => match parse_iso_date(&raw) {
            Some(date) => date,
            None => return WeekViewResponse::failure(format!("invalid date `{raw}`")),
        },
        None => today(),
    };

    match with_board(|board| board.week_view(today_date)) {
        Ok(view) => to_week_view_response(view),
        Err(err) => WeekViewResponse::failure(format!("calendar_week_view failed: {err}")),
    }
}

/// Updates the draft form of one day.
///
/// `None` leaves a field as it is.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_set_draft(
    date: String,
    title: Option<String>,
    time: Option<String>,
) -> CalendarActionResponse {
    let Some(day) = parse_iso_date(&date) else {
        return CalendarActionResponse::failure(format!("invalid date `{date}`"));
    };
    match with_board(|board| {
        if let Some(title) = title {
            board.set_draft_title(day, title);
        }
        if let Some(time) = time {
            board.set_draft_time(day, time);
        }
    }) {
        Ok(()) => CalendarActionResponse::success("Draft updated.", None),
        Err(err) => CalendarActionResponse::failure(format!("calendar_set_draft failed: {err}")),
    }
}

/// Submits the day's draft as a new event.
///
/// # FFI contract
/// - Empty or malformed input returns `ok=false`; the draft is kept.
/// - Returns the created event id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_add_event(date: String) -> CalendarActionResponse {
    let Some(day) = parse_iso_date(&date) else {
        return CalendarActionResponse::failure(format!("invalid date `{date}`"));
    };
    match with_board(|board| board.submit_draft(day)) {
        Ok(Ok(id)) => CalendarActionResponse::success("Event added.", Some(id.to_string())),
        Ok(Err(err)) => {
            CalendarActionResponse::failure(format!("calendar_add_event failed: {err}"))
        }
        Err(err) => CalendarActionResponse::failure(format!("calendar_add_event failed: {err}")),
    }
}

/// Applies a completed drag gesture.
///
/// `dest_id = None` means the item was released outside every column; any
/// `dest_index` is then ignored. A `dest_id` without `dest_index` is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_drop(
    source_id: String,
    source_index: u32,
    dest_id: Option<String>,
    dest_index: Option<u32>,
) -> CalendarActionResponse {
    let destination = match (dest_id, dest_index) {
        (Some(id), Some(index)) => Some(DragLocation::new(id, index as usize)),
        (Some(id), None) => {
            return CalendarActionResponse::failure(format!(
                "calendar_drop failed: destination `{id}` has no index"
            ));
        }
        (None, _) => None,
    };
    let drop = DropResult {
        source: DragLocation::new(source_id, source_index as usize),
        destination,
    };
    match with_board(|board| board.on_drag_end(&drop)) {
        Ok(Ok(DropOutcome::Moved)) => CalendarActionResponse::success("Event moved.", None),
        Ok(Ok(outcome)) => {
            CalendarActionResponse::success(format!("Drop ignored ({outcome:?})."), None)
        }
        Ok(Err(err)) => CalendarActionResponse::failure(format!("calendar_drop failed: {err}")),
        Err(err) => CalendarActionResponse::failure(format!("calendar_drop failed: {err}")),
    }
}

/// Stages a delete and asks the shell to show the confirmation modal.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_open_delete(date: String, event_id: String) -> CalendarActionResponse {
    let Some(day) = parse_iso_date(&date) else {
        return CalendarActionResponse::failure(format!("invalid date `{date}`"));
    };
    let id = EventId::from(event_id);
    match with_board(|board| board.open_delete(day, id.clone())) {
        Ok(()) => CalendarActionResponse::success("Delete pending.", Some(id.to_string())),
        Err(err) => CalendarActionResponse::failure(format!("calendar_open_delete failed: {err}")),
    }
}

/// Dismisses the confirmation modal without deleting.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_cancel_delete() -> CalendarActionResponse {
    match with_board(|board| board.cancel_delete()) {
        Ok(()) => CalendarActionResponse::success("Delete cancelled.", None),
        Err(err) => {
            CalendarActionResponse::failure(format!("calendar_cancel_delete failed: {err}"))
        }
    }
}

/// Commits the staged delete.
///
/// Succeeds with `event_id=None` when nothing was staged or the event is
/// already gone.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_confirm_delete() -> CalendarActionResponse {
    match with_board(|board| board.confirm_delete()) {
        Ok(Ok(Some(removed))) => {
            CalendarActionResponse::success("Event deleted.", Some(removed.id.to_string()))
        }
        Ok(Ok(None)) => CalendarActionResponse::success("Nothing to delete.", None),
        Ok(Err(err)) => {
            CalendarActionResponse::failure(format!("calendar_confirm_delete failed: {err}"))
        }
        Err(err) => {
            CalendarActionResponse::failure(format!("calendar_confirm_delete failed: {err}"))
        }
    }
}

/// Resolves a navigation path to a screen.
#[flutter_rust_bridge::frb(sync)]
pub fn route_resolve(path: String) -> RouteResponse {
    match Route::parse(&path) {
        Some(Route::Week) => RouteResponse {
            screen: "week".to_string(),
            date: None,
            back_path: None,
        },
        Some(route @ Route::Day(_)) => {
            let detail = route.day_detail();
            RouteResponse {
                screen: "day".to_string(),
                date: detail.as_ref().map(|detail| detail.date.clone()),
                back_path: detail.map(|detail| detail.back.path()),
            }
        }
        None => RouteResponse {
            screen: "unknown".to_string(),
            date: None,
            back_path: None,
        },
    }
}

fn with_board<T>(f: impl FnOnce(&mut Board) -> T) -> Result<T, String> {
    let mut guard = lock_board();
    if guard.is_none() {
        let db_path = resolve_db_path(None);
        let conn = open_db(&db_path).map_err(|err| format!("board DB open failed: {err}"))?;
        let repo = SqliteEventStoreRepository::try_new(conn)
            .map_err(|err| format!("board repo init failed: {err}"))?;
        *guard = Some(CalendarController::open(repo));
    }
    match guard.as_mut() {
        Some(board) => Ok(f(board)),
        None => Err("board is not initialized".to_string()),
    }
}

fn lock_board() -> MutexGuard<'static, Option<Board>> {
    BOARD.lock().unwrap_or_else(|poisoned| {
        warn!("event=board_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    })
}

fn to_week_view_response(view: WeekView) -> WeekViewResponse {
    WeekViewResponse {
        ok: true,
        message: String::new(),
        week_start: iso_date(view.week_start),
        days: view.days.into_iter().map(to_day_column_item).collect(),
        pending_delete: view.pending_delete.map(|pending| PendingDeleteItem {
            date: iso_date(pending.date),
            event_id: pending.event_id.to_string(),
        }),
        revision: view.revision,
    }
}

fn to_day_column_item(column: DayColumn) -> DayColumnItem {
    DayColumnItem {
        date: column.key,
        label: column.label.to_string(),
        is_today: column.is_today,
        events: column.events.into_iter().map(to_event_item).collect(),
        draft_title: column.draft.title,
        draft_time: column.draft.time,
        detail_path: column.detail_route.path(),
    }
}

fn to_event_item(event: Event) -> EventItem {
    EventItem {
        id: event.id.to_string(),
        title: event.title,
        time: event.time.to_string(),
    }
}
