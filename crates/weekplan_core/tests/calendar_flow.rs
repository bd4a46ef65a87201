use std::cell::{Cell, RefCell};
use weekplan_core::db::open_db_in_memory;
use weekplan_core::week::parse_iso_date;
use weekplan_core::{
    CalendarController, CalendarError, DragLocation, DropOutcome, DropResult, EventStore,
    EventStoreRepository, EventValidationError, LoadStatus, PendingDelete, RepoError, RepoResult,
    SqliteEventStoreRepository, EVENT_STORE_KEY,
};

/// In-memory repository that counts saves and can be told to fail.
#[derive(Default)]
struct RecordingRepo {
    saved: RefCell<Option<EventStore>>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
    fail_load: bool,
}

impl EventStoreRepository for RecordingRepo {
    fn load_store(&self) -> RepoResult<Option<EventStore>> {
        if self.fail_load {
            return Err(RepoError::InvalidData("corrupt".to_string()));
        }
        Ok(self.saved.borrow().clone())
    }

    fn save_store(&self, store: &EventStore) -> RepoResult<()> {
        if self.fail_saves.get() {
            return Err(RepoError::InvalidData("disk full".to_string()));
        }
        self.saves.set(self.saves.get() + 1);
        *self.saved.borrow_mut() = Some(store.clone());
        Ok(())
    }
}

fn day(value: &str) -> chrono::NaiveDate {
    parse_iso_date(value).unwrap()
}

fn drop_between(source: &str, source_index: usize, dest: Option<(&str, usize)>) -> DropResult {
    DropResult {
        source: DragLocation::new(source, source_index),
        destination: dest.map(|(id, index)| DragLocation::new(id, index)),
    }
}

#[test]
fn submit_draft_adds_event_clears_draft_and_saves() {
    let mut controller = CalendarController::open(RecordingRepo::default());
    let wed = day("2024-02-07");

    controller.set_draft_title(wed, "standup");
    controller.set_draft_time(wed, "09:30");
    let id = controller.submit_draft(wed).unwrap();

    let events = controller.store().events_for(wed);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, id);
    assert_eq!(events[0].time.to_string(), "09:30");
    assert_eq!(controller.draft(wed).title, "");
    assert_eq!(controller.draft(wed).time, "");
    assert_eq!(controller.repository().saves.get(), 1);
}

#[test]
fn rejected_draft_keeps_draft_and_store() {
    let mut controller = CalendarController::open(RecordingRepo::default());
    let wed = day("2024-02-07");

    controller.set_draft_title(wed, "no time yet");
    let err = controller.submit_draft(wed).unwrap_err();
    assert!(matches!(
        err,
        CalendarError::Validation(EventValidationError::EmptyTime)
    ));

    controller.set_draft_time(wed, "9:5");
    assert!(matches!(
        controller.submit_draft(wed).unwrap_err(),
        CalendarError::Validation(EventValidationError::InvalidTime(_))
    ));

    assert!(controller.store().is_empty());
    assert_eq!(controller.draft(wed).title, "no time yet");
    assert_eq!(controller.repository().saves.get(), 0);
}

#[test]
fn new_ids_are_unique_across_days() {
    let mut controller = CalendarController::open(RecordingRepo::default());
    let mut ids = std::collections::HashSet::new();
    for (date, time) in [
        ("2024-02-04", "08:00"),
        ("2024-02-05", "08:00"),
        ("2024-02-04", "09:00"),
    ] {
        let id = controller.add_event(day(date), "item", time).unwrap();
        assert!(ids.insert(id));
    }
    assert_eq!(controller.store().total_len(), 3);
}

#[test]
fn drag_end_moves_across_days_and_saves() {
    let mut controller = CalendarController::open(RecordingRepo::default());
    let wed = day("2024-02-07");
    let thu = day("2024-02-08");
    let id = controller.add_event(wed, "E1", "09:00").unwrap();

    let outcome = controller
        .on_drag_end(&drop_between("2024-02-07", 0, Some(("2024-02-08", 0))))
        .unwrap();

    assert_eq!(outcome, DropOutcome::Moved);
    assert!(controller.store().events_for(wed).is_empty());
    assert_eq!(controller.store().events_for(thu)[0].id, id);
    assert_eq!(controller.repository().saves.get(), 2);
}

#[test]
fn drag_end_without_destination_does_not_save() {
    let mut controller = CalendarController::open(RecordingRepo::default());
    controller.add_event(day("2024-02-07"), "E1", "09:00").unwrap();

    let outcome = controller
        .on_drag_end(&drop_between("2024-02-07", 0, None))
        .unwrap();
    assert_eq!(outcome, DropOutcome::NoDestination);

    controller
        .on_drag_end(&drop_between("2024-02-07", 0, Some(("2024-02-07", 0))))
        .unwrap();
    assert_eq!(controller.repository().saves.get(), 1);
}

#[test]
fn drag_end_with_stale_index_is_rejected() {
    let mut controller = CalendarController::open(RecordingRepo::default());
    let err = controller
        .on_drag_end(&drop_between("2024-02-07", 0, Some(("2024-02-08", 0))))
        .unwrap_err();
    assert!(matches!(err, CalendarError::Move(_)));
}

#[test]
fn delete_confirm_flow() {
    let mut controller = CalendarController::open(RecordingRepo::default());
    let wed = day("2024-02-07");
    let keep = controller.add_event(wed, "keep", "08:00").unwrap();
    let doomed = controller.add_event(wed, "doomed", "09:00").unwrap();

    controller.open_delete(wed, doomed.clone());
    assert_eq!(
        controller.pending_delete(),
        Some(&PendingDelete {
            date: wed,
            event_id: doomed.clone()
        })
    );

    controller.cancel_delete();
    assert!(controller.pending_delete().is_none());
    assert_eq!(controller.store().events_for(wed).len(), 2);

    controller.open_delete(wed, doomed.clone());
    let removed = controller.confirm_delete().unwrap().unwrap();
    assert_eq!(removed.id, doomed);
    assert!(controller.pending_delete().is_none());
    assert_eq!(controller.store().events_for(wed)[0].id, keep);

    assert!(controller.confirm_delete().unwrap().is_none());
}

#[test]
fn confirming_a_delete_for_a_moved_event_is_a_no_op() {
    let mut controller = CalendarController::open(RecordingRepo::default());
    let wed = day("2024-02-07");
    let thu = day("2024-02-08");
    let id = controller.add_event(wed, "wanderer", "09:00").unwrap();

    controller.open_delete(wed, id.clone());
    controller
        .on_drag_end(&drop_between("2024-02-07", 0, Some(("2024-02-08", 0))))
        .unwrap();
    let saves = controller.repository().saves.get();

    assert!(controller.confirm_delete().unwrap().is_none());
    assert!(controller.pending_delete().is_none());
    assert_eq!(controller.store().events_for(thu)[0].id, id);
    assert_eq!(controller.repository().saves.get(), saves);
}

#[test]
fn deleting_last_event_persists_empty_store() {
    let mut controller = CalendarController::open(RecordingRepo::default());
    let wed = day("2024-02-07");
    let id = controller.add_event(wed, "only", "09:00").unwrap();

    controller.open_delete(wed, id);
    controller.confirm_delete().unwrap();

    let saved = controller.repository().saved.borrow().clone().unwrap();
    assert!(saved.is_empty());
}

#[test]
fn save_failure_keeps_in_memory_change() {
    let repo = RecordingRepo::default();
    repo.fail_saves.set(true);
    let mut controller = CalendarController::open(repo);
    let wed = day("2024-02-07");

    let err = controller.add_event(wed, "unsaved", "09:00").unwrap_err();
    assert!(matches!(err, CalendarError::Persist(_)));
    assert_eq!(controller.store().events_for(wed).len(), 1);
}

#[test]
fn unreadable_saved_data_recovers_to_empty_store() {
    let repo = RecordingRepo {
        fail_load: true,
        ..RecordingRepo::default()
    };
    let controller = CalendarController::open(repo);
    assert_eq!(controller.load_status(), LoadStatus::Recovered);
    assert!(controller.store().is_empty());
}

#[test]
fn sqlite_backed_controller_restores_previous_session() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventStoreRepository::try_new(conn).unwrap();
    let mut first = CalendarController::open(repo);
    assert_eq!(first.load_status(), LoadStatus::Fresh);
    let wed = day("2024-02-07");
    first.add_event(wed, "late", "10:00").unwrap();
    first.add_event(wed, "early", "09:00").unwrap();

    let raw: String = first
        .repository()
        .connection()
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1;",
            [EVENT_STORE_KEY],
            |row| row.get(0),
        )
        .unwrap();
    assert!(raw.starts_with(r#"{"2024-02-07":["#));

    let store = first.store().clone();
    let repo = SqliteEventStoreRepository::try_new(open_db_in_memory().unwrap()).unwrap();
    repo.save_store(&store).unwrap();
    let second = CalendarController::open(repo);
    assert_eq!(second.load_status(), LoadStatus::Restored);
    let times = second
        .store()
        .events_for(wed)
        .iter()
        .map(|event| event.time.to_string())
        .collect::<Vec<_>>();
    assert_eq!(times, vec!["09:00", "10:00"]);
}

#[test]
fn malformed_sqlite_blob_falls_back_and_is_overwritten() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, 'garbage');",
        [EVENT_STORE_KEY],
    )
    .unwrap();
    let repo = SqliteEventStoreRepository::try_new(conn).unwrap();
    let mut controller = CalendarController::open(repo);
    assert_eq!(controller.load_status(), LoadStatus::Recovered);

    controller.add_event(day("2024-02-07"), "fresh", "12:00").unwrap();
    let reloaded = controller.repository().load_store().unwrap().unwrap();
    assert_eq!(reloaded.total_len(), 1);
}

#[test]
fn one_unreadable_saved_event_does_not_cost_the_others() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2);",
        [
            EVENT_STORE_KEY,
            r#"{"2024-02-07":[
                {"id":"a","title":"kept","time":"09:00"},
                {"id":"b","title":"legacy","time":""},
                {"id":"c","title":"kept too","time":"10:00"}
            ]}"#,
        ],
    )
    .unwrap();
    let repo = SqliteEventStoreRepository::try_new(conn).unwrap();
    let mut controller = CalendarController::open(repo);
    assert_eq!(controller.load_status(), LoadStatus::Restored);
    assert_eq!(controller.store().total_len(), 2);

    controller.add_event(day("2024-02-08"), "new", "12:00").unwrap();

    let reloaded = controller.repository().load_store().unwrap().unwrap();
    assert_eq!(reloaded.total_len(), 3);
    let backup_key = controller.repository().backup_key();
    let backup: String = controller
        .repository()
        .connection()
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1;",
            [backup_key.as_str()],
            |row| row.get(0),
        )
        .unwrap();
    assert!(backup.contains(r#""title":"legacy""#));
}

#[test]
fn week_view_reflects_controller_state() {
    let mut controller = CalendarController::open(RecordingRepo::default());
    let wed = day("2024-02-07");
    let id = controller.add_event(wed, "E1", "09:00").unwrap();
    controller.set_draft_title(wed, "next");
    controller.open_delete(wed, id.clone());

    let view = controller.week_view(wed);
    let column = view.days.iter().find(|column| column.is_today).unwrap();
    assert_eq!(column.key, "2024-02-07");
    assert_eq!(column.events[0].id, id);
    assert_eq!(column.draft.title, "next");
    assert_eq!(view.pending_delete.unwrap().event_id, id);
    assert_eq!(view.revision, controller.store().revision());
}
