//! Durable slot for the serialized event store.
//!
//! # Responsibility
//! - Read and write the whole event store as one JSON value under one key.
//!
//! # Invariants
//! - The blob layout is `{ "YYYY-MM-DD": [ {"id","title","time"} ] }`.
//! - Saves replace the whole value, including with an empty store.
//! - Writers are last-write-wins; there is no merge.
//! - A blob that loads with losses, or not at all, is copied to the backup
//!   key before it is returned, so the next save cannot destroy it.

use crate::db::DbError;
use crate::store::event_store::EventStore;
use crate::store::restore::SavedStore;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key under which the event store is persisted.
pub const EVENT_STORE_KEY: &str = "weekplan.events";

const BACKUP_KEY_SUFFIX: &str = ".backup";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from the durable event slot.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted event data: {message}"),
            Self::Serialize(err) => write!(f, "failed to serialize event store: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the persisted event store.
pub trait EventStoreRepository {
    /// Returns the stored event set, or `None` when nothing was saved yet.
    fn load_store(&self) -> RepoResult<Option<EventStore>>;
    /// Replaces the stored event set.
    fn save_store(&self, store: &EventStore) -> RepoResult<()>;
}

/// SQLite-backed event slot.
///
/// Owns its connection so a long-lived controller can hold it.
pub struct SqliteEventStoreRepository {
    conn: Connection,
    key: String,
}

impl SqliteEventStoreRepository {
    /// Wraps a migrated connection using the default storage key.
    ///
    /// # Errors
    /// - `InvalidData` when the connection was not opened through `open_db`
    ///   (the `kv_store` table is missing).
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        Self::try_with_key(conn, EVENT_STORE_KEY)
    }

    /// Same as `try_new`, with a caller-chosen storage key.
    pub fn try_with_key(conn: Connection, key: impl Into<String>) -> RepoResult<Self> {
        let has_table: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'
            );",
            [],
            |row| row.get(0),
        )?;
        if has_table != 1 {
            return Err(RepoError::InvalidData(
                "kv_store table is missing; open the database with open_db".to_string(),
            ));
        }

        Ok(Self {
            conn,
            key: key.into(),
        })
    }

    /// Underlying connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Key holding the last blob that could not be fully loaded.
    pub fn backup_key(&self) -> String {
        format!("{}{BACKUP_KEY_SUFFIX}", self.key)
    }

    fn read(&self, key: &str) -> RepoResult<Option<String>> {
        let raw = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1;", [key], |row| row.get(0))
            .optional()?;
        Ok(raw)
    }

    fn write(&self, key: &str, raw: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, raw],
        )?;
        Ok(())
    }
}

impl EventStoreRepository for SqliteEventStoreRepository {
    fn load_store(&self) -> RepoResult<Option<EventStore>> {
        let Some(raw) = self.read(&self.key)? else {
            return Ok(None);
        };

        let saved = match serde_json::from_str::<SavedStore>(&raw) {
            Ok(saved) => saved,
            Err(err) => {
                self.write(&self.backup_key(), &raw)?;
                return Err(RepoError::InvalidData(format!("key `{}`: {err}", self.key)));
            }
        };

        let (store, report) = saved.restore();
        if !report.is_lossless() {
            self.write(&self.backup_key(), &raw)?;
            warn!(
                "event=store_decode module=repo status=partial kept_events={} dropped_events={} dropped_days={} backup_key={}",
                report.kept_events,
                report.dropped_events,
                report.dropped_days,
                self.backup_key()
            );
        }
        Ok(Some(store))
    }

    fn save_store(&self, store: &EventStore) -> RepoResult<()> {
        let raw = serde_json::to_string(store).map_err(RepoError::Serialize)?;
        self.write(&self.key, &raw)
    }
}
