//! Runtime configuration shared by the FFI and CLI front ends.
//!
//! # Invariants
//! - An explicit path always wins over `WEEKPLAN_DB_PATH`.
//! - Blank values are treated as unset.

use std::path::{Path, PathBuf};

/// Environment variable naming the board database file.
pub const DB_PATH_ENV: &str = "WEEKPLAN_DB_PATH";
/// File name used under the temp directory when nothing is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "weekplan.sqlite3";

/// Resolves the database path: explicit override, then env, then temp dir.
pub fn resolve_db_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit.filter(|path| !path.as_os_str().is_empty()) {
        return path.to_path_buf();
    }
    db_path_from_env_value(std::env::var(DB_PATH_ENV).ok())
}

fn db_path_from_env_value(raw: Option<String>) -> PathBuf {
    raw.as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
}
