//! Navigation surface: the week board and the per-day detail screen.
//!
//! # Invariants
//! - `/` is the week board; `/day/<date>` is the detail screen.
//! - The date segment is kept verbatim; the detail screen never consults the
//!   event store.

use crate::week::iso_date;
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

const DAY_PREFIX: &str = "/day/";

/// Screen addressed by a navigation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Week,
    Day(String),
}

impl Route {
    /// Parses a navigation path. Unknown paths return `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Some(Self::Week);
        }

        let segment = path.strip_prefix(DAY_PREFIX)?;
        let segment = segment.strip_suffix('/').unwrap_or(segment);
        if segment.is_empty() || segment.contains('/') {
            return None;
        }
        Some(Self::Day(segment.to_string()))
    }

    /// Detail route for a day column header.
    pub fn for_date(date: NaiveDate) -> Self {
        Self::Day(iso_date(date))
    }

    pub fn path(&self) -> String {
        match self {
            Self::Week => "/".to_string(),
            Self::Day(date) => format!("{DAY_PREFIX}{date}"),
        }
    }

    /// Detail screen model, for `Day` routes only.
    pub fn day_detail(&self) -> Option<DayDetail> {
        match self {
            Self::Week => None,
            Self::Day(date) => Some(DayDetail {
                date: date.clone(),
                back: Self::Week,
            }),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Day detail screen: the date as written in the path plus a back action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayDetail {
    pub date: String,
    pub back: Route,
}

#[cfg(test)]
mod tests {
    use super::Route;
    use chrono::NaiveDate;

    #[test]
    fn parses_root_and_day_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Week));
        assert_eq!(Route::parse(""), Some(Route::Week));
        assert_eq!(
            Route::parse("/day/2024-02-07"),
            Some(Route::Day("2024-02-07".to_string()))
        );
        assert_eq!(
            Route::parse("/day/2024-02-07/"),
            Some(Route::Day("2024-02-07".to_string()))
        );
    }

    #[test]
    fn keeps_non_date_segments_verbatim() {
        let route = Route::parse("/day/someday").unwrap();
        let detail = route.day_detail().unwrap();
        assert_eq!(detail.date, "someday");
        assert_eq!(detail.back, Route::Week);
    }

    #[test]
    fn rejects_unknown_paths() {
        assert_eq!(Route::parse("/day/"), None);
        assert_eq!(Route::parse("/day/a/b"), None);
        assert_eq!(Route::parse("/settings"), None);
    }

    #[test]
    fn for_date_round_trips_through_path() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 7).unwrap();
        let route = Route::for_date(date);
        assert_eq!(route.path(), "/day/2024-02-07");
        assert_eq!(Route::parse(&route.path()), Some(route));
        assert!(Route::Week.day_detail().is_none());
    }
}
