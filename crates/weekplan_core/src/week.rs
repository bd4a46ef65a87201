//! Week and date helpers.
//!
//! # Responsibility
//! - Compute the Sunday-first week that contains a given day.
//! - Convert between `NaiveDate` and the `YYYY-MM-DD` keys used everywhere
//!   else (store keys, droppable ids, route segments).
//!
//! # Invariants
//! - Weeks always start on Sunday and contain exactly seven consecutive days.
//! - All dates are local calendar days; no timezone conversion happens here.

use chrono::{Datelike, Duration, Local};

pub use chrono::NaiveDate;

/// Number of day columns in the board.
pub const DAYS_PER_WEEK: usize = 7;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Column labels, Sunday first.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["日", "月", "火", "水", "木", "金", "土"];

/// Returns the most recent Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = i64::from(date.weekday().num_days_from_sunday());
    date - Duration::days(offset)
}

/// Returns seven consecutive days beginning at `start`.
pub fn week_dates(start: NaiveDate) -> [NaiveDate; DAYS_PER_WEEK] {
    std::array::from_fn(|offset| start + Duration::days(offset as i64))
}

/// Returns the Sunday-first week containing `date`.
pub fn week_containing(date: NaiveDate) -> [NaiveDate; DAYS_PER_WEEK] {
    week_dates(start_of_week(date))
}

/// Label for the column that `date` falls in.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize]
}

/// Today's local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a strict `YYYY-MM-DD` key.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    // chrono accepts unpadded fields; keys must be the fixed-width form.
    if trimmed.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).ok()
}

/// Formats `date` as its `YYYY-MM-DD` key.
pub fn iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
