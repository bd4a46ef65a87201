//! Calendar event domain model.
//!
//! # Responsibility
//! - Define the event record stored in each day column.
//! - Own strict `HH:MM` parsing and time-of-day ordering.
//!
//! # Invariants
//! - `id` is generated once and never reused for another event.
//! - `title` is non-blank for events created through `Event::new`.
//! - `time` always holds a valid 24h time-of-day.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("time pattern should compile")
});

/// Stable identifier for one event.
///
/// Stored as an opaque string so blobs written by older clients (which used
/// non-UUID tokens) still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Time-of-day in 24h form.
///
/// Ordering is numeric: hour first, then minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventTime {
    hour: u8,
    minute: u8,
}

impl EventTime {
    /// Builds a time-of-day, returning `None` when out of range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }
}

impl Display for EventTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for EventTime {
    type Err = EventValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EventValidationError::EmptyTime);
        }
        let captures = TIME_PATTERN
            .captures(trimmed)
            .ok_or_else(|| EventValidationError::InvalidTime(trimmed.to_string()))?;

        // Both groups are two ASCII digits once the pattern matched.
        let hour = captures[1]
            .parse::<u8>()
            .map_err(|_| EventValidationError::InvalidTime(trimmed.to_string()))?;
        let minute = captures[2]
            .parse::<u8>()
            .map_err(|_| EventValidationError::InvalidTime(trimmed.to_string()))?;

        Self::new(hour, minute)
            .ok_or_else(|| EventValidationError::InvalidTime(trimmed.to_string()))
    }
}

/// Persisted as the `HH:MM` string.
impl Serialize for EventTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EventTime {
    fn deserialize<D>(deserializer: D) -> Result<EventTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Validation errors raised when building an event from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    EmptyTitle,
    EmptyTime,
    InvalidTime(String),
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "event title must not be blank"),
            Self::EmptyTime => write!(f, "event time must not be empty"),
            Self::InvalidTime(value) => {
                write!(f, "event time `{value}` is not a valid HH:MM time")
            }
        }
    }
}

impl Error for EventValidationError {}

/// One user-created calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub time: EventTime,
}

impl Event {
    /// Creates a new event with a generated id from raw form input.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is blank after trimming.
    /// - `EmptyTime` / `InvalidTime` when `time` is not strict `HH:MM`.
    pub fn new(title: &str, time: &str) -> Result<Self, EventValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        let time = time.parse::<EventTime>()?;
        Ok(Self::with_id(EventId::generate(), title, time))
    }

    /// Creates an event from parts that were already validated.
    ///
    /// Does not check `title`.
    pub fn with_id(id: EventId, title: impl Into<String>, time: EventTime) -> Self {
        Self {
            id,
            title: title.into(),
            time,
        }
    }
}
