//! Domain model for the weekly board.
//!
//! # Responsibility
//! - Define the event record and its time-of-day value type.
//!
//! # Invariants
//! - Every event is identified by a stable `EventId`.
//! - Event times are strict `HH:MM` values ordered numerically.

pub mod event;
