//! Board state: events, drafts, drops, and delete confirmation.
//!
//! # Responsibility
//! - Keep all mutable board state free of storage and UI concerns.
//! - Translate drag-and-drop notifications into store moves.
//!
//! # Invariants
//! - Only `EventStore` owns events; every other type here refers to them by
//!   day and id.

pub mod delete_confirm;
pub mod draft;
pub mod drop;
pub mod event_store;
pub mod restore;
