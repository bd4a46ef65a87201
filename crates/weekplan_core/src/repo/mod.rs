//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable-slot contract for the event store.
//! - Isolate SQLite and JSON details from controller orchestration.
//!
//! # Invariants
//! - Read paths report malformed persisted data as `InvalidData` instead of
//!   masking it; recovery policy belongs to the caller.

pub mod event_store_repo;
