//! Drag-and-drop notification translation.
//!
//! # Responsibility
//! - Accept one completed drag gesture as reported by the UI's gesture
//!   layer and turn it into an `EventStore::move_event` call.
//!
//! # Invariants
//! - Droppable ids are day keys (`YYYY-MM-DD`).
//! - Drops with no destination, or with ids that are not day keys, leave the
//!   store untouched.

use crate::store::event_store::{EventStore, MoveError};
use crate::week::parse_iso_date;

/// One end of a drag: which day column and which position in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragLocation {
    pub droppable_id: String,
    pub index: usize,
}

impl DragLocation {
    pub fn new(droppable_id: impl Into<String>, index: usize) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            index,
        }
    }
}

/// Completed drag gesture.
///
/// `destination` is `None` when the item was released outside every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResult {
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

/// What a drop did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Event moved (possibly to its own position, which is not a change).
    Moved,
    /// Released outside any column.
    NoDestination,
    /// Source or destination id is not a day key.
    UnknownDroppable,
}

/// Applies a drop notification to `store`.
///
/// # Errors
/// - Propagates `MoveError` when the source index does not address an event.
pub fn apply_drop(store: &mut EventStore, drop: &DropResult) -> Result<DropOutcome, MoveError> {
    let Some(destination) = drop.destination.as_ref() else {
        return Ok(DropOutcome::NoDestination);
    };

    let (Some(source_date), Some(dest_date)) = (
        parse_iso_date(&drop.source.droppable_id),
        parse_iso_date(&destination.droppable_id),
    ) else {
        return Ok(DropOutcome::UnknownDroppable);
    };

    store.move_event(
        source_date,
        drop.source.index,
        dest_date,
        destination.index,
    )?;
    Ok(DropOutcome::Moved)
}
