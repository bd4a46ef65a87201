//! Flutter-facing bindings for the weekly planning board.

pub mod api;
