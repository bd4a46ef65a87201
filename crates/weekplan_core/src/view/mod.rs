//! Render-ready view models for the board and its routes.
//!
//! # Responsibility
//! - Turn board state into plain data the UI shell draws without further
//!   logic.
//! - Map navigation paths to screens.

pub mod route;
pub mod week_view;
