//! Use-case orchestration over board state and its repository.
//!
//! # Responsibility
//! - Keep UI/FFI layers decoupled from storage details.

pub mod calendar_controller;
