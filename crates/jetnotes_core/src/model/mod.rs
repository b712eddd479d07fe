//! Domain model for notes and their palette colors.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one note shape for the list, edit and trash projections.
//!
//! # Invariants
//! - Every persisted note is identified by a stable `NoteId`.
//! - Trash is represented by a soft-delete flag, not a separate record.

pub mod color;
pub mod note;
