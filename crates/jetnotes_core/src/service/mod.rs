//! Core use-case services.
//!
//! # Responsibility
//! - Hold the per-screen state that sits between the store and the UI:
//!   list filtering, trash selection and the note editing session.
//! - Stay storage-agnostic; persistence goes through `NoteStore`.

pub mod editor;
pub mod filter;
pub mod selection;
pub mod trash;
