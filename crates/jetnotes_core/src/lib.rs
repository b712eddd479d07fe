//! Core domain logic for JetNotes.
//! This crate is the single source of truth for note lifecycle invariants;
//! UI layers only read state and send intents.

pub mod app;
pub mod db;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod service;
pub mod store;

pub use app::{AppError, AppResult, JetNotesApp, TrashActionOutcome};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::color::{palette, Color, ColorError, ColorId, DEFAULT_COLOR_ID};
pub use model::note::{Note, NoteId, NEW_NOTE_ID};
pub use navigation::{BackOutcome, NavigationError, Navigator, Overlay, Screen, ScreenKind};
pub use service::editor::NoteEditor;
pub use service::filter::{filter_by_checkable, filter_by_tab, NoteTab, SelectorError};
pub use service::selection::NoteSelection;
pub use service::trash::{TrashController, TrashDialog};
pub use store::{
    InMemoryNoteStore, NoteStore, SqliteNoteStore, StoreError, StoreEvent, StoreObserver,
    StoreResult, SubscriptionId,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
