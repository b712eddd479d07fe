//! Note store contracts and implementations.
//!
//! # Responsibility
//! - Define the `NoteStore` contract consumed by services and the app facade.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Lists are ordered by ascending note id and stable across calls.
//! - `upsert` of an unsaved note always assigns a fresh id `>= 1`.
//! - Bulk trash/delete calls ignore unknown ids and are idempotent.
//! - Observers are notified only for mutations that changed state.

use crate::db::DbError;
use crate::model::color::{Color, ColorError};
use crate::model::note::{Note, NoteId};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory_store;
pub mod observer;
pub mod sqlite_store;

pub use memory_store::InMemoryNoteStore;
pub use observer::{ObserverList, StoreEvent, StoreObserver, SubscriptionId};
pub use sqlite_store::SqliteNoteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for note persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    /// `upsert` targeted an id that is not stored.
    NotFound(NoteId),
    Db(DbError),
    /// Persisted row could not be mapped back to the domain model.
    InvalidData(String),
    /// Note color is not canonical `#RRGGBB`; nothing was written.
    InvalidColor(ColorError),
    /// Note color reuses a stored color id with a different name or hex.
    ColorConflict { given: Color, stored: Color },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::InvalidColor(err) => write!(f, "invalid note color: {err}"),
            Self::ColorConflict { given, stored } => write!(
                f,
                "color {} is stored as {} {} but note carries {} {}",
                stored.id, stored.name, stored.hex, given.name, given.hex
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidColor(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::ColorConflict { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::MissingTable(_) => Self::InvalidData(value.to_string()),
            other => Self::Db(other),
        }
    }
}

impl From<ColorError> for StoreError {
    fn from(value: ColorError) -> Self {
        Self::InvalidColor(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Checks a note color against the stored color with the same id.
///
/// Returns `true` when the color is unknown and must be registered.
pub(crate) fn check_note_color(given: &Color, stored: Option<&Color>) -> StoreResult<bool> {
    given.validate()?;
    match stored {
        None => Ok(true),
        Some(stored) if stored == given => Ok(false),
        Some(stored) => Err(StoreError::ColorConflict {
            given: given.clone(),
            stored: stored.clone(),
        }),
    }
}

/// Storage contract for notes.
pub trait NoteStore {
    /// Notes not in trash.
    fn list_active(&self) -> StoreResult<Vec<Note>>;
    /// Notes in trash.
    fn list_trashed(&self) -> StoreResult<Vec<Note>>;
    /// Gets one note by id regardless of trash state.
    fn get(&self, id: NoteId) -> StoreResult<Option<Note>>;
    /// Palette colors ordered by id.
    fn colors(&self) -> StoreResult<Vec<Color>>;
    /// Inserts a new note or replaces an existing one; returns the stored note.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when `note.id` is neither `NEW_NOTE_ID` nor stored.
    /// - `StoreError::InvalidColor` when the color hex is not canonical.
    /// - `StoreError::ColorConflict` when the color id is stored with other values.
    ///
    /// A color id not stored yet is registered. Nothing is written on error.
    fn upsert(&mut self, note: Note) -> StoreResult<Note>;
    /// Sets the trash flag on every known id; returns how many notes changed.
    fn set_trashed(&mut self, ids: &BTreeSet<NoteId>, trashed: bool) -> StoreResult<usize>;
    /// Removes every known id for good; returns how many notes were removed.
    fn delete_permanently(&mut self, ids: &BTreeSet<NoteId>) -> StoreResult<usize>;
    fn subscribe(&mut self, observer: Box<dyn StoreObserver>) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}
