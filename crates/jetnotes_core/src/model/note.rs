//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record shared by list, edit and trash views.
//! - Provide value-style field replacement used by the editing session.
//! - Provide lifecycle helpers for trash (soft-delete) semantics.
//!
//! # Invariants
//! - `id == NEW_NOTE_ID` means the note has never been persisted.
//! - Persisted ids are `>= 1` and never reused.
//! - `is_in_trash` is the source of truth for trash membership.

use crate::model::color::Color;
use serde::{Deserialize, Serialize};

/// Stable identifier of a persisted note.
pub type NoteId = i64;

/// Sentinel id carried by a note that has not been saved yet.
pub const NEW_NOTE_ID: NoteId = -1;

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// `NEW_NOTE_ID` until the store assigns a real id.
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub color: Color,
    /// `None` when the note cannot be checked off; otherwise the checkbox state.
    pub is_checked_off: Option<bool>,
    /// Soft-delete flag; trashed notes only show up in the trash list.
    pub is_in_trash: bool,
}

impl Note {
    /// Creates an unsaved note with empty fields and the given color.
    pub fn new_entry(color: Color) -> Self {
        Self {
            id: NEW_NOTE_ID,
            title: String::new(),
            content: String::new(),
            color,
            is_checked_off: None,
            is_in_trash: false,
        }
    }

    /// Returns whether this note has never been persisted.
    pub fn is_new(&self) -> bool {
        self.id == NEW_NOTE_ID
    }

    /// Returns whether the note renders a checkbox.
    pub fn is_checkable(&self) -> bool {
        self.is_checked_off.is_some()
    }

    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }

    pub fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }

    /// Replaces the tri-state checkable flag.
    pub fn with_checked_off(&self, is_checked_off: Option<bool>) -> Self {
        Self {
            is_checked_off,
            ..self.clone()
        }
    }

    /// Moves this note to trash.
    pub fn trash(&mut self) {
        self.is_in_trash = true;
    }

    /// Brings this note back from trash.
    pub fn restore(&mut self) {
        self.is_in_trash = false;
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new_entry(Color::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NEW_NOTE_ID};
    use crate::model::color::palette;

    #[test]
    fn new_entry_is_unsaved_and_not_checkable() {
        let note = Note::default();
        assert_eq!(note.id, NEW_NOTE_ID);
        assert!(note.is_new());
        assert!(!note.is_checkable());
        assert!(!note.is_in_trash);
    }

    #[test]
    fn field_replacement_keeps_source_untouched() {
        let original = Note::default();
        let edited = original
            .with_title("Groceries")
            .with_content("Milk")
            .with_color(palette()[1].clone())
            .with_checked_off(Some(false));

        assert_eq!(original, Note::default());
        assert_eq!(edited.title, "Groceries");
        assert_eq!(edited.content, "Milk");
        assert_eq!(edited.color.hex, "#FF0000");
        assert!(edited.is_checkable());
        assert_eq!(edited.id, NEW_NOTE_ID);
    }

    #[test]
    fn serializes_optional_checked_flag_as_null() {
        let json = serde_json::to_value(Note::default()).unwrap();
        assert!(json["is_checked_off"].is_null());
        assert_eq!(json["id"], -1);
        assert_eq!(json["color"]["hex"], "#FFFFFF");
    }
}
