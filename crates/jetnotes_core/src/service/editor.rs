//! Note editing session.
//!
//! # Responsibility
//! - Hold the entry buffer for the save-note screen.
//! - Gate move-to-trash behind an explicit confirmation step.
//!
//! # Invariants
//! - Every edit replaces the buffer with a new `Note` value.
//! - Move-to-trash can only be requested for a persisted note.

use crate::model::color::Color;
use crate::model::note::Note;

/// Why a move-to-trash request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashRequestError {
    /// The buffer holds a note that was never saved.
    UnsavedNote,
}

/// Editing session for one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEditor {
    entry: Note,
    confirming_trash: bool,
}

impl NoteEditor {
    /// Starts a session for a fresh unsaved note.
    pub fn for_new(color: Color) -> Self {
        Self::for_existing(Note::new_entry(color))
    }

    /// Starts a session on a copy of `note`.
    pub fn for_existing(note: Note) -> Self {
        Self {
            entry: note,
            confirming_trash: false,
        }
    }

    pub fn entry(&self) -> &Note {
        &self.entry
    }

    pub fn into_entry(self) -> Note {
        self.entry
    }

    /// Editing mode shows the delete action; creating mode does not.
    pub fn is_editing_existing(&self) -> bool {
        !self.entry.is_new()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.entry = self.entry.with_title(title);
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.entry = self.entry.with_content(content);
    }

    pub fn set_color(&mut self, color: Color) {
        self.entry = self.entry.with_color(color);
    }

    /// Turns the checkbox on (unchecked) or off (absent).
    ///
    /// Enabling an already checkable note keeps its checked state.
    pub fn set_checkable(&mut self, checkable: bool) {
        let next = match (checkable, self.entry.is_checked_off) {
            (true, Some(checked)) => Some(checked),
            (true, None) => Some(false),
            (false, _) => None,
        };
        self.entry = self.entry.with_checked_off(next);
    }

    /// Ignored unless the buffer is checkable.
    pub fn set_checked(&mut self, checked: bool) {
        if self.entry.is_checkable() {
            self.entry = self.entry.with_checked_off(Some(checked));
        }
    }

    /// Replaces the whole buffer, keeping the session's note id.
    pub fn replace_entry(&mut self, note: Note) {
        self.entry = Note {
            id: self.entry.id,
            ..note
        };
    }

    /// Opens the move-to-trash confirmation.
    pub fn request_move_to_trash(&mut self) -> Result<(), TrashRequestError> {
        if !self.is_editing_existing() {
            return Err(TrashRequestError::UnsavedNote);
        }
        self.confirming_trash = true;
        Ok(())
    }

    pub fn dismiss_move_to_trash(&mut self) {
        self.confirming_trash = false;
    }

    pub fn is_confirming_trash(&self) -> bool {
        self.confirming_trash
    }
}
