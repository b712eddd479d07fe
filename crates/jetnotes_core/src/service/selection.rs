//! Trash-screen note selection.

use crate::model::note::{Note, NoteId};
use std::collections::BTreeSet;

/// Unordered set of selected note ids.
///
/// Scoped to one trash screen session; callers clear it when leaving the
/// screen or after a bulk action commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteSelection {
    ids: BTreeSet<NoteId>,
}

impl NoteSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `note`; returns `true` when it is now selected.
    pub fn toggle(&mut self, note: &Note) -> bool {
        if self.ids.remove(&note.id) {
            false
        } else {
            self.ids.insert(note.id)
        }
    }

    pub fn contains(&self, note: &Note) -> bool {
        self.ids.contains(&note.id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops ids that are no longer among `notes`.
    pub fn retain_present(&mut self, notes: &[Note]) {
        let present: BTreeSet<NoteId> = notes.iter().map(|note| note.id).collect();
        self.ids.retain(|id| present.contains(id));
    }

    pub fn ids(&self) -> &BTreeSet<NoteId> {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}
