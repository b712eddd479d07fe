//! Trash screen controller.
//!
//! # Responsibility
//! - Own the active tab, the note selection and the pending bulk dialog.
//! - Hand confirmed bulk actions back to the caller for execution.
//!
//! # Invariants
//! - A dialog can only be pending while the selection is non-empty.
//! - Confirming consumes the dialog and the selection.
//! - Dismissing a dialog keeps the selection.

use crate::model::note::{Note, NoteId};
use crate::service::filter::{filter_by_checkable, NoteTab, SelectorError};
use crate::service::selection::NoteSelection;
use std::collections::BTreeSet;

/// Bulk action waiting for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashDialog {
    Restore,
    PermanentlyDelete,
}

impl TrashDialog {
    pub fn title(self) -> &'static str {
        match self {
            Self::Restore => "Restore",
            Self::PermanentlyDelete => "Delete notes forever",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Restore => "Are you sure you want to restore selected notes?",
            Self::PermanentlyDelete => {
                "Are you sure you want to delete selected notes permanently?"
            }
        }
    }
}

/// A confirmed bulk action and the ids it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedTrashAction {
    pub action: TrashDialog,
    pub ids: BTreeSet<NoteId>,
}

/// State behind the trash screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrashController {
    tab: NoteTab,
    selection: NoteSelection,
    dialog: Option<TrashDialog>,
}

impl TrashController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> NoteTab {
        self.tab
    }

    /// Switches tab by index; an unknown index leaves the tab unchanged.
    pub fn select_tab(&mut self, index: usize) -> Result<NoteTab, SelectorError> {
        self.tab = NoteTab::from_index(index)?;
        Ok(self.tab)
    }

    /// Notes shown under the active tab.
    pub fn visible(&self, trashed: &[Note]) -> Vec<Note> {
        filter_by_checkable(trashed, self.tab.wants_checkable())
    }

    pub fn selection(&self) -> &NoteSelection {
        &self.selection
    }

    /// Restore/delete actions are only offered with a selection.
    pub fn are_actions_visible(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn toggle(&mut self, note: &Note) -> bool {
        self.selection.toggle(note)
    }

    /// Drops selected ids that left the trash and closes an orphaned dialog.
    pub fn sync_with(&mut self, trashed: &[Note]) {
        self.selection.retain_present(trashed);
        if self.selection.is_empty() {
            self.dialog = None;
        }
    }

    /// Opens a confirmation dialog; returns `false` when nothing is selected.
    pub fn request(&mut self, dialog: TrashDialog) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.dialog = Some(dialog);
        true
    }

    pub fn dialog(&self) -> Option<TrashDialog> {
        self.dialog
    }

    pub fn dismiss(&mut self) {
        self.dialog = None;
    }

    /// Takes the pending action and the selected ids, clearing both.
    pub fn confirm(&mut self) -> Option<ConfirmedTrashAction> {
        let action = self.dialog.take()?;
        let ids = self.selection.ids().clone();
        self.selection.clear();
        Some(ConfirmedTrashAction { action, ids })
    }

    /// Resets session state when the trash screen is left.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.dialog = None;
    }
}
