//! App facade wiring user intents to store, services and navigation.
//!
//! # Responsibility
//! - Play the role of the screen view-model: one method per user intent.
//! - Keep per-screen session state (editor, trash selection) consistent
//!   with navigation.
//!
//! # Invariants
//! - An editing session exists exactly while the save-note screen is shown.
//! - Leaving the trash screen clears its selection and pending dialog.
//! - Every error is returned to the caller; nothing here panics.

use crate::model::color::{Color, DEFAULT_COLOR_ID};
use crate::model::note::{Note, NoteId};
use crate::navigation::{BackOutcome, NavigationError, Navigator, Overlay, Screen, ScreenKind};
use crate::service::editor::{NoteEditor, TrashRequestError};
use crate::service::filter::{NoteTab, SelectorError};
use crate::service::trash::{TrashController, TrashDialog};
use crate::store::{NoteStore, StoreError, StoreObserver, SubscriptionId};
use log::{debug, info};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AppResult<T> = Result<T, AppError>;

/// Error for app-level intents.
#[derive(Debug)]
pub enum AppError {
    /// Target note does not exist.
    NotFound(NoteId),
    /// Unsupported tab index.
    InvalidSelector(usize),
    /// Persistence-layer failure.
    Store(StoreError),
    Navigation(NavigationError),
    /// Intent needs the save-note screen but no note is being edited.
    NoActiveEntry,
    /// Intent needs a saved note but the entry was never persisted.
    UnsavedEntry,
    /// Bulk trash action requested with an empty selection.
    NothingSelected,
    /// Confirm called without a pending confirmation.
    NoPendingConfirmation,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidSelector(index) => write!(f, "tab not supported - index: {index}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Navigation(err) => write!(f, "{err}"),
            Self::NoActiveEntry => write!(f, "no note is being edited"),
            Self::UnsavedEntry => write!(f, "note has not been saved yet"),
            Self::NothingSelected => write!(f, "no notes selected"),
            Self::NoPendingConfirmation => write!(f, "nothing to confirm"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Navigation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<SelectorError> for AppError {
    fn from(value: SelectorError) -> Self {
        match value {
            SelectorError::InvalidSelector(index) => Self::InvalidSelector(index),
        }
    }
}

impl From<NavigationError> for AppError {
    fn from(value: NavigationError) -> Self {
        Self::Navigation(value)
    }
}

impl From<TrashRequestError> for AppError {
    fn from(value: TrashRequestError) -> Self {
        match value {
            TrashRequestError::UnsavedNote => Self::UnsavedEntry,
        }
    }
}

/// Result of a confirmed trash-screen bulk action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashActionOutcome {
    pub action: TrashDialog,
    pub ids: BTreeSet<NoteId>,
    /// Notes that actually changed.
    pub affected: usize,
}

/// Notes app state over a `NoteStore`.
pub struct JetNotesApp<S: NoteStore> {
    store: S,
    navigator: Navigator,
    editor: Option<NoteEditor>,
    trash: TrashController,
}

impl<S: NoteStore> JetNotesApp<S> {
    /// Starts on the notes screen.
    pub fn new(store: S) -> Self {
        Self {
            store,
            navigator: Navigator::new(),
            editor: None,
            trash: TrashController::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn screen(&self) -> &Screen {
        self.navigator.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn editor(&self) -> Option<&NoteEditor> {
        self.editor.as_ref()
    }

    pub fn trash(&self) -> &TrashController {
        &self.trash
    }

    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) -> SubscriptionId {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn notes_not_in_trash(&self) -> AppResult<Vec<Note>> {
        Ok(self.store.list_active()?)
    }

    pub fn notes_in_trash(&self) -> AppResult<Vec<Note>> {
        Ok(self.store.list_trashed()?)
    }

    /// Trashed notes for the active tab; prunes selection of vanished notes.
    pub fn visible_trash_notes(&mut self) -> AppResult<Vec<Note>> {
        let trashed = self.store.list_trashed()?;
        self.trash.sync_with(&trashed);
        Ok(self.trash.visible(&trashed))
    }

    pub fn colors(&self) -> AppResult<Vec<Color>> {
        Ok(self.store.colors()?)
    }

    /// Opens the save-note screen on a fresh note with the default color.
    pub fn on_create_new_note_click(&mut self) -> AppResult<()> {
        let color = self
            .store
            .colors()?
            .into_iter()
            .find(|color| color.id == DEFAULT_COLOR_ID)
            .unwrap_or_default();
        self.begin_editing(NoteEditor::for_new(color))
    }

    /// Opens the save-note screen on an existing note.
    pub fn on_note_click(&mut self, note: &Note) -> AppResult<()> {
        if note.is_new() {
            return Err(AppError::UnsavedEntry);
        }
        self.begin_editing(NoteEditor::for_existing(note.clone()))
    }

    /// Persists a checkbox toggle from the notes list.
    pub fn on_note_checked_change(&mut self, note: Note) -> AppResult<Note> {
        Ok(self.store.upsert(note)?)
    }

    pub fn set_entry_title(&mut self, title: impl Into<String>) -> AppResult<()> {
        self.edit_entry(|editor| editor.set_title(title))
    }

    pub fn set_entry_content(&mut self, content: impl Into<String>) -> AppResult<()> {
        self.edit_entry(|editor| editor.set_content(content))
    }

    pub fn set_entry_color(&mut self, color: Color) -> AppResult<()> {
        self.edit_entry(|editor| editor.set_color(color))
    }

    pub fn set_entry_checkable(&mut self, checkable: bool) -> AppResult<()> {
        self.edit_entry(|editor| editor.set_checkable(checkable))
    }

    pub fn set_entry_checked(&mut self, checked: bool) -> AppResult<()> {
        self.edit_entry(|editor| editor.set_checked(checked))
    }

    /// Replaces the buffer wholesale, keeping its id.
    pub fn on_note_entry_change(&mut self, note: Note) -> AppResult<()> {
        self.edit_entry(|editor| editor.replace_entry(note))
    }

    /// Commits the buffer and returns to the notes list.
    pub fn save_note(&mut self) -> AppResult<Note> {
        let entry = self.editor.as_ref().ok_or(AppError::NoActiveEntry)?.entry();
        let saved = self.store.upsert(entry.clone())?;
        info!(
            "event=note_save module=app status=ok note_id={} checkable={}",
            saved.id,
            saved.is_checkable()
        );
        self.finish_editing()?;
        Ok(saved)
    }

    pub fn request_move_note_to_trash(&mut self) -> AppResult<()> {
        self.editor_mut()?.request_move_to_trash()?;
        Ok(())
    }

    pub fn dismiss_move_note_to_trash(&mut self) -> AppResult<()> {
        self.editor_mut()?.dismiss_move_to_trash();
        Ok(())
    }

    /// Trashes the edited note after confirmation and returns to the list.
    pub fn confirm_move_note_to_trash(&mut self) -> AppResult<NoteId> {
        let editor = self.editor.as_ref().ok_or(AppError::NoActiveEntry)?;
        if !editor.is_confirming_trash() {
            return Err(AppError::NoPendingConfirmation);
        }
        let id = editor.entry().id;
        self.store.set_trashed(&BTreeSet::from([id]), true)?;
        info!("event=note_trash module=app status=ok note_id={id}");
        self.finish_editing()?;
        Ok(id)
    }

    pub fn open_drawer(&mut self) -> AppResult<()> {
        Ok(self.navigator.open_overlay(Overlay::AppDrawer)?)
    }

    pub fn open_color_picker(&mut self) -> AppResult<()> {
        Ok(self.navigator.open_overlay(Overlay::ColorPicker)?)
    }

    /// Closes the drawer; leaves a color picker alone.
    pub fn close_drawer(&mut self) -> bool {
        if self.navigator.overlay() != Some(Overlay::AppDrawer) {
            return false;
        }
        self.navigator.close_overlay().is_some()
    }

    /// Closes the drawer or color picker, if open.
    pub fn close_overlay(&mut self) -> Option<Overlay> {
        self.navigator.close_overlay()
    }

    /// Drawer navigation between the notes list and trash.
    pub fn navigate_via_drawer(&mut self, target: ScreenKind) -> AppResult<()> {
        let screen = match target {
            ScreenKind::Notes => Screen::Notes,
            ScreenKind::Trash => Screen::Trash,
            ScreenKind::SaveNote => {
                return Err(NavigationError::InvalidTransition {
                    from: self.navigator.current().kind(),
                    to: target,
                }
                .into())
            }
        };
        let leaving_trash = self.navigator.current().kind() == ScreenKind::Trash;
        self.navigator.navigate_to(screen)?;
        if leaving_trash && target != ScreenKind::Trash {
            self.trash.reset();
        }
        Ok(())
    }

    pub fn select_trash_tab(&mut self, index: usize) -> AppResult<NoteTab> {
        Ok(self.trash.select_tab(index)?)
    }

    /// Toggles `note` in the trash selection; returns whether it is selected.
    ///
    /// Ignored outside the trash screen, so no selection leaks into the next
    /// trash session.
    pub fn on_note_selected(&mut self, note: &Note) -> bool {
        if self.navigator.current().kind() != ScreenKind::Trash {
            debug!(
                "event=trash_select module=app status=ignored screen={}",
                self.navigator.current().kind().as_str()
            );
            return false;
        }
        self.trash.toggle(note)
    }

    pub fn request_restore_notes(&mut self) -> AppResult<()> {
        self.request_trash_dialog(TrashDialog::Restore)
    }

    pub fn request_permanently_delete_notes(&mut self) -> AppResult<()> {
        self.request_trash_dialog(TrashDialog::PermanentlyDelete)
    }

    pub fn dismiss_trash_dialog(&mut self) {
        self.trash.dismiss();
    }

    /// Runs the pending restore/delete on the selection, then clears it.
    pub fn confirm_trash_dialog(&mut self) -> AppResult<TrashActionOutcome> {
        let confirmed = self.trash.confirm().ok_or(AppError::NoPendingConfirmation)?;
        let affected = match confirmed.action {
            TrashDialog::Restore => self.store.set_trashed(&confirmed.ids, false)?,
            TrashDialog::PermanentlyDelete => self.store.delete_permanently(&confirmed.ids)?,
        };
        info!(
            "event=trash_action module=app status=ok action={:?} requested={} affected={}",
            confirmed.action,
            confirmed.ids.len(),
            affected
        );
        Ok(TrashActionOutcome {
            action: confirmed.action,
            ids: confirmed.ids,
            affected,
        })
    }

    /// Back press: closes an overlay first, then leaves save-note or trash.
    pub fn back(&mut self) -> BackOutcome {
        let from = self.navigator.current().kind();
        let outcome = self.navigator.back();
        if let BackOutcome::Navigated(_) = outcome {
            match from {
                ScreenKind::SaveNote => self.editor = None,
                ScreenKind::Trash => self.trash.reset(),
                ScreenKind::Notes => {}
            }
        }
        outcome
    }

    fn begin_editing(&mut self, editor: NoteEditor) -> AppResult<()> {
        self.navigator
            .navigate_to(Screen::SaveNote(editor.entry().clone()))?;
        self.editor = Some(editor);
        Ok(())
    }

    fn finish_editing(&mut self) -> AppResult<()> {
        self.navigator.navigate_to(Screen::Notes)?;
        self.editor = None;
        Ok(())
    }

    /// Applies an entry edit and mirrors the buffer into the save-note screen.
    fn edit_entry(&mut self, edit: impl FnOnce(&mut NoteEditor)) -> AppResult<()> {
        let editor = self.editor.as_mut().ok_or(AppError::NoActiveEntry)?;
        edit(editor);
        self.navigator.refresh_entry(editor.entry().clone());
        Ok(())
    }

    fn editor_mut(&mut self) -> AppResult<&mut NoteEditor> {
        self.editor.as_mut().ok_or(AppError::NoActiveEntry)
    }

    fn request_trash_dialog(&mut self, dialog: TrashDialog) -> AppResult<()> {
        if self.trash.request(dialog) {
            Ok(())
        } else {
            Err(AppError::NothingSelected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, JetNotesApp};
    use crate::model::note::Note;
    use crate::navigation::{BackOutcome, Overlay, ScreenKind};
    use crate::store::InMemoryNoteStore;

    fn app() -> JetNotesApp<InMemoryNoteStore> {
        JetNotesApp::new(InMemoryNoteStore::new())
    }

    #[test]
    fn entry_edits_without_session_fail() {
        let mut app = app();
        assert!(matches!(
            app.set_entry_title("x"),
            Err(AppError::NoActiveEntry)
        ));
        assert!(matches!(app.save_note(), Err(AppError::NoActiveEntry)));
    }

    #[test]
    fn back_from_save_note_drops_session_after_closing_picker() {
        let mut app = app();
        app.on_create_new_note_click().unwrap();
        app.open_color_picker().unwrap();

        assert_eq!(app.back(), BackOutcome::OverlayClosed(Overlay::ColorPicker));
        assert!(app.editor().is_some());
        assert_eq!(app.back(), BackOutcome::Navigated(ScreenKind::Notes));
        assert!(app.editor().is_none());
    }

    #[test]
    fn unsaved_note_cannot_be_trashed_or_reopened() {
        let mut app = app();
        app.on_create_new_note_click().unwrap();
        assert!(matches!(
            app.request_move_note_to_trash(),
            Err(AppError::UnsavedEntry)
        ));
        assert!(matches!(
            app.confirm_move_note_to_trash(),
            Err(AppError::NoPendingConfirmation)
        ));
        app.back();
        assert!(matches!(
            app.on_note_click(&Note::default()),
            Err(AppError::UnsavedEntry)
        ));
    }

    #[test]
    fn drawer_cannot_target_save_note() {
        let mut app = app();
        let err = app.navigate_via_drawer(ScreenKind::SaveNote).unwrap_err();
        assert!(matches!(err, AppError::Navigation(_)));
    }
}
