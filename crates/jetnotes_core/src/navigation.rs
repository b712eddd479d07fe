//! Screen navigation state machine.
//!
//! # Responsibility
//! - Own the current screen and transient overlay for one UI instance.
//! - Enforce the allowed transitions between notes, save-note and trash.
//!
//! # Invariants
//! - Initial screen is `Screen::Notes` with no overlay.
//! - Every successful navigation closes the open overlay.
//! - Back closes an open overlay before it navigates.

use crate::model::note::Note;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Top-level screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Notes,
    /// Carries the note being edited, or a fresh unsaved note.
    SaveNote(Note),
    Trash,
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Self::Notes => ScreenKind::Notes,
            Self::SaveNote(_) => ScreenKind::SaveNote,
            Self::Trash => ScreenKind::Trash,
        }
    }
}

/// Payload-free screen discriminant, used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Notes,
    SaveNote,
    Trash,
}

impl ScreenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::SaveNote => "save_note",
            Self::Trash => "trash",
        }
    }
}

/// Transient panel drawn over a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Side drawer, available on notes and trash.
    AppDrawer,
    /// Bottom color picker, available on save-note.
    ColorPicker,
}

/// Result of a back press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// An overlay was open and is now closed; the screen did not change.
    OverlayClosed(Overlay),
    /// Navigated to another screen.
    Navigated(ScreenKind),
    /// Already at the root screen; the host decides what to do.
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    InvalidTransition { from: ScreenKind, to: ScreenKind },
    OverlayNotAllowed { overlay: Overlay, screen: ScreenKind },
}

impl Display for NavigationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { from, to } => write!(
                f,
                "navigation from `{}` to `{}` is not allowed",
                from.as_str(),
                to.as_str()
            ),
            Self::OverlayNotAllowed { overlay, screen } => write!(
                f,
                "overlay {overlay:?} cannot be opened on `{}`",
                screen.as_str()
            ),
        }
    }
}

impl Error for NavigationError {}

/// Owner of the navigation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    current: Screen,
    overlay: Option<Overlay>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Screen {
        &self.current
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    /// Replaces the note shown by the save-note screen.
    ///
    /// Returns `false` and changes nothing on other screens.
    pub fn refresh_entry(&mut self, entry: Note) -> bool {
        match &mut self.current {
            Screen::SaveNote(shown) => {
                *shown = entry;
                true
            }
            Screen::Notes | Screen::Trash => false,
        }
    }

    /// Moves to `screen` if the transition is allowed.
    ///
    /// Allowed: notes -> save-note, save-note -> notes, notes <-> trash, and
    /// staying on notes or trash.
    pub fn navigate_to(&mut self, screen: Screen) -> Result<(), NavigationError> {
        let from = self.current.kind();
        let to = screen.kind();
        let allowed = matches!(
            (from, to),
            (ScreenKind::Notes, _)
                | (ScreenKind::SaveNote, ScreenKind::Notes)
                | (ScreenKind::Trash, ScreenKind::Notes | ScreenKind::Trash)
        );
        if !allowed {
            return Err(NavigationError::InvalidTransition { from, to });
        }

        debug!(
            "event=navigate module=navigation status=ok from={} to={}",
            from.as_str(),
            to.as_str()
        );
        self.current = screen;
        self.overlay = None;
        Ok(())
    }

    /// Opens `overlay` on the current screen.
    pub fn open_overlay(&mut self, overlay: Overlay) -> Result<(), NavigationError> {
        let screen = self.current.kind();
        let allowed = match overlay {
            Overlay::AppDrawer => screen != ScreenKind::SaveNote,
            Overlay::ColorPicker => screen == ScreenKind::SaveNote,
        };
        if !allowed {
            return Err(NavigationError::OverlayNotAllowed { overlay, screen });
        }
        self.overlay = Some(overlay);
        Ok(())
    }

    /// Closes any overlay; returns the one that was open.
    pub fn close_overlay(&mut self) -> Option<Overlay> {
        self.overlay.take()
    }

    /// Handles a back press.
    pub fn back(&mut self) -> BackOutcome {
        if let Some(overlay) = self.close_overlay() {
            return BackOutcome::OverlayClosed(overlay);
        }
        match self.current.kind() {
            ScreenKind::Notes => BackOutcome::Exit,
            ScreenKind::SaveNote | ScreenKind::Trash => {
                self.current = Screen::Notes;
                BackOutcome::Navigated(ScreenKind::Notes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BackOutcome, NavigationError, Navigator, Overlay, Screen, ScreenKind};
    use crate::model::note::Note;

    #[test]
    fn starts_on_notes_and_follows_allowed_transitions() {
        let mut nav = Navigator::new();
        assert_eq!(nav.current(), &Screen::Notes);

        nav.navigate_to(Screen::SaveNote(Note::default())).unwrap();
        assert_eq!(nav.current().kind(), ScreenKind::SaveNote);
        nav.navigate_to(Screen::Notes).unwrap();
        nav.navigate_to(Screen::Trash).unwrap();
        nav.navigate_to(Screen::Notes).unwrap();
        assert_eq!(nav.current(), &Screen::Notes);
    }

    #[test]
    fn rejects_trash_to_save_note_and_save_note_to_trash() {
        let mut nav = Navigator::new();
        nav.navigate_to(Screen::Trash).unwrap();
        let err = nav
            .navigate_to(Screen::SaveNote(Note::default()))
            .unwrap_err();
        assert_eq!(
            err,
            NavigationError::InvalidTransition {
                from: ScreenKind::Trash,
                to: ScreenKind::SaveNote
            }
        );

        nav.navigate_to(Screen::Notes).unwrap();
        nav.navigate_to(Screen::SaveNote(Note::default())).unwrap();
        assert!(nav.navigate_to(Screen::Trash).is_err());
        assert_eq!(nav.current().kind(), ScreenKind::SaveNote);
    }

    #[test]
    fn back_closes_color_picker_before_leaving_save_note() {
        let mut nav = Navigator::new();
        nav.navigate_to(Screen::SaveNote(Note::default())).unwrap();
        nav.open_overlay(Overlay::ColorPicker).unwrap();

        assert_eq!(nav.back(), BackOutcome::OverlayClosed(Overlay::ColorPicker));
        assert_eq!(nav.current().kind(), ScreenKind::SaveNote);
        assert_eq!(nav.back(), BackOutcome::Navigated(ScreenKind::Notes));
        assert_eq!(nav.back(), BackOutcome::Exit);
    }

    #[test]
    fn overlays_are_screen_specific_and_closed_by_navigation() {
        let mut nav = Navigator::new();
        assert!(nav.open_overlay(Overlay::ColorPicker).is_err());
        nav.open_overlay(Overlay::AppDrawer).unwrap();
        nav.navigate_to(Screen::Trash).unwrap();
        assert_eq!(nav.overlay(), None);
    }

    #[test]
    fn refresh_entry_only_touches_save_note() {
        let mut nav = Navigator::new();
        let edited = Note::default().with_title("edited");
        assert!(!nav.refresh_entry(edited.clone()));
        assert_eq!(nav.current(), &Screen::Notes);

        nav.navigate_to(Screen::SaveNote(Note::default())).unwrap();
        assert!(nav.refresh_entry(edited.clone()));
        assert_eq!(nav.current(), &Screen::SaveNote(edited));
    }
}
