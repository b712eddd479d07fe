//! Regular/checkable note filtering.
//!
//! # Responsibility
//! - Split note lists by the checkable flag.
//! - Map tab indices onto tabs without panicking on unknown values.
//!
//! # Invariants
//! - `filter_by_checkable(notes, false)` and `filter_by_checkable(notes, true)`
//!   partition `notes` and both keep the input order.

use crate::model::note::Note;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected list selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorError {
    /// Tab index outside the supported range.
    InvalidSelector(usize),
}

impl Display for SelectorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSelector(index) => write!(f, "tab not supported - index: {index}"),
        }
    }
}

impl Error for SelectorError {}

/// Trash list tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteTab {
    /// Notes without a checkbox.
    #[default]
    Regular,
    /// Notes with a checkbox, checked or not.
    Checkable,
}

impl NoteTab {
    pub const ALL: [NoteTab; 2] = [NoteTab::Regular, NoteTab::Checkable];

    /// Maps a tab index (`0` regular, `1` checkable).
    pub fn from_index(index: usize) -> Result<Self, SelectorError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(SelectorError::InvalidSelector(index))
    }

    pub fn index(self) -> usize {
        match self {
            Self::Regular => 0,
            Self::Checkable => 1,
        }
    }

    /// Tab label shown by the host UI.
    pub fn title(self) -> &'static str {
        match self {
            Self::Regular => "REGULAR",
            Self::Checkable => "CHECKABLE",
        }
    }

    pub fn wants_checkable(self) -> bool {
        matches!(self, Self::Checkable)
    }
}

/// Keeps notes whose checkable flag presence equals `want_checkable`.
pub fn filter_by_checkable(notes: &[Note], want_checkable: bool) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| note.is_checkable() == want_checkable)
        .cloned()
        .collect()
}

/// Filters `notes` for the tab at `index`.
///
/// # Errors
/// - `SelectorError::InvalidSelector` when `index` is not `0` or `1`.
pub fn filter_by_tab(notes: &[Note], index: usize) -> Result<Vec<Note>, SelectorError> {
    let tab = NoteTab::from_index(index)?;
    Ok(filter_by_checkable(notes, tab.wants_checkable()))
}
