//! FFI use-case API for the mobile UI.
//!
//! # Responsibility
//! - Expose note list/save/trash operations as sync FRB calls.
//! - Flatten core types into plain DTOs and errors into message strings.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens the configured database and leaves it migrated.

use jetnotes_core::{
    core_version as core_version_inner, filter_by_tab, init_logging as init_logging_inner,
    ping as ping_inner, Color, Note, NoteId, NoteStore, SqliteNoteStore, NEW_NOTE_ID,
};
use log::warn;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "jetnotes.sqlite3";
const DB_PATH_ENV: &str = "JETNOTES_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe.
/// - Never panics; always returns `pong`.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe.
/// - Never panics; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory for rolling log files.
///
/// # FFI contract
/// - Sync call; may create the log directory.
/// - Repeating the same `level + log_dir` is a no-op.
/// - Reconfiguring with another level or directory returns an error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database file used by every later call.
///
/// # FFI contract
/// - Sync call, non-blocking; no file is opened here.
/// - Must run before the first data call, else the env/temp default wins.
/// - Repeating the active path is a no-op; switching paths returns an error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "db path already set to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Palette color DTO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorItem {
    pub id: i64,
    pub name: String,
    /// `#RRGGBB`.
    pub hex: String,
}

/// Note DTO for list and edit screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub color: ColorItem,
    /// `None` when the note has no checkbox.
    pub is_checked_off: Option<bool>,
    pub is_in_trash: bool,
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub ok: bool,
    pub items: Vec<NoteItem>,
    pub message: String,
}

impl NotesListResponse {
    fn from_result(operation: &str, result: Result<Vec<Note>, String>) -> Self {
        match result {
            Ok(notes) => Self {
                ok: true,
                message: format!("{} note(s).", notes.len()),
                items: notes.into_iter().map(to_note_item).collect(),
            },
            Err(err) => Self {
                ok: false,
                items: Vec::new(),
                message: format!("{operation} failed: {err}"),
            },
        }
    }
}

/// Palette response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorsListResponse {
    pub ok: bool,
    pub items: Vec<ColorItem>,
    pub message: String,
}

/// Single-note action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    /// Stored note on success.
    pub note: Option<NoteItem>,
    pub message: String,
}

impl NoteActionResponse {
    fn from_result(operation: &str, success: &str, result: Result<Note, String>) -> Self {
        match result {
            Ok(note) => Self {
                ok: true,
                note: Some(to_note_item(note)),
                message: success.to_string(),
            },
            Err(err) => Self {
                ok: false,
                note: None,
                message: format!("{operation} failed: {err}"),
            },
        }
    }
}

/// Bulk action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkActionResponse {
    pub ok: bool,
    /// Notes that actually changed.
    pub affected: u32,
    pub message: String,
}

impl BulkActionResponse {
    fn from_result(operation: &str, result: Result<usize, String>) -> Self {
        match result {
            Ok(affected) => Self {
                ok: true,
                affected: u32::try_from(affected).unwrap_or(u32::MAX),
                message: format!("{affected} note(s) updated."),
            },
            Err(err) => Self {
                ok: false,
                affected: 0,
                message: format!("{operation} failed: {err}"),
            },
        }
    }
}

/// Lists the color palette ordered by id.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures come back as `ok = false` with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn colors_list() -> ColorsListResponse {
    match with_store(|store| store.colors().map_err(|err| err.to_string())) {
        Ok(colors) => ColorsListResponse {
            ok: true,
            message: format!("{} color(s).", colors.len()),
            items: colors.into_iter().map(to_color_item).collect(),
        },
        Err(err) => ColorsListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("colors_list failed: {err}"),
        },
    }
}

/// Lists notes not in trash, ordered by id.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures come back as `ok = false` with empty `items`.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list_active() -> NotesListResponse {
    NotesListResponse::from_result(
        "notes_list_active",
        with_store(|store| store.list_active().map_err(|err| err.to_string())),
    )
}

/// Lists trashed notes for tab `0` (regular) or `1` (checkable).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Any other `tab_index` fails with `ok = false`; there is no fallback tab.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list_trashed(tab_index: u32) -> NotesListResponse {
    NotesListResponse::from_result(
        "notes_list_trashed",
        with_store(|store| {
            let trashed = store.list_trashed().map_err(|err| err.to_string())?;
            let index = usize::try_from(tab_index).unwrap_or(usize::MAX);
            filter_by_tab(&trashed, index).map_err(|err| err.to_string())
        }),
    )
}

/// Creates (`id = None`) or replaces a note.
///
/// Input semantics:
/// - `color_id`: id from `colors_list`; unknown ids are rejected.
/// - `is_checked_off`: `None` for a note without a checkbox.
///
/// # FFI contract
/// - Sync call, DB-backed execution in one transaction.
/// - Replacing keeps the stored trash flag.
/// - Never panics; returns the stored note on success.
#[flutter_rust_bridge::frb(sync)]
pub fn note_save(
    id: Option<i64>,
    title: String,
    content: String,
    color_id: i64,
    is_checked_off: Option<bool>,
) -> NoteActionResponse {
    NoteActionResponse::from_result(
        "note_save",
        "Note saved.",
        with_store(|store| {
            let color = find_color(store, color_id)?;
            let is_in_trash = match id {
                Some(existing) => get_existing(store, existing)?.is_in_trash,
                None => false,
            };
            let note = Note {
                id: id.unwrap_or(NEW_NOTE_ID),
                title,
                content,
                color,
                is_checked_off,
                is_in_trash,
            };
            store.upsert(note).map_err(|err| err.to_string())
        }),
    )
}

/// Sets the checkbox state of a checkable note.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Fails with `ok = false` for unknown or non-checkable notes.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_set_checked(id: i64, checked: bool) -> NoteActionResponse {
    NoteActionResponse::from_result(
        "note_set_checked",
        "Note updated.",
        with_store(|store| {
            let note = get_existing(store, id)?;
            if !note.is_checkable() {
                return Err(format!("note {id} cannot be checked off"));
            }
            store
                .upsert(note.with_checked_off(Some(checked)))
                .map_err(|err| err.to_string())
        }),
    )
}

/// Moves notes to trash.
///
/// # FFI contract
/// - Sync call, DB-backed execution in one transaction.
/// - Unknown or already trashed ids are skipped; `affected` counts real changes.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_move_to_trash(ids: Vec<i64>) -> BulkActionResponse {
    bulk_set_trashed("notes_move_to_trash", ids, true)
}

/// Restores notes from trash.
///
/// # FFI contract
/// - Sync call, DB-backed execution in one transaction.
/// - Unknown or active ids are skipped; `affected` counts real changes.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_restore(ids: Vec<i64>) -> BulkActionResponse {
    bulk_set_trashed("notes_restore", ids, false)
}

/// Deletes notes for good.
///
/// # FFI contract
/// - Sync call, DB-backed execution in one transaction.
/// - Unknown ids are skipped; repeating a delete affects nothing.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete_permanently(ids: Vec<i64>) -> BulkActionResponse {
    let ids: BTreeSet<NoteId> = ids.into_iter().collect();
    BulkActionResponse::from_result(
        "notes_delete_permanently",
        with_store(|store| {
            store
                .delete_permanently(&ids)
                .map_err(|err| err.to_string())
        }),
    )
}

fn bulk_set_trashed(operation: &str, ids: Vec<i64>, trashed: bool) -> BulkActionResponse {
    let ids: BTreeSet<NoteId> = ids.into_iter().collect();
    BulkActionResponse::from_result(
        operation,
        with_store(|store| {
            store
                .set_trashed(&ids, trashed)
                .map_err(|err| err.to_string())
        }),
    )
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(f: impl FnOnce(&mut SqliteNoteStore) -> Result<T, String>) -> Result<T, String> {
    let db_path = resolve_db_path();
    let mut store = SqliteNoteStore::open(&db_path).map_err(|err| {
        warn!("event=ffi_store_open module=ffi status=error error={err}");
        format!("note DB open failed: {err}")
    })?;
    f(&mut store)
}

fn find_color(store: &SqliteNoteStore, color_id: i64) -> Result<Color, String> {
    store
        .colors()
        .map_err(|err| err.to_string())?
        .into_iter()
        .find(|color| color.id == color_id)
        .ok_or_else(|| format!("unknown color id {color_id}"))
}

fn get_existing(store: &SqliteNoteStore, id: NoteId) -> Result<Note, String> {
    store
        .get(id)
        .map_err(|err| err.to_string())?
        .ok_or_else(|| format!("note not found: {id}"))
}

fn to_color_item(color: Color) -> ColorItem {
    ColorItem {
        id: color.id,
        name: color.name,
        hex: color.hex,
    }
}

fn to_note_item(note: Note) -> NoteItem {
    NoteItem {
        id: note.id,
        title: note.title,
        content: note.content,
        color: to_color_item(note.color),
        is_checked_off: note.is_checked_off,
        is_in_trash: note.is_in_trash,
    }
}
