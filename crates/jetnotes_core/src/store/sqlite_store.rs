//! SQLite-backed note store.
//!
//! # Responsibility
//! - Persist notes and palette colors on top of the migrated schema.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Notes reference colors by id; reads hydrate the full `Color`.
//! - Bulk trash/delete runs in one transaction.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Upsert checks the note color before writing, so it cannot create
//!   state the read paths would reject.

use crate::db::{ensure_schema, open_db, open_db_in_memory};
use crate::model::color::Color;
use crate::model::note::{Note, NoteId, NEW_NOTE_ID};
use crate::store::observer::{ObserverList, StoreEvent, StoreObserver, SubscriptionId};
use crate::store::{check_note_color, NoteStore, StoreError, StoreResult};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::collections::BTreeSet;
use std::path::Path;

const NOTE_SELECT_SQL: &str = "SELECT
    n.id,
    n.title,
    n.content,
    n.can_be_checked_off,
    n.is_checked_off,
    n.is_in_trash,
    c.id AS color_id,
    c.name AS color_name,
    c.hex AS color_hex
FROM notes n
INNER JOIN colors c ON c.id = n.color_id";

/// Note store over an owned, migrated SQLite connection.
#[derive(Debug)]
pub struct SqliteNoteStore {
    conn: Connection,
    observers: ObserverList,
}

impl SqliteNoteStore {
    /// Wraps a migrated connection after checking required tables exist.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        ensure_schema(&conn)?;
        Ok(Self {
            conn,
            observers: ObserverList::new(),
        })
    }

    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Read access for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn list_where(&self, in_trash: bool) -> StoreResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE n.is_in_trash = ?1
             ORDER BY n.id ASC;"
        ))?;
        let mut rows = stmt.query([bool_to_int(in_trash)])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn upsert_in_tx(tx: &Transaction<'_>, note: &Note) -> StoreResult<NoteId> {
        let stored_color = tx
            .query_row(
                "SELECT id, name, hex FROM colors WHERE id = ?1;",
                [note.color.id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?
            .map(|(id, name, hex)| parse_color(id, name, hex))
            .transpose()?;
        if check_note_color(&note.color, stored_color.as_ref())? {
            tx.execute(
                "INSERT INTO colors (id, name, hex) VALUES (?1, ?2, ?3);",
                params![note.color.id, note.color.name.as_str(), note.color.hex.as_str()],
            )?;
        }

        let (can_be_checked_off, is_checked_off) = split_checked_off(note.is_checked_off);
        if note.id == NEW_NOTE_ID {
            tx.execute(
                "INSERT INTO notes (
                    title,
                    content,
                    color_id,
                    can_be_checked_off,
                    is_checked_off,
                    is_in_trash
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    note.title.as_str(),
                    note.content.as_str(),
                    note.color.id,
                    can_be_checked_off,
                    is_checked_off,
                    bool_to_int(note.is_in_trash),
                ],
            )?;
            return Ok(tx.last_insert_rowid());
        }

        let changed = tx.execute(
            "UPDATE notes
             SET
                title = ?1,
                content = ?2,
                color_id = ?3,
                can_be_checked_off = ?4,
                is_checked_off = ?5,
                is_in_trash = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?7;",
            params![
                note.title.as_str(),
                note.content.as_str(),
                note.color.id,
                can_be_checked_off,
                is_checked_off,
                bool_to_int(note.is_in_trash),
                note.id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(note.id));
        }
        Ok(note.id)
    }
}

impl NoteStore for SqliteNoteStore {
    fn list_active(&self) -> StoreResult<Vec<Note>> {
        self.list_where(false)
    }

    fn list_trashed(&self) -> StoreResult<Vec<Note>> {
        self.list_where(true)
    }

    fn get(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE n.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_note_row(row)?)),
            None => Ok(None),
        }
    }

    fn colors(&self) -> StoreResult<Vec<Color>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, hex FROM colors ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut colors = Vec::new();
        while let Some(row) = rows.next()? {
            colors.push(parse_color(row.get("id")?, row.get("name")?, row.get("hex")?)?);
        }
        Ok(colors)
    }

    fn upsert(&mut self, note: Note) -> StoreResult<Note> {
        let created = note.id == NEW_NOTE_ID;
        if let Err(err) = note.color.validate() {
            error!(
                "event=note_upsert module=store backend=sqlite status=error note_id={} error_code=invalid_color",
                note.id
            );
            return Err(err.into());
        }
        let tx = self.conn.transaction()?;
        let id = match Self::upsert_in_tx(&tx, &note) {
            Ok(id) => id,
            Err(err) => {
                error!(
                    "event=note_upsert module=store backend=sqlite status=error note_id={} error={}",
                    note.id, err
                );
                return Err(err);
            }
        };
        tx.commit()?;

        debug!(
            "event=note_upsert module=store backend=sqlite status=ok note_id={id} created={created}"
        );
        let stored = self.get(id)?.ok_or_else(|| {
            StoreError::InvalidData(format!("note {id} missing after upsert read-back"))
        })?;
        self.observers.notify(&StoreEvent::Upserted { id, created });
        Ok(stored)
    }

    fn set_trashed(&mut self, ids: &BTreeSet<NoteId>, trashed: bool) -> StoreResult<usize> {
        let flag = bool_to_int(trashed);
        let tx = self.conn.transaction()?;
        let mut changed = BTreeSet::new();
        for id in ids {
            let rows = tx.execute(
                "UPDATE notes
                 SET
                    is_in_trash = ?1,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?2
                   AND is_in_trash <> ?1;",
                params![flag, id],
            )?;
            if rows > 0 {
                changed.insert(*id);
            }
        }
        tx.commit()?;

        debug!(
            "event=note_set_trashed module=store backend=sqlite status=ok requested={} changed={} trashed={}",
            ids.len(),
            changed.len(),
            trashed
        );
        let count = changed.len();
        if count > 0 {
            self.observers.notify(&StoreEvent::TrashedChanged {
                ids: changed,
                trashed,
            });
        }
        Ok(count)
    }

    fn delete_permanently(&mut self, ids: &BTreeSet<NoteId>) -> StoreResult<usize> {
        let tx = self.conn.transaction()?;
        let mut removed = BTreeSet::new();
        for id in ids {
            if tx.execute("DELETE FROM notes WHERE id = ?1;", [id])? > 0 {
                removed.insert(*id);
            }
        }
        tx.commit()?;

        debug!(
            "event=note_delete module=store backend=sqlite status=ok requested={} removed={}",
            ids.len(),
            removed.len()
        );
        let count = removed.len();
        if count > 0 {
            self.observers.notify(&StoreEvent::Deleted { ids: removed });
        }
        Ok(count)
    }

    fn subscribe(&mut self, observer: Box<dyn StoreObserver>) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

fn parse_note_row(row: &Row<'_>) -> StoreResult<Note> {
    let id: NoteId = row.get("id")?;
    let can_be_checked_off = parse_flag(row.get("can_be_checked_off")?, "can_be_checked_off")?;
    let is_checked_off = parse_flag(row.get("is_checked_off")?, "is_checked_off")?;

    Ok(Note {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        color: parse_color(
            row.get("color_id")?,
            row.get("color_name")?,
            row.get("color_hex")?,
        )?,
        is_checked_off: can_be_checked_off.then_some(is_checked_off),
        is_in_trash: parse_flag(row.get("is_in_trash")?, "is_in_trash")?,
    })
}

fn parse_color(id: i64, name: String, hex: String) -> StoreResult<Color> {
    Color::new(id, name, &hex)
        .map_err(|err| StoreError::InvalidData(format!("colors.hex for id {id}: {err}")))
}

fn parse_flag(value: i64, column: &str) -> StoreResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StoreError::InvalidData(format!(
            "invalid {column} value `{other}` in notes.{column}"
        ))),
    }
}

fn split_checked_off(value: Option<bool>) -> (i64, i64) {
    match value {
        None => (0, 0),
        Some(checked) => (1, bool_to_int(checked)),
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

