use jetnotes_core::db::migrations::latest_version;
use jetnotes_core::db::{open_db, DbError};
use jetnotes_core::{Color, Note, NoteStore, SqliteNoteStore, StoreError};
use rusqlite::Connection;
use std::collections::BTreeSet;

#[test]
fn notes_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jetnotes.db");

    let saved = {
        let mut store = SqliteNoteStore::open(&path).unwrap();
        let saved = store
            .upsert(Note::default().with_title("keep").with_checked_off(Some(true)))
            .unwrap();
        store
            .set_trashed(&BTreeSet::from([saved.id]), true)
            .unwrap();
        store.get(saved.id).unwrap().unwrap()
    };

    let store = SqliteNoteStore::open(&path).unwrap();
    assert_eq!(store.list_trashed().unwrap(), vec![saved]);
    assert!(store.list_active().unwrap().is_empty());
}

#[test]
fn checkable_flag_round_trips_all_three_states() {
    let mut store = SqliteNoteStore::open_in_memory().unwrap();
    for state in [None, Some(false), Some(true)] {
        let saved = store
            .upsert(Note::default().with_checked_off(state))
            .unwrap();
        assert_eq!(store.get(saved.id).unwrap().unwrap().is_checked_off, state);
    }
}

#[test]
fn unknown_color_is_registered_on_upsert() {
    let mut store = SqliteNoteStore::open_in_memory().unwrap();
    let custom = Color::new(100, "Midnight", "#101020").unwrap();
    let saved = store
        .upsert(Note::default().with_color(custom.clone()))
        .unwrap();

    assert_eq!(saved.color, custom);
    assert!(store.colors().unwrap().contains(&custom));
}

#[test]
fn corrupt_flag_value_is_reported_not_masked() {
    let mut store = SqliteNoteStore::open_in_memory().unwrap();
    let saved = store.upsert(Note::default()).unwrap();
    store
        .connection()
        .execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    store
        .connection()
        .execute(
            "UPDATE notes SET is_in_trash = 5 WHERE id = ?1;",
            [saved.id],
        )
        .unwrap();

    let err = store.get(saved.id).unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(message) if message.contains("is_in_trash")));
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteNoteStore::try_new(conn).unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(message) if message.contains("notes")));
}

#[test]
fn open_db_applies_migrations_and_seeds_palette() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.db");

    let conn = open_db(&path).unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
    let colors: i64 = conn
        .query_row("SELECT COUNT(*) FROM colors;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(colors, 13);
    drop(conn);

    let reopened = open_db(&path).unwrap();
    let colors_again: i64 = reopened
        .query_row("SELECT COUNT(*) FROM colors;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(colors_again, 13);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}
