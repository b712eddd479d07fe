use jetnotes_core::{
    palette, Color, ColorError, InMemoryNoteStore, Note, NoteStore, SqliteNoteStore, StoreError,
    StoreEvent, NEW_NOTE_ID,
};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

fn red() -> Color {
    palette()
        .into_iter()
        .find(|color| color.hex == "#FF0000")
        .unwrap()
}

fn draft(title: &str, checked: Option<bool>) -> Note {
    Note {
        title: title.to_string(),
        content: format!("{title} body"),
        is_checked_off: checked,
        ..Note::new_entry(red())
    }
}

fn ids(notes: &[Note]) -> Vec<i64> {
    notes.iter().map(|note| note.id).collect()
}

fn set(values: &[i64]) -> BTreeSet<i64> {
    values.iter().copied().collect()
}

fn stores() -> Vec<(&'static str, Box<dyn NoteStore>)> {
    let memory: Box<dyn NoteStore> = Box::new(InMemoryNoteStore::new());
    let sqlite: Box<dyn NoteStore> = Box::new(SqliteNoteStore::open_in_memory().unwrap());
    vec![("memory", memory), ("sqlite", sqlite)]
}

#[test]
fn upsert_new_assigns_id_and_keeps_every_other_field() {
    for (backend, mut store) in stores() {
        for input in [draft("plain", None), draft("todo", Some(true))] {
            let saved = store.upsert(input.clone()).unwrap();
            assert!(saved.id >= 1, "{backend}");
            assert_eq!(Note { id: NEW_NOTE_ID, ..saved.clone() }, input, "{backend}");
            assert!(store.list_active().unwrap().contains(&saved), "{backend}");
        }
    }
}

#[test]
fn upsert_existing_replaces_and_missing_id_is_not_found() {
    for (backend, mut store) in stores() {
        let saved = store.upsert(draft("first", None)).unwrap();
        let edited = saved.with_title("renamed").with_checked_off(Some(false));
        store.upsert(edited.clone()).unwrap();

        assert_eq!(store.list_active().unwrap(), vec![edited], "{backend}");

        let missing = Note { id: 999, ..saved };
        let err = store.upsert(missing).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(999)), "{backend}");
    }
}

#[test]
fn lists_are_ordered_by_id_and_stable() {
    for (backend, mut store) in stores() {
        for title in ["a", "b", "c"] {
            store.upsert(draft(title, None)).unwrap();
        }
        let first = store.list_active().unwrap();
        assert_eq!(ids(&first), vec![1, 2, 3], "{backend}");
        assert_eq!(store.list_active().unwrap(), first, "{backend}");
    }
}

#[test]
fn set_trashed_moves_between_lists_idempotently() {
    for (backend, mut store) in stores() {
        let a = store.upsert(draft("a", None)).unwrap();
        let b = store.upsert(draft("b", None)).unwrap();

        assert_eq!(store.set_trashed(&set(&[a.id]), true).unwrap(), 1, "{backend}");
        assert_eq!(store.set_trashed(&set(&[a.id]), true).unwrap(), 0, "{backend}");
        assert_eq!(ids(&store.list_active().unwrap()), vec![b.id], "{backend}");
        assert_eq!(ids(&store.list_trashed().unwrap()), vec![a.id], "{backend}");
        assert!(store.get(a.id).unwrap().unwrap().is_in_trash, "{backend}");

        assert_eq!(store.set_trashed(&set(&[a.id, 42]), false).unwrap(), 1, "{backend}");
        assert_eq!(store.set_trashed(&set(&[a.id]), false).unwrap(), 0, "{backend}");
        assert_eq!(ids(&store.list_active().unwrap()), vec![a.id, b.id], "{backend}");
        assert!(store.list_trashed().unwrap().is_empty(), "{backend}");
    }
}

#[test]
fn delete_permanently_removes_from_both_lists_and_repeats_as_noop() {
    for (backend, mut store) in stores() {
        let active = store.upsert(draft("active", None)).unwrap();
        let trashed = store.upsert(draft("trashed", None)).unwrap();
        store.set_trashed(&set(&[trashed.id]), true).unwrap();

        let targets = set(&[active.id, trashed.id, 77]);
        assert_eq!(store.delete_permanently(&targets).unwrap(), 2, "{backend}");
        assert_eq!(store.delete_permanently(&targets).unwrap(), 0, "{backend}");
        assert!(store.list_active().unwrap().is_empty(), "{backend}");
        assert!(store.list_trashed().unwrap().is_empty(), "{backend}");
        assert!(store.get(active.id).unwrap().is_none(), "{backend}");
    }
}

#[test]
fn deleted_ids_are_not_reused() {
    for (backend, mut store) in stores() {
        let first = store.upsert(draft("first", None)).unwrap();
        store.delete_permanently(&set(&[first.id])).unwrap();
        let second = store.upsert(draft("second", None)).unwrap();
        assert!(second.id > first.id, "{backend}");
    }
}

#[test]
fn observers_see_only_state_changes() {
    for (backend, mut store) in stores() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let subscription = store.subscribe(Box::new(move |event: &StoreEvent| {
            sink.lock().unwrap().push(event.clone());
        }));

        let note = store.upsert(draft("watched", None)).unwrap();
        store.set_trashed(&set(&[note.id]), true).unwrap();
        store.set_trashed(&set(&[note.id]), true).unwrap();
        store.delete_permanently(&set(&[note.id])).unwrap();
        store.delete_permanently(&set(&[note.id])).unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                StoreEvent::Upserted {
                    id: note.id,
                    created: true
                },
                StoreEvent::TrashedChanged {
                    ids: set(&[note.id]),
                    trashed: true
                },
                StoreEvent::Deleted {
                    ids: set(&[note.id])
                },
            ],
            "{backend}"
        );

        assert!(store.unsubscribe(subscription), "{backend}");
        store.upsert(draft("unwatched", None)).unwrap();
        assert_eq!(events.lock().unwrap().len(), 3, "{backend}");
    }
}

#[test]
fn colors_expose_the_palette_in_id_order() {
    for (backend, store) in stores() {
        assert_eq!(store.colors().unwrap(), palette(), "{backend}");
    }
}

#[test]
fn malformed_color_is_rejected_without_writing() {
    for (backend, mut store) in stores() {
        let kept = store.upsert(draft("kept", None)).unwrap();
        let bad = Color {
            id: 77,
            name: "Blue-ish".to_string(),
            hex: "blue".to_string(),
        };

        let err = store.upsert(draft("bad", None).with_color(bad.clone())).unwrap_err();
        assert!(
            matches!(err, StoreError::InvalidColor(ColorError::InvalidHex(ref hex)) if hex == "blue"),
            "{backend}"
        );
        let lower = Color {
            hex: "#ff0000".to_string(),
            ..bad
        };
        assert!(store.upsert(kept.clone().with_color(lower)).is_err(), "{backend}");

        assert_eq!(store.list_active().unwrap(), vec![kept.clone()], "{backend}");
        assert!(store.list_trashed().unwrap().is_empty(), "{backend}");
        assert_eq!(store.get(kept.id).unwrap(), Some(kept), "{backend}");
        assert_eq!(store.colors().unwrap(), palette(), "{backend}");
    }
}

#[test]
fn color_reusing_a_stored_id_with_other_values_conflicts() {
    for (backend, mut store) in stores() {
        let custom_red = Color::new(2, "Custom", "#123456").unwrap();
        let err = store
            .upsert(draft("clash", None).with_color(custom_red.clone()))
            .unwrap_err();

        match err {
            StoreError::ColorConflict { given, stored } => {
                assert_eq!(given, custom_red, "{backend}");
                assert_eq!(stored, red(), "{backend}");
            }
            other => panic!("{backend}: unexpected error: {other}"),
        }
        assert!(store.list_active().unwrap().is_empty(), "{backend}");
        assert_eq!(store.colors().unwrap(), palette(), "{backend}");
    }
}

#[test]
fn new_color_is_stored_as_given_and_registered() {
    for (backend, mut store) in stores() {
        let midnight = Color::new(100, "Midnight", "#101020").unwrap();
        let input = draft("night", None).with_color(midnight.clone());
        let saved = store.upsert(input.clone()).unwrap();

        assert_eq!(Note { id: NEW_NOTE_ID, ..saved }, input, "{backend}");
        let colors = store.colors().unwrap();
        assert_eq!(colors.len(), palette().len() + 1, "{backend}");
        assert_eq!(colors.last(), Some(&midnight), "{backend}");

        let again = store.upsert(draft("again", None).with_color(midnight.clone()));
        assert_eq!(again.unwrap().color, midnight, "{backend}");
    }
}
