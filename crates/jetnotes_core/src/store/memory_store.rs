//! In-memory note store.
//!
//! Used by tests and by hosts that persist elsewhere. Ids come from a
//! monotonic counter, so deleted ids are never handed out again.

use crate::model::color::{palette, Color};
use crate::model::note::{Note, NoteId, NEW_NOTE_ID};
use crate::store::observer::{ObserverList, StoreEvent, StoreObserver, SubscriptionId};
use crate::store::{check_note_color, NoteStore, StoreError, StoreResult};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// `BTreeMap`-backed note store.
#[derive(Debug)]
pub struct InMemoryNoteStore {
    notes: BTreeMap<NoteId, Note>,
    colors: Vec<Color>,
    last_id: NoteId,
    observers: ObserverList,
}

impl InMemoryNoteStore {
    /// Creates an empty store using the built-in palette.
    pub fn new() -> Self {
        Self::with_palette(palette())
    }

    /// Creates an empty store exposing a caller-provided palette.
    pub fn with_palette(colors: Vec<Color>) -> Self {
        Self {
            notes: BTreeMap::new(),
            colors,
            last_id: 0,
            observers: ObserverList::new(),
        }
    }

    fn list_where(&self, in_trash: bool) -> Vec<Note> {
        self.notes
            .values()
            .filter(|note| note.is_in_trash == in_trash)
            .cloned()
            .collect()
    }
}

impl Default for InMemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore for InMemoryNoteStore {
    fn list_active(&self) -> StoreResult<Vec<Note>> {
        Ok(self.list_where(false))
    }

    fn list_trashed(&self) -> StoreResult<Vec<Note>> {
        Ok(self.list_where(true))
    }

    fn get(&self, id: NoteId) -> StoreResult<Option<Note>> {
        Ok(self.notes.get(&id).cloned())
    }

    fn colors(&self) -> StoreResult<Vec<Color>> {
        let mut colors = self.colors.clone();
        colors.sort_by_key(|color| color.id);
        Ok(colors)
    }

    fn upsert(&mut self, mut note: Note) -> StoreResult<Note> {
        let stored_color = self.colors.iter().find(|color| color.id == note.color.id);
        let register_color = check_note_color(&note.color, stored_color)?;
        let created = note.id == NEW_NOTE_ID;
        if !created && !self.notes.contains_key(&note.id) {
            return Err(StoreError::NotFound(note.id));
        }
        if register_color {
            self.colors.push(note.color.clone());
        }
        if created {
            self.last_id += 1;
            note.id = self.last_id;
        }

        self.notes.insert(note.id, note.clone());
        debug!(
            "event=note_upsert module=store backend=memory status=ok note_id={} created={}",
            note.id, created
        );
        self.observers.notify(&StoreEvent::Upserted {
            id: note.id,
            created,
        });
        Ok(note)
    }

    fn set_trashed(&mut self, ids: &BTreeSet<NoteId>, trashed: bool) -> StoreResult<usize> {
        let mut changed = BTreeSet::new();
        for id in ids {
            if let Some(note) = self.notes.get_mut(id) {
                if note.is_in_trash != trashed {
                    if trashed {
                        note.trash();
                    } else {
                        note.restore();
                    }
                    changed.insert(*id);
                }
            }
        }

        debug!(
            "event=note_set_trashed module=store backend=memory status=ok requested={} changed={} trashed={}",
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
        let removed: BTreeSet<NoteId> = ids
            .iter()
            .filter(|id| self.notes.remove(*id).is_some())
            .copied()
            .collect();

        debug!(
            "event=note_delete module=store backend=memory status=ok requested={} removed={}",
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
