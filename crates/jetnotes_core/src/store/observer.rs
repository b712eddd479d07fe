//! Change notification for note stores.
//!
//! # Responsibility
//! - Keep an explicit callback list that replaces UI-bound reactive state.
//! - Deliver one `StoreEvent` per state-changing mutation.
//!
//! # Invariants
//! - Observers are called synchronously, after the mutation is visible.
//! - Subscription ids are never reused within one list.

use crate::model::note::NoteId;
use std::collections::BTreeSet;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// What changed in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A note was inserted (`created == true`) or replaced.
    Upserted { id: NoteId, created: bool },
    /// Notes whose trash flag actually flipped.
    TrashedChanged {
        ids: BTreeSet<NoteId>,
        trashed: bool,
    },
    /// Notes that were removed for good.
    Deleted { ids: BTreeSet<NoteId> },
}

/// Receives store change events.
///
/// Implemented for any `Fn(&StoreEvent) + Send` closure.
pub trait StoreObserver: Send {
    fn on_change(&self, event: &StoreEvent);
}

impl<F> StoreObserver for F
where
    F: Fn(&StoreEvent) + Send,
{
    fn on_change(&self, event: &StoreEvent) {
        self(event)
    }
}

/// Ordered observer registry embedded by store implementations.
#[derive(Default)]
pub struct ObserverList {
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn StoreObserver>)>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.observers.push((id, observer));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(current, _)| *current != id);
        self.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Calls every observer in subscription order.
    pub fn notify(&self, event: &StoreEvent) {
        for (_, observer) in &self.observers {
            observer.on_change(event);
        }
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ObserverList, StoreEvent};
    use std::sync::{Arc, Mutex};

    #[test]
    fn notify_reaches_observers_in_order_until_unsubscribed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut list = ObserverList::new();

        let first_seen = Arc::clone(&seen);
        let first = list.subscribe(Box::new(move |_: &StoreEvent| {
            first_seen.lock().unwrap().push("first");
        }));
        let second_seen = Arc::clone(&seen);
        list.subscribe(Box::new(move |_: &StoreEvent| {
            second_seen.lock().unwrap().push("second");
        }));

        let event = StoreEvent::Upserted {
            id: 1,
            created: true,
        };
        list.notify(&event);
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);

        assert!(list.unsubscribe(first));
        assert!(!list.unsubscribe(first));
        list.notify(&event);
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "second"]);
        assert_eq!(list.len(), 1);
    }
}
