use std::collections::HashMap;

use super::ids::{EventKind, EventTarget, ListenerId};

/// Subscription table keyed by `(target, kind)`.
///
/// Owners are plain ids (no closures), so routing a [`super::HostEvent`] is a
/// lookup followed by a call into whatever `O` identifies. Registering the
/// same `(target, kind, owner)` twice keeps a single entry, matching
/// `addEventListener` with an identical handler.
#[derive(Debug, Clone)]
pub struct ListenerRegistry<O> {
    entries: HashMap<(EventTarget, EventKind), Vec<(ListenerId, O)>>,
    next_id: u64,
}

impl<O: Copy + PartialEq> ListenerRegistry<O> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_id: 1,
        }
    }

    /// Subscribes `owner` to `kind` events on `target`.
    pub fn on(&mut self, target: EventTarget, kind: EventKind, owner: O) -> ListenerId {
        let list = self.entries.entry((target, kind)).or_default();
        if let Some((id, _)) = list.iter().find(|(_, o)| *o == owner) {
            return *id;
        }
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        list.push((id, owner));
        id
    }

    /// Removes `owner`'s subscription. Returns `false` if there was none.
    pub fn off(&mut self, target: EventTarget, kind: EventKind, owner: O) -> bool {
        let key = (target, kind);
        let Some(list) = self.entries.get_mut(&key) else {
            return false;
        };
        let before = list.len();
        list.retain(|(_, o)| *o != owner);
        let removed = list.len() != before;
        if list.is_empty() {
            self.entries.remove(&key);
        }
        removed
    }

    /// Removes every subscription held by `owner`.
    pub fn off_owner(&mut self, owner: O) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, list| {
            let before = list.len();
            list.retain(|(_, o)| *o != owner);
            removed += before - list.len();
            !list.is_empty()
        });
        removed
    }

    /// Owners subscribed to `(target, kind)`, in registration order.
    pub fn listeners(&self, target: EventTarget, kind: EventKind) -> Vec<O> {
        self.entries
            .get(&(target, kind))
            .map(|list| list.iter().map(|(_, o)| *o).collect())
            .unwrap_or_default()
    }

    pub fn is_subscribed(&self, target: EventTarget, kind: EventKind, owner: O) -> bool {
        self.entries
            .get(&(target, kind))
            .is_some_and(|list| list.iter().any(|(_, o)| *o == owner))
    }

    /// Total number of live subscriptions.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<O: Copy + PartialEq> Default for ListenerRegistry<O> {
    fn default() -> Self {
        Self::new()
    }
}
