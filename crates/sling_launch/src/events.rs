//! Observer registry for drag lifecycle events.
//!
//! Subscribers are called synchronously, in registration order, with a copy of
//! the snapshot. A callback cannot reach the registry it is stored in, so
//! removal from inside a callback goes through an [`Unsubscriber`] handle: the
//! removal is honored immediately for the rest of the dispatch and the entry
//! is dropped once the dispatch is over.

use core::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use strum::{Display, EnumIter};

use crate::trajectory::DragSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum DragEventKind {
    Start,
    Update,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

type Callback = Box<dyn FnMut(DragSnapshot) + Send + Sync>;

struct Subscriber {
    id: SubscriberId,
    kind: DragEventKind,
    callback: Callback,
}

/// Cloneable handle that removes subscribers, usable from inside callbacks.
#[derive(Clone, Default)]
pub struct Unsubscriber(Arc<Mutex<Vec<SubscriberId>>>);

impl Unsubscriber {
    pub fn unsubscribe(&self, id: SubscriberId) {
        let mut pending = self.0.lock();
        if !pending.contains(&id) {
            pending.push(id);
        }
    }

    fn is_pending(&self, id: SubscriberId) -> bool {
        self.0.lock().contains(&id)
    }

    fn take(&self) -> Vec<SubscriberId> {
        core::mem::take(&mut *self.0.lock())
    }
}

#[derive(Default)]
pub struct DragEvents {
    next_id: u64,
    subscribers: Vec<Subscriber>,
    removals: Unsubscriber,
}

impl fmt::Debug for DragEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragEvents")
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl DragEvents {
    pub fn subscribe(
        &mut self,
        kind: DragEventKind,
        callback: impl FnMut(DragSnapshot) + Send + Sync + 'static,
    ) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    pub fn on_drag_start(
        &mut self,
        callback: impl FnMut(DragSnapshot) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.subscribe(DragEventKind::Start, callback)
    }

    pub fn on_drag_update(
        &mut self,
        callback: impl FnMut(DragSnapshot) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.subscribe(DragEventKind::Update, callback)
    }

    pub fn on_drag_release(
        &mut self,
        callback: impl FnMut(DragSnapshot) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.subscribe(DragEventKind::Release, callback)
    }

    /// Returns whether the subscriber was registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|subscriber| subscriber.id != id);
        before != self.subscribers.len()
    }

    pub fn unsubscriber(&self) -> Unsubscriber {
        self.removals.clone()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Calls every subscriber of `kind` and returns how many were called.
    pub fn emit(&mut self, kind: DragEventKind, snapshot: DragSnapshot) -> usize {
        self.flush_removals();

        let mut called = 0;
        for subscriber in &mut self.subscribers {
            if subscriber.kind != kind || self.removals.is_pending(subscriber.id) {
                continue;
            }
            (subscriber.callback)(snapshot);
            called += 1;
        }

        self.flush_removals();
        called
    }

    fn flush_removals(&mut self) {
        let removed = self.removals.take();
        if !removed.is_empty() {
            self.subscribers
                .retain(|subscriber| !removed.contains(&subscriber.id));
        }
    }
}
