//! Session invalidation broadcast
//!
//! A zero-or-one subscriber slot. The gateway emits into it when a response
//! reports a lost session; the session store subscribes for as long as it
//! lives. Delivery is synchronous and nothing is queued while unsubscribed.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Listener = Arc<dyn Fn() + Send + Sync>;

struct Slot {
    id: u64,
    listener: Listener,
}

#[derive(Clone, Default)]
pub struct AuthSignal {
    slot: Arc<Mutex<Option<Slot>>>,
    next_id: Arc<AtomicU64>,
}

impl AuthSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the listener, replacing any previous one.
    ///
    /// The listener stays registered until the returned guard is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let previous = self.slot.lock().replace(Slot {
            id,
            listener: Arc::new(listener),
        });

        if previous.is_some() {
            tracing::warn!(subscription = id, "Replaced existing auth signal subscriber");
        }

        Subscription {
            slot: Arc::downgrade(&self.slot),
            id,
        }
    }

    /// Notify the subscriber, if any. Returns whether someone was listening.
    pub fn emit(&self) -> bool {
        // Clone out so the listener runs without the slot locked
        let listener = self.slot.lock().as_ref().map(|s| Arc::clone(&s.listener));

        match listener {
            Some(listener) => {
                listener();
                true
            }
            None => {
                tracing::debug!("Auth signal emitted with no subscriber");
                false
            }
        }
    }

    pub fn has_subscriber(&self) -> bool {
        self.slot.lock().is_some()
    }
}

/// Registration guard returned by [`AuthSignal::subscribe`]
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    slot: Weak<Mutex<Option<Slot>>>,
    id: u64,
}

impl Subscription {
    /// False once a newer subscriber took the slot
    pub fn is_active(&self) -> bool {
        self.slot
            .upgrade()
            .is_some_and(|slot| slot.lock().as_ref().is_some_and(|s| s.id == self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.upgrade() {
            let mut slot = slot.lock();
            if slot.as_ref().is_some_and(|s| s.id == self.id) {
                *slot = None;
            }
        }
    }
}
