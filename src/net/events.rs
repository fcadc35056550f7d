//! Cancellable auth event source.
//!
//! DESIGN
//! ======
//! Providers publish [`AuthEvent`]s on an [`AuthEventBus`]. Each subscriber
//! gets a [`Subscription`] handle; the listener stays registered until the
//! handle is explicitly unsubscribed or dropped, whichever happens first.
//! Release happens exactly once per handle.
//!
//! Listeners are invoked on a snapshot taken outside the lock, so a listener
//! may unsubscribe, subscribe, or emit re-entrantly.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use super::types::AuthEvent;

type Listener = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

fn lock(inner: &Mutex<Listeners>) -> MutexGuard<'_, Listeners> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fan-out channel for auth state changes.
#[derive(Clone, Default)]
pub struct AuthEventBus {
    inner: Arc<Mutex<Listeners>>,
}

impl std::fmt::Debug for AuthEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl AuthEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` and return the handle that releases it.
    #[must_use = "dropping the subscription immediately unsubscribes the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        let mut listeners = lock(&self.inner);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        Subscription { id, bus: Arc::downgrade(&self.inner), active: true }
    }

    /// Deliver `event` to every listener registered at the time of the call.
    pub fn emit(&self, event: &AuthEvent) {
        let snapshot: Vec<Listener> = lock(&self.inner)
            .entries
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        log::debug!("auth event {} -> {} listener(s)", event.kind.as_str(), snapshot.len());
        for listener in snapshot {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner).entries.len()
    }
}

/// Disposable registration on an [`AuthEventBus`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<Mutex<Listeners>>,
    active: bool,
}

impl Subscription {
    /// Release the listener now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(inner) = self.bus.upgrade() {
            lock(&inner).entries.retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
