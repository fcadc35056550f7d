//! Durable key-value storage behind the session gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session gate never touches `window.localStorage` directly. It writes
//! through a [`KeyValueStore`] so the browser store can be swapped for an
//! in-memory one when storage is unavailable (private mode, sandboxed
//! iframes) and in native tests.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// String-keyed, string-valued store scoped to the browser origin.
///
/// Implementations must be `Send + Sync` because the gate that owns them is
/// placed in Leptos context.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Shared handle to an injected store.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// `window.localStorage`, looked up on every call.
///
/// Outside the browser build every read misses and every write is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// Whether the browser exposes a usable `localStorage`.
    pub fn is_available() -> bool {
        #[cfg(feature = "csr")]
        {
            web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .is_some()
        }
        #[cfg(not(feature = "csr"))]
        {
            false
        }
    }
}

#[cfg(feature = "csr")]
fn browser_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            browser_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = browser_storage() else {
                log::warn!("localStorage unavailable; dropped write to {key}");
                return;
            };
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage rejected write to {key}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = browser_storage() else {
                log::warn!("localStorage unavailable; dropped removal of {key}");
                return;
            };
            if storage.remove_item(key).is_err() {
                log::warn!("localStorage rejected removal of {key}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// Process-local store used when `localStorage` is missing, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with initial entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { entries: Mutex::new(map) }
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

/// Pick the browser store when available, otherwise an empty in-memory one.
pub fn default_store() -> SharedStore {
    if LocalStorage::is_available() {
        Arc::new(LocalStorage)
    } else {
        log::warn!("localStorage unavailable; session flags will not survive a reload");
        Arc::new(MemoryStore::new())
    }
}
