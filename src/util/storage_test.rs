use super::*;

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_starts_empty() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    assert_eq!(store.get("nafas_logged_in"), None);
}

#[test]
fn memory_store_set_then_get() {
    let store = MemoryStore::new();
    store.set("k", "v");
    assert_eq!(store.get("k").as_deref(), Some("v"));
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_store_set_overwrites() {
    let store = MemoryStore::with_entries([("k", "old")]);
    store.set("k", "new");
    assert_eq!(store.get("k").as_deref(), Some("new"));
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_store_remove_erases_key() {
    let store = MemoryStore::with_entries([("a", "1"), ("b", "2")]);
    store.remove("a");
    assert_eq!(store.get("a"), None);
    assert_eq!(store.get("b").as_deref(), Some("2"));
}

#[test]
fn memory_store_remove_missing_key_is_noop() {
    let store = MemoryStore::new();
    store.remove("missing");
    assert!(store.is_empty());
}

// =============================================================
// LocalStorage (non-browser build)
// =============================================================

#[cfg(not(feature = "csr"))]
#[test]
fn local_storage_is_inert_outside_browser() {
    let store = LocalStorage;
    store.set("k", "v");
    assert_eq!(store.get("k"), None);
    store.remove("k");
    assert!(!LocalStorage::is_available());
}

#[cfg(not(feature = "csr"))]
#[test]
fn default_store_falls_back_to_memory() {
    let store = default_store();
    store.set("k", "v");
    assert_eq!(store.get("k").as_deref(), Some("v"));
}
