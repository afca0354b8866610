//! Key-value storage abstraction
//!
//! The game persists a single integer (the best score), but the store
//! is still behind a trait so tests and the native demo can run without
//! a browser. Writes are synchronous and fire-and-forget: a failed
//! write is logged and dropped, the in-memory value stays authoritative
//! and is corrected on the next successful write or session.

use std::collections::HashMap;

/// Synchronous write-through integer store
pub trait KvStore {
    fn read_int(&self, key: &str) -> Option<i64>;
    fn write_int(&mut self, key: &str, value: i64);
    /// Push any buffered writes down to the platform store
    fn flush(&mut self);
}

/// In-memory store for native runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
    write_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store (session carry-over in tests)
    pub fn with(key: &str, value: i64) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }

    /// Number of writes issued so far
    pub fn write_count(&self) -> usize {
        self.write_count
    }
}

impl KvStore for MemoryStore {
    fn read_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn write_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        self.write_count += 1;
    }

    fn flush(&mut self) {
        // Nothing buffered
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KvStore for LocalStorageStore {
    fn read_int(&self, key: &str) -> Option<i64> {
        let storage = Self::storage()?;
        match storage.get_item(key) {
            Ok(Some(raw)) => match raw.parse::<i64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    log::warn!("ignoring non-integer value under {key:?}");
                    None
                }
            },
            _ => None,
        }
    }

    fn write_int(&mut self, key: &str, value: i64) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, &value.to_string()).is_err() {
                log::warn!("failed to persist {key:?}");
            }
        }
    }

    fn flush(&mut self) {
        // LocalStorage writes are synchronous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read_int("best"), None);
        store.write_int("best", 12);
        store.flush();
        assert_eq!(store.read_int("best"), Some(12));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_memory_store_preseeded() {
        let store = MemoryStore::with("best", 5);
        assert_eq!(store.read_int("best"), Some(5));
        assert_eq!(store.write_count(), 0);
    }
}
