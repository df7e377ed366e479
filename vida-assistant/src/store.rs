use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::RwLock;

/// A string-keyed byte store for persisted assistant state.
///
/// Stores only move bytes around. Serialization is the job of the
/// [`Transcript`](crate::Transcript) that owns the store.
///
/// All methods take `&self` so backends with internal locking can be shared.
pub trait Store {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieves the bytes stored under `key`, or None if not present.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Stores bytes under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error>;

    /// Checks whether `key` exists in the store.
    fn has(&self, key: &str) -> Result<bool, Self::Error>;
}

impl<S: Store> Store for &S {
    type Error = S::Error;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        (*self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        (*self).put(key, value)
    }

    fn has(&self, key: &str) -> Result<bool, Self::Error> {
        (*self).has(key)
    }
}

/// An in-memory store backed by a HashMap.
///
/// Used by tests and by surfaces that should not touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        Ok(data.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn has(&self, key: &str) -> Result<bool, Self::Error> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        Ok(data.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_put_get() {
        let store = MemoryStore::new();
        store.put("k", b"hello world").unwrap();

        assert_eq!(store.get("k").unwrap(), Some(b"hello world".to_vec()));
    }

    #[test]
    fn memory_store_get_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn memory_store_has() {
        let store = MemoryStore::new();
        assert!(!store.has("k").unwrap());

        store.put("k", b"value").unwrap();

        assert!(store.has("k").unwrap());
    }

    #[test]
    fn memory_store_overwrite() {
        let store = MemoryStore::new();
        store.put("k", b"first").unwrap();
        store.put("k", b"second").unwrap();

        assert_eq!(store.get("k").unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn store_through_reference() {
        let store = MemoryStore::new();
        let by_ref = &store;
        by_ref.put("k", b"v").unwrap();

        assert!(store.has("k").unwrap());
    }
}
