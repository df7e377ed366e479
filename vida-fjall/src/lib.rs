//! Fjall-backed store for the VIDA assistant.

use std::path::Path;

use fjall::{Database, Keyspace, KeyspaceCreateOptions};
use thiserror::Error;
use vida_assistant::Store;

pub const DEFAULT_KEYSPACE: &str = "assistant";

#[derive(Debug, Error)]
#[error("Fjall error: {0}")]
pub struct FjallError(#[from] fjall::Error);

/// A persistent store backed by Fjall.
pub struct FjallStore {
    keyspace: Keyspace,
    /// Owns the files the keyspace reads from.
    _database: Database,
}

impl FjallStore {
    /// Opens a Fjall store at the given path using the default keyspace.
    ///
    /// Creates the database if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FjallError> {
        Self::open_keyspace(path, DEFAULT_KEYSPACE)
    }

    /// Opens a Fjall store at the given path with a specific keyspace name.
    pub fn open_keyspace(path: impl AsRef<Path>, keyspace: &str) -> Result<Self, FjallError> {
        let database = Database::builder(path).open()?;
        let keyspace = database.keyspace(keyspace, || KeyspaceCreateOptions::default())?;
        Ok(Self {
            keyspace,
            _database: database,
        })
    }
}

impl Store for FjallStore {
    type Error = FjallError;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.keyspace.get(key.as_bytes())?.map(|v| v.to_vec()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        self.keyspace.insert(key.as_bytes(), value)?;
        Ok(())
    }

    fn has(&self, key: &str) -> Result<bool, Self::Error> {
        self.keyspace
            .contains_key(key.as_bytes())
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vida_assistant::{Responder, Transcript};

    fn temp_store() -> (FjallStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FjallStore::open(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn put_get() {
        let (store, _dir) = temp_store();
        store.put("k", b"hello world").unwrap();

        assert_eq!(store.get("k").unwrap(), Some(b"hello world".to_vec()));
    }

    #[test]
    fn get_missing() {
        let (store, _dir) = temp_store();
        assert_eq!(store.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn has() {
        let (store, _dir) = temp_store();
        assert!(!store.has("k").unwrap());

        store.put("k", b"value").unwrap();

        assert!(store.has("k").unwrap());
    }

    #[test]
    fn persistence() {
        let dir = TempDir::new().unwrap();

        {
            let store = FjallStore::open(dir.path()).unwrap();
            store.put("k", b"data survives restart").unwrap();
        }

        {
            let store = FjallStore::open(dir.path()).unwrap();
            assert_eq!(
                store.get("k").unwrap(),
                Some(b"data survives restart".to_vec())
            );
        }
    }

    #[tokio::test]
    async fn transcript_survives_reopen() {
        let dir = TempDir::new().unwrap();

        let before = {
            let store = FjallStore::open(dir.path()).unwrap();
            let mut responder = Responder::local(Transcript::restore(store));
            responder.send("¿Cuáles son los próximos eventos?").await.unwrap();
            responder.transcript().messages().to_vec()
        };

        let store = FjallStore::open(dir.path()).unwrap();
        let after = Transcript::restore(store);

        assert_eq!(after.messages(), before.as_slice());
    }
}
