use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use vida_assistant::{MemoryStore, ReplyContext, Responder, Store, Transcript};
use vida_fjall::FjallStore;
use vida_remote::ReplyClient;

use crate::config::Settings;
use crate::error::VidaError;

#[derive(Debug, Error)]
pub enum AnyStoreError {
    #[error("fjall error: {0}")]
    Fjall(#[from] vida_fjall::FjallError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    #[default]
    Fjall,
    /// Nothing survives the process.
    Memory,
}

impl std::str::FromStr for StoreType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fjall" => Ok(StoreType::Fjall),
            "memory" | "mem" => Ok(StoreType::Memory),
            _ => Err(format!("unknown store type: {}", s)),
        }
    }
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreType::Fjall => write!(f, "fjall"),
            StoreType::Memory => write!(f, "memory"),
        }
    }
}

pub enum AnyStore {
    Fjall(FjallStore),
    Memory(MemoryStore),
}

impl AnyStore {
    pub fn open(store_type: StoreType, path: impl AsRef<Path>) -> Result<Self, AnyStoreError> {
        match store_type {
            StoreType::Fjall => Ok(Self::Fjall(FjallStore::open(path)?)),
            StoreType::Memory => Ok(Self::Memory(MemoryStore::new())),
        }
    }
}

impl Store for AnyStore {
    type Error = AnyStoreError;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        match self {
            AnyStore::Fjall(s) => s.get(key).map_err(Into::into),
            AnyStore::Memory(s) => s.get(key).map_err(|e| match e {}),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        match self {
            AnyStore::Fjall(s) => s.put(key, value).map_err(Into::into),
            AnyStore::Memory(s) => s.put(key, value).map_err(|e| match e {}),
        }
    }

    fn has(&self, key: &str) -> Result<bool, Self::Error> {
        match self {
            AnyStore::Fjall(s) => s.has(key).map_err(Into::into),
            AnyStore::Memory(s) => s.has(key).map_err(|e| match e {}),
        }
    }
}

pub type AppResponder = Responder<AnyStore, ReplyClient>;

pub struct AppContext {
    pub responder: AppResponder,
}

impl AppContext {
    pub fn open(settings: &Settings) -> Result<Self, VidaError> {
        let store = AnyStore::open(settings.store_type, &settings.store_path)?;
        let transcript = Transcript::restore_with_key(store, settings.storage_key.clone());

        let remote = settings
            .endpoint
            .as_ref()
            .map(|endpoint| ReplyClient::with_timeout(endpoint.clone(), settings.timeout))
            .transpose()?;

        let mut responder = Responder::with_optional_remote(transcript, remote)
            .with_timeout(settings.timeout)
            .with_history(settings.include_history);
        if let Some(context) = &settings.context {
            responder = responder.with_context(ReplyContext::new(context.clone()));
        }

        Ok(Self { responder })
    }
}

pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vida")
        .join("store")
}
