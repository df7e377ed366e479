use thiserror::Error;

use crate::store::AnyStoreError;

#[derive(Debug, Error)]
pub enum VidaError {
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(#[from] AnyStoreError),

    #[error("Remote client error: {0}")]
    Remote(#[from] vida_remote::ReplyClientError),

    #[error("Unknown suggestion: {0}. Run `vida suggestions` to list them")]
    UnknownSuggestion(String),

    #[error("Nothing to send: the message is empty")]
    EmptyMessage,
}
