use thiserror::Error;
use vida_assistant::ReplyError;

#[derive(Debug, Error)]
pub enum ReplyClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint returned status {status}")]
    Status { status: u16 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ReplyClientError> for ReplyError {
    fn from(e: ReplyClientError) -> Self {
        match e {
            ReplyClientError::Status { status } => ReplyError::Status(status),
            other => ReplyError::Transport(Box::new(other)),
        }
    }
}
