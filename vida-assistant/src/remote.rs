use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::message::{Message, Role};

/// Fixed tag identifying which surface is asking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyContext {
    pub intent: String,
}

impl ReplyContext {
    pub fn new(intent: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
        }
    }
}

/// A prior message forwarded to the remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for HistoryEntry {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Body sent to the remote reply endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRequest {
    /// The trimmed user message.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ReplyContext>,
    /// Transcript up to and including the user message, oldest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<HistoryEntry>>,
}

impl ReplyRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            messages: None,
        }
    }
}

/// Every way a remote reply can be unusable.
///
/// The responder treats all of them the same: it answers from the local rules.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Reply endpoint returned status {0}")]
    Status(u16),

    #[error("Reply endpoint returned no usable reply")]
    MissingReply,

    #[error("Reply endpoint timed out after {0:?}")]
    Timeout(Duration),
}

/// A remote service that can answer a user message.
///
/// Implementations return `Ok` only with a non-empty reply.
pub trait ReplySource: Send + Sync {
    fn fetch_reply(
        &self,
        request: &ReplyRequest,
    ) -> impl Future<Output = Result<String, ReplyError>> + Send;
}

/// The absent remote capability of a local-only responder.
///
/// Uninhabited: a responder typed with `NoRemote` can never hold one.
#[derive(Debug, Clone, Copy)]
pub enum NoRemote {}

impl ReplySource for NoRemote {
    fn fetch_reply(
        &self,
        _request: &ReplyRequest,
    ) -> impl Future<Output = Result<String, ReplyError>> + Send {
        async move { match *self {} }
    }
}
