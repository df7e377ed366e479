use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Successful body of the reply endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub reply: Option<String>,
}

impl ReplyResponse {
    /// Reads the `reply` field; anything but a string counts as missing.
    pub fn from_value(body: &Value) -> Self {
        Self {
            reply: body
                .get("reply")
                .and_then(|r| r.as_str())
                .map(String::from),
        }
    }

    /// The reply if it has any non-whitespace content.
    pub fn usable_reply(&self) -> Option<&str> {
        self.reply.as_deref().filter(|r| !r.trim().is_empty())
    }
}
