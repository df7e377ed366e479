use tracing::{debug, warn};

use crate::message::Message;
use crate::store::Store;

/// Storage key the transcript is persisted under unless told otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "vidanl.assistant.v1";

/// Seeded into a transcript that has nothing to restore.
pub const DEFAULT_GREETING: &str = "¡Hola! Soy tu asistente virtual de VIDA NL. Puedo ayudarte con \
afiliación, voluntariado, documentos y eventos. ¿En qué te apoyo hoy?";

/// Seeded into a transcript after [`Transcript::clear`].
pub const CLEARED_GREETING: &str = "Nueva conversación iniciada. ¿En qué te ayudo?";

/// The ordered, append-only message log of one conversation.
///
/// Every mutation writes the full sequence back to the store. Storage is
/// best-effort: read failures look like an empty store and write failures
/// are logged and dropped, so the conversation itself never fails.
pub struct Transcript<S: Store> {
    store: S,
    key: String,
    messages: Vec<Message>,
}

impl<S: Store> Transcript<S> {
    /// Restores the transcript persisted under [`DEFAULT_STORAGE_KEY`].
    pub fn restore(store: S) -> Self {
        Self::restore_with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Restores the transcript persisted under `key`.
    ///
    /// Falls back to a single greeting when nothing usable is stored, and
    /// persists that greeting so later restores see the same transcript.
    pub fn restore_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let restored = load(&store, &key).filter(|messages| !messages.is_empty());

        match restored {
            Some(messages) => {
                debug!(key = %key, len = messages.len(), "Restored transcript");
                Self {
                    store,
                    key,
                    messages,
                }
            }
            None => {
                let transcript = Self {
                    store,
                    key,
                    messages: vec![Message::assistant(DEFAULT_GREETING)],
                };
                transcript.persist();
                transcript
            }
        }
    }

    /// Appends a message and persists the transcript.
    ///
    /// The timestamp is raised to the last message's if the clock went
    /// backwards, so timestamps never decrease along the transcript.
    pub fn append(&mut self, mut message: Message) -> &Message {
        if let Some(last) = self.messages.last() {
            message.timestamp_ms = message.timestamp_ms.max(last.timestamp_ms);
        }
        self.messages.push(message);
        self.persist();
        &self.messages[self.messages.len() - 1]
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &Message {
        self.append(Message::user(content))
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> &Message {
        self.append(Message::assistant(content))
    }

    /// Appends a system notice.
    pub fn push_notice(&mut self, content: impl Into<String>) -> &Message {
        self.append(Message::system(content))
    }

    /// Replaces the whole conversation with a fresh greeting.
    pub fn clear(&mut self) {
        self.messages = vec![Message::assistant(CLEARED_GREETING)];
        self.persist();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn persist(&self) {
        let bytes = match serde_json::to_vec(&self.messages) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to encode transcript");
                return;
            }
        };
        if let Err(e) = self.store.put(&self.key, &bytes) {
            warn!(key = %self.key, error = %e, "Failed to persist transcript");
        }
    }
}

impl<'a, S: Store> IntoIterator for &'a Transcript<S> {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn load<S: Store>(store: &S, key: &str) -> Option<Vec<Message>> {
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read transcript");
            return None;
        }
    };

    match serde_json::from_slice::<Vec<Message>>(&bytes) {
        Ok(mut messages) => {
            // Timestamps never decrease; entries stored without one read as zero
            let mut floor = 0;
            for message in &mut messages {
                message.timestamp_ms = message.timestamp_ms.max(floor);
                floor = message.timestamp_ms;
            }
            Some(messages)
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Discarding corrupt transcript");
            None
        }
    }
}
