use chrono::Utc;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    /// The agent widget persisted this role as `"agent"`.
    #[serde(alias = "agent")]
    Assistant,
    /// Non-conversational notices.
    System,
}

/// One entry in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default = "Uuid::new_v4", deserialize_with = "stored_id")]
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    /// Milliseconds since the Unix epoch. Zero when the stored entry had none.
    #[serde(default, alias = "ts", alias = "timestamp")]
    pub timestamp_ms: i64,
}

/// Reads an id written by any version of the widgets.
///
/// Non-UUID string ids map to a name-based UUID so the same stored entry
/// keeps the same id across restores. Anything else gets a fresh id.
fn stored_id<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StoredId {
        Uuid(Uuid),
        Legacy(String),
        Other(IgnoredAny),
    }

    Ok(match StoredId::deserialize(deserializer)? {
        StoredId::Uuid(id) => id,
        StoredId::Legacy(raw) => Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.as_bytes()),
        StoredId::Other(_) => Uuid::new_v4(),
    })
}

impl Message {
    /// Creates a message with a fresh id, stamped with the current time.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp_ms: Utc::now().timestamp_millis(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = Message::user("hola");
        let b = Message::user("hola");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn role_serializes_lowercase() {
        let msg = Message::assistant("hola");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn agent_role_is_read_as_assistant() {
        let json = r#"{
            "id": "6f1c1a52-3f43-4a43-9c55-6d4b1f7c9a10",
            "role": "agent",
            "content": "¡Hola!",
            "timestamp": 1700000000000
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.timestamp_ms, 1_700_000_000_000);
    }

    #[test]
    fn ts_field_is_read_as_timestamp() {
        let json = r#"{
            "id": "6f1c1a52-3f43-4a43-9c55-6d4b1f7c9a10",
            "role": "user",
            "content": "hola",
            "ts": 1700000000123
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.timestamp_ms, 1_700_000_000_123);
    }

    #[test]
    fn missing_timestamp_defaults_to_zero() {
        let json = r#"{
            "id": "6f1c1a52-3f43-4a43-9c55-6d4b1f7c9a10",
            "role": "assistant",
            "content": "hola"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.timestamp_ms, 0);
    }

    #[test]
    fn non_uuid_id_maps_to_stable_uuid() {
        let json = r#"{"id": "k3j2h1lmx0abc", "role": "agent", "content": "hola", "timestamp": 1}"#;
        let a: Message = serde_json::from_str(json).unwrap();
        let b: Message = serde_json::from_str(json).unwrap();

        assert_eq!(a.id, b.id);
        assert_eq!(a.role, Role::Assistant);
        assert_eq!(a.content, "hola");
    }

    #[test]
    fn numeric_or_missing_id_gets_fresh_uuid() {
        let numeric: Message =
            serde_json::from_str(r#"{"id": 42, "role": "user", "content": "hola"}"#).unwrap();
        let missing: Message =
            serde_json::from_str(r#"{"role": "user", "content": "hola"}"#).unwrap();

        assert_eq!(numeric.content, "hola");
        assert_ne!(numeric.id, missing.id);
    }
}
