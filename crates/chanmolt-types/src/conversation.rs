//! Slack conversation objects.
//!
//! Mirrors the subset of the Slack conversation payload the migration
//! needs. Conversations are read from and written back to Slack; nothing
//! is persisted locally.

use serde::Deserialize;

/// A Slack conversation (channel).
#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    /// Conversation id (e.g. `C024BE91L`).
    pub id: String,

    /// Display name, without the leading `#`.
    pub name: String,

    /// Whether the conversation is a private channel.
    #[serde(default)]
    pub is_private: bool,

    /// The channel purpose text, if any.
    #[serde(default)]
    pub purpose: Purpose,

    /// User id of the channel creator.
    #[serde(default)]
    pub creator: Option<String>,
}

/// The `purpose` object nested inside a conversation payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Purpose {
    /// The purpose text; empty when unset.
    #[serde(default)]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_conversation() {
        let json = r#"{
            "id": "C024BE91L",
            "name": "project-x",
            "is_private": true,
            "creator": "U012A3CDE",
            "purpose": { "value": "Ship project X", "creator": "U012A3CDE", "last_set": 1716749263 }
        }"#;

        let channel: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(channel.id, "C024BE91L");
        assert_eq!(channel.name, "project-x");
        assert!(channel.is_private);
        assert_eq!(channel.creator.as_deref(), Some("U012A3CDE"));
        assert_eq!(channel.purpose.value, "Ship project X");
    }

    #[test]
    fn missing_fields_default() {
        // conversations.create responses omit most optional fields.
        let json = r#"{ "id": "C1", "name": "fresh" }"#;

        let channel: Conversation = serde_json::from_str(json).unwrap();
        assert!(!channel.is_private);
        assert!(channel.creator.is_none());
        assert!(channel.purpose.value.is_empty());
    }
}
