//! Slack Web API response envelopes.
//!
//! Every Slack method answers with an `ok` flag, an `error` string when
//! `ok` is false, and a method-specific payload. Cursor-paginated
//! methods additionally carry `response_metadata.next_cursor`.

use serde::Deserialize;

use chanmolt_types::{Conversation, User};

/// Pagination metadata; an empty `next_cursor` means the last page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

/// Response from `conversations.list`.
#[derive(Debug, Deserialize)]
pub struct ConversationsListResponse {
    pub ok: bool,
    #[serde(default)]
    pub channels: Vec<Conversation>,
    pub response_metadata: Option<ResponseMetadata>,
    pub error: Option<String>,
}

/// Response from `conversations.members`.
#[derive(Debug, Deserialize)]
pub struct MembersResponse {
    pub ok: bool,
    #[serde(default)]
    pub members: Vec<String>,
    pub response_metadata: Option<ResponseMetadata>,
    pub error: Option<String>,
}

/// Response from `conversations.rename`, `conversations.create`, and
/// `conversations.invite`, all of which echo a channel object.
#[derive(Debug, Deserialize)]
pub struct ChannelResponse {
    pub ok: bool,
    pub channel: Option<Conversation>,
    pub error: Option<String>,
}

/// Response from `users.info`.
#[derive(Debug, Deserialize)]
pub struct UserInfoResponse {
    pub ok: bool,
    pub user: Option<User>,
    pub error: Option<String>,
}

/// Bare acknowledgement for methods whose payload we ignore
/// (`conversations.setPurpose`, the `users.admin.*` endpoints).
#[derive(Debug, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_with_cursor() {
        let json = r#"{
            "ok": true,
            "channels": [{ "id": "G1", "name": "secret", "is_private": true }],
            "response_metadata": { "next_cursor": "dGVhbTpDMDYxRkE1UEI=" }
        }"#;

        let resp: ConversationsListResponse = serde_json::from_str(json).unwrap();
        assert!(resp.ok);
        assert_eq!(resp.channels.len(), 1);
        assert_eq!(
            resp.response_metadata.unwrap().next_cursor,
            "dGVhbTpDMDYxRkE1UEI="
        );
    }

    #[test]
    fn error_envelope() {
        let json = r#"{ "ok": false, "error": "invalid_auth" }"#;
        let resp: AckResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.error.as_deref(), Some("invalid_auth"));
    }

    #[test]
    fn members_response_defaults() {
        let json = r#"{ "ok": true }"#;
        let resp: MembersResponse = serde_json::from_str(json).unwrap();
        assert!(resp.members.is_empty());
        assert!(resp.response_metadata.is_none());
    }
}
