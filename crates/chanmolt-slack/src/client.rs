//! [`SlackApiClient`] -- reqwest-based Slack Web API client.
//!
//! All methods POST form-encoded parameters with a bearer token, which
//! is the encoding every Slack Web API method accepts, including the
//! legacy `users.admin.*` endpoints that reject JSON bodies.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use chanmolt_core::SlackGateway;
use chanmolt_types::error::ApiError;
use chanmolt_types::{Conversation, User};

use crate::responses::{
    AckResponse, ChannelResponse, ConversationsListResponse, MembersResponse, UserInfoResponse,
};

/// Base URL for the Slack Web API.
const SLACK_API_BASE: &str = "https://slack.com/api";

/// Page size requested from cursor-paginated methods.
const PAGE_LIMIT: &str = "200";

/// HTTP client for the Slack Web API.
///
/// Wraps a [`reqwest::Client`] and the credential. The base URL can be
/// overridden to point at a local mock server in tests.
pub struct SlackApiClient {
    /// Shared HTTP client.
    http: Client,
    /// API credential, sent as a bearer token.
    token: String,
    /// Base URL for API calls.
    base_url: String,
}

impl SlackApiClient {
    /// Create a new client with the given token.
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, SLACK_API_BASE.to_owned())
    }

    /// Create a client pointing at a custom base URL (for testing).
    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            token,
            base_url,
        }
    }

    /// Return the base URL used for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a Web API method and deserialize its envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{method}", self.base_url);

        debug!(method, "calling slack api");

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .form(params)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::AuthFailed(body));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!("HTTP {status}: {body}")));
        }

        resp.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("failed to parse {method} response: {e}"))
        })
    }

    /// List every private channel visible to the token, draining the
    /// pagination cursor.
    pub async fn conversations_list(&self) -> Result<Vec<Conversation>, ApiError> {
        let mut channels = Vec::new();
        let mut cursor = String::new();

        loop {
            let mut params = vec![("types", "private_channel"), ("limit", PAGE_LIMIT)];
            if !cursor.is_empty() {
                params.push(("cursor", cursor.as_str()));
            }

            let resp: ConversationsListResponse =
                self.call("conversations.list", &params).await?;
            ensure_ok("conversations.list", resp.ok, resp.error)?;

            channels.extend(resp.channels);

            cursor = resp
                .response_metadata
                .map(|m| m.next_cursor)
                .unwrap_or_default();
            if cursor.is_empty() {
                return Ok(channels);
            }
        }
    }

    /// List the member ids of a channel, draining the pagination cursor.
    pub async fn conversations_members(&self, channel_id: &str) -> Result<Vec<String>, ApiError> {
        let mut members = Vec::new();
        let mut cursor = String::new();

        loop {
            let mut params = vec![("channel", channel_id), ("limit", PAGE_LIMIT)];
            if !cursor.is_empty() {
                params.push(("cursor", cursor.as_str()));
            }

            let resp: MembersResponse = self.call("conversations.members", &params).await?;
            ensure_ok("conversations.members", resp.ok, resp.error)?;

            members.extend(resp.members);

            cursor = resp
                .response_metadata
                .map(|m| m.next_cursor)
                .unwrap_or_default();
            if cursor.is_empty() {
                return Ok(members);
            }
        }
    }

    /// Rename a channel, returning the updated conversation.
    pub async fn conversations_rename(
        &self,
        channel_id: &str,
        name: &str,
    ) -> Result<Conversation, ApiError> {
        let resp: ChannelResponse = self
            .call("conversations.rename", &[("channel", channel_id), ("name", name)])
            .await?;
        ensure_ok("conversations.rename", resp.ok, resp.error)?;
        resp.channel.ok_or_else(|| {
            ApiError::InvalidResponse("conversations.rename returned ok but no channel".into())
        })
    }

    /// Create a public channel with the given name.
    pub async fn conversations_create(&self, name: &str) -> Result<Conversation, ApiError> {
        let resp: ChannelResponse = self
            .call(
                "conversations.create",
                &[("name", name), ("is_private", "false")],
            )
            .await?;
        ensure_ok("conversations.create", resp.ok, resp.error)?;
        resp.channel.ok_or_else(|| {
            ApiError::InvalidResponse("conversations.create returned ok but no channel".into())
        })
    }

    /// Set a channel's purpose text.
    pub async fn conversations_set_purpose(
        &self,
        channel_id: &str,
        purpose: &str,
    ) -> Result<(), ApiError> {
        let resp: AckResponse = self
            .call(
                "conversations.setPurpose",
                &[("channel", channel_id), ("purpose", purpose)],
            )
            .await?;
        ensure_ok("conversations.setPurpose", resp.ok, resp.error)
    }

    /// Fetch a user record.
    pub async fn users_info(&self, user_id: &str) -> Result<User, ApiError> {
        let resp: UserInfoResponse = self.call("users.info", &[("user", user_id)]).await?;
        ensure_ok("users.info", resp.ok, resp.error)?;
        resp.user.ok_or_else(|| {
            ApiError::InvalidResponse("users.info returned ok but no user".into())
        })
    }

    /// Upgrade a user to multi-channel guest.
    pub async fn users_admin_set_restricted(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<(), ApiError> {
        let resp: AckResponse = self
            .call(
                "users.admin.setRestricted",
                &[("team_id", team_id), ("user", user_id)],
            )
            .await?;
        ensure_ok("users.admin.setRestricted", resp.ok, resp.error)
    }

    /// Downgrade a user to single-channel guest, scoped to one channel.
    pub async fn users_admin_set_ultra_restricted(
        &self,
        team_id: &str,
        user_id: &str,
        channel_id: &str,
    ) -> Result<(), ApiError> {
        let resp: AckResponse = self
            .call(
                "users.admin.setUltraRestricted",
                &[
                    ("team_id", team_id),
                    ("user", user_id),
                    ("channel", channel_id),
                ],
            )
            .await?;
        ensure_ok("users.admin.setUltraRestricted", resp.ok, resp.error)
    }

    /// Invite a batch of users into a channel.
    pub async fn conversations_invite(
        &self,
        channel_id: &str,
        user_ids: &[String],
    ) -> Result<(), ApiError> {
        let users = user_ids.join(",");
        let resp: ChannelResponse = self
            .call(
                "conversations.invite",
                &[("channel", channel_id), ("users", users.as_str())],
            )
            .await?;
        ensure_ok("conversations.invite", resp.ok, resp.error)
    }
}

/// Map an `ok: false` envelope into [`ApiError::Api`].
fn ensure_ok(method: &str, ok: bool, error: Option<String>) -> Result<(), ApiError> {
    if ok {
        Ok(())
    } else {
        Err(ApiError::Api {
            method: method.into(),
            reason: error.unwrap_or_else(|| "unknown error".into()),
        })
    }
}

#[async_trait]
impl SlackGateway for SlackApiClient {
    async fn list_private_channels(&self) -> Result<Vec<Conversation>, ApiError> {
        self.conversations_list().await
    }

    async fn channel_members(&self, channel_id: &str) -> Result<Vec<String>, ApiError> {
        self.conversations_members(channel_id).await
    }

    async fn rename_channel(
        &self,
        channel_id: &str,
        name: &str,
    ) -> Result<Conversation, ApiError> {
        self.conversations_rename(channel_id, name).await
    }

    async fn create_channel(&self, name: &str) -> Result<Conversation, ApiError> {
        self.conversations_create(name).await
    }

    async fn set_purpose(&self, channel_id: &str, purpose: &str) -> Result<(), ApiError> {
        self.conversations_set_purpose(channel_id, purpose).await
    }

    async fn user_info(&self, user_id: &str) -> Result<User, ApiError> {
        self.users_info(user_id).await
    }

    async fn set_restricted(&self, team_id: &str, user_id: &str) -> Result<(), ApiError> {
        self.users_admin_set_restricted(team_id, user_id).await
    }

    async fn set_ultra_restricted(
        &self,
        team_id: &str,
        user_id: &str,
        channel_id: &str,
    ) -> Result<(), ApiError> {
        self.users_admin_set_ultra_restricted(team_id, user_id, channel_id)
            .await
    }

    async fn invite_users(&self, channel_id: &str, user_ids: &[String]) -> Result<(), ApiError> {
        self.conversations_invite(channel_id, user_ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url() {
        let client = SlackApiClient::new("xoxs-test".into());
        assert_eq!(client.base_url(), "https://slack.com/api");
    }

    #[test]
    fn custom_base_url() {
        let client =
            SlackApiClient::with_base_url("xoxs-test".into(), "http://localhost:9999".into());
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    #[test]
    fn ensure_ok_maps_error_string() {
        let err = ensure_ok("conversations.rename", false, Some("name_taken".into()))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "slack api conversations.rename failed: name_taken"
        );
    }

    #[test]
    fn ensure_ok_defaults_unknown_error() {
        let err = ensure_ok("users.info", false, None).unwrap_err();
        assert!(err.to_string().contains("unknown error"));
    }
}
