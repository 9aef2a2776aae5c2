//! The gateway trait between the orchestrator and the Slack Web API.

use async_trait::async_trait;

use chanmolt_types::error::ApiError;
use chanmolt_types::{Conversation, User};

/// The subset of the Slack Web API the migration consumes.
///
/// Implemented by the reqwest-based client in `chanmolt-slack` and by
/// the recording mock in this crate's tests. All calls are issued
/// strictly sequentially; implementations do not need to be reentrant.
#[async_trait]
pub trait SlackGateway: Send + Sync {
    /// List every private channel visible to the credential
    /// (`conversations.list` with `types=private_channel`).
    async fn list_private_channels(&self) -> Result<Vec<Conversation>, ApiError>;

    /// List the member user ids of a channel (`conversations.members`).
    async fn channel_members(&self, channel_id: &str) -> Result<Vec<String>, ApiError>;

    /// Rename a channel (`conversations.rename`).
    async fn rename_channel(
        &self,
        channel_id: &str,
        name: &str,
    ) -> Result<Conversation, ApiError>;

    /// Create a public channel (`conversations.create`).
    async fn create_channel(&self, name: &str) -> Result<Conversation, ApiError>;

    /// Set a channel's purpose text (`conversations.setPurpose`).
    async fn set_purpose(&self, channel_id: &str, purpose: &str) -> Result<(), ApiError>;

    /// Fetch a user record (`users.info`).
    async fn user_info(&self, user_id: &str) -> Result<User, ApiError>;

    /// Upgrade a user to multi-channel guest
    /// (`users.admin.setRestricted`).
    async fn set_restricted(&self, team_id: &str, user_id: &str) -> Result<(), ApiError>;

    /// Downgrade a user to single-channel guest, scoped to one channel
    /// (`users.admin.setUltraRestricted`).
    async fn set_ultra_restricted(
        &self,
        team_id: &str,
        user_id: &str,
        channel_id: &str,
    ) -> Result<(), ApiError>;

    /// Invite a batch of users into a channel (`conversations.invite`).
    async fn invite_users(&self, channel_id: &str, user_ids: &[String]) -> Result<(), ApiError>;
}
