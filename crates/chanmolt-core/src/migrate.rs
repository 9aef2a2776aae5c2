//! [`Migrator`] -- the channel migration run loop.
//!
//! Channels are processed one at a time, members within a channel one at
//! a time; there is no concurrent use of the gateway. A failure on one
//! channel is reported and the run moves on, with two exceptions that
//! abort the whole run: failing to list the private channels at all, and
//! failing to enumerate a channel's members.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, info, warn};

use chanmolt_types::config::MAX_CHANNEL_NAME_LEN;
use chanmolt_types::error::{MigrateError, Result};
use chanmolt_types::{Conversation, MigrationConfig, User};

use crate::traits::SlackGateway;

/// Outcome of a migration run, printed by the CLI.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Names of channels that migrated fully.
    pub converted: Vec<String>,

    /// Channels that failed, with the rendered error.
    pub failed: Vec<(String, String)>,

    /// Channels skipped by the allow-list or because they were not
    /// private.
    pub skipped: usize,
}

/// Drives the migration of a selected set of private channels.
///
/// Owns the run-scoped user cache: a user's record is fetched from the
/// gateway at most once per run, and later channels reuse the cached
/// restriction tier. The tier could change between channels; that
/// staleness is accepted.
pub struct Migrator {
    api: Arc<dyn SlackGateway>,
    config: MigrationConfig,
    users: HashMap<String, User>,
}

impl Migrator {
    /// Create a migrator over the given gateway.
    pub fn new(api: Arc<dyn SlackGateway>, config: MigrationConfig) -> Self {
        Self {
            api,
            config,
            users: HashMap::new(),
        }
    }

    /// Run the migration over every selected private channel.
    ///
    /// Returns an error only for run-fatal failures (channel listing,
    /// member enumeration); per-channel failures land in the report.
    pub async fn run(&mut self) -> Result<RunReport> {
        let channels = self
            .api
            .list_private_channels()
            .await
            .map_err(|source| MigrateError::ListChannels { source })?;

        let mut report = RunReport::default();

        for channel in channels {
            if !channel.is_private || !self.config.selects(&channel.name) {
                report.skipped += 1;
                continue;
            }

            info!(channel = %channel.name, "converting channel");

            match self.migrate_channel(&channel).await {
                Ok(()) => {
                    info!(channel = %channel.name, "converted channel");
                    report.converted.push(channel.name);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    error!(channel = %channel.name, error = %e, "conversion failed");
                    report.failed.push((channel.name, e.to_string()));
                }
            }
        }

        Ok(report)
    }

    /// Migrate a single channel.
    ///
    /// Wraps [`convert`](Self::convert) so that the deferred
    /// single-channel-guest reverts registered during the body run
    /// exactly once, on both exit paths, strictly after the invite step.
    pub async fn migrate_channel(&mut self, channel: &Conversation) -> Result<()> {
        let mut reverts: Vec<(User, String)> = Vec::new();
        let result = self.convert(channel, &mut reverts).await;

        for (user, channel_id) in reverts {
            match self
                .api
                .set_ultra_restricted(&user.team_id, &user.id, &channel_id)
                .await
            {
                Ok(()) => info!(user = %user.name, "put back as single-channel guest"),
                Err(e) => {
                    // Never propagated: the migration outcome is already
                    // decided by this point.
                    warn!(user = %user.id, error = %e, "unable to restore single-channel guest");
                }
            }
        }

        result
    }

    /// The migration body: rename, recreate, copy purpose, adjust guest
    /// tiers, and re-invite.
    async fn convert(
        &mut self,
        channel: &Conversation,
        reverts: &mut Vec<(User, String)>,
    ) -> Result<()> {
        let members = self
            .api
            .channel_members(&channel.id)
            .await
            .map_err(|source| MigrateError::Members {
                channel: channel.name.clone(),
                source,
            })?;

        let archived = self.config.archive_name(&channel.name);
        if archived.len() > MAX_CHANNEL_NAME_LEN {
            warn!(
                name = %archived,
                "archive name exceeds Slack's {MAX_CHANNEL_NAME_LEN}-character limit; the rename will likely fail"
            );
        }

        self.api
            .rename_channel(&channel.id, &archived)
            .await
            .map_err(|source| MigrateError::Rename {
                name: archived.clone(),
                source,
            })?;

        let new_channel = self
            .api
            .create_channel(&channel.name)
            .await
            .map_err(|source| MigrateError::Create {
                name: channel.name.clone(),
                source,
            })?;

        if !channel.purpose.value.is_empty() {
            self.api
                .set_purpose(&new_channel.id, &channel.purpose.value)
                .await
                .map_err(|source| MigrateError::SetPurpose {
                    channel: new_channel.name.clone(),
                    source,
                })?;
        }

        for member in &members {
            let user = match self.users.get(member) {
                Some(user) => user.clone(),
                None => {
                    let user = self.api.user_info(member).await.map_err(|source| {
                        MigrateError::UserInfo {
                            user: member.clone(),
                            source,
                        }
                    })?;
                    self.users.insert(member.clone(), user.clone());
                    user
                }
            };

            if !user.is_ultra_restricted {
                continue;
            }

            info!(user = %user.id, name = %user.real_name, "member is a single-channel guest");

            match self.api.set_restricted(&user.team_id, &user.id).await {
                Ok(()) => info!(user = %user.id, "upgraded to multi-channel guest"),
                Err(e) => {
                    // That member may simply fail to be re-invited later.
                    warn!(
                        user = %user.id,
                        name = %user.real_name,
                        error = %e,
                        "unable to upgrade to multi-channel guest"
                    );
                    continue;
                }
            }

            if self.config.revert_to_single_channel_guest {
                reverts.push((user, new_channel.id.clone()));
            }
        }

        // Slack may still be propagating the rename and tier changes;
        // inviting too early can bounce the former single-channel guests.
        tokio::time::sleep(self.config.invite_delay).await;

        let invitees: Vec<String> = members
            .iter()
            .filter(|m| Some(m.as_str()) != new_channel.creator.as_deref())
            .cloned()
            .collect();

        if !invitees.is_empty() {
            self.api
                .invite_users(&new_channel.id, &invitees)
                .await
                .map_err(|source| MigrateError::Invite {
                    channel: new_channel.name.clone(),
                    source,
                })?;
        }

        Ok(())
    }
}
