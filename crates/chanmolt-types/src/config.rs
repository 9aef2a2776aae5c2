//! Per-run configuration for the migration tool.

use std::time::Duration;

use crate::error::MigrateError;

/// The substitution slot in the archive-name template.
const NAME_SLOT: &str = "%s";

/// Slack rejects channel names longer than this.
pub const MAX_CHANNEL_NAME_LEN: usize = 21;

/// Configuration for one migration run.
///
/// Built by the CLI from its flags; everything is run-scoped, nothing is
/// persisted.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Slack API credential. Guest-tier changes only work with an admin
    /// web token (`xoxs-...`).
    pub token: String,

    /// Downgrade upgraded single-channel guests again after each channel
    /// migration, scoped to the newly created channel.
    pub revert_to_single_channel_guest: bool,

    /// Template applied to the original channel name to produce the
    /// archive name. Must contain `%s` exactly once.
    pub archive_format: String,

    /// Allow-list of channel names to process. Empty means every private
    /// channel visible to the token.
    pub only_channels: Vec<String>,

    /// Pause between the guest-tier adjustments and the invite batch,
    /// while Slack propagates the changes.
    pub invite_delay: Duration,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            revert_to_single_channel_guest: false,
            archive_format: "%s-old".into(),
            only_channels: Vec::new(),
            invite_delay: Duration::from_secs(5),
        }
    }
}

impl MigrationConfig {
    /// Check that the archive template is usable.
    ///
    /// The template must contain the `%s` slot exactly once; anything
    /// else would silently drop or duplicate the channel name.
    pub fn validate(&self) -> Result<(), MigrateError> {
        match self.archive_format.matches(NAME_SLOT).count() {
            1 => Ok(()),
            0 => Err(MigrateError::ConfigInvalid {
                reason: format!(
                    "archive format {:?} is missing the {NAME_SLOT} slot",
                    self.archive_format
                ),
            }),
            n => Err(MigrateError::ConfigInvalid {
                reason: format!(
                    "archive format {:?} contains {n} {NAME_SLOT} slots, expected one",
                    self.archive_format
                ),
            }),
        }
    }

    /// Render the archive name for a channel.
    pub fn archive_name(&self, channel_name: &str) -> String {
        self.archive_format.replacen(NAME_SLOT, channel_name, 1)
    }

    /// Whether a channel name passes the allow-list.
    pub fn selects(&self, channel_name: &str) -> bool {
        self.only_channels.is_empty()
            || self.only_channels.iter().any(|n| n == channel_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_name_substitutes_once() {
        let config = MigrationConfig::default();
        assert_eq!(config.archive_name("project-x"), "project-x-old");
    }

    #[test]
    fn archive_name_with_prefix_template() {
        let config = MigrationConfig {
            archive_format: "zz-%s".into(),
            ..Default::default()
        };
        assert_eq!(config.archive_name("general"), "zz-general");
    }

    #[test]
    fn validate_accepts_default() {
        assert!(MigrationConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_slot() {
        let config = MigrationConfig {
            archive_format: "archived".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn validate_rejects_repeated_slot() {
        let config = MigrationConfig {
            archive_format: "%s-%s".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("2"));
    }

    #[test]
    fn empty_allow_list_selects_everything() {
        let config = MigrationConfig::default();
        assert!(config.selects("anything"));
    }

    #[test]
    fn allow_list_filters_by_name() {
        let config = MigrationConfig {
            only_channels: vec!["keep-me".into()],
            ..Default::default()
        };
        assert!(config.selects("keep-me"));
        assert!(!config.selects("skip-me"));
    }
}
