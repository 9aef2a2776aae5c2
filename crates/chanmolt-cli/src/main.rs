//! `chanmolt` -- archive-and-recreate migration for Slack private channels.
//!
//! For each selected private channel the tool renames the original into
//! an archive name, creates a fresh channel under the original name,
//! copies the purpose, and re-invites the members. Single-channel guests
//! are upgraded to multi-channel guests so they can be invited, and can
//! optionally be downgraded again afterwards, scoped to the new channel.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::warn;

use chanmolt_core::Migrator;
use chanmolt_slack::SlackApiClient;
use chanmolt_types::MigrationConfig;

/// Token prefix of the admin web tokens the guest-tier endpoints need.
const ADMIN_TOKEN_PREFIX: &str = "xoxs-";

/// Archive and recreate Slack private channels, re-inviting their members.
#[derive(Parser)]
#[command(name = "chanmolt", about = "Slack private-channel migration tool", version)]
struct Cli {
    /// Token used for the Slack API. Use the web token (xoxs-) of an
    /// admin for best experience; other token types cannot change guest
    /// restriction tiers.
    #[arg(long)]
    token: String,

    /// Single-channel guests are upgraded to multi-channel guests so
    /// they can be moved. With this flag they are converted back to
    /// single-channel guests on the new channel afterwards (they lose
    /// access to the archived channel).
    #[arg(long)]
    revert_to_single_channel_guest: bool,

    /// Formatting to apply to the archived channel name; must contain
    /// %s exactly once. Note that Slack caps channel names at 21
    /// characters.
    #[arg(long, default_value = "%s-old")]
    old_channel_format: String,

    /// Seconds to wait between the guest-tier adjustments and the
    /// re-invite, while Slack propagates the changes.
    #[arg(long, default_value_t = 5)]
    invite_delay_secs: u64,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,

    /// Names of the channels to migrate. Without arguments every
    /// private channel visible to the token is migrated.
    channels: Vec<String>,
}

impl Cli {
    fn into_config(self) -> MigrationConfig {
        MigrationConfig {
            token: self.token,
            revert_to_single_channel_guest: self.revert_to_single_channel_guest,
            archive_format: self.old_channel_format,
            only_channels: self.channels,
            invite_delay: Duration::from_secs(self.invite_delay_secs),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    if !cli.token.starts_with(ADMIN_TOKEN_PREFIX) {
        warn!(
            "tokens that do not start with {ADMIN_TOKEN_PREFIX} are known not to work \
             for changing users to multi-channel guests"
        );
    }

    let config = cli.into_config();
    config.validate()?;

    let api = Arc::new(SlackApiClient::new(config.token.clone()));
    let mut migrator = Migrator::new(api, config);

    let report = migrator.run().await?;

    println!(
        "{} converted, {} failed, {} skipped",
        report.converted.len(),
        report.failed.len(),
        report.skipped
    );
    for (channel, error) in &report.failed {
        println!("  failed {channel}: {error}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_without_error() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_requires_token() {
        let result = Cli::try_parse_from(["chanmolt"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["chanmolt", "--token", "xoxs-abc"]).unwrap();
        assert_eq!(cli.old_channel_format, "%s-old");
        assert_eq!(cli.invite_delay_secs, 5);
        assert!(!cli.revert_to_single_channel_guest);
        assert!(cli.channels.is_empty());
    }

    #[test]
    fn cli_positional_channels_become_allow_list() {
        let cli = Cli::try_parse_from([
            "chanmolt",
            "--token",
            "xoxs-abc",
            "project-x",
            "project-y",
        ])
        .unwrap();
        let config = cli.into_config();
        assert_eq!(config.only_channels, vec!["project-x", "project-y"]);
        assert!(config.selects("project-x"));
        assert!(!config.selects("project-z"));
    }

    #[test]
    fn cli_revert_flag_round_trips() {
        let cli = Cli::try_parse_from([
            "chanmolt",
            "--token",
            "xoxs-abc",
            "--revert-to-single-channel-guest",
        ])
        .unwrap();
        assert!(cli.into_config().revert_to_single_channel_guest);
    }

    #[test]
    fn cli_custom_format_is_validated_downstream() {
        let cli = Cli::try_parse_from([
            "chanmolt",
            "--token",
            "xoxs-abc",
            "--old-channel-format",
            "no-slot",
        ])
        .unwrap();
        assert!(cli.into_config().validate().is_err());
    }

    #[test]
    fn cli_invite_delay_flag() {
        let cli = Cli::try_parse_from([
            "chanmolt",
            "--token",
            "xoxs-abc",
            "--invite-delay-secs",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.into_config().invite_delay, Duration::ZERO);
    }
}
