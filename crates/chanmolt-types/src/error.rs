//! Error types for the chanmolt migration tool.
//!
//! [`ApiError`] covers failures of individual Slack Web API calls.
//! [`MigrateError`] wraps an [`ApiError`] with the migration step that
//! failed and the channel or user it was aimed at, so every reported
//! failure names its target.

use thiserror::Error;

/// Errors from a single Slack Web API call.
///
/// Payloads are plain strings so this crate stays free of HTTP
/// dependencies; the client crate maps transport errors into these
/// variants.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// The HTTP request failed at the transport level or with an
    /// unexpected status code.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The token was rejected (HTTP 401/403).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Slack answered with `ok: false`.
    #[error("slack api {method} failed: {reason}")]
    Api {
        /// The Web API method that was called (e.g. `conversations.rename`).
        method: String,
        /// Slack's error string (e.g. `name_taken`).
        reason: String,
    },

    /// Slack answered `ok: true` but the expected payload was missing
    /// or unparseable.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from the per-channel migration procedure.
///
/// Each variant tags the remote operation that failed with the target
/// name or id. [`MigrateError::ListChannels`] and
/// [`MigrateError::Members`] abort the whole run; the rest abort only
/// the channel they occurred on.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MigrateError {
    /// Enumerating private channels failed. Fatal to the run.
    #[error("failed to list private channels: {source}")]
    ListChannels {
        #[source]
        source: ApiError,
    },

    /// Enumerating a channel's members failed. Fatal to the run.
    #[error("failed to list members of {channel}: {source}")]
    Members {
        /// Name of the channel whose members could not be listed.
        channel: String,
        #[source]
        source: ApiError,
    },

    /// Renaming the old channel to its archive name failed.
    #[error("failed to rename channel to {name}: {source}")]
    Rename {
        /// The archive name the rename was aiming for.
        name: String,
        #[source]
        source: ApiError,
    },

    /// Creating the replacement channel failed.
    #[error("failed to create channel {name}: {source}")]
    Create {
        /// Name of the replacement channel.
        name: String,
        #[source]
        source: ApiError,
    },

    /// Copying the purpose text onto the replacement channel failed.
    #[error("failed to set purpose of {channel}: {source}")]
    SetPurpose {
        /// Name of the replacement channel.
        channel: String,
        #[source]
        source: ApiError,
    },

    /// Fetching a member's user record failed.
    #[error("failed to get user info for {user}: {source}")]
    UserInfo {
        /// Id of the member whose record could not be fetched.
        user: String,
        #[source]
        source: ApiError,
    },

    /// Inviting the member list into the replacement channel failed.
    #[error("failed to invite members back into {channel}: {source}")]
    Invite {
        /// Name of the replacement channel.
        channel: String,
        #[source]
        source: ApiError,
    },

    /// The run configuration is invalid.
    #[error("invalid config: {reason}")]
    ConfigInvalid {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl MigrateError {
    /// Whether this error aborts the whole run rather than just the
    /// channel it occurred on.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MigrateError::ListChannels { .. } | MigrateError::Members { .. }
        )
    }
}

/// A convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, MigrateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = ApiError::RequestFailed("connection reset".into());
        assert_eq!(err.to_string(), "request failed: connection reset");

        let err = ApiError::Api {
            method: "conversations.rename".into(),
            reason: "name_taken".into(),
        };
        assert_eq!(
            err.to_string(),
            "slack api conversations.rename failed: name_taken"
        );
    }

    #[test]
    fn migrate_error_names_target() {
        let err = MigrateError::Rename {
            name: "project-x-old".into(),
            source: ApiError::Api {
                method: "conversations.rename".into(),
                reason: "not_authed".into(),
            },
        };
        assert!(err.to_string().contains("project-x-old"));
    }

    #[test]
    fn migrate_error_preserves_source() {
        use std::error::Error as _;

        let err = MigrateError::UserInfo {
            user: "U123".into(),
            source: ApiError::AuthFailed("bad token".into()),
        };
        let source = err.source().expect("source should be set");
        assert!(source.to_string().contains("bad token"));
    }

    #[test]
    fn fatality_split() {
        let fatal = MigrateError::Members {
            channel: "general".into(),
            source: ApiError::RequestFailed("boom".into()),
        };
        assert!(fatal.is_fatal());

        let recoverable = MigrateError::Invite {
            channel: "general".into(),
            source: ApiError::RequestFailed("boom".into()),
        };
        assert!(!recoverable.is_fatal());
    }
}
