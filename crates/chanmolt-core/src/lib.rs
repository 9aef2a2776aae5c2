//! Migration orchestrator for chanmolt.
//!
//! Drives the end-to-end "molt" of Slack private channels: rename the
//! old channel into an archive name, create a fresh replacement, copy
//! the purpose, adjust guest restriction tiers, and re-invite the
//! members.
//!
//! # Modules
//!
//! - [`traits`] -- the [`SlackGateway`] seam between the orchestrator and
//!   the Web API client
//! - [`migrate`] -- the [`Migrator`] run loop and per-channel procedure

pub mod migrate;
pub mod traits;

pub use migrate::{Migrator, RunReport};
pub use traits::SlackGateway;
