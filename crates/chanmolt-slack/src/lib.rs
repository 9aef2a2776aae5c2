//! Slack Web API client for chanmolt.
//!
//! [`SlackApiClient`] provides typed methods for the subset of the
//! Slack Web API the migration needs (`conversations.*`, `users.info`,
//! and the admin guest-tier endpoints) and implements the
//! [`SlackGateway`](chanmolt_core::SlackGateway) trait consumed by the
//! orchestrator.

pub mod client;
pub mod responses;

pub use client::SlackApiClient;
