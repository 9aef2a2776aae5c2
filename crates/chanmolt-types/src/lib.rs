//! Core types for the chanmolt channel migration tool.
//!
//! This crate is I/O-free: it holds the domain types mirrored from the
//! Slack Web API ([`Conversation`], [`User`]), the per-run configuration
//! ([`MigrationConfig`]), and the error types shared by the orchestrator
//! and the API client ([`ApiError`], [`MigrateError`]).

pub mod config;
pub mod conversation;
pub mod error;
pub mod user;

pub use config::MigrationConfig;
pub use conversation::{Conversation, Purpose};
pub use error::{ApiError, MigrateError};
pub use user::User;
