//! Error types and command error handling.
//!
//! This module provides the application's error hierarchy. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and is the error type
//! of every bot command. The framework's error hook (see `bot::start`) decides what the
//! invoking user gets to see: `BadRequest` messages are shown verbatim while every other
//! variant is logged and answered with a generic message.

pub mod config;
pub mod lockdown;
pub mod store;

use thiserror::Error;

use crate::server::error::{config::ConfigError, lockdown::LockdownError, store::StoreError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most variants
/// use `#[from]` for automatic error conversion so command bodies can use `?` on
/// service and Discord calls directly.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Prevents the bot from starting.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    ///
    /// Raised directly by startup (connecting, schema migration). Errors from the
    /// configuration store arrive wrapped in `StoreErr` instead.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Guild configuration store error.
    #[error(transparent)]
    StoreErr(#[from] StoreError),

    /// Channel lockdown error.
    ///
    /// `AlreadyLocked` and `NotLocked` are normally handled by the lock commands
    /// before they reach the error hook.
    #[error(transparent)]
    LockdownErr(#[from] LockdownError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Invalid command input.
    ///
    /// The message is shown to the invoking user as-is.
    ///
    /// # Fields
    /// - Message describing what was invalid about the input
    #[error("{0}")]
    BadRequest(String),

    /// Internal error with custom message.
    ///
    /// The provided message is logged but a generic message is returned to the user.
    ///
    /// # Fields
    /// - Detailed error message for server-side logging
    #[error("{0}")]
    InternalError(String),
}

/// Lets command bodies use `?` on serenity calls.
///
/// The error is boxed on the way in; see `AppError::DiscordErr`.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Message suitable for showing to the user who invoked a command.
    ///
    /// # Returns
    /// - The error message for `BadRequest`
    /// - A generic message for every other variant
    pub fn user_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            _ => "An error occurred while executing this command.".to_string(),
        }
    }
}
