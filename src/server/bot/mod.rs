//! Discord bot integration.
//!
//! This module wires the poise command framework onto a Serenity client. Commands are
//! registered as slash commands and, where the bot historically accepted them, as
//! prefix commands using each guild's configured prefix. Gateway events that are not
//! commands reach `handler`, which keeps lock reminders at the bottom of locked
//! channels.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild, channel and role cache used to resolve command arguments
//! - `GUILD_MESSAGES` - Message events for prefix commands and lock reminders
//! - `GUILD_MEMBERS` - Member lookups for role and moderation commands (privileged intent)
//! - `MESSAGE_CONTENT` - Reading prefix commands (privileged intent)
//!
//! Note: `GUILD_MEMBERS` and `MESSAGE_CONTENT` are privileged intents and must be
//! explicitly enabled in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::MessageId;

use crate::server::{
    error::AppError, scheduler::deferred::DeferredActions, service::lockdown::LockdownManager,
};

/// State shared by every command and event handler.
pub struct Data {
    pub db: DatabaseConnection,
    pub lockdown: Arc<LockdownManager>,
    /// Command replies scheduled for removal, keyed by the reply's message id.
    pub transient_replies: DeferredActions<MessageId>,
}

pub type Context<'a> = poise::Context<'a, Data, AppError>;
