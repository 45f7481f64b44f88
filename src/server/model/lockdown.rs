//! Domain models for channel lockdown.

use serenity::all::{ChannelId, GuildId, MessageId, RoleId};

/// Lock entry of a single channel.
///
/// Held in memory only; locks do not survive a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockState {
    /// Guild the channel belongs to. Doubles as the id of the guild's `@everyone` role.
    pub guild_id: GuildId,
    /// Locked channel.
    pub channel_id: ChannelId,
    /// Reminder message currently kept at the bottom of the channel, if any.
    pub sticky_message_id: Option<MessageId>,
    /// Roles allowed to keep talking, captured when the lock was taken.
    ///
    /// Unlock reverts exactly these roles, even if the guild's configuration changed
    /// in the meantime.
    pub allowed_role_ids: Vec<RoleId>,
}

/// Desired `SEND_MESSAGES` state of a role's permission overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPermission {
    /// Explicitly denied.
    Deny,
    /// Explicitly allowed.
    Allow,
    /// Neither allowed nor denied; inherited from the role and category.
    Inherit,
}
