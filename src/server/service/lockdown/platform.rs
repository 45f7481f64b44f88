//! Discord side effects of channel lockdown.
//!
//! `LockdownManager` only talks to Discord through the `LockdownPlatform` trait so the
//! lock state machine can be exercised without a gateway connection.

use std::sync::Arc;

use serenity::{
    all::{
        ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage, MessageId,
        PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, Timestamp,
    },
    async_trait,
    http::Http,
};

use crate::server::model::lockdown::SendPermission;

/// Discord operations needed to lock and unlock a channel.
#[async_trait]
pub trait LockdownPlatform: Send + Sync {
    /// Sets the `SEND_MESSAGES` bit of a role's overwrite in a channel.
    ///
    /// Other permission bits of the overwrite are left untouched.
    async fn set_send_permission(
        &self,
        channel_id: ChannelId,
        role_id: RoleId,
        permission: SendPermission,
    ) -> Result<(), serenity::Error>;

    /// Posts the "channel locked" reminder.
    ///
    /// # Returns
    /// - `Ok(MessageId)` - ID of the posted reminder
    /// - `Err(serenity::Error)` - Posting failed
    async fn post_reminder(&self, channel_id: ChannelId) -> Result<MessageId, serenity::Error>;

    /// Deletes a message.
    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), serenity::Error>;
}

/// `LockdownPlatform` backed by the Discord REST API.
pub struct SerenityLockdownPlatform {
    http: Arc<Http>,
}

impl SerenityLockdownPlatform {
    /// Creates a new SerenityLockdownPlatform.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

/// Builds the reminder embed posted into locked channels.
pub fn reminder_embed() -> CreateEmbed {
    CreateEmbed::new()
        .title("🔒 Channel Locked")
        .description(
            "This channel has been locked. Only users with specific roles can send messages.",
        )
        .color(0xFF0000)
        .timestamp(Timestamp::now())
        .footer(CreateEmbedFooter::new("Use /unlock to unlock the channel"))
}

#[async_trait]
impl LockdownPlatform for SerenityLockdownPlatform {
    async fn set_send_permission(
        &self,
        channel_id: ChannelId,
        role_id: RoleId,
        permission: SendPermission,
    ) -> Result<(), serenity::Error> {
        let kind = PermissionOverwriteType::Role(role_id);

        let existing = channel_id
            .to_channel(&self.http)
            .await?
            .guild()
            .and_then(|channel| {
                channel
                    .permission_overwrites
                    .into_iter()
                    .find(|overwrite| overwrite.kind == kind)
            });

        let (mut allow, mut deny) = existing
            .as_ref()
            .map(|overwrite| (overwrite.allow, overwrite.deny))
            .unwrap_or((Permissions::empty(), Permissions::empty()));

        allow.remove(Permissions::SEND_MESSAGES);
        deny.remove(Permissions::SEND_MESSAGES);

        match permission {
            SendPermission::Deny => deny.insert(Permissions::SEND_MESSAGES),
            SendPermission::Allow => allow.insert(Permissions::SEND_MESSAGES),
            SendPermission::Inherit => {}
        }

        if allow.is_empty() && deny.is_empty() {
            // An empty overwrite is the same as none at all
            if existing.is_some() {
                channel_id.delete_permission(&self.http, kind).await?;
            }
            return Ok(());
        }

        channel_id
            .create_permission(&self.http, PermissionOverwrite { allow, deny, kind })
            .await
    }

    async fn post_reminder(&self, channel_id: ChannelId) -> Result<MessageId, serenity::Error> {
        let message = CreateMessage::new().embed(reminder_embed());

        let sent = channel_id.send_message(&self.http, message).await?;

        Ok(sent.id)
    }

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), serenity::Error> {
        self.http.delete_message(channel_id, message_id, None).await
    }
}
