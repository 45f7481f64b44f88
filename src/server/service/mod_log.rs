//! Moderation audit log.
//!
//! Mirrors moderation actions into the log channel a guild configured for the action
//! kind. Logging never fails a command: a missing channel is skipped and a failed send
//! is only reported through tracing.

use serenity::{
    all::{CreateAttachment, CreateEmbed, CreateMessage},
    http::Http,
};

use crate::server::model::guild_config::{GuildConfig, LogKind};

pub struct ModLog;

impl ModLog {
    /// Sends an entry to the configured log channel for `kind`.
    ///
    /// # Arguments
    /// - `http` - Discord HTTP client
    /// - `config` - Configuration of the guild the action happened in
    /// - `kind` - Action kind selecting the log channel
    /// - `embed` - Entry to post
    /// - `attachment` - Optional file posted with the entry
    ///
    /// # Returns
    /// - `true` - Entry posted
    /// - `false` - No channel configured or the send failed
    pub async fn send(
        http: &Http,
        config: &GuildConfig,
        kind: LogKind,
        embed: CreateEmbed,
        attachment: Option<CreateAttachment>,
    ) -> bool {
        let Some(channel_id) = config.log_channel(kind) else {
            tracing::debug!(
                "No {:?} log channel configured for guild {}",
                kind,
                config.guild_id
            );
            return false;
        };

        let mut message = CreateMessage::new().embed(embed);
        if let Some(attachment) = attachment {
            message = message.add_file(attachment);
        }

        if let Err(e) = channel_id.send_message(http, message).await {
            tracing::error!(
                "Failed to send {:?} log to channel {} in guild {}: {}",
                kind,
                channel_id,
                config.guild_id,
                e
            );
            return false;
        }

        true
    }
}
