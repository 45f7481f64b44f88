use serenity::all::Message;

use crate::server::bot::Data;

/// Handles message creation in a channel.
///
/// Forwards guild messages from users to the lockdown manager, which moves the lock
/// reminder below the new message if the channel is locked. Bot messages are skipped,
/// which also covers the reminders the bot posts itself.
///
/// # Arguments
/// - `data` - Shared bot state
/// - `message` - The new message
pub async fn handle_message(data: &Data, message: &Message) {
    if message.author.bot || message.guild_id.is_none() {
        return;
    }

    data.lockdown
        .on_message(message.channel_id, message.id)
        .await;
}
