//! `/purge` - bulk delete recent messages with a transcript in the purge log.

use std::time::Duration;

use chrono::Utc;
use poise::CreateReply;
use serenity::all::{
    CreateAttachment, CreateEmbed, CreateEmbedFooter, GetMessages, Message, MessageId, Timestamp,
};

use crate::server::{
    bot::{command::guild_id, Context},
    error::AppError,
    model::guild_config::LogKind,
    service::{guild_config::GuildConfigService, mod_log::ModLog},
};

/// Discord refuses to bulk delete messages older than this.
const BULK_DELETE_MAX_AGE_SECS: i64 = 14 * 24 * 60 * 60;
/// How long the purge confirmation stays visible.
const CONFIRMATION_LIFETIME: Duration = Duration::from_secs(5);

/// Delete recent messages in this channel
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_MESSAGES"
)]
pub async fn purge(
    ctx: Context<'_>,
    #[description = "Number of messages to delete"]
    #[min = 1]
    #[max = 100]
    amount: u8,
    #[description = "Reason for the purge"] reason: Option<String>,
) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let channel_id = ctx.channel_id();
    let reason = reason.unwrap_or_else(|| "No reason provided".to_string());

    let poise::Context::Application(app) = ctx else {
        return Err(AppError::InternalError(
            "purge is only available as a slash command".to_string(),
        ));
    };
    let interaction = app.interaction.clone();
    let invocation = MessageId::new(ctx.id());

    ctx.defer_ephemeral().await?;

    let messages = channel_id
        .messages(ctx.http(), GetMessages::new().limit(amount).before(invocation))
        .await?;
    if messages.is_empty() {
        return Err(AppError::BadRequest(
            "There are no messages to delete.".to_string(),
        ));
    }

    let now = Timestamp::now().unix_timestamp();
    let mut messages: Vec<Message> = messages
        .into_iter()
        .filter(|message| is_purgeable(message, invocation, now))
        .collect();
    if messages.is_empty() {
        return Err(AppError::BadRequest(
            "These messages are too old to be deleted.".to_string(),
        ));
    }
    messages.sort_by_key(|message| message.timestamp.unix_timestamp());

    let channel_name = channel_id
        .name(ctx.serenity_context())
        .await
        .unwrap_or_else(|_| channel_id.to_string());
    let header = TranscriptHeader {
        channel_name: &channel_name,
        moderator: &ctx.author().name,
        moderator_id: ctx.author().id.get(),
        reason: &reason,
    };
    let entries: Vec<TranscriptEntry> = messages.iter().map(TranscriptEntry::from).collect();
    let transcript = transcript(&header, &entries);

    let ids: Vec<MessageId> = messages.iter().map(|message| message.id).collect();
    channel_id.delete_messages(ctx.http(), &ids).await?;

    tracing::info!(
        "{} purged {} messages in channel {} of guild {}",
        ctx.author().name,
        ids.len(),
        channel_id,
        guild_id
    );

    let reply = ctx
        .send(
            CreateReply::default()
                .content(format!("🧹 Deleted **{}** message(s).", ids.len()))
                .ephemeral(true),
        )
        .await?;
    let confirmation = reply.message().await?;
    let http = ctx.serenity_context().http.clone();
    let reply_id = confirmation.id;
    ctx.data()
        .transient_replies
        .schedule(reply_id, CONFIRMATION_LIFETIME, async move {
            if let Err(e) = interaction.delete_response(&http).await {
                tracing::debug!("Could not delete purge confirmation {}: {}", reply_id, e);
            }
        });

    let embed = CreateEmbed::new()
        .title("✏️ Message(s) Purged")
        .color(0xFFB6C1)
        .field("Amount Deleted", ids.len().to_string(), true)
        .field(
            "Deleted By",
            format!("{} ({})", ctx.author().name, ctx.author().id),
            true,
        )
        .field("Channel", format!("<#{channel_id}>"), true)
        .field("Reason", reason, false)
        .thumbnail(ctx.author().face())
        .footer(CreateEmbedFooter::new(format!(
            "User ID: {} | Messages attached below",
            ctx.author().id
        )))
        .timestamp(Timestamp::now());
    let attachment = CreateAttachment::bytes(
        transcript.into_bytes(),
        format!("purge-{}-{}.txt", channel_name, Utc::now().timestamp_millis()),
    );

    let config = GuildConfigService::new(&ctx.data().db)
        .get_guild_config(guild_id)
        .await?;
    ModLog::send(ctx.http(), &config, LogKind::Purge, embed, Some(attachment)).await;

    Ok(())
}

/// Whether a message sent at `sent_at` can still be bulk deleted at `now` (unix seconds).
fn is_bulk_deletable(sent_at: i64, now: i64) -> bool {
    now - sent_at < BULK_DELETE_MAX_AGE_SECS
}

/// Whether `message` is one of the purge targets: sent before the command was invoked and
/// still young enough to bulk delete.
///
/// # Arguments
/// - `message` - A fetched channel message
/// - `invocation` - Id of the `/purge` interaction
/// - `now` - Current unix time in seconds
fn is_purgeable(message: &Message, invocation: MessageId, now: i64) -> bool {
    precedes(message.id, invocation) && is_bulk_deletable(message.timestamp.unix_timestamp(), now)
}

/// Snowflakes grow with time, so a smaller id was created earlier.
fn precedes(message: MessageId, invocation: MessageId) -> bool {
    message < invocation
}

/// Who purged which channel and why.
struct TranscriptHeader<'a> {
    channel_name: &'a str,
    moderator: &'a str,
    moderator_id: u64,
    reason: &'a str,
}

/// The parts of a purged message kept in the transcript.
struct TranscriptEntry {
    sent_at: String,
    author: String,
    author_id: u64,
    content: String,
    attachments: Vec<String>,
    embeds: usize,
}

impl From<&Message> for TranscriptEntry {
    fn from(message: &Message) -> Self {
        Self {
            sent_at: message.timestamp.to_string(),
            author: message.author.name.clone(),
            author_id: message.author.id.get(),
            content: message.content.clone(),
            attachments: message
                .attachments
                .iter()
                .map(|attachment| attachment.filename.clone())
                .collect(),
            embeds: message.embeds.len(),
        }
    }
}

/// Renders purged messages, oldest first, as a plain text transcript.
fn transcript(header: &TranscriptHeader<'_>, entries: &[TranscriptEntry]) -> String {
    let mut out = format!(
        "Messages purged from #{} on {}\nPurged by {} | (ID: {})\nReason: {}\nTotal messages: {}\n\n{}\n\n",
        header.channel_name,
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        header.moderator,
        header.moderator_id,
        header.reason,
        entries.len(),
        "=".repeat(50)
    );

    for (index, entry) in entries.iter().enumerate() {
        let content = if entry.content.is_empty() {
            "[No text content]"
        } else {
            entry.content.as_str()
        };

        out.push_str(&format!(
            "[{}] {}\nAuthor: {} ({})\nContent: {}\n",
            index + 1,
            entry.sent_at,
            entry.author,
            entry.author_id,
            content
        ));

        if !entry.attachments.is_empty() {
            out.push_str(&format!("Attachments: {}\n", entry.attachments.join(", ")));
        }
        if entry.embeds > 0 {
            out.push_str(&format!("Embeds: {} embed(s)\n", entry.embeds));
        }

        out.push_str(&format!("\n{}\n\n", "-".repeat(30)));
    }

    out
}
