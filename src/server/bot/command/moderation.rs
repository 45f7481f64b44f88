//! `/ban`, `/unban`, `/kick`, `/mute` and `/unmute`.
//!
//! Each action is confirmed to the moderator (privately when `silent` is set) and
//! mirrored to the guild's log channel for its kind.

use poise::CreateReply;
use serenity::all::{CreateEmbed, CreateEmbedFooter, Member, Timestamp, User};

use crate::server::{
    bot::{
        command::{guild_id, hierarchy, invoker},
        Context,
    },
    error::AppError,
    model::guild_config::LogKind,
    service::{guild_config::GuildConfigService, mod_log::ModLog},
    util::parse::parse_duration,
};

const NO_REASON: &str = "No reason provided.";

/// Ban a user
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "User to ban"] user: User,
    #[description = "Reason for the ban"] reason: Option<String>,
    #[description = "Only show the confirmation to you"] silent: Option<bool>,
) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let reason = reason.unwrap_or_else(|| NO_REASON.to_string());
    let silent = silent.unwrap_or(false);
    reject_self(&ctx, &user, "ban")?;

    // Users who already left can still be banned
    if let Ok(member) = guild_id.member(ctx.serenity_context(), user.id).await {
        reject_outranked(&ctx, &member, "ban").await?;
    }

    guild_id
        .ban_with_reason(ctx.http(), user.id, 0, &reason)
        .await?;

    tracing::info!(
        "{} banned user {} in guild {}",
        ctx.author().name,
        user.id,
        guild_id
    );

    confirm(&ctx, silent, format!("**Banned** {} for **Reason:** {}", user.name, reason)).await?;

    let embed = action_embed(&ctx, "🔨 User Banned", 0xFF0000, &user, &reason, silent);
    log(&ctx, LogKind::Ban, embed).await
}

/// Unban a user
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS",
    aliases("ub"),
    user_cooldown = 3
)]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "User to unban"] user: User,
    #[description = "Reason for the unban"] reason: Option<String>,
    #[description = "Only show the confirmation to you"] silent: Option<bool>,
) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let reason = reason.unwrap_or_else(|| NO_REASON.to_string());
    let silent = silent.unwrap_or(false);

    if let Err(e) = ctx
        .http()
        .remove_ban(guild_id, user.id, Some(reason.as_str()))
        .await
    {
        tracing::warn!(
            "Failed to unban user {} in guild {}: {}",
            user.id,
            guild_id,
            e
        );
        return Err(AppError::BadRequest(format!(
            "Could not unban **{}**. They may not be banned from this server.",
            user.name
        )));
    }

    tracing::info!(
        "{} unbanned user {} in guild {}",
        ctx.author().name,
        user.id,
        guild_id
    );

    confirm(&ctx, silent, format!("**Unbanned** {} for **Reason:** {}", user.name, reason)).await?;

    let embed = action_embed(&ctx, "✨ User Unbanned", 0x00FF00, &user, &reason, silent);
    log(&ctx, LogKind::Ban, embed).await
}

/// Kick a user
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "KICK_MEMBERS",
    required_bot_permissions = "KICK_MEMBERS"
)]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "User to kick"] user: User,
    #[description = "Reason for the kick"] reason: Option<String>,
    #[description = "Only show the confirmation to you"] silent: Option<bool>,
) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let reason = reason.unwrap_or_else(|| NO_REASON.to_string());
    let silent = silent.unwrap_or(false);
    reject_self(&ctx, &user, "kick")?;

    let member = guild_id
        .member(ctx.serenity_context(), user.id)
        .await
        .map_err(|_| AppError::BadRequest("That user is not in this server.".to_string()))?;
    reject_outranked(&ctx, &member, "kick").await?;

    guild_id
        .kick_with_reason(ctx.http(), user.id, &reason)
        .await?;

    tracing::info!(
        "{} kicked user {} in guild {}",
        ctx.author().name,
        user.id,
        guild_id
    );

    confirm(&ctx, silent, format!("**Kicked** {} for **Reason:** {}", user.name, reason)).await?;

    let embed = action_embed(&ctx, "👢 User Kicked", 0xFFA500, &user, &reason, silent);
    log(&ctx, LogKind::Kick, embed).await
}

/// Mute (time out) a user for a while
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MODERATE_MEMBERS",
    required_bot_permissions = "MODERATE_MEMBERS",
    user_cooldown = 3
)]
pub async fn mute(
    ctx: Context<'_>,
    #[description = "User to mute"] user: User,
    #[description = "Duration, e.g. 5s, 10m, 1h, 2d, 1w (max 28 days)"] duration: String,
    #[description = "Reason for the mute"] reason: Option<String>,
    #[description = "Only show the confirmation to you"] silent: Option<bool>,
) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let reason = reason.unwrap_or_else(|| NO_REASON.to_string());
    let silent = silent.unwrap_or(false);
    reject_self(&ctx, &user, "mute")?;

    let length = parse_duration(&duration).ok_or_else(|| {
        AppError::BadRequest(
            "Invalid duration. Use formats like 5s, 10m, 1h, 2d or 1w, up to 28 days.".to_string(),
        )
    })?;

    let mut member = guild_id
        .member(ctx.serenity_context(), user.id)
        .await
        .map_err(|_| AppError::BadRequest("That user is not in this server.".to_string()))?;
    reject_outranked(&ctx, &member, "mute").await?;

    let now = Timestamp::now().unix_timestamp();
    if member
        .communication_disabled_until
        .is_some_and(|until| until.unix_timestamp() > now)
    {
        return Err(AppError::BadRequest(format!(
            "{} is already muted.",
            user.name
        )));
    }

    let unmute_at = now + length.as_secs() as i64;
    let until = Timestamp::from_unix_timestamp(unmute_at)
        .map_err(|e| AppError::InternalError(format!("Invalid timeout end {unmute_at}: {e}")))?;

    member
        .disable_communication_until_datetime(ctx.serenity_context(), until)
        .await?;

    tracing::info!(
        "{} muted user {} for {} in guild {}",
        ctx.author().name,
        user.id,
        duration,
        guild_id
    );

    confirm(
        &ctx,
        silent,
        format!(
            "**Muted** {} for {} | **Reason:** {}",
            user.name, duration, reason
        ),
    )
    .await?;

    let embed = action_embed(&ctx, "🔇 User Muted", 0xC2185B, &user, &reason, silent)
        .field("Duration", duration, true)
        .field("Unmuted At", format!("<t:{unmute_at}:F>"), true);
    log(&ctx, LogKind::Mute, embed).await
}

/// Remove a user's mute
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MODERATE_MEMBERS",
    required_bot_permissions = "MODERATE_MEMBERS",
    user_cooldown = 3
)]
pub async fn unmute(
    ctx: Context<'_>,
    #[description = "User to unmute"] user: User,
    #[description = "Reason for the unmute"] reason: Option<String>,
    #[description = "Only show the confirmation to you"] silent: Option<bool>,
) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let reason = reason.unwrap_or_else(|| NO_REASON.to_string());
    let silent = silent.unwrap_or(false);

    let mut member = guild_id
        .member(ctx.serenity_context(), user.id)
        .await
        .map_err(|_| AppError::BadRequest("That user is not in this server.".to_string()))?;
    reject_outranked(&ctx, &member, "unmute").await?;

    let now = Timestamp::now().unix_timestamp();
    if !member
        .communication_disabled_until
        .is_some_and(|until| until.unix_timestamp() > now)
    {
        return Err(AppError::BadRequest(format!("{} is not muted.", user.name)));
    }

    member.enable_communication(ctx.serenity_context()).await?;

    tracing::info!(
        "{} unmuted user {} in guild {}",
        ctx.author().name,
        user.id,
        guild_id
    );

    confirm(&ctx, silent, format!("**Unmuted** {} | **Reason:** {}", user.name, reason)).await?;

    let embed = action_embed(&ctx, "🔊 User Unmuted", 0x00FF00, &user, &reason, silent);
    log(&ctx, LogKind::Mute, embed).await
}

fn reject_self(ctx: &Context<'_>, user: &User, action: &str) -> Result<(), AppError> {
    if user.id == ctx.author().id {
        return Err(AppError::BadRequest(format!("You cannot {action} yourself.")));
    }
    if user.id == ctx.framework().bot_id {
        return Err(AppError::BadRequest(format!("I cannot {action} myself.")));
    }
    Ok(())
}

/// Refuses to act on members whose highest role is at or above the moderator's.
async fn reject_outranked(
    ctx: &Context<'_>,
    target: &Member,
    action: &str,
) -> Result<(), AppError> {
    let invoker = invoker(ctx).await?;
    let hierarchy = hierarchy(ctx)?;

    if !hierarchy.may_moderate(ctx.author().id, &invoker.roles, &target.roles) {
        return Err(AppError::BadRequest(format!(
            "You cannot {action} {} because their highest role is equal to or higher than yours.",
            target.user.name
        )));
    }

    Ok(())
}

/// Replies to the moderator, privately when `silent` is set.
async fn confirm(ctx: &Context<'_>, silent: bool, content: String) -> Result<(), AppError> {
    let content = if silent {
        format!("**SILENT:** {content}")
    } else {
        content
    };

    ctx.send(CreateReply::default().content(content).ephemeral(silent))
        .await?;

    Ok(())
}

fn action_embed(
    ctx: &Context<'_>,
    title: &str,
    color: u32,
    user: &User,
    reason: &str,
    silent: bool,
) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .color(color)
        .field("User", format!("{} ({})", user.name, user.id), true)
        .field(
            "Moderator",
            format!("{} ({})", ctx.author().name, ctx.author().id),
            true,
        )
        .field("Reason", reason, false)
        .field("Silent", if silent { "Yes" } else { "No" }, true)
        .thumbnail(user.face())
        .footer(CreateEmbedFooter::new(format!("User ID: {}", user.id)))
        .timestamp(Timestamp::now())
}

async fn log(ctx: &Context<'_>, kind: LogKind, embed: CreateEmbed) -> Result<(), AppError> {
    let guild_id = guild_id(ctx)?;
    let config = GuildConfigService::new(&ctx.data().db)
        .get_guild_config(guild_id)
        .await?;

    ModLog::send(ctx.http(), &config, kind, embed, None).await;

    Ok(())
}
