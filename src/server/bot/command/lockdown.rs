//! `/lock`, `/unlock` and `/lockdownroles`.

use poise::CreateReply;
use serenity::all::{CreateEmbed, CreateEmbedFooter, Role, Timestamp};

use crate::server::{
    bot::{
        command::{guild_id, mention_roles},
        Context,
    },
    error::{lockdown::LockdownError, AppError},
    model::guild_config::LogKind,
    service::{guild_config::GuildConfigService, mod_log::ModLog},
};

/// Lock this channel so only the lockdown roles can talk
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_CHANNELS"
)]
pub async fn lock(ctx: Context<'_>) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let channel_id = ctx.channel_id();
    let config = GuildConfigService::new(&ctx.data().db)
        .get_guild_config(guild_id)
        .await?;

    let state = match ctx
        .data()
        .lockdown
        .lock(guild_id, channel_id, config.lockdown_allowed_roles.clone())
        .await
    {
        Ok(state) => state,
        Err(LockdownError::AlreadyLocked(_)) => {
            ctx.send(
                CreateReply::default()
                    .content("This channel is already locked.")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        "{} locked channel {} in guild {}",
        ctx.author().name,
        channel_id,
        guild_id
    );

    ctx.send(
        CreateReply::default()
            .content("🔒 Channel locked.")
            .ephemeral(true),
    )
    .await?;

    let embed = CreateEmbed::new()
        .title("🔒 Channel Locked")
        .color(0xFF0000)
        .field("Channel", format!("<#{channel_id}>"), true)
        .field("Locked By", format!("<@{}>", ctx.author().id), true)
        .field("Allowed Roles", mention_roles(&state.allowed_role_ids), false)
        .footer(CreateEmbedFooter::new(format!(
            "User ID: {}",
            ctx.author().id
        )))
        .timestamp(Timestamp::now());
    ModLog::send(ctx.http(), &config, LogKind::Lockdown, embed, None).await;

    Ok(())
}

/// Unlock this channel
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_CHANNELS"
)]
pub async fn unlock(ctx: Context<'_>) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let channel_id = ctx.channel_id();

    let state = match ctx.data().lockdown.unlock(channel_id).await {
        Ok(state) => state,
        Err(LockdownError::NotLocked(_)) => {
            ctx.send(
                CreateReply::default()
                    .content("This channel is not locked.")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        "{} unlocked channel {} in guild {}",
        ctx.author().name,
        channel_id,
        guild_id
    );

    ctx.send(
        CreateReply::default()
            .content("🔓 Channel unlocked.")
            .ephemeral(true),
    )
    .await?;

    let config = GuildConfigService::new(&ctx.data().db)
        .get_guild_config(guild_id)
        .await?;
    let embed = CreateEmbed::new()
        .title("🔓 Channel Unlocked")
        .color(0x00FF00)
        .field("Channel", format!("<#{channel_id}>"), true)
        .field("Unlocked By", format!("<@{}>", ctx.author().id), true)
        .field("Reverted Roles", mention_roles(&state.allowed_role_ids), false)
        .footer(CreateEmbedFooter::new(format!(
            "User ID: {}",
            ctx.author().id
        )))
        .timestamp(Timestamp::now());
    ModLog::send(ctx.http(), &config, LogKind::Lockdown, embed, None).await;

    Ok(())
}

/// Manage the roles that can still talk in locked channels
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    subcommands("lockdownroles_add", "lockdownroles_remove", "lockdownroles_list"),
    subcommand_required,
    user_cooldown = 3
)]
pub async fn lockdownroles(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Let a role talk in locked channels
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    rename = "add"
)]
pub async fn lockdownroles_add(
    ctx: Context<'_>,
    #[description = "Role to allow"] role: Role,
) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let service = GuildConfigService::new(&ctx.data().db);

    let mut config = service.get_guild_config(guild_id).await?;
    if !config.add_lockdown_role(role.id) {
        return Err(AppError::BadRequest(format!(
            "{} is already a lockdown role.",
            role.name
        )));
    }
    service.save(&config).await?;

    ctx.say(format!(
        "✅ {} can now talk in locked channels. Channels locked before this change keep their roles.",
        role.name
    ))
    .await?;

    Ok(())
}

/// Stop a role from talking in locked channels
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    rename = "remove"
)]
pub async fn lockdownroles_remove(
    ctx: Context<'_>,
    #[description = "Role to remove"] role: Role,
) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let service = GuildConfigService::new(&ctx.data().db);

    let mut config = service.get_guild_config(guild_id).await?;
    if !config.remove_lockdown_role(role.id) {
        return Err(AppError::BadRequest(format!(
            "{} is not a lockdown role.",
            role.name
        )));
    }
    service.save(&config).await?;

    ctx.say(format!("✅ {} removed from the lockdown roles.", role.name))
        .await?;

    Ok(())
}

/// List the lockdown roles and the currently locked channels
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    rename = "list"
)]
pub async fn lockdownroles_list(ctx: Context<'_>) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let config = GuildConfigService::new(&ctx.data().db)
        .get_guild_config(guild_id)
        .await?;

    let locked = ctx.data().lockdown.locked_channels(guild_id);
    let locked = if locked.is_empty() {
        "None".to_string()
    } else {
        locked
            .iter()
            .map(|state| format!("<#{}>", state.channel_id))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let embed = CreateEmbed::new()
        .title("🔒 Lockdown Roles")
        .color(0xFFB6C1)
        .field(
            "Allowed Roles",
            mention_roles(&config.lockdown_allowed_roles),
            false,
        )
        .field("Locked Channels", locked, false);

    ctx.send(CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
