//! `/config` - view and change a guild's configuration.

use poise::CreateReply;
use serenity::all::{ChannelType, CreateEmbed, Timestamp};

use crate::server::{
    bot::{
        command::{guild_id, mention_roles},
        Context,
    },
    error::AppError,
    model::guild_config::{ConfigKey, ConfigKind, ConfigValue, GuildConfig},
    service::guild_config::GuildConfigService,
    util::parse::{parse_channel, truncate},
};

/// Longest prefix a guild may configure.
const MAX_PREFIX_CHARS: usize = 5;
/// Longest echo of a value in command replies.
const MAX_ECHO_CHARS: usize = 50;

/// View or change this server's bot configuration
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    subcommands("view", "set", "remove", "reset"),
    subcommand_required,
    user_cooldown = 3
)]
pub async fn config(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Show the current configuration
#[poise::command(slash_command, prefix_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn view(ctx: Context<'_>) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let config = GuildConfigService::new(&ctx.data().db)
        .get_guild_config(guild_id)
        .await?;

    let embed = ConfigKey::ALL.into_iter().fold(
        CreateEmbed::new()
            .title("⚙️ Server Configuration")
            .color(0xFFB6C1)
            .timestamp(Timestamp::now()),
        |embed, key| embed.field(key.label(), describe(&config, key), true),
    );

    ctx.send(CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Change a setting
#[poise::command(slash_command, prefix_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn set(
    ctx: Context<'_>,
    #[description = "Setting to change, e.g. prefix or ban_log_channel_id"] key: String,
    #[description = "New value"]
    #[rest]
    value: String,
) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let key = parse_key(&key)?;
    let value = parse_value(key, &value)?;

    if let ConfigValue::Channel(channel_id) = value {
        let is_text_channel = ctx
            .guild()
            .map(|guild| {
                guild
                    .channels
                    .get(&channel_id)
                    .is_some_and(|channel| channel.kind == ChannelType::Text)
            })
            .unwrap_or(false);

        if !is_text_channel {
            return Err(AppError::BadRequest(
                "That is not a text channel in this server.".to_string(),
            ));
        }
    }

    let config = GuildConfigService::new(&ctx.data().db)
        .set_config_value(guild_id, key, Some(value))
        .await?;

    tracing::info!("Set {} for guild {}", key, guild_id);

    ctx.say(format!(
        "✅ **{}** set to {}",
        key.label(),
        truncate(&describe(&config, key), MAX_ECHO_CHARS)
    ))
    .await?;

    Ok(())
}

/// Clear a setting, restoring its default
#[poise::command(slash_command, prefix_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Setting to clear"] key: String,
) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let key = parse_key(&key)?;

    GuildConfigService::new(&ctx.data().db)
        .set_config_value(guild_id, key, None)
        .await?;

    tracing::info!("Cleared {} for guild {}", key, guild_id);

    ctx.say(format!("✅ **{}** cleared", key.label())).await?;

    Ok(())
}

/// Delete every setting of this server
#[poise::command(slash_command, prefix_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn reset(ctx: Context<'_>) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;

    GuildConfigService::new(&ctx.data().db)
        .reset_guild_config(guild_id)
        .await?;

    tracing::info!("Reset configuration for guild {}", guild_id);

    ctx.say("✅ Configuration reset to defaults").await?;

    Ok(())
}

fn parse_key(input: &str) -> Result<ConfigKey, AppError> {
    input.parse::<ConfigKey>().map_err(|e| {
        let known = ConfigKey::ALL
            .iter()
            .map(|key| format!("`{key}`"))
            .collect::<Vec<_>>()
            .join(", ");
        AppError::BadRequest(format!("{e}. Available keys: {known}"))
    })
}

/// Converts a typed value into the shape `key` stores.
///
/// Only syntax is checked here; whether a channel exists is checked against the guild.
fn parse_value(key: ConfigKey, input: &str) -> Result<ConfigValue, AppError> {
    let input = input.trim();

    match key.kind() {
        ConfigKind::Text => {
            if input.is_empty() {
                return Err(AppError::BadRequest("Prefix cannot be empty.".to_string()));
            }
            if input.chars().count() > MAX_PREFIX_CHARS {
                return Err(AppError::BadRequest(format!(
                    "Prefix must be {MAX_PREFIX_CHARS} characters or less."
                )));
            }
            Ok(ConfigValue::Text(input.to_string()))
        }
        ConfigKind::Channel => parse_channel(input).map(ConfigValue::Channel).ok_or_else(|| {
            AppError::BadRequest("Please provide a channel mention or channel id.".to_string())
        }),
        ConfigKind::Roles => Err(AppError::BadRequest(
            "Use `/lockdownroles` to change the lockdown roles.".to_string(),
        )),
        ConfigKind::RolePermissions | ConfigKind::RoleGroups => Err(AppError::BadRequest(
            "Use `/role setup` and `/role group` to change role delegation.".to_string(),
        )),
    }
}

/// Renders the current value of `key` for display.
fn describe(config: &GuildConfig, key: ConfigKey) -> String {
    match config.value(key) {
        None => "Not set".to_string(),
        Some(ConfigValue::Text(text)) => format!("`{text}`"),
        Some(ConfigValue::Channel(channel_id)) => format!("<#{channel_id}>"),
        Some(ConfigValue::Roles(roles)) => mention_roles(&roles),
        Some(ConfigValue::RolePermissions(permissions)) => {
            format!("{} giver role(s)", permissions.len())
        }
        Some(ConfigValue::RoleGroups(groups)) => groups
            .values()
            .map(|group| group.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    }
}
