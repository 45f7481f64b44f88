use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents, GuildId};

use crate::server::{
    bot::{command, handler, Data},
    config::Config,
    error::AppError,
    model::guild_config::GuildConfig,
    scheduler::deferred::DeferredActions,
    service::{
        guild_config::GuildConfigService,
        lockdown::{platform::SerenityLockdownPlatform, LockdownManager},
    },
};

/// Resolves the text command prefix of the guild a message was sent in.
///
/// Falls back to the default prefix in direct messages and when the configuration
/// cannot be read. Commands reading the same row still report the error.
async fn dynamic_prefix(
    ctx: poise::PartialContext<'_, Data, AppError>,
) -> Result<Option<String>, AppError> {
    let Some(guild_id) = ctx.guild_id else {
        return Ok(Some(migration::guild_config::DEFAULT_PREFIX.to_string()));
    };

    let config = GuildConfigService::new(&ctx.data.db)
        .get_guild_config(guild_id)
        .await;

    Ok(Some(prefix_or_default(guild_id, config.map_err(AppError::from))))
}

/// Picks the configured prefix, or the default one after logging why the
/// configuration could not be loaded.
///
/// # Arguments
/// - `guild_id` - Guild the message was sent in
/// - `config` - Result of loading that guild's configuration
fn prefix_or_default(guild_id: GuildId, config: Result<GuildConfig, AppError>) -> String {
    match config {
        Ok(config) => config.prefix,
        Err(e) => {
            tracing::error!("Failed to load prefix for guild {}: {}", guild_id, e);
            GuildConfig::new(guild_id).prefix
        }
    }
}

/// Reports command failures to the invoking user.
///
/// Command errors are logged and answered with `AppError::user_message`; every other
/// framework error (failed checks, argument parse errors, cooldowns) is left to
/// poise's default handling.
async fn on_error(error: poise::FrameworkError<'_, Data, AppError>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            match &error {
                AppError::BadRequest(_) => tracing::debug!(
                    "Rejected /{} in guild {:?}: {}",
                    ctx.command().qualified_name,
                    ctx.guild_id(),
                    error
                ),
                _ => tracing::error!(
                    "Command /{} failed in guild {:?}: {}",
                    ctx.command().qualified_name,
                    ctx.guild_id(),
                    error
                ),
            }

            let reply = poise::CreateReply::default()
                .content(error.user_message())
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                tracing::error!("Failed to send error reply: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!("Error while handling framework error: {}", e);
            }
        }
    }
}

/// Builds the Discord client with the command framework attached.
///
/// Commands are registered once the gateway connection is ready: in the development
/// guild when one is configured, globally otherwise. The lockdown manager is created
/// at the same point because it needs the client's HTTP handle.
///
/// # Arguments
/// - `config` - Application configuration
/// - `db` - Database connection shared with the commands
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError)` - Failed to build the client
pub async fn init_bot(config: &Config, db: DatabaseConnection) -> Result<Client, AppError> {
    // GUILD_MEMBERS and MESSAGE_CONTENT are privileged intents - must be enabled in the
    // Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    let dev_guild_id = config.discord_dev_guild_id;
    let unlock_grace = config.unlock_grace;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: command::all(),
            prefix_options: poise::PrefixFrameworkOptions {
                dynamic_prefix: Some(|ctx| Box::pin(dynamic_prefix(ctx))),
                mention_as_prefix: true,
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handler::handle_event(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                let commands = &framework.options().commands;
                match dev_guild_id {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
                        tracing::info!(
                            "Registered {} commands in guild {}",
                            commands.len(),
                            guild_id
                        );
                    }
                    None => {
                        poise::builtins::register_globally(ctx, commands).await?;
                        tracing::info!("Registered {} commands globally", commands.len());
                    }
                }

                let platform = SerenityLockdownPlatform::new(Arc::clone(&ctx.http));

                Ok(Data {
                    db,
                    lockdown: Arc::new(LockdownManager::new(Arc::new(platform), unlock_grace)),
                    transient_replies: DeferredActions::new(),
                })
            })
        })
        .build();

    let client = Client::builder(&config.discord_bot_token, intents)
        .framework(framework)
        .await?;

    Ok(client)
}

/// Starts the Discord bot in a blocking manner
///
/// Connects to the gateway and processes events until the client shuts down.
///
/// # Arguments
/// - `client` - Client built by `init_bot`
///
/// # Returns
/// - `Ok(())` if the bot ran and shut down cleanly
/// - `Err(AppError)` if the gateway connection fails
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
