use std::time::Duration;

use serenity::all::GuildId;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::guild_config::parse_snowflake,
};

const DEFAULT_DATABASE_URL: &str = "sqlite://senko.db?mode=rwc";
const DEFAULT_UNLOCK_GRACE_SECS: u64 = 2;

pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    /// Guild to register commands in during development. Commands are registered
    /// globally when unset.
    pub discord_dev_guild_id: Option<GuildId>,

    /// How long an unlocked channel ignores message events.
    pub unlock_grace: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            discord_dev_guild_id: optional_var("DISCORD_DEV_GUILD_ID")
                .map(|value| {
                    parse_snowflake(&value).map(GuildId::new).ok_or_else(|| {
                        ConfigError::InvalidEnvVar {
                            name: "DISCORD_DEV_GUILD_ID".to_string(),
                            reason: format!("'{value}' is not a guild id"),
                        }
                    })
                })
                .transpose()?,
            unlock_grace: optional_var("UNLOCK_GRACE_SECS")
                .map(|value| {
                    value.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                        name: "UNLOCK_GRACE_SECS".to_string(),
                        reason: e.to_string(),
                    })
                })
                .transpose()?
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(DEFAULT_UNLOCK_GRACE_SECS)),
        })
    }
}

/// Reads an environment variable, treating an empty value as unset.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
