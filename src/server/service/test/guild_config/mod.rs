use crate::server::{
    error::{store::StoreError, AppError},
    model::guild_config::{ConfigKey, ConfigValue, GuildConfig, LogKind, RoleGroup},
    service::guild_config::GuildConfigService,
};
use migration::guild_config as columns;
use serenity::all::{ChannelId, GuildId, RoleId};
use test_utils::{
    builder::TestBuilder, factory::guild_config::GuildConfigFactory,
    fixture::guild_config::LEGACY_GUILD_CONFIG,
};

mod get_guild_config;
mod set_config_value;
