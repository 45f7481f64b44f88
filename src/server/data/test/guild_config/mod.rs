use crate::server::{
    data::guild_config::GuildConfigRepository, error::AppError,
    model::guild_config::GuildConfigRow,
};
use migration::guild_config::{self as columns, GUILD_CONFIG};
use test_utils::{
    builder::TestBuilder, factory::guild_config::GuildConfigFactory,
    fixture::guild_config::LEGACY_GUILD_CONFIG,
};

mod delete;
mod ensure_schema;
mod get_by_guild_id;
