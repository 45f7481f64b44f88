//! Declared layout of the `guild_config` table.
//!
//! One row per guild. The first block of columns is the original layout; the role
//! columns were appended later and are picked up by [`crate::ensure_table`] on
//! databases created before they existed.

use crate::schema::{ColumnSpec, TableSpec};

pub const TABLE: &str = "guild_config";
pub const KEY: &str = "guild_id";

pub const DEFAULT_PREFIX: &str = ",";

pub const PREFIX: &str = "prefix";
pub const WARN_LOG_CHANNEL_ID: &str = "warn_log_channel_id";
pub const KICK_LOG_CHANNEL_ID: &str = "kick_log_channel_id";
pub const BAN_LOG_CHANNEL_ID: &str = "ban_log_channel_id";
pub const MUTE_LOG_CHANNEL_ID: &str = "mute_log_channel_id";
pub const LOCKDOWN_LOG_CHANNEL_ID: &str = "lockdown_log_channel_id";
pub const PURGE_LOG_CHANNEL_ID: &str = "purge_log_channel_id";
pub const ROLES_COMMAND_LOG_CHANNEL_ID: &str = "roles_command_log_channel_id";
pub const LOCKDOWN_ALLOWED_ROLES: &str = "lockdown_allowed_roles";
pub const ROLE_PERMISSIONS: &str = "role_permissions";
pub const ROLE_GROUPS: &str = "role_groups";

pub static GUILD_CONFIG: TableSpec = TableSpec {
    name: TABLE,
    key: KEY,
    columns: &[
        ColumnSpec::with_default(PREFIX, DEFAULT_PREFIX),
        ColumnSpec::nullable(WARN_LOG_CHANNEL_ID),
        ColumnSpec::nullable(KICK_LOG_CHANNEL_ID),
        ColumnSpec::nullable(BAN_LOG_CHANNEL_ID),
        ColumnSpec::nullable(MUTE_LOG_CHANNEL_ID),
        ColumnSpec::nullable(LOCKDOWN_LOG_CHANNEL_ID),
        ColumnSpec::nullable(PURGE_LOG_CHANNEL_ID),
        // Appended with role delegation and lockdown role configuration
        ColumnSpec::nullable(ROLES_COMMAND_LOG_CHANNEL_ID),
        ColumnSpec::nullable(LOCKDOWN_ALLOWED_ROLES),
        ColumnSpec::nullable(ROLE_PERMISSIONS),
        ColumnSpec::nullable(ROLE_GROUPS),
    ],
};
