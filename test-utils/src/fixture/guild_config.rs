//! Historical layouts of the `guild_config` table.

use migration::{
    guild_config::{
        BAN_LOG_CHANNEL_ID, DEFAULT_PREFIX, KEY, KICK_LOG_CHANNEL_ID, LOCKDOWN_LOG_CHANNEL_ID,
        MUTE_LOG_CHANNEL_ID, PREFIX, PURGE_LOG_CHANNEL_ID, TABLE, WARN_LOG_CHANNEL_ID,
    },
    ColumnSpec, TableSpec,
};

/// Layout of `guild_config` before the role columns were appended.
pub static LEGACY_GUILD_CONFIG: TableSpec = TableSpec {
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
    ],
};
