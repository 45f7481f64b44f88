//! Guild configuration service.
//!
//! Reads and writes per-guild configuration on top of `GuildConfigRepository`. Reads
//! of guilds without a stored row yield the default record; writes always store the
//! full row so a record is complete the moment it is first created.

use migration::EnsureOutcome;
use sea_orm::DatabaseConnection;
use serenity::all::GuildId;

use crate::server::{
    data::guild_config::GuildConfigRepository,
    error::store::StoreError,
    model::guild_config::{ConfigKey, ConfigValue, GuildConfig},
};

/// Service for reading and updating guild configuration.
///
/// Concurrent writes for the same guild are last-write-wins: each write reads the
/// current record, overlays one field and stores the whole row.
pub struct GuildConfigService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildConfigService<'a> {
    /// Creates a new GuildConfigService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `GuildConfigService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Brings the `guild_config` table up to its declared layout.
    ///
    /// Safe to call on every startup; a second call is a no-op.
    ///
    /// # Returns
    /// - `Ok(EnsureOutcome)` - What had to be created or added
    /// - `Err(StoreError::Storage)` - Failed to inspect or alter the schema
    pub async fn ensure_schema(&self) -> Result<EnsureOutcome, StoreError> {
        let repo = GuildConfigRepository::new(self.db);

        let outcome = repo.ensure_schema().await?;

        if outcome.created_table {
            tracing::info!("Created guild_config table");
        }
        for column in &outcome.added_columns {
            tracing::info!("Added column {} to guild_config", column);
        }

        Ok(outcome)
    }

    /// Gets the configuration of a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to read
    ///
    /// # Returns
    /// - `Ok(GuildConfig)` - Stored record, or the default record when none is stored
    /// - `Err(StoreError::Storage)` - Database error
    /// - `Err(StoreError::Parse)` - A stored JSON column could not be decoded
    pub async fn get_guild_config(&self, guild_id: GuildId) -> Result<GuildConfig, StoreError> {
        let repo = GuildConfigRepository::new(self.db);

        match repo.get_by_guild_id(&guild_id.to_string()).await? {
            Some(row) => GuildConfig::from_row(guild_id, &row),
            None => Ok(GuildConfig::new(guild_id)),
        }
    }

    /// Sets a single configuration field.
    ///
    /// Reads the current record (or the defaults), overlays `key` and writes the full
    /// row back, creating it when the guild had none. The store performs no semantic
    /// validation; prefix length and channel checks belong to the caller.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to update
    /// - `key` - Field to change
    /// - `value` - New value, or `None` to restore the field's default
    ///
    /// # Returns
    /// - `Ok(GuildConfig)` - Record as written
    /// - `Err(StoreError::ValueMismatch)` - `value` is not of the key's kind
    /// - `Err(StoreError::Storage)` - Database error
    /// - `Err(StoreError::Parse)` - The existing row could not be decoded
    pub async fn set_config_value(
        &self,
        guild_id: GuildId,
        key: ConfigKey,
        value: Option<ConfigValue>,
    ) -> Result<GuildConfig, StoreError> {
        let mut config = self.get_guild_config(guild_id).await?;

        config.apply(key, value)?;

        self.save(&config).await?;

        Ok(config)
    }

    /// Writes a whole record.
    ///
    /// Used by commands that edit several structured fields through the helpers on
    /// `GuildConfig` before saving.
    ///
    /// # Arguments
    /// - `config` - Record to store
    ///
    /// # Returns
    /// - `Ok(())` - Row written
    /// - `Err(StoreError::Storage)` - Database error
    pub async fn save(&self, config: &GuildConfig) -> Result<(), StoreError> {
        let repo = GuildConfigRepository::new(self.db);

        repo.upsert(&config.guild_id.to_string(), &config.to_row())
            .await?;

        Ok(())
    }

    /// Deletes the stored configuration of a guild.
    ///
    /// Subsequent reads return the default record. Idempotent.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to reset
    ///
    /// # Returns
    /// - `Ok(())` - Row removed or never existed
    /// - `Err(StoreError::Storage)` - Database error
    pub async fn reset_guild_config(&self, guild_id: GuildId) -> Result<(), StoreError> {
        let repo = GuildConfigRepository::new(self.db);

        if !repo.delete(&guild_id.to_string()).await? {
            tracing::debug!("Reset of guild {} found no stored configuration", guild_id);
        }

        Ok(())
    }
}
