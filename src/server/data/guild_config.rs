//! Guild configuration data repository for database operations.
//!
//! This module provides the `GuildConfigRepository` for reading and writing rows of the
//! declared `guild_config` table. The table's column set is not fixed at compile time:
//! the repository selects and writes whatever columns the `TableSpec` it was built with
//! declares, which lets tests run it against older or trimmed-down layouts.

use migration::{guild_config::GUILD_CONFIG, EnsureOutcome, TableSpec};
use sea_orm::{
    sea_query::{Alias, Expr, ExprTrait, OnConflict, Query},
    ConnectionTrait, DatabaseConnection, DbErr,
};

use crate::server::model::guild_config::GuildConfigRow;

/// Repository providing database operations for guild configuration rows.
///
/// Holds a reference to the database connection and the declared table layout the
/// rows are read and written against.
pub struct GuildConfigRepository<'a> {
    db: &'a DatabaseConnection,
    table: &'a TableSpec,
}

impl<'a> GuildConfigRepository<'a> {
    /// Creates a new GuildConfigRepository for the current `guild_config` declaration.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `GuildConfigRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self::with_table(db, &GUILD_CONFIG)
    }

    /// Creates a repository bound to an explicit table declaration.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `table` - Declared table layout to read and write
    ///
    /// # Returns
    /// - `GuildConfigRepository` - New repository instance
    pub fn with_table(db: &'a DatabaseConnection, table: &'a TableSpec) -> Self {
        Self { db, table }
    }

    /// Brings the stored table in line with the declaration.
    ///
    /// # Returns
    /// - `Ok(EnsureOutcome)` - What had to be created or added
    /// - `Err(DbErr)` - Failed to inspect or alter the schema
    pub async fn ensure_schema(&self) -> Result<EnsureOutcome, DbErr> {
        migration::ensure_table(self.db, self.table).await
    }

    /// Gets the stored row for a guild.
    ///
    /// Selects every declared column. Values are returned as raw text; decoding into
    /// the domain model happens in `GuildConfig::from_row`.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID as a string slice
    ///
    /// # Returns
    /// - `Ok(Some(GuildConfigRow))` - Row found
    /// - `Ok(None)` - No row exists for this guild
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_guild_id(&self, guild_id: &str) -> Result<Option<GuildConfigRow>, DbErr> {
        let select = Query::select()
            .columns(self.table.column_names().map(Alias::new))
            .from(Alias::new(self.table.name))
            .and_where(Expr::col(Alias::new(self.table.key)).eq(guild_id))
            .to_owned();

        let Some(result) = self.db.query_one(&select).await? else {
            return Ok(None);
        };

        let mut row = GuildConfigRow::new();
        for column in self.table.column_names() {
            row.insert(column, result.try_get::<Option<String>>("", column)?);
        }

        Ok(Some(row))
    }

    /// Creates or replaces the stored row for a guild.
    ///
    /// Writes every declared column in a single statement, inserting the row when it
    /// does not exist and overwriting all values on conflict. Declared columns missing
    /// from `row` are written as NULL, except columns with a declared default which
    /// receive that default.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID as a string slice
    /// - `row` - Values keyed by column name
    ///
    /// # Returns
    /// - `Ok(())` - Row written
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert(&self, guild_id: &str, row: &GuildConfigRow) -> Result<(), DbErr> {
        let mut names = vec![Alias::new(self.table.key)];
        let mut values = vec![Expr::value(guild_id)];

        for column in self.table.columns {
            let value = row
                .get(column.name)
                .cloned()
                .flatten()
                .or_else(|| column.default.map(str::to_string));

            names.push(Alias::new(column.name));
            values.push(Expr::value(value));
        }

        let insert = Query::insert()
            .into_table(Alias::new(self.table.name))
            .columns(names)
            .values(values)
            .map_err(|e| DbErr::Custom(e.to_string()))?
            .on_conflict(
                OnConflict::column(Alias::new(self.table.key))
                    .update_columns(self.table.column_names().map(Alias::new))
                    .to_owned(),
            )
            .to_owned();

        self.db.execute(&insert).await?;

        Ok(())
    }

    /// Deletes the stored row for a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID as a string slice
    ///
    /// # Returns
    /// - `Ok(true)` - A row was deleted
    /// - `Ok(false)` - No row existed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, guild_id: &str) -> Result<bool, DbErr> {
        let delete = Query::delete()
            .from_table(Alias::new(self.table.name))
            .and_where(Expr::col(Alias::new(self.table.key)).eq(guild_id))
            .to_owned();

        let result = self.db.execute(&delete).await?;

        Ok(result.rows_affected() > 0)
    }
}
