//! Guild configuration row factory.
//!
//! Inserts raw `guild_config` rows. Columns that are not set explicitly take their
//! SQL defaults, which is exactly what a row written by an older release looks like.

use migration::{guild_config::GUILD_CONFIG, TableSpec};
use sea_orm::{
    sea_query::{Alias, Expr, Query},
    ConnectionTrait, DatabaseConnection, DbErr,
};

use crate::factory::helpers::next_id;

/// Factory for inserting guild configuration rows with customizable columns.
///
/// # Example
///
/// ```rust,ignore
/// let guild_id = GuildConfigFactory::new(&db)
///     .column("prefix", "!")
///     .column("ban_log_channel_id", "42")
///     .build()
///     .await?;
/// ```
pub struct GuildConfigFactory<'a> {
    db: &'a DatabaseConnection,
    table: &'a TableSpec,
    guild_id: String,
    columns: Vec<(&'static str, Option<String>)>,
}

impl<'a> GuildConfigFactory<'a> {
    /// Creates a new factory targeting the current `guild_config` declaration.
    ///
    /// Defaults:
    /// - guild_id: auto-incremented numeric id
    /// - no explicit columns (SQL defaults apply)
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            table: &GUILD_CONFIG,
            guild_id: (900_000_000 + next_id()).to_string(),
            columns: Vec::new(),
        }
    }

    /// Targets a different declaration of the table, e.g. an older layout.
    pub fn table(mut self, table: &'a TableSpec) -> Self {
        self.table = table;
        self
    }

    /// Sets the guild id.
    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    /// Sets a column to a raw stored value.
    pub fn column(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.columns.push((name, Some(value.into())));
        self
    }

    /// Sets a column to NULL.
    pub fn null_column(mut self, name: &'static str) -> Self {
        self.columns.push((name, None));
        self
    }

    /// Inserts the row.
    ///
    /// # Returns
    /// - `Ok(String)` - Guild id of the inserted row
    /// - `Err(DbErr)` - Insert failed
    pub async fn build(self) -> Result<String, DbErr> {
        let mut names = vec![Alias::new(self.table.key)];
        let mut values = vec![Expr::value(self.guild_id.clone())];

        for (name, value) in self.columns {
            names.push(Alias::new(name));
            values.push(Expr::value(value));
        }

        let insert = Query::insert()
            .into_table(Alias::new(self.table.name))
            .columns(names)
            .values_panic(values)
            .to_owned();

        self.db.execute(&insert).await?;

        Ok(self.guild_id)
    }
}

/// Inserts a default guild configuration row.
///
/// # Returns
/// - `Ok(String)` - Guild id of the inserted row
/// - `Err(DbErr)` - Insert failed
pub async fn create_guild_config(db: &DatabaseConnection) -> Result<String, DbErr> {
    GuildConfigFactory::new(db).build().await
}
