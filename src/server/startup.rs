use crate::server::{config::Config, error::AppError, service::guild_config::GuildConfigService};

/// Connects to the Sqlite database and brings the schema up to date.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then widens the `guild_config` table to its declared layout. Columns
/// added since the database was created are appended with their defaults; existing rows
/// keep their values. This function must complete successfully before the bot can read
/// or write guild configuration.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with the current schema
/// - `Err(AppError)` - Failed to connect to the database or to update the schema
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    GuildConfigService::new(&db).ensure_schema().await?;

    Ok(db)
}
