use super::*;

/// Tests reading a guild that has no stored row.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildConfigRepository::new(db);
    let result = repo.get_by_guild_id("123").await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests reading a stored row.
///
/// Verifies that every declared column is present in the returned row, with unset
/// columns carrying their SQL default.
///
/// Expected: Ok(Some) with the stored prefix and channel, NULL elsewhere
#[tokio::test]
async fn returns_every_declared_column() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild_id = GuildConfigFactory::new(db)
        .column(columns::PREFIX, "!")
        .column(columns::BAN_LOG_CHANNEL_ID, "555")
        .build()
        .await?;

    let repo = GuildConfigRepository::new(db);
    let row = repo.get_by_guild_id(&guild_id).await?.unwrap();

    assert_eq!(row.len(), GUILD_CONFIG.columns.len());
    assert_eq!(row[columns::PREFIX].as_deref(), Some("!"));
    assert_eq!(row[columns::BAN_LOG_CHANNEL_ID].as_deref(), Some("555"));
    assert_eq!(row[columns::ROLE_GROUPS], None);

    Ok(())
}

/// Tests that rows of other guilds are not returned.
///
/// Expected: Ok(Some) with only the requested guild's values
#[tokio::test]
async fn filters_by_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildConfigFactory::new(db)
        .guild_id("1")
        .column(columns::PREFIX, "a")
        .build()
        .await?;
    GuildConfigFactory::new(db)
        .guild_id("2")
        .column(columns::PREFIX, "b")
        .build()
        .await?;

    let repo = GuildConfigRepository::new(db);
    let row = repo.get_by_guild_id("2").await?.unwrap();

    assert_eq!(row[columns::PREFIX].as_deref(), Some("b"));

    Ok(())
}
