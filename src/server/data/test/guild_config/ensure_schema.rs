use super::*;

/// Tests widening a table created by an older release.
///
/// Verifies that the role columns are appended and that existing rows keep their
/// values, with the new columns reading as NULL.
///
/// Expected: Ok with four columns added and the legacy row intact
#[tokio::test]
async fn widens_legacy_table() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(&LEGACY_GUILD_CONFIG)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild_id = GuildConfigFactory::new(db)
        .table(&LEGACY_GUILD_CONFIG)
        .column(columns::PREFIX, "!")
        .column(columns::BAN_LOG_CHANNEL_ID, "999")
        .build()
        .await?;

    let repo = GuildConfigRepository::new(db);
    let outcome = repo.ensure_schema().await?;

    assert!(!outcome.created_table);
    assert_eq!(
        outcome.added_columns,
        vec![
            columns::ROLES_COMMAND_LOG_CHANNEL_ID,
            columns::LOCKDOWN_ALLOWED_ROLES,
            columns::ROLE_PERMISSIONS,
            columns::ROLE_GROUPS,
        ]
    );

    let row = repo.get_by_guild_id(&guild_id).await?.unwrap();
    assert_eq!(row[columns::PREFIX].as_deref(), Some("!"));
    assert_eq!(row[columns::BAN_LOG_CHANNEL_ID].as_deref(), Some("999"));
    assert_eq!(row[columns::LOCKDOWN_ALLOWED_ROLES], None);

    Ok(())
}

/// Tests that running the schema check twice changes nothing the second time.
///
/// Expected: Ok with a no-op outcome
#[tokio::test]
async fn second_run_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(&LEGACY_GUILD_CONFIG)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildConfigRepository::new(db);
    repo.ensure_schema().await?;
    let outcome = repo.ensure_schema().await?;

    assert!(outcome.is_noop());

    Ok(())
}

/// Tests creating the table on an empty database.
///
/// Expected: Ok with the table created
#[tokio::test]
async fn creates_missing_table() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildConfigRepository::new(db);
    let outcome = repo.ensure_schema().await?;

    assert!(outcome.created_table);
    assert!(repo.get_by_guild_id("1").await?.is_none());

    Ok(())
}

/// Tests a repository bound to the legacy layout.
///
/// Expected: only legacy columns are read, the row decodes with defaults
#[tokio::test]
async fn reads_with_explicit_layout() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(&LEGACY_GUILD_CONFIG)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild_id = GuildConfigFactory::new(db)
        .table(&LEGACY_GUILD_CONFIG)
        .build()
        .await?;

    let repo = GuildConfigRepository::with_table(db, &LEGACY_GUILD_CONFIG);
    let row = repo.get_by_guild_id(&guild_id).await?.unwrap();

    assert_eq!(row.len(), LEGACY_GUILD_CONFIG.columns.len());
    assert_eq!(row[columns::PREFIX].as_deref(), Some(","));

    Ok(())
}
