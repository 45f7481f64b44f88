use super::*;

/// Tests deleting an existing row.
///
/// Expected: Ok(true) and the row is gone
#[tokio::test]
async fn deletes_existing_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild_id = GuildConfigFactory::new(db).build().await?;

    let repo = GuildConfigRepository::new(db);
    assert!(repo.delete(&guild_id).await?);
    assert!(repo.get_by_guild_id(&guild_id).await?.is_none());

    Ok(())
}

/// Tests deleting a guild without a row.
///
/// Expected: Ok(false)
#[tokio::test]
async fn delete_missing_row_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildConfigRepository::new(db);

    assert!(!repo.delete("404").await?);

    Ok(())
}
