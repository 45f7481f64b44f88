use super::*;

/// Tests reading a guild without a stored row.
///
/// Expected: Ok with the default record for that guild
#[tokio::test]
async fn returns_defaults_for_unknown_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = GuildConfigService::new(db);
    let config = service.get_guild_config(GuildId::new(11)).await?;

    assert_eq!(config, GuildConfig::new(GuildId::new(11)));
    assert_eq!(config.prefix, ",");
    assert!(config.lockdown_allowed_roles.is_empty());

    Ok(())
}

/// Tests decoding a stored row with structured columns.
///
/// Expected: Ok with channels and role lists decoded
#[tokio::test]
async fn decodes_stored_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildConfigFactory::new(db)
        .guild_id("12")
        .column(columns::LOCKDOWN_LOG_CHANNEL_ID, "300")
        .column(columns::LOCKDOWN_ALLOWED_ROLES, r#"["1","2"]"#)
        .column(columns::ROLE_PERMISSIONS, r#"{"5":["6","7"]}"#)
        .column(
            columns::ROLE_GROUPS,
            r#"{"event hosts":{"name":"Event Hosts","roles":["8"]}}"#,
        )
        .build()
        .await?;

    let service = GuildConfigService::new(db);
    let config = service.get_guild_config(GuildId::new(12)).await?;

    assert_eq!(config.lockdown_log_channel_id, Some(ChannelId::new(300)));
    assert_eq!(
        config.lockdown_allowed_roles,
        vec![RoleId::new(1), RoleId::new(2)]
    );
    assert!(config.can_grant(&[RoleId::new(5)], RoleId::new(7)));
    assert_eq!(
        config.role_group("EVENT HOSTS").map(|group| group.roles.clone()),
        Some(vec![RoleId::new(8)])
    );

    Ok(())
}

/// Tests reading a row whose role list is not valid JSON.
///
/// Expected: Err(StoreError::Parse) instead of a silently emptied list
#[tokio::test]
async fn corrupt_role_list_is_surfaced() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildConfigFactory::new(db)
        .guild_id("13")
        .column(columns::LOCKDOWN_ALLOWED_ROLES, "[1,")
        .build()
        .await?;

    let service = GuildConfigService::new(db);
    let result = service.get_guild_config(GuildId::new(13)).await;

    assert!(matches!(
        result,
        Err(StoreError::Parse { column, .. }) if column == columns::LOCKDOWN_ALLOWED_ROLES
    ));

    Ok(())
}

/// Tests reading a row written before the role columns existed.
///
/// Expected: Ok with legacy values kept and new fields at their defaults
#[tokio::test]
async fn reads_row_after_schema_upgrade() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(&LEGACY_GUILD_CONFIG)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildConfigFactory::new(db)
        .table(&LEGACY_GUILD_CONFIG)
        .guild_id("14")
        .column(columns::PREFIX, "$")
        .column(columns::PURGE_LOG_CHANNEL_ID, "44")
        .build()
        .await?;

    let service = GuildConfigService::new(db);
    service.ensure_schema().await?;
    let config = service.get_guild_config(GuildId::new(14)).await?;

    assert_eq!(config.prefix, "$");
    assert_eq!(config.purge_log_channel_id, Some(ChannelId::new(44)));
    assert_eq!(config.roles_command_log_channel_id, None);
    assert!(config.role_groups.is_empty());

    Ok(())
}

/// Tests reading a channel column that does not hold a snowflake.
///
/// Expected: Err(StoreError::Parse) instead of a silently unset channel
#[tokio::test]
async fn corrupt_channel_is_surfaced() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildConfigFactory::new(db)
        .guild_id("15")
        .column(columns::BAN_LOG_CHANNEL_ID, "not-a-channel")
        .build()
        .await?;

    let service = GuildConfigService::new(db);
    let result = service.get_guild_config(GuildId::new(15)).await;

    assert!(matches!(
        result,
        Err(StoreError::Parse { column, .. }) if column == columns::BAN_LOG_CHANNEL_ID
    ));

    Ok(())
}

/// Tests reading the roles log channel written under its stored column name.
///
/// Expected: Ok with the roles log channel resolved from `roles_command_log_channel_id`
#[tokio::test]
async fn reads_roles_command_log_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildConfigFactory::new(db)
        .guild_id("16")
        .column("roles_command_log_channel_id", "77")
        .build()
        .await?;

    let service = GuildConfigService::new(db);
    let config = service.get_guild_config(GuildId::new(16)).await?;

    assert_eq!(config.log_channel(LogKind::Roles), Some(ChannelId::new(77)));

    Ok(())
}
