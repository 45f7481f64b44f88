use super::*;

/// Tests the end-to-end configuration scenario for a fresh guild.
///
/// Verifies that setting the prefix and then a log channel keeps the prefix, and that
/// a reset returns the guild to the defaults.
///
/// Expected: Ok with each step observable through `get_guild_config`
#[tokio::test]
async fn set_then_reset_round_trip() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = GuildId::new(1001);
    let service = GuildConfigService::new(db);

    assert_eq!(service.get_guild_config(guild).await?.prefix, ",");

    service
        .set_config_value(
            guild,
            ConfigKey::Prefix,
            Some(ConfigValue::Text("!!".to_string())),
        )
        .await?;
    assert_eq!(service.get_guild_config(guild).await?.prefix, "!!");

    service
        .set_config_value(
            guild,
            ConfigKey::WarnLogChannel,
            Some(ConfigValue::Channel(ChannelId::new(501))),
        )
        .await?;
    let config = service.get_guild_config(guild).await?;
    assert_eq!(config.prefix, "!!");
    assert_eq!(config.warn_log_channel_id, Some(ChannelId::new(501)));

    service.reset_guild_config(guild).await?;
    assert_eq!(
        service.get_guild_config(guild).await?,
        GuildConfig::new(guild)
    );

    Ok(())
}

/// Tests that writing one field leaves every other field unchanged.
///
/// Expected: Ok with only the written field differing from the previous record
#[tokio::test]
async fn preserves_other_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildConfigFactory::new(db)
        .guild_id("1002")
        .column(columns::PREFIX, "?")
        .column(columns::KICK_LOG_CHANNEL_ID, "7")
        .column(columns::LOCKDOWN_ALLOWED_ROLES, r#"["3"]"#)
        .build()
        .await?;

    let guild = GuildId::new(1002);
    let service = GuildConfigService::new(db);
    let before = service.get_guild_config(guild).await?;

    let written = service
        .set_config_value(
            guild,
            ConfigKey::BanLogChannel,
            Some(ConfigValue::Channel(ChannelId::new(8))),
        )
        .await?;
    let after = service.get_guild_config(guild).await?;

    assert_eq!(after, written);

    let mut expected = before;
    expected.ban_log_channel_id = Some(ChannelId::new(8));
    assert_eq!(after, expected);

    Ok(())
}

/// Tests clearing a field with `None`.
///
/// Expected: Ok with the field back at its default and the row still present
#[tokio::test]
async fn none_clears_field() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildConfigFactory::new(db)
        .guild_id("1003")
        .column(columns::PREFIX, "%")
        .column(columns::MUTE_LOG_CHANNEL_ID, "9")
        .build()
        .await?;

    let guild = GuildId::new(1003);
    let service = GuildConfigService::new(db);

    service
        .set_config_value(guild, ConfigKey::MuteLogChannel, None)
        .await?;
    service.set_config_value(guild, ConfigKey::Prefix, None).await?;

    let config = service.get_guild_config(guild).await?;
    assert_eq!(config.mute_log_channel_id, None);
    assert_eq!(config.prefix, ",");

    Ok(())
}

/// Tests writing structured values.
///
/// Expected: Ok with role lists deduplicated and stored as JSON
#[tokio::test]
async fn stores_role_lists() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = GuildId::new(1004);
    let service = GuildConfigService::new(db);

    service
        .set_config_value(
            guild,
            ConfigKey::LockdownAllowedRoles,
            Some(ConfigValue::Roles(vec![
                RoleId::new(2),
                RoleId::new(1),
                RoleId::new(2),
            ])),
        )
        .await?;

    let config = service.get_guild_config(guild).await?;
    assert_eq!(
        config.lockdown_allowed_roles,
        vec![RoleId::new(2), RoleId::new(1)]
    );

    Ok(())
}

/// Tests writing a value of the wrong kind.
///
/// Expected: Err(StoreError::ValueMismatch) and nothing stored
#[tokio::test]
async fn rejects_mismatched_value() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = GuildId::new(1005);
    let service = GuildConfigService::new(db);

    let result = service
        .set_config_value(
            guild,
            ConfigKey::RolesLogChannel,
            Some(ConfigValue::Text("not a channel".to_string())),
        )
        .await;

    assert!(matches!(result, Err(StoreError::ValueMismatch { .. })));
    assert_eq!(
        service.get_guild_config(guild).await?,
        GuildConfig::new(guild)
    );

    Ok(())
}

/// Tests saving a record edited through the helpers.
///
/// Expected: Ok with permissions and groups persisted
#[tokio::test]
async fn saves_helper_edits() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = GuildId::new(1006);
    let service = GuildConfigService::new(db);

    let mut config = service.get_guild_config(guild).await?;
    config.grant_role_permission(RoleId::new(10), RoleId::new(11));
    config.create_role_group("Helpers");
    config.add_role_to_group("helpers", RoleId::new(11));
    service.save(&config).await?;

    let stored = service.get_guild_config(guild).await?;
    assert_eq!(stored, config);

    Ok(())
}

/// Tests writing role groups keyed by a mixed-case name.
///
/// Expected: Ok with the group found under any case and its roles deduplicated
#[tokio::test]
async fn role_groups_are_case_insensitive() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_config_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = GuildId::new(1007);
    let service = GuildConfigService::new(db);

    let groups = [(
        "Staff".to_string(),
        RoleGroup {
            name: "Staff".to_string(),
            roles: vec![RoleId::new(5), RoleId::new(5)],
        },
    )]
    .into_iter()
    .collect();

    let written = service
        .set_config_value(guild, ConfigKey::RoleGroups, Some(ConfigValue::RoleGroups(groups)))
        .await?;
    let stored = service.get_guild_config(guild).await?;

    assert_eq!(stored, written);
    let group = stored.role_group("staff").unwrap();
    assert_eq!(group.name, "Staff");
    assert_eq!(group.roles, vec![RoleId::new(5)]);
    assert!(stored.role_group("STAFF").is_some());

    Ok(())
}
