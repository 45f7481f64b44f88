use super::*;

/// Tests locking an unlocked channel.
///
/// Verifies that @everyone is denied, the snapshot roles are allowed and the
/// reminder is recorded as the sticky message.
///
/// Expected: Ok with Locked state and sticky message 1000
#[tokio::test]
async fn locks_unlocked_channel() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    let state = manager.lock(GUILD, CHANNEL, vec![ROLE_1, ROLE_2]).await?;

    assert!(manager.is_locked(CHANNEL));
    assert_eq!(state.sticky_message_id, Some(MessageId::new(1000)));
    assert_eq!(state.allowed_role_ids, vec![ROLE_1, ROLE_2]);
    assert_eq!(platform.permission(EVERYONE), Some(SendPermission::Deny));
    assert_eq!(platform.permission(ROLE_1), Some(SendPermission::Allow));
    assert_eq!(platform.permission(ROLE_2), Some(SendPermission::Allow));
    assert_eq!(platform.visible_reminders(), vec![MessageId::new(1000)]);

    Ok(())
}

/// Tests locking a channel that is already locked.
///
/// Expected: Err(AlreadyLocked) with state, overwrites and reminders unchanged
#[tokio::test]
async fn already_locked_leaves_state_unchanged() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    manager.lock(GUILD, CHANNEL, vec![ROLE_1]).await?;
    let before = manager.lock_state(CHANNEL);
    let calls_before = platform.permission_calls().len();

    let result = manager.lock(GUILD, CHANNEL, vec![ROLE_2]).await;

    assert!(matches!(result, Err(LockdownError::AlreadyLocked(id)) if id == CHANNEL));
    assert_eq!(manager.lock_state(CHANNEL), before);
    assert_eq!(platform.permission_calls().len(), calls_before);
    assert_eq!(platform.visible_reminders().len(), 1);

    Ok(())
}

/// Tests a lock whose @everyone deny fails.
///
/// Expected: Err(Platform) and the channel left unlocked
#[tokio::test]
async fn failed_deny_rolls_back() {
    let platform = FakePlatform::new();
    platform.fail_deny.store(true, Ordering::SeqCst);
    let manager = manager(&platform, Duration::ZERO);

    let result = manager.lock(GUILD, CHANNEL, vec![ROLE_1]).await;

    assert!(matches!(result, Err(LockdownError::Platform(_))));
    assert!(!manager.is_locked(CHANNEL));
    assert!(platform.visible_reminders().is_empty());
    assert_eq!(platform.permission(ROLE_1), None);
}

/// Tests a lock whose reminder cannot be posted.
///
/// Expected: Ok with the channel locked and no sticky message
#[tokio::test]
async fn failed_reminder_keeps_lock() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    platform.fail_posts.store(true, Ordering::SeqCst);
    let manager = manager(&platform, Duration::ZERO);

    let state = manager.lock(GUILD, CHANNEL, vec![]).await?;

    assert!(manager.is_locked(CHANNEL));
    assert_eq!(state.sticky_message_id, None);

    Ok(())
}

/// Tests relocking a channel during its unlock grace period.
///
/// Expected: Ok with the unlocking marker cleared and message events handled again
#[tokio::test(start_paused = true)]
async fn relock_clears_unlocking_marker() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::from_secs(2));

    manager.lock(GUILD, CHANNEL, vec![]).await?;
    manager.unlock(CHANNEL).await?;
    assert!(manager.is_unlocking(CHANNEL));

    manager.lock(GUILD, CHANNEL, vec![]).await?;
    assert!(!manager.is_unlocking(CHANNEL));

    manager.on_message(CHANNEL, MessageId::new(1)).await;
    assert_eq!(platform.visible_reminders(), vec![MessageId::new(1002)]);

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(manager.is_locked(CHANNEL));
    assert!(!manager.is_unlocking(CHANNEL));

    Ok(())
}

/// Tests an unlock issued while a lock is still applying its overwrites.
///
/// The unlock waits for the lock to finish and then reverts every overwrite the lock
/// set, so no role is left with an allow on an unlocked channel.
///
/// Expected: both calls Ok, channel unlocked, all overwrites inherited
#[tokio::test]
async fn unlock_waits_for_lock_in_progress() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    let gate = platform.hold_next_permission(ROLE_1);
    let locking = tokio::spawn({
        let manager = Arc::clone(&manager);
        async move { manager.lock(GUILD, CHANNEL, vec![ROLE_1]).await }
    });
    gate.entered.notified().await;

    let unlocking = tokio::spawn({
        let manager = Arc::clone(&manager);
        async move { manager.unlock(CHANNEL).await }
    });
    tokio::task::yield_now().await;
    assert!(!unlocking.is_finished());

    gate.release.notify_one();
    let locked = locking.await.unwrap()?;
    let released = unlocking.await.unwrap()?;

    assert_eq!(locked.allowed_role_ids, vec![ROLE_1]);
    assert_eq!(released.allowed_role_ids, vec![ROLE_1]);
    assert!(!manager.is_locked(CHANNEL));
    assert_eq!(platform.permission(EVERYONE), Some(SendPermission::Inherit));
    assert_eq!(platform.permission(ROLE_1), Some(SendPermission::Inherit));
    assert_eq!(
        platform.permission_calls(),
        vec![
            (EVERYONE, SendPermission::Deny),
            (ROLE_1, SendPermission::Allow),
            (EVERYONE, SendPermission::Inherit),
            (ROLE_1, SendPermission::Inherit),
        ]
    );
    assert!(platform.visible_reminders().is_empty());

    Ok(())
}

/// Tests that locks are tracked per channel.
///
/// Expected: Ok with both channels listed for the guild
#[tokio::test]
async fn lists_locked_channels_per_guild() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);
    let other = ChannelId::new(201);

    manager.lock(GUILD, CHANNEL, vec![]).await?;
    manager.lock(GUILD, other, vec![]).await?;
    manager.lock(GuildId::new(999), ChannelId::new(900), vec![]).await?;

    let mut channels: Vec<ChannelId> = manager
        .locked_channels(GUILD)
        .into_iter()
        .map(|state| state.channel_id)
        .collect();
    channels.sort();

    assert_eq!(channels, vec![CHANNEL, other]);

    Ok(())
}
