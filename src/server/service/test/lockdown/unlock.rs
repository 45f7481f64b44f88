use super::*;

/// Tests the lock and unlock sample scenario.
///
/// Verifies lock with two roles, a rejected second lock, unlock, and a rejected
/// second unlock.
///
/// Expected: each step returns the documented result
#[tokio::test]
async fn lock_unlock_scenario() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    let state = manager.lock(GUILD, CHANNEL, vec![ROLE_1, ROLE_2]).await?;
    assert_eq!(state.allowed_role_ids, vec![ROLE_1, ROLE_2]);

    assert!(matches!(
        manager.lock(GUILD, CHANNEL, vec![ROLE_1, ROLE_2]).await,
        Err(LockdownError::AlreadyLocked(_))
    ));

    manager.unlock(CHANNEL).await?;
    assert!(!manager.is_locked(CHANNEL));

    assert!(matches!(
        manager.unlock(CHANNEL).await,
        Err(LockdownError::NotLocked(_))
    ));

    Ok(())
}

/// Tests that unlock reverts exactly the roles captured at lock time.
///
/// Expected: @everyone and the snapshot roles inherit, no other role touched
#[tokio::test]
async fn reverts_snapshot_roles() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    manager.lock(GUILD, CHANNEL, vec![ROLE_1]).await?;
    let calls_before = platform.permission_calls().len();

    manager.unlock(CHANNEL).await?;

    assert_eq!(
        platform.permission_calls()[calls_before..],
        [
            (EVERYONE, SendPermission::Inherit),
            (ROLE_1, SendPermission::Inherit),
        ]
    );
    assert_eq!(platform.permission(ROLE_2), None);

    Ok(())
}

/// Tests that unlock removes the sticky reminder.
///
/// Expected: Ok with no visible reminders left
#[tokio::test]
async fn deletes_sticky_message() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    manager.lock(GUILD, CHANNEL, vec![]).await?;
    manager.on_message(CHANNEL, MessageId::new(1)).await;
    assert_eq!(platform.visible_reminders(), vec![MessageId::new(1001)]);

    let released = manager.unlock(CHANNEL).await?;

    assert!(platform.visible_reminders().is_empty());
    assert_eq!(released.channel_id, CHANNEL);
    assert_eq!(released.sticky_message_id, None);

    Ok(())
}

/// Tests unlocking when the reminder cannot be deleted.
///
/// Expected: Ok with the channel unlocked anyway
#[tokio::test]
async fn delete_failure_is_swallowed() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    manager.lock(GUILD, CHANNEL, vec![]).await?;
    platform.fail_deletes.store(true, Ordering::SeqCst);

    manager.unlock(CHANNEL).await?;

    assert!(!manager.is_locked(CHANNEL));
    assert_eq!(platform.permission(EVERYONE), Some(SendPermission::Inherit));

    Ok(())
}

/// Tests unlocking a channel that was never locked.
///
/// Expected: Err(NotLocked)
#[tokio::test]
async fn not_locked() {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    let result = manager.unlock(CHANNEL).await;

    assert!(matches!(result, Err(LockdownError::NotLocked(id)) if id == CHANNEL));
    assert!(platform.permission_calls().is_empty());
}

/// Tests the unlock grace period.
///
/// Verifies that the unlocking marker outlives the unlock by the grace period, that
/// a second unlock and message events are ignored meanwhile, and that the marker is
/// then cleared.
///
/// Expected: marker set for two seconds, then cleared
#[tokio::test(start_paused = true)]
async fn grace_period_keeps_marker() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::from_secs(2));

    manager.lock(GUILD, CHANNEL, vec![]).await?;
    manager.unlock(CHANNEL).await?;

    assert!(manager.is_unlocking(CHANNEL));
    assert!(matches!(
        manager.unlock(CHANNEL).await,
        Err(LockdownError::NotLocked(_))
    ));

    manager.on_message(CHANNEL, MessageId::new(1)).await;
    assert!(platform.visible_reminders().is_empty());

    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert!(!manager.is_unlocking(CHANNEL));

    Ok(())
}
