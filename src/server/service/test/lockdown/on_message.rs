use super::*;

/// Tests that a message in a locked channel moves the reminder to the bottom.
///
/// Expected: old reminder deleted, new reminder recorded as sticky
#[tokio::test]
async fn reposts_reminder() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    manager.lock(GUILD, CHANNEL, vec![]).await?;
    manager.on_message(CHANNEL, MessageId::new(1)).await;

    assert_eq!(platform.visible_reminders(), vec![MessageId::new(1001)]);
    assert_eq!(
        manager.lock_state(CHANNEL).unwrap().sticky_message_id,
        Some(MessageId::new(1001))
    );

    Ok(())
}

/// Tests messages in channels that are not locked.
///
/// Expected: nothing posted
#[tokio::test]
async fn ignores_unlocked_channel() {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    manager.on_message(CHANNEL, MessageId::new(1)).await;

    assert!(platform.visible_reminders().is_empty());
}

/// Tests the event for the reminder itself.
///
/// Expected: reminder left in place, nothing reposted
#[tokio::test]
async fn ignores_current_reminder() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    let state = manager.lock(GUILD, CHANNEL, vec![]).await?;
    let sticky = state.sticky_message_id.unwrap();

    manager.on_message(CHANNEL, sticky).await;

    assert_eq!(platform.visible_reminders(), vec![sticky]);

    Ok(())
}

/// Tests a message event that races an unlock.
///
/// The message handler deletes the old reminder and is suspended while posting the
/// new one. The unlock runs to completion in the meantime. When the post returns the
/// channel is unlocked, so the fresh reminder must be removed again.
///
/// Expected: no reminder visible and the channel unlocked
#[tokio::test]
async fn unlock_during_repost_leaves_no_reminder() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    manager.lock(GUILD, CHANNEL, vec![ROLE_1]).await?;

    let gate = platform.hold_next_post();
    let handler = Arc::clone(&manager);
    let message = tokio::spawn(async move {
        handler.on_message(CHANNEL, MessageId::new(1)).await;
    });

    gate.entered.notified().await;
    manager.unlock(CHANNEL).await?;
    gate.release.notify_one();
    message.await.unwrap();

    assert!(!manager.is_locked(CHANNEL));
    assert!(platform.visible_reminders().is_empty());

    Ok(())
}

/// Tests a message event that races an unlock followed by a new lock.
///
/// Expected: only the new lock's reminder is visible
#[tokio::test]
async fn stale_repost_does_not_attach_to_new_lock() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    manager.lock(GUILD, CHANNEL, vec![]).await?;

    let gate = platform.hold_next_post();
    let handler = Arc::clone(&manager);
    let message = tokio::spawn(async move {
        handler.on_message(CHANNEL, MessageId::new(1)).await;
    });

    gate.entered.notified().await;
    manager.unlock(CHANNEL).await?;
    let relocked = manager.lock(GUILD, CHANNEL, vec![]).await?;
    gate.release.notify_one();
    message.await.unwrap();

    assert_eq!(
        platform.visible_reminders(),
        vec![relocked.sticky_message_id.unwrap()]
    );
    assert_eq!(
        manager.lock_state(CHANNEL).unwrap().sticky_message_id,
        relocked.sticky_message_id
    );

    Ok(())
}

/// Tests two message events reposting at the same time.
///
/// Expected: exactly one reminder remains and it is the recorded sticky
#[tokio::test]
async fn concurrent_reposts_leave_one_reminder() -> Result<(), LockdownError> {
    let platform = FakePlatform::new();
    let manager = manager(&platform, Duration::ZERO);

    manager.lock(GUILD, CHANNEL, vec![]).await?;

    let gate = platform.hold_next_post();
    let handler = Arc::clone(&manager);
    let first = tokio::spawn(async move {
        handler.on_message(CHANNEL, MessageId::new(1)).await;
    });

    gate.entered.notified().await;
    manager.on_message(CHANNEL, MessageId::new(2)).await;
    gate.release.notify_one();
    first.await.unwrap();

    let visible = platform.visible_reminders();
    assert_eq!(visible.len(), 1);
    assert_eq!(
        manager.lock_state(CHANNEL).unwrap().sticky_message_id,
        Some(visible[0])
    );

    Ok(())
}
