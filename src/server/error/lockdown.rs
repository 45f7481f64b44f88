use serenity::all::ChannelId;
use thiserror::Error;

/// Errors returned by channel lock and unlock.
#[derive(Error, Debug)]
pub enum LockdownError {
    /// The channel already has a lock entry; nothing was changed.
    #[error("Channel {0} is already locked")]
    AlreadyLocked(ChannelId),

    /// The channel has no lock entry, or is already being unlocked.
    #[error("Channel {0} is not locked")]
    NotLocked(ChannelId),

    /// Denying the default role failed, so the lock was rolled back.
    ///
    /// Boxed due to large size.
    #[error("Failed to update channel permissions: {0}")]
    Platform(#[source] Box<serenity::Error>),
}
