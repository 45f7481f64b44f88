//! Channel lockdown state machine.
//!
//! A locked channel denies `SEND_MESSAGES` to `@everyone`, allows it for a snapshot of
//! configured roles, and keeps a reminder embed as the most recent message: every new
//! message is followed by deleting the previous reminder and posting a fresh one.
//!
//! Gateway events are handled concurrently, so `lock`, `unlock` and `on_message` for
//! the same channel can interleave at every Discord call. The bookkeeping below keeps
//! those interleavings safe:
//!
//! - Each lock gets a generation number. A reminder posted on behalf of one lock is
//!   only recorded if that same lock is still current when the post returns;
//!   otherwise the fresh reminder is deleted again.
//! - While an unlock is in progress the channel carries an "unlocking" marker and
//!   message events ignore it. The marker is cleared right after the unlock or, with a
//!   grace period configured, by a deferred action once the grace period has passed.
//! - `lock` and `unlock` of the same channel run one at a time behind a per-channel
//!   async mutex, so the overwrites of a lock are complete before an unlock reverts
//!   them. Message events do not take it.
//! - The bookkeeping mutex is only held for synchronous sections, never across a
//!   Discord call.

pub mod platform;

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use serenity::all::{ChannelId, GuildId, MessageId, RoleId};

use crate::server::{
    error::lockdown::LockdownError,
    model::lockdown::{LockState, SendPermission},
    scheduler::deferred::DeferredActions,
};

use self::platform::LockdownPlatform;

struct LockEntry {
    state: LockState,
    generation: u64,
}

#[derive(Default)]
struct Bookkeeping {
    locks: HashMap<ChannelId, LockEntry>,
    unlocking: HashSet<ChannelId>,
    next_generation: u64,
}

impl Bookkeeping {
    /// Removes the channel's entry if it still belongs to lock `generation`.
    fn remove_current(&mut self, channel_id: ChannelId, generation: u64) -> Option<LockEntry> {
        let current = self
            .locks
            .get(&channel_id)
            .is_some_and(|entry| entry.generation == generation);

        if current {
            self.locks.remove(&channel_id)
        } else {
            None
        }
    }

    /// Records `posted` as the channel's reminder if lock `generation` is still current.
    ///
    /// # Returns
    /// - `Some(id)` - Message to delete: either the reminder `posted` replaced, or
    ///   `posted` itself when the lock it belonged to is gone
    /// - `None` - `posted` was recorded and nothing needs cleaning up
    fn install_sticky(
        &mut self,
        channel_id: ChannelId,
        generation: u64,
        posted: MessageId,
    ) -> Option<MessageId> {
        if self.unlocking.contains(&channel_id) {
            return Some(posted);
        }

        match self.locks.get_mut(&channel_id) {
            Some(entry) if entry.generation == generation => {
                entry.state.sticky_message_id.replace(posted)
            }
            _ => Some(posted),
        }
    }
}

/// Owns the lock table and the unlocking markers.
///
/// Shared through `Arc` between the command handlers and the gateway event handler.
pub struct LockdownManager {
    platform: Arc<dyn LockdownPlatform>,
    state: Arc<Mutex<Bookkeeping>>,
    transitions: Mutex<HashMap<ChannelId, Arc<tokio::sync::Mutex<()>>>>,
    grace_timers: DeferredActions<ChannelId>,
    unlock_grace: Duration,
}

impl LockdownManager {
    /// Creates a manager with no locked channels.
    ///
    /// # Arguments
    /// - `platform` - Discord side effects
    /// - `unlock_grace` - How long a channel stays marked as unlocking after an unlock
    ///   finishes; zero clears the marker immediately
    ///
    /// # Returns
    /// - `LockdownManager` - New manager instance
    pub fn new(platform: Arc<dyn LockdownPlatform>, unlock_grace: Duration) -> Self {
        Self {
            platform,
            state: Arc::new(Mutex::new(Bookkeeping::default())),
            transitions: Mutex::new(HashMap::new()),
            grace_timers: DeferredActions::new(),
            unlock_grace,
        }
    }

    fn bookkeeping(&self) -> MutexGuard<'_, Bookkeeping> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mutex serializing `lock` and `unlock` of one channel.
    fn transition(&self, channel_id: ChannelId) -> Arc<tokio::sync::Mutex<()>> {
        let mut transitions = self
            .transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        Arc::clone(transitions.entry(channel_id).or_default())
    }

    /// Locks a channel.
    ///
    /// Claims the channel in the lock table first, then denies `SEND_MESSAGES` to
    /// `@everyone`, allows it for each role in `allowed_role_ids` and posts the
    /// reminder. Failures to allow a role or to post the reminder are logged and leave
    /// the channel locked (without a reminder in the latter case).
    ///
    /// # Arguments
    /// - `guild_id` - Guild the channel belongs to
    /// - `channel_id` - Channel to lock
    /// - `allowed_role_ids` - Roles that keep `SEND_MESSAGES`; stored as the snapshot
    ///   unlock reverts
    ///
    /// # Returns
    /// - `Ok(LockState)` - Channel locked; state as of the end of the call
    /// - `Err(LockdownError::AlreadyLocked)` - Channel already locked, nothing changed
    /// - `Err(LockdownError::Platform)` - Denying `@everyone` failed; the lock was
    ///   rolled back
    pub async fn lock(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        allowed_role_ids: Vec<RoleId>,
    ) -> Result<LockState, LockdownError> {
        let transition = self.transition(channel_id);
        let _serial = transition.lock().await;

        let generation = {
            let mut book = self.bookkeeping();
            if book.locks.contains_key(&channel_id) {
                return Err(LockdownError::AlreadyLocked(channel_id));
            }

            book.next_generation += 1;
            let generation = book.next_generation;

            book.unlocking.remove(&channel_id);
            book.locks.insert(
                channel_id,
                LockEntry {
                    state: LockState {
                        guild_id,
                        channel_id,
                        sticky_message_id: None,
                        allowed_role_ids: allowed_role_ids.clone(),
                    },
                    generation,
                },
            );

            generation
        };
        self.grace_timers.cancel(&channel_id);

        if let Err(e) = self
            .platform
            .set_send_permission(channel_id, everyone_role(guild_id), SendPermission::Deny)
            .await
        {
            tracing::error!(
                "Failed to deny @everyone in channel {}, rolling back lock: {}",
                channel_id,
                e
            );
            self.roll_back(channel_id, generation).await;
            return Err(LockdownError::Platform(Box::new(e)));
        }

        for role_id in &allowed_role_ids {
            if let Err(e) = self
                .platform
                .set_send_permission(channel_id, *role_id, SendPermission::Allow)
                .await
            {
                tracing::warn!(
                    "Failed to allow role {} in locked channel {}: {}",
                    role_id,
                    channel_id,
                    e
                );
            }
        }

        match self.platform.post_reminder(channel_id).await {
            Ok(posted) => self.record_reminder(channel_id, generation, posted).await,
            Err(e) => {
                tracing::warn!(
                    "Failed to post lock reminder in channel {}: {}",
                    channel_id,
                    e
                );
            }
        }

        self.lock_state(channel_id)
            .ok_or(LockdownError::NotLocked(channel_id))
    }

    /// Unlocks a channel.
    ///
    /// Marks the channel as unlocking, deletes the reminder, removes the lock entry,
    /// and reverts the `SEND_MESSAGES` overwrites of `@everyone` and of every role in
    /// the snapshot taken at lock time. Discord failures are logged; the channel is
    /// unlocked regardless.
    ///
    /// A lock of the same channel that is still applying its overwrites finishes
    /// first.
    ///
    /// # Arguments
    /// - `channel_id` - Channel to unlock
    ///
    /// # Returns
    /// - `Ok(LockState)` - The lock that was released
    /// - `Err(LockdownError::NotLocked)` - Channel not locked or already being unlocked
    pub async fn unlock(&self, channel_id: ChannelId) -> Result<LockState, LockdownError> {
        let transition = self.transition(channel_id);
        let _serial = transition.lock().await;

        let (sticky, generation) = {
            let mut book = self.bookkeeping();
            if book.unlocking.contains(&channel_id) {
                return Err(LockdownError::NotLocked(channel_id));
            }

            let Some(entry) = book.locks.get_mut(&channel_id) else {
                return Err(LockdownError::NotLocked(channel_id));
            };
            let taken = (entry.state.sticky_message_id.take(), entry.generation);

            book.unlocking.insert(channel_id);
            taken
        };

        if let Some(message_id) = sticky {
            self.delete_quietly(channel_id, message_id).await;
        }

        let removed = self.bookkeeping().remove_current(channel_id, generation);
        let Some(removed) = removed else {
            self.bookkeeping().unlocking.remove(&channel_id);
            return Err(LockdownError::NotLocked(channel_id));
        };
        let state = removed.state;

        if let Some(message_id) = state.sticky_message_id {
            self.delete_quietly(channel_id, message_id).await;
        }

        let targets = std::iter::once(everyone_role(state.guild_id))
            .chain(state.allowed_role_ids.iter().copied());
        for role_id in targets {
            if let Err(e) = self
                .platform
                .set_send_permission(channel_id, role_id, SendPermission::Inherit)
                .await
            {
                tracing::warn!(
                    "Failed to revert role {} in channel {}: {}",
                    role_id,
                    channel_id,
                    e
                );
            }
        }

        self.finish_unlocking(channel_id);

        Ok(LockState {
            sticky_message_id: None,
            ..state
        })
    }

    /// Keeps the reminder at the bottom of a locked channel.
    ///
    /// Call for every non-bot message. Does nothing when the channel is not locked,
    /// is being unlocked, or when `message_id` is the current reminder itself.
    /// Otherwise deletes the previous reminder, posts a new one and records it if the
    /// same lock is still in place once the post returns.
    ///
    /// # Arguments
    /// - `channel_id` - Channel the message was sent in
    /// - `message_id` - The new message
    pub async fn on_message(&self, channel_id: ChannelId, message_id: MessageId) {
        let (generation, previous) = {
            let mut book = self.bookkeeping();
            if book.unlocking.contains(&channel_id) {
                return;
            }

            let Some(entry) = book.locks.get_mut(&channel_id) else {
                return;
            };
            if entry.state.sticky_message_id == Some(message_id) {
                return;
            }

            (entry.generation, entry.state.sticky_message_id.take())
        };

        if let Some(previous) = previous {
            self.delete_quietly(channel_id, previous).await;
        }

        match self.platform.post_reminder(channel_id).await {
            Ok(posted) => self.record_reminder(channel_id, generation, posted).await,
            Err(e) => {
                tracing::warn!(
                    "Failed to repost lock reminder in channel {}: {}",
                    channel_id,
                    e
                );
            }
        }
    }

    /// Returns true when the channel has a lock entry.
    pub fn is_locked(&self, channel_id: ChannelId) -> bool {
        self.bookkeeping().locks.contains_key(&channel_id)
    }

    /// Returns true while the channel carries the unlocking marker.
    pub fn is_unlocking(&self, channel_id: ChannelId) -> bool {
        self.bookkeeping().unlocking.contains(&channel_id)
    }

    /// Snapshot of a channel's lock entry.
    pub fn lock_state(&self, channel_id: ChannelId) -> Option<LockState> {
        self.bookkeeping()
            .locks
            .get(&channel_id)
            .map(|entry| entry.state.clone())
    }

    /// Snapshots of every locked channel of a guild.
    pub fn locked_channels(&self, guild_id: GuildId) -> Vec<LockState> {
        self.bookkeeping()
            .locks
            .values()
            .filter(|entry| entry.state.guild_id == guild_id)
            .map(|entry| entry.state.clone())
            .collect()
    }

    async fn record_reminder(&self, channel_id: ChannelId, generation: u64, posted: MessageId) {
        let stale = self.bookkeeping().install_sticky(channel_id, generation, posted);

        if let Some(stale) = stale {
            if stale == posted {
                tracing::debug!(
                    "Channel {} is no longer locked, removing fresh reminder {}",
                    channel_id,
                    posted
                );
            }
            self.delete_quietly(channel_id, stale).await;
        }
    }

    async fn roll_back(&self, channel_id: ChannelId, generation: u64) {
        let removed = self.bookkeeping().remove_current(channel_id, generation);

        if let Some(message_id) = removed.and_then(|entry| entry.state.sticky_message_id) {
            self.delete_quietly(channel_id, message_id).await;
        }
    }

    fn finish_unlocking(&self, channel_id: ChannelId) {
        if self.unlock_grace.is_zero() {
            self.bookkeeping().unlocking.remove(&channel_id);
            return;
        }

        let state = Arc::clone(&self.state);
        self.grace_timers
            .schedule(channel_id, self.unlock_grace, async move {
                state
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .unlocking
                    .remove(&channel_id);
            });
    }

    async fn delete_quietly(&self, channel_id: ChannelId, message_id: MessageId) {
        if let Err(e) = self.platform.delete_message(channel_id, message_id).await {
            tracing::debug!(
                "Could not delete reminder {} in channel {}: {}",
                message_id,
                channel_id,
                e
            );
        }
    }
}

/// The `@everyone` role of a guild shares the guild's id.
fn everyone_role(guild_id: GuildId) -> RoleId {
    RoleId::new(guild_id.get())
}
