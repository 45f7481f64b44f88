//! Keyed one-shot delayed actions.
//!
//! A `DeferredActions<K>` runs a future after a delay on the tokio runtime and keeps a
//! handle to it under a key, so the action can be cancelled or replaced before it
//! fires. Every scheduled action is tracked until it starts running; nothing is fired
//! and forgotten.

use std::{
    collections::HashMap,
    future::Future,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::task::JoinHandle;

struct Pending {
    token: u64,
    handle: JoinHandle<()>,
}

struct Inner<K> {
    next_token: u64,
    pending: HashMap<K, Pending>,
}

/// Registry of pending delayed actions keyed by `K`.
///
/// Cloning is cheap and clones share the same registry.
pub struct DeferredActions<K> {
    inner: Arc<Mutex<Inner<K>>>,
}

impl<K> Clone for DeferredActions<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> Default for DeferredActions<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> DeferredActions<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_token: 0,
                pending: HashMap::new(),
            })),
        }
    }

    /// Runs `action` after `delay`.
    ///
    /// Any action still pending under the same key is aborted and replaced. Once the
    /// delay elapses the action is unregistered and then awaited, so cancelling after
    /// that point has no effect.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Arguments
    /// - `key` - Key the action is tracked under
    /// - `delay` - Time to wait before running the action
    /// - `action` - Future to run once the delay has elapsed
    pub fn schedule<F>(&self, key: K, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut inner = lock(&self.inner);

        inner.next_token += 1;
        let token = inner.next_token;

        let registry = Arc::clone(&self.inner);
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            {
                let mut inner = lock(&registry);
                match inner.pending.get(&task_key) {
                    Some(pending) if pending.token == token => {
                        inner.pending.remove(&task_key);
                    }
                    // Superseded between waking and taking the lock
                    _ => return,
                }
            }

            action.await;
        });

        if let Some(previous) = inner.pending.insert(key, Pending { token, handle }) {
            previous.handle.abort();
        }
    }

    /// Cancels the action pending under `key`.
    ///
    /// # Returns
    /// - `true` - A pending action was aborted
    /// - `false` - Nothing was pending under that key
    pub fn cancel(&self, key: &K) -> bool {
        match lock(&self.inner).pending.remove(key) {
            Some(pending) => {
                pending.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Returns true while an action under `key` is waiting for its delay.
    pub fn is_pending(&self, key: &K) -> bool {
        lock(&self.inner).pending.contains_key(key)
    }

    /// Number of actions waiting for their delay.
    pub fn len(&self) -> usize {
        lock(&self.inner).pending.len()
    }

    /// Returns true when no action is waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock<K>(inner: &Mutex<Inner<K>>) -> MutexGuard<'_, Inner<K>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}
