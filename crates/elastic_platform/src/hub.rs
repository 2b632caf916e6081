//! Environment hub
//!
//! Publishes raw orientation notifications from the platform to every
//! subscribed bar. Platform callbacks may publish from any thread; listeners
//! are expected to forward into their owner's queue rather than do work.
//!
//! ```ignore
//! let hub = EnvironmentHub::new();
//! let subscription = hub.subscribe(move |orientation| inbox.push(orientation));
//! hub.publish(DeviceOrientation::LandscapeLeft)?;
//! drop(subscription); // unsubscribed
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use slotmap::{new_key_type, SlotMap};

use crate::error::{PlatformError, Result};
use crate::orientation::DeviceOrientation;

new_key_type! {
    /// Identifies a hub subscription
    pub struct SubscriptionId;
}

type Listener = Box<dyn Fn(DeviceOrientation) + Send>;

struct HubInner {
    listeners: SlotMap<SubscriptionId, Listener>,
    closed: bool,
}

fn lock(inner: &Mutex<HubInner>) -> MutexGuard<'_, HubInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fan-out of orientation notifications
#[derive(Clone)]
pub struct EnvironmentHub {
    inner: Arc<Mutex<HubInner>>,
}

impl EnvironmentHub {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HubInner {
                listeners: SlotMap::with_key(),
                closed: false,
            })),
        }
    }

    /// Register a listener; it stays registered until the returned guard is dropped
    ///
    /// Listeners run while the hub is locked and must not subscribe or publish.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(DeviceOrientation) + Send + 'static,
    {
        let id = lock(&self.inner).listeners.insert(Box::new(listener));
        tracing::debug!(?id, "environment subscriber added");
        Subscription {
            id,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver a notification to every listener; returns how many received it
    pub fn publish(&self, orientation: DeviceOrientation) -> Result<usize> {
        let inner = lock(&self.inner);
        if inner.closed {
            return Err(PlatformError::HubClosed);
        }
        for (_, listener) in inner.listeners.iter() {
            listener(orientation);
        }
        Ok(inner.listeners.len())
    }

    /// Stop accepting notifications and drop all listeners
    pub fn close(&self) {
        let mut inner = lock(&self.inner);
        inner.closed = true;
        inner.listeners.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }
}

impl Default for EnvironmentHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a listener registered; unsubscribes on drop
pub struct Subscription {
    id: SubscriptionId,
    hub: Weak<Mutex<HubInner>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Whether the listener is still registered with a live hub
    pub fn is_active(&self) -> bool {
        let Some(inner) = self.hub.upgrade() else {
            return false;
        };
        let guard = lock(&inner);
        guard.listeners.contains_key(self.id)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            lock(&inner).listeners.remove(self.id);
            tracing::debug!(id = ?self.id, "environment subscriber removed");
        }
    }
}
