//! Safe-area insets
//!
//! After a rotation the host window reports its new insets only once the
//! current round of input handling has finished. The detector therefore
//! schedules the read on the deferred lane of the [`EventQueue`] and performs
//! it when that event comes up.

use std::sync::{Arc, Mutex, PoisonError};

use elastic_core::events::{event_types, Event, EventData, EventQueue};
use elastic_core::EdgeInsets;

use crate::error::Result;
use crate::orientation::DeviceOrientation;

/// Host hook that reports the key window's safe-area insets
pub trait InsetsProvider {
    fn key_window_insets(&self) -> Result<EdgeInsets>;
}

impl<F> InsetsProvider for F
where
    F: Fn() -> Result<EdgeInsets>,
{
    fn key_window_insets(&self) -> Result<EdgeInsets> {
        self()
    }
}

/// Insets shared with the host, which updates them in place
#[derive(Clone, Debug, Default)]
pub struct SharedInsets {
    inner: Arc<Mutex<EdgeInsets>>,
}

impl SharedInsets {
    pub fn new(insets: EdgeInsets) -> Self {
        Self {
            inner: Arc::new(Mutex::new(insets)),
        }
    }

    pub fn set(&self, insets: EdgeInsets) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = insets;
    }

    pub fn get(&self) -> EdgeInsets {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InsetsProvider for SharedInsets {
    fn key_window_insets(&self) -> Result<EdgeInsets> {
        Ok(self.get())
    }
}

/// Tracks the window's safe-area insets across orientation changes
pub struct SafeAreaInsetsDetector {
    provider: Box<dyn InsetsProvider>,
    insets: EdgeInsets,
}

impl SafeAreaInsetsDetector {
    /// Create a detector, reading the initial insets right away
    pub fn new(provider: impl InsetsProvider + 'static) -> Self {
        let insets = provider.key_window_insets().unwrap_or_else(|err| {
            tracing::warn!(%err, "initial safe-area read failed, assuming zero insets");
            EdgeInsets::ZERO
        });
        Self {
            provider: Box::new(provider),
            insets,
        }
    }

    pub fn insets(&self) -> EdgeInsets {
        self.insets
    }

    /// Schedule a re-read after a raw orientation notification
    ///
    /// Only portrait and the landscape variants trigger a read. Returns whether
    /// a read was scheduled.
    pub fn schedule(&self, raw: DeviceOrientation, queue: &mut EventQueue) -> bool {
        if !raw.interface().is_tracked() {
            return false;
        }
        queue.defer(Event::new(event_types::SAFE_AREA_REFRESH, EventData::None));
        true
    }

    /// Read the insets now; returns them only if they changed
    pub fn refresh(&mut self) -> Option<EdgeInsets> {
        let insets = match self.provider.key_window_insets() {
            Ok(insets) => insets,
            Err(err) => {
                tracing::warn!(%err, "safe-area read failed, keeping previous insets");
                return None;
            }
        };
        if insets == self.insets {
            return None;
        }
        tracing::debug!(top = insets.top, "safe-area insets detected");
        self.insets = insets;
        Some(insets)
    }
}
