//! Haptic feedback sink

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Impact intensity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
    Soft,
    /// Used for the refresh trigger
    #[default]
    Rigid,
}

/// Fire-and-forget haptic output
pub trait HapticSink {
    fn impact(&self, style: ImpactStyle);
}

/// Discards every impact
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHaptics;

impl HapticSink for NoopHaptics {
    fn impact(&self, _style: ImpactStyle) {}
}

/// Counts impacts; clones share the counter
#[derive(Clone, Debug, Default)]
pub struct CountingHaptics {
    count: Arc<AtomicUsize>,
}

impl CountingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl HapticSink for CountingHaptics {
    fn impact(&self, style: ImpactStyle) {
        tracing::trace!(?style, "haptic impact");
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

impl<T: HapticSink + ?Sized> HapticSink for Arc<T> {
    fn impact(&self, style: ImpactStyle) {
        (**self).impact(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_haptics_shares_counter() {
        let haptics = CountingHaptics::new();
        let clone = haptics.clone();
        clone.impact(ImpactStyle::Rigid);
        haptics.impact(ImpactStyle::Light);
        assert_eq!(haptics.count(), 2);
    }
}
