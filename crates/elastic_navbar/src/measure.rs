//! Measured size feedback
//!
//! The renderer measures the large title block after laying it out and
//! reports the size through a [`SizeReporter`]. The host picks the change up
//! after the render pass and feeds it into the next layout.

use std::cell::RefCell;
use std::rc::Rc;

use elastic_core::Size;

#[derive(Debug, Default)]
struct Slot {
    size: Size,
    dirty: bool,
}

/// Receiving end owned by the host
#[derive(Debug, Default)]
pub struct SizeFeedbackChannel {
    slot: Rc<RefCell<Slot>>,
}

impl SizeFeedbackChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle for the renderer
    pub fn reporter(&self) -> SizeReporter {
        SizeReporter {
            slot: self.slot.clone(),
        }
    }

    /// Last accepted measurement; zero until something was measured
    pub fn current(&self) -> Size {
        self.slot.borrow().size
    }

    /// The latest measurement if it changed since the previous call
    pub fn take_changed(&self) -> Option<Size> {
        let mut slot = self.slot.borrow_mut();
        if !slot.dirty {
            return None;
        }
        slot.dirty = false;
        Some(slot.size)
    }
}

/// Sending end handed to the renderer
#[derive(Clone, Debug)]
pub struct SizeReporter {
    slot: Rc<RefCell<Slot>>,
}

impl SizeReporter {
    /// Report a measurement; returns whether the stored size changed
    ///
    /// Empty sizes (either dimension zero) are ignored, so the stored height
    /// never falls back to zero.
    pub fn report(&self, size: Size) -> bool {
        if size.is_empty() {
            return false;
        }
        let mut slot = self.slot.borrow_mut();
        if slot.size == size {
            return false;
        }
        tracing::trace!(width = size.width, height = size.height, "large title measured");
        slot.size = size;
        slot.dirty = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_ignored() {
        let channel = SizeFeedbackChannel::new();
        let reporter = channel.reporter();

        assert!(!reporter.report(Size::ZERO));
        assert_eq!(channel.take_changed(), None);

        assert!(reporter.report(Size::new(390.0, 45.0)));
        assert!(!reporter.report(Size::ZERO));
        assert_eq!(channel.current(), Size::new(390.0, 45.0));
    }

    #[test]
    fn test_zero_height_is_ignored() {
        let channel = SizeFeedbackChannel::new();
        let reporter = channel.reporter();
        reporter.report(Size::new(390.0, 45.0));
        channel.take_changed();

        assert!(!reporter.report(Size::new(390.0, 0.0)));
        assert!(!reporter.report(Size::new(0.0, 60.0)));
        assert_eq!(channel.take_changed(), None);
        assert_eq!(channel.current().height, 45.0);
    }

    #[test]
    fn test_later_values_update() {
        let channel = SizeFeedbackChannel::new();
        let reporter = channel.reporter();

        reporter.report(Size::new(390.0, 45.0));
        assert_eq!(channel.take_changed(), Some(Size::new(390.0, 45.0)));
        assert_eq!(channel.take_changed(), None);

        assert!(!reporter.report(Size::new(390.0, 45.0)));
        assert_eq!(channel.take_changed(), None);

        assert!(reporter.report(Size::new(390.0, 80.0)));
        assert_eq!(channel.take_changed(), Some(Size::new(390.0, 80.0)));
    }

    #[test]
    fn test_reporter_clones_share_slot() {
        let channel = SizeFeedbackChannel::new();
        let first = channel.reporter();
        let second = first.clone();
        first.report(Size::new(100.0, 30.0));
        assert!(!second.report(Size::new(100.0, 30.0)));
    }
}
