//! Event model
//!
//! Inputs from the host (scroll samples, orientation changes, measured sizes,
//! refresh stop signals) are queued as [`Event`]s and processed in order on the
//! UI thread. Work that must not race with in-flight input, such as reading
//! new safe-area insets after a rotation, goes into the deferred lane of the
//! [`EventQueue`] and is only handed out once the immediate lane is drained.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::geometry::{EdgeInsets, InterfaceOrientation, Point, Size};

/// Event type identifier
pub type EventType = u32;

/// Event types understood by the navigation bar runtime
pub mod event_types {
    use super::EventType;

    /// Content offset sample from the scroll container
    pub const SCROLL: EventType = 30;
    /// Interface orientation changed (already filtered and deduplicated)
    pub const ORIENTATION_CHANGED: EventType = 40;
    /// Safe-area insets changed
    pub const SAFE_AREA_CHANGED: EventType = 41;
    /// Re-read safe-area insets from the platform
    pub const SAFE_AREA_REFRESH: EventType = 42;
    /// Renderer measured the large-title block
    pub const LAYOUT_MEASURED: EventType = 50;
    /// External stop-refreshing signal changed
    pub const STOP_REFRESH: EventType = 60;

    // Outbound notifications
    pub const REFRESH_STARTED: EventType = 70;
    pub const REFRESH_STOPPED: EventType = 71;
}

/// An event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Monotonic sequence number assigned by the queue
    pub sequence: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    /// Raw content offset as reported by the scroll container
    ContentOffset { x: f32, y: f32 },
    Orientation(InterfaceOrientation),
    Insets(EdgeInsets),
    Size(Size),
    Flag(bool),
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            data,
            sequence: 0,
        }
    }

    /// Scroll sample with the raw (un-negated) content offset
    pub fn scroll(x: f32, y: f32) -> Self {
        Self::new(event_types::SCROLL, EventData::ContentOffset { x, y })
    }

    pub fn orientation(orientation: InterfaceOrientation) -> Self {
        Self::new(
            event_types::ORIENTATION_CHANGED,
            EventData::Orientation(orientation),
        )
    }

    pub fn insets(insets: EdgeInsets) -> Self {
        Self::new(event_types::SAFE_AREA_CHANGED, EventData::Insets(insets))
    }

    pub fn measured(size: Size) -> Self {
        Self::new(event_types::LAYOUT_MEASURED, EventData::Size(size))
    }

    pub fn stop_refresh(stop: bool) -> Self {
        Self::new(event_types::STOP_REFRESH, EventData::Flag(stop))
    }

    /// Scroll offset in the bar's convention (y negated), if this is a scroll event
    pub fn scroll_offset(&self) -> Option<Point> {
        match self.data {
            EventData::ContentOffset { x, y } => Some(Point::from_content_offset(x, y)),
            _ => None,
        }
    }
}

// ============================================================================
// Queue
// ============================================================================

/// FIFO event queue with a deferred lane
///
/// Deferred events are promoted only when the immediate lane is empty, so a
/// deferred event never overtakes input that was already queued.
#[derive(Debug, Default)]
pub struct EventQueue {
    immediate: VecDeque<Event>,
    deferred: VecDeque<Event>,
    next_sequence: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for processing in arrival order
    pub fn push(&mut self, mut event: Event) {
        event.sequence = self.bump();
        self.immediate.push_back(event);
    }

    /// Queue an event to run after the current immediate backlog drains
    pub fn defer(&mut self, mut event: Event) {
        event.sequence = self.bump();
        self.deferred.push_back(event);
    }

    /// Take the next event to process
    pub fn pop(&mut self) -> Option<Event> {
        if let Some(event) = self.immediate.pop_front() {
            return Some(event);
        }
        self.deferred.pop_front()
    }

    pub fn len(&self) -> usize {
        self.immediate.len() + self.deferred.len()
    }

    pub fn is_empty(&self) -> bool {
        self.immediate.is_empty() && self.deferred.is_empty()
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    fn bump(&mut self) -> u64 {
        self.next_sequence += 1;
        self.next_sequence
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event)>;

/// Dispatches events to handlers registered per event type
pub struct EventDispatcher {
    handlers: FxHashMap<EventType, Vec<EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register a handler for an event type
    pub fn register<F>(&mut self, event_type: EventType, handler: F)
    where
        F: Fn(&Event) + 'static,
    {
        self.handlers
            .entry(event_type)
            .or_default()
            .push(Box::new(handler));
    }

    /// Dispatch an event to all handlers registered for its type
    pub fn dispatch(&self, event: &Event) {
        if let Some(handlers) = self.handlers.get(&event.event_type) {
            for handler in handlers {
                handler(event);
            }
        }
    }

    pub fn has_handlers(&self, event_type: EventType) -> bool {
        self.handlers
            .get(&event_type)
            .is_some_and(|handlers| !handlers.is_empty())
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
