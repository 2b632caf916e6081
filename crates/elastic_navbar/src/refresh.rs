//! Pull-to-refresh controller
//!
//! Phases run `Idle -> Armed -> Refreshing -> Idle` on the core state machine.
//! A separate lock flag stops one continuous overscroll from firing twice; it
//! clears once the content returns to rest.
//!
//! The host calls [`RefreshController::on_scroll`] for every sample before the
//! layout for that sample is computed, and forwards changes of the stop
//! signal to [`RefreshController::on_stop_signal`].

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use elastic_animation::{PropertyTransition, TransitionPreset};
use elastic_core::{ScrollDirection, StateMachine, Transition};
use elastic_platform::{HapticSink, ImpactStyle};
use serde::Serialize;

use crate::config::Progress;

/// Callback run once each time a refresh starts
pub type OnRefresh = Rc<dyn Fn()>;

/// Refresh phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPhase {
    #[default]
    Idle,
    /// Pulled down but not past the trigger
    Armed,
    Refreshing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RefreshInput {
    Pull,
    Release,
    Trigger,
    Stop,
}

/// Snapshot of the controller read by the layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RefreshState {
    pub phase: RefreshPhase,
    pub locked_for_refresh: bool,
}

impl RefreshState {
    pub fn is_refreshing(&self) -> bool {
        self.phase == RefreshPhase::Refreshing
    }
}

/// Host-owned flag that ends a refresh when it becomes true
///
/// Clones share the flag, so background work can finish a refresh by setting
/// it from any thread.
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, stop: bool) {
        self.flag.store(stop, Ordering::SeqCst);
    }

    pub fn get(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Stop signal plus the refresh callback
#[derive(Clone)]
pub struct RefreshBinding {
    pub stop: StopSignal,
    pub on_refresh: OnRefresh,
}

impl RefreshBinding {
    pub fn new(stop: StopSignal, on_refresh: impl Fn() + 'static) -> Self {
        Self {
            stop,
            on_refresh: Rc::new(on_refresh),
        }
    }
}

impl fmt::Debug for RefreshBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshBinding")
            .field("stop", &self.stop)
            .finish_non_exhaustive()
    }
}

/// Pull-to-refresh state machine
pub struct RefreshController {
    machine: StateMachine<RefreshPhase, RefreshInput>,
    refreshable: bool,
    locked_for_refresh: bool,
    last_stop: bool,
}

impl RefreshController {
    /// Create a controller; without a callback it never leaves `Idle`
    pub fn new(on_refresh: Option<OnRefresh>, haptics: Rc<dyn HapticSink>) -> Self {
        let refreshable = on_refresh.is_some();
        let trigger = |from: RefreshPhase| {
            let haptics = haptics.clone();
            Transition::new(from, RefreshInput::Trigger, RefreshPhase::Refreshing)
                .with_action(move || haptics.impact(ImpactStyle::Rigid))
        };

        let mut builder = StateMachine::builder(RefreshPhase::Idle)
            .on(RefreshPhase::Idle, RefreshInput::Pull, RefreshPhase::Armed)
            .on(RefreshPhase::Armed, RefreshInput::Release, RefreshPhase::Idle)
            .transition(trigger(RefreshPhase::Idle))
            .transition(trigger(RefreshPhase::Armed))
            .on(RefreshPhase::Refreshing, RefreshInput::Stop, RefreshPhase::Idle);

        if let Some(on_refresh) = on_refresh {
            builder = builder.on_enter(RefreshPhase::Refreshing, move || on_refresh());
        }

        Self {
            machine: builder.build(),
            refreshable,
            locked_for_refresh: false,
            last_stop: false,
        }
    }

    /// A controller for a bar without refresh
    pub fn disabled() -> Self {
        Self::new(None, Rc::new(elastic_platform::NoopHaptics))
    }

    pub fn is_refreshable(&self) -> bool {
        self.refreshable
    }

    pub fn phase(&self) -> RefreshPhase {
        self.machine.current_state()
    }

    pub fn is_refreshing(&self) -> bool {
        self.machine.is_in(RefreshPhase::Refreshing)
    }

    pub fn is_locked(&self) -> bool {
        self.locked_for_refresh
    }

    pub fn state(&self) -> RefreshState {
        RefreshState {
            phase: self.phase(),
            locked_for_refresh: self.locked_for_refresh,
        }
    }

    /// Settle the controller for a scroll sample; returns the new phase if it changed
    pub fn on_scroll(&mut self, offset_y: f32, progress: &Progress) -> Option<RefreshPhase> {
        if self.locked_for_refresh && offset_y >= 0.0 {
            self.locked_for_refresh = false;
        }
        if !self.refreshable {
            return None;
        }

        let before = self.phase();
        if offset_y.is_scrolled_down(progress.triggering_offset()) && !self.locked_for_refresh {
            if !self.is_refreshing() {
                self.machine.send(RefreshInput::Trigger);
            }
            self.locked_for_refresh = true;
        } else if offset_y.is_scrolled_down(1.0) {
            self.machine.send(RefreshInput::Pull);
        } else {
            self.machine.send(RefreshInput::Release);
        }

        let after = self.phase();
        if after == before {
            return None;
        }
        tracing::debug!(?before, ?after, offset_y, "refresh phase changed");
        Some(after)
    }

    /// Feed the current stop signal value
    ///
    /// Acts on the rising edge only. Returns the collapse transition when a
    /// running refresh was stopped.
    pub fn on_stop_signal(&mut self, stop: bool) -> Option<PropertyTransition> {
        let rising = stop && !self.last_stop;
        self.last_stop = stop;
        if !rising {
            return None;
        }

        self.machine.try_send(RefreshInput::Stop)?;
        tracing::debug!("refresh stopped");
        Some(TransitionPreset::refresh_collapse())
    }
}

impl fmt::Debug for RefreshController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshController")
            .field("phase", &self.phase())
            .field("refreshable", &self.refreshable)
            .field("locked_for_refresh", &self.locked_for_refresh)
            .finish()
    }
}
