//! State Machine Runtime
//!
//! Flat state machines over user-defined state and event types.
//! Supports:
//! - Transition actions
//! - Entry actions, run once per entry into a state
//!
//! Events with no matching transition from the current state are ignored.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// An action function executed during transitions
pub type Action = Box<dyn FnMut()>;

/// A transition in the state machine
pub struct Transition<S, E> {
    pub from_state: S,
    pub event: E,
    pub to_state: S,
    pub actions: SmallVec<[Action; 2]>,
}

impl<S, E> Transition<S, E> {
    /// Create a transition without actions
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
            actions: SmallVec::new(),
        }
    }

    /// Add an action to execute during transition
    pub fn with_action<F: FnMut() + 'static>(mut self, action: F) -> Self {
        self.actions.push(Box::new(action));
        self
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: Vec<Transition<S, E>>,
    entry_callbacks: FxHashMap<S, Vec<Action>>,
}

impl<S, E> StateMachineBuilder<S, E>
where
    S: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Debug,
{
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
            entry_callbacks: FxHashMap::default(),
        }
    }

    /// Add a transition
    pub fn transition(mut self, transition: Transition<S, E>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add a simple transition (from, event, to)
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    /// Add an entry action for a state
    pub fn on_enter<F: FnMut() + 'static>(mut self, state: S, action: F) -> Self {
        self.entry_callbacks
            .entry(state)
            .or_default()
            .push(Box::new(action));
        self
    }

    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            entry_callbacks: self.entry_callbacks,
        }
    }
}

/// A state machine instance
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: Vec<Transition<S, E>>,
    entry_callbacks: FxHashMap<S, Vec<Action>>,
}

impl<S, E> StateMachine<S, E>
where
    S: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Debug,
{
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> S {
        self.current_state
    }

    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Send an event, returning the state the machine is in afterwards
    pub fn send(&mut self, event: E) -> S {
        self.try_send(event);
        self.current_state
    }

    /// Send an event, returning the new state only if a transition fired
    pub fn try_send(&mut self, event: E) -> Option<S> {
        let from = self.current_state;
        let transition = self
            .transitions
            .iter_mut()
            .find(|t| t.from_state == from && t.event == event)?;
        let to_state = transition.to_state;

        for action in transition.actions.iter_mut() {
            action();
        }

        self.current_state = to_state;
        tracing::trace!(?from, ?event, to = ?to_state, "state machine transition");

        if let Some(callbacks) = self.entry_callbacks.get_mut(&to_state) {
            for callback in callbacks.iter_mut() {
                callback();
            }
        }

        Some(to_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Phase {
        Resting,
        Pulling,
        Loading,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Input {
        Pull,
        Release,
        Trigger,
        Finish,
    }

    fn machine() -> StateMachine<Phase, Input> {
        StateMachine::builder(Phase::Resting)
            .on(Phase::Resting, Input::Pull, Phase::Pulling)
            .on(Phase::Pulling, Input::Release, Phase::Resting)
            .on(Phase::Pulling, Input::Trigger, Phase::Loading)
            .on(Phase::Loading, Input::Finish, Phase::Resting)
            .build()
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = machine();
        assert_eq!(fsm.current_state(), Phase::Resting);

        fsm.send(Input::Pull);
        assert_eq!(fsm.current_state(), Phase::Pulling);

        fsm.send(Input::Trigger);
        assert!(fsm.is_in(Phase::Loading));

        fsm.send(Input::Finish);
        assert!(fsm.is_in(Phase::Resting));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = machine();
        assert_eq!(fsm.try_send(Input::Finish), None);
        assert_eq!(fsm.send(Input::Release), Phase::Resting);
        assert_eq!(fsm.current_state(), Phase::Resting);
    }

    #[test]
    fn test_action_runs_before_entry() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (action_log, entry_log) = (log.clone(), log.clone());

        let mut fsm = StateMachine::builder(Phase::Pulling)
            .transition(
                Transition::new(Phase::Pulling, Input::Trigger, Phase::Loading)
                    .with_action(move || action_log.borrow_mut().push("action")),
            )
            .on_enter(Phase::Loading, move || entry_log.borrow_mut().push("enter"))
            .build();

        fsm.send(Input::Trigger);
        assert_eq!(*log.borrow(), vec!["action", "enter"]);
    }

    #[test]
    fn test_entry_runs_once_per_entry() {
        let entries = Rc::new(Cell::new(0));
        let counter = entries.clone();
        let mut fsm = StateMachine::builder(Phase::Resting)
            .on(Phase::Resting, Input::Pull, Phase::Pulling)
            .on(Phase::Pulling, Input::Release, Phase::Resting)
            .on_enter(Phase::Pulling, move || counter.set(counter.get() + 1))
            .build();

        for _ in 0..3 {
            fsm.send(Input::Pull);
            // already pulling, no re-entry
            fsm.send(Input::Pull);
            fsm.send(Input::Release);
        }
        assert_eq!(entries.get(), 3);
    }
}
