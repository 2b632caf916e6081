//! Integration tests for reactive signals + FSM + transitions
//!
//! These tests verify that:
//! - Signals drive transition targets through effects
//! - FSM entry callbacks can start transitions
//! - Queued events feed the reactive graph in order

use elastic_animation::{AnimationScheduler, TransitionPreset};
use elastic_core::events::{event_types, Event, EventData, EventQueue};
use elastic_core::fsm::{StateMachine, Transition};
use elastic_core::reactive::ReactiveGraph;
use elastic_core::ScrollDirection;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A signal crossing a threshold starts a fade through an effect
#[test]
fn test_signal_drives_fade() {
    let mut graph = ReactiveGraph::new();
    let offset = graph.create_signal(0.0f32);
    let ready = graph.create_derived(move |g| g.get(offset).unwrap_or(0.0) >= 40.0);

    let fades = Rc::new(RefCell::new(Vec::new()));
    let fades_clone = fades.clone();
    let last = Rc::new(Cell::new(false));
    let _effect = graph.create_effect(move |g| {
        let now = g.get_derived(ready).unwrap_or(false);
        if now != last.get() {
            last.set(now);
            fades_clone.borrow_mut().push(if now {
                TransitionPreset::title_fade_in()
            } else {
                TransitionPreset::title_fade_out()
            });
        }
    });

    graph.set(offset, 10.0);
    assert!(fades.borrow().is_empty());

    graph.set(offset, 50.0);
    graph.set(offset, 60.0);
    assert_eq!(fades.borrow().len(), 1);

    graph.set(offset, 0.0);
    assert_eq!(fades.borrow().len(), 2);

    let mut scheduler = AnimationScheduler::new();
    for fade in fades.borrow_mut().drain(..) {
        scheduler.play(fade);
    }
    assert!(scheduler.has_active_animations());
    scheduler.tick_by(200.0);
    assert!(!scheduler.has_active_animations());
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Phase {
    Idle,
    Loading,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Input {
    Trigger,
    Stop,
}

/// FSM entry into Loading schedules a transition; the stop action schedules another
#[test]
fn test_fsm_entry_starts_transition() {
    let started = Rc::new(Cell::new(0));
    let collapsed = Rc::new(Cell::new(0));
    let (started_clone, collapsed_clone) = (started.clone(), collapsed.clone());

    let mut fsm = StateMachine::builder(Phase::Idle)
        .on(Phase::Idle, Input::Trigger, Phase::Loading)
        .transition(
            Transition::new(Phase::Loading, Input::Stop, Phase::Idle)
                .with_action(move || collapsed_clone.set(collapsed_clone.get() + 1)),
        )
        .on_enter(Phase::Loading, move || started_clone.set(started_clone.get() + 1))
        .build();

    assert_eq!(fsm.try_send(Input::Stop), None);
    fsm.send(Input::Trigger);
    fsm.send(Input::Trigger);
    assert_eq!(started.get(), 1);

    fsm.send(Input::Stop);
    assert_eq!(collapsed.get(), 1);
    assert!(fsm.is_in(Phase::Idle));
}

/// Scroll events drained from the queue update a signal; the FSM follows the signal
#[test]
fn test_queue_feeds_graph_and_fsm() {
    let mut graph = ReactiveGraph::new();
    let offset = graph.create_signal(0.0f32);
    let pulled = graph.create_derived(move |g| g.get(offset).unwrap_or(0.0).is_scrolled_down(100.0));

    let loads = Rc::new(Cell::new(0));
    let loads_clone = loads.clone();
    let mut fsm: StateMachine<Phase, Input> = StateMachine::builder(Phase::Idle)
        .on(Phase::Idle, Input::Trigger, Phase::Loading)
        .on(Phase::Loading, Input::Stop, Phase::Idle)
        .on_enter(Phase::Loading, move || loads_clone.set(loads_clone.get() + 1))
        .build();

    let mut queue = EventQueue::new();
    for y in [0.0, 50.0, 130.0, 20.0] {
        // raw offsets grow positive while the content is pulled down
        queue.push(Event::scroll(0.0, y));
    }
    queue.defer(Event::new(event_types::SAFE_AREA_REFRESH, EventData::None));

    let mut seen_refresh_after = None;
    while let Some(event) = queue.pop() {
        match event.event_type {
            event_types::SCROLL => {
                if let Some(point) = event.scroll_offset() {
                    graph.set(offset, point.y);
                }
                if graph.get_derived(pulled).unwrap_or(false) {
                    fsm.send(Input::Trigger);
                }
            }
            event_types::SAFE_AREA_REFRESH => {
                seen_refresh_after = graph.get(offset);
            }
            _ => {}
        }
    }

    assert!(fsm.is_in(Phase::Loading));
    assert_eq!(loads.get(), 1);
    assert_eq!(seen_refresh_after, Some(-20.0));
}
