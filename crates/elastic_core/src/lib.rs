//! Elastic Core Runtime
//!
//! Foundational primitives shared by the elastic navigation bar crates:
//!
//! - **Reactive Signals**: a small dependency-tracked graph that recomputes
//!   derived values and runs effects when inputs change
//! - **State Machines**: flat state machines with transition actions and
//!   entry callbacks
//! - **Event Queue**: ordered input events with a deferred lane that is only
//!   drained once every queued immediate event has been handled
//! - **Geometry**: points, sizes, insets, edge sets and interface orientation
//!
//! # Example
//!
//! ```rust
//! use elastic_core::reactive::ReactiveGraph;
//!
//! let mut graph = ReactiveGraph::new();
//!
//! let offset = graph.create_signal(0.0f32);
//! let collapsed = graph.create_derived(move |g| g.get(offset).unwrap_or(0.0) > 40.0);
//!
//! graph.set(offset, 120.0);
//! assert_eq!(graph.get_derived(collapsed), Some(true));
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;
pub mod reactive;

pub use events::{Event, EventData, EventDispatcher, EventQueue, EventType};
pub use fsm::{StateMachine, Transition};
pub use geometry::{
    clamp, clamp_min, Edge, EdgeInsets, Edges, InterfaceOrientation, Point, ScrollDirection, Size,
};
pub use reactive::{Derived, DerivedId, Effect, EffectId, ReactiveGraph, Signal, SignalId};
