//! Elastic Animation System
//!
//! Timed property transitions for the navigation bar's layers.
//!
//! # Features
//!
//! - **Easing**: the timing curves used by the bar (ease-in fades, ease-out reveals)
//! - **Transitions**: opacity / scale / rotation / blend interpolation over a duration
//! - **Presets**: spinner removal roll, small-title fade, refresh collapse
//! - **Scheduler**: ticks every running transition once per frame

pub mod easing;
pub mod presets;
pub mod scheduler;
pub mod transition;

pub use easing::Easing;
pub use presets::TransitionPreset;
pub use scheduler::{AnimationScheduler, TransitionId};
pub use transition::{PropertyTransition, TransitionProperties};
