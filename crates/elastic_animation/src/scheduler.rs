//! Animation scheduler
//!
//! Owns every running transition and advances them each frame.

use crate::transition::PropertyTransition;
use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

new_key_type! {
    pub struct TransitionId;
}

/// The animation scheduler that ticks all active transitions
pub struct AnimationScheduler {
    transitions: SlotMap<TransitionId, PropertyTransition>,
    last_frame: Instant,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            transitions: SlotMap::with_key(),
            last_frame: Instant::now(),
        }
    }

    /// Add a transition and start it
    pub fn play(&mut self, mut transition: PropertyTransition) -> TransitionId {
        transition.start();
        self.transitions.insert(transition)
    }

    pub fn get(&self, id: TransitionId) -> Option<&PropertyTransition> {
        self.transitions.get(id)
    }

    pub fn get_mut(&mut self, id: TransitionId) -> Option<&mut PropertyTransition> {
        self.transitions.get_mut(id)
    }

    pub fn remove(&mut self, id: TransitionId) -> Option<PropertyTransition> {
        self.transitions.remove(id)
    }

    /// Tick all transitions using wall-clock time since the previous tick
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt_ms = (now - self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;
        self.tick_by(dt_ms);
    }

    /// Tick all transitions by an explicit delta (in milliseconds)
    pub fn tick_by(&mut self, dt_ms: f32) {
        for (_, transition) in self.transitions.iter_mut() {
            transition.tick(dt_ms);
        }
    }

    /// Drop transitions that have finished playing; returns how many were removed
    pub fn prune_finished(&mut self) -> usize {
        let before = self.transitions.len();
        self.transitions.retain(|_, t| t.is_playing());
        let removed = before - self.transitions.len();
        if removed > 0 {
            tracing::trace!(removed, "pruned finished transitions");
        }
        removed
    }

    /// Check if any transitions are still running
    pub fn has_active_animations(&self) -> bool {
        self.transitions.iter().any(|(_, t)| t.is_playing())
    }

    pub fn iter(&self) -> impl Iterator<Item = (TransitionId, &PropertyTransition)> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::TransitionPreset;

    #[test]
    fn test_scheduler_runs_to_completion() {
        let mut scheduler = AnimationScheduler::new();
        let fade = scheduler.play(TransitionPreset::title_fade_in());
        let collapse = scheduler.play(TransitionPreset::refresh_collapse());
        assert!(scheduler.has_active_animations());

        scheduler.tick_by(250.0);
        assert!(scheduler.get(fade).unwrap().is_finished());
        assert!(scheduler.get(collapse).unwrap().is_playing());

        assert_eq!(scheduler.prune_finished(), 1);
        assert!(scheduler.get(fade).is_none());

        scheduler.tick_by(100.0);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_zero_duration_is_never_active() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.play(TransitionPreset::spinner_insertion());
        assert!(!scheduler.has_active_animations());
        assert_eq!(scheduler.prune_finished(), 1);
        assert!(scheduler.is_empty());
    }
}
