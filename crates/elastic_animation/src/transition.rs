//! Property transitions
//!
//! A [`PropertyTransition`] interpolates a small set of visual properties from
//! one value set to another over a fixed duration with an easing curve. The bar
//! uses these for layer insertion/removal and for the eased collapse after a
//! refresh stops; the renderer samples [`PropertyTransition::value`] each frame.

use serde::Serialize;

use crate::easing::Easing;

/// Properties a transition can animate
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TransitionProperties {
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
    /// Uniform scale factor
    pub scale: Option<f32>,
    /// Rotation in degrees
    pub rotate: Option<f32>,
    /// Interpolation weight between the previous and the next layout (0.0 to 1.0)
    pub blend: Option<f32>,
}

impl TransitionProperties {
    /// Create properties with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    /// Create properties with only the blend weight set
    pub fn blend(value: f32) -> Self {
        Self {
            blend: Some(value),
            ..Default::default()
        }
    }

    /// Untransformed, fully visible
    pub fn identity() -> Self {
        Self {
            opacity: Some(1.0),
            scale: Some(1.0),
            rotate: Some(0.0),
            blend: None,
        }
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Builder: set uniform scale
    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    /// Builder: set rotation
    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Interpolate between two property sets
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            scale: lerp_opt(self.scale, other.scale, t),
            rotate: lerp_opt(self.rotate, other.rotate, t),
            blend: lerp_opt(self.blend, other.blend, t),
        }
    }

    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    pub fn resolved_scale(&self) -> f32 {
        self.scale.unwrap_or(1.0)
    }

    pub fn resolved_rotate(&self) -> f32 {
        self.rotate.unwrap_or(0.0)
    }
}

fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// A timed transition between two property sets
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertyTransition {
    duration_ms: u32,
    easing: Easing,
    from: TransitionProperties,
    to: TransitionProperties,
    #[serde(skip)]
    elapsed_ms: f32,
    #[serde(skip)]
    playing: bool,
}

impl PropertyTransition {
    pub fn new(
        duration_ms: u32,
        easing: Easing,
        from: TransitionProperties,
        to: TransitionProperties,
    ) -> Self {
        Self {
            duration_ms,
            easing,
            from,
            to,
            elapsed_ms: 0.0,
            playing: false,
        }
    }

    /// A transition that carries only timing; renderers blend old and new
    /// layouts by the `blend` weight
    pub fn timing(duration_ms: u32, easing: Easing) -> Self {
        Self::new(
            duration_ms,
            easing,
            TransitionProperties::blend(0.0),
            TransitionProperties::blend(1.0),
        )
    }

    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = self.duration_ms > 0;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Linear progress through the duration (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Whether the transition has run to its end
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Current interpolated properties
    pub fn value(&self) -> TransitionProperties {
        let eased = self.easing.apply(self.progress());
        self.from.lerp(&self.to, eased)
    }

    pub fn from_properties(&self) -> TransitionProperties {
        self.from
    }

    pub fn to_properties(&self) -> TransitionProperties {
        self.to
    }

    /// Advance the transition by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        self.elapsed_ms += dt_ms;

        if self.elapsed_ms >= self.duration_ms as f32 {
            self.elapsed_ms = self.duration_ms as f32;
            self.playing = false;
        }
    }
}
