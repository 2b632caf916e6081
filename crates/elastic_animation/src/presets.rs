//! Transition presets used by the navigation bar
//!
//! Timings follow the platform bar being imitated: short ease-in fades for
//! the inline title and the spinner, a slightly longer ease-in collapse once a
//! refresh is stopped.

use crate::easing::Easing;
use crate::transition::{PropertyTransition, TransitionProperties};

/// Duration of the inline title cross-fade
pub const TITLE_FADE_MS: u32 = 200;
/// Duration of the spinner's removal roll
pub const SPINNER_REMOVAL_MS: u32 = 200;
/// Duration of the collapse after the stop signal
pub const REFRESH_COLLAPSE_MS: u32 = 300;

/// Pre-built transitions for the bar's layers
pub struct TransitionPreset;

impl TransitionPreset {
    /// Inline title fading in as the bar becomes ready to collapse
    pub fn title_fade_in() -> PropertyTransition {
        PropertyTransition::new(
            TITLE_FADE_MS,
            Easing::EaseIn,
            TransitionProperties::opacity(0.0),
            TransitionProperties::opacity(1.0),
        )
    }

    /// Inline title fading out as the large title comes back
    pub fn title_fade_out() -> PropertyTransition {
        PropertyTransition::new(
            TITLE_FADE_MS,
            Easing::EaseIn,
            TransitionProperties::opacity(1.0),
            TransitionProperties::opacity(0.0),
        )
    }

    /// Spinner leaving: rolls back half a turn while shrinking and fading
    pub fn spinner_removal() -> PropertyTransition {
        PropertyTransition::new(
            SPINNER_REMOVAL_MS,
            Easing::EaseIn,
            TransitionProperties::identity(),
            TransitionProperties::identity()
                .with_rotate(-180.0)
                .with_scale(0.1)
                .with_opacity(0.0),
        )
    }

    /// Spinner appearing: no animation, it is revealed by the pull mask instead
    pub fn spinner_insertion() -> PropertyTransition {
        PropertyTransition::new(
            0,
            Easing::Linear,
            TransitionProperties::identity(),
            TransitionProperties::identity(),
        )
    }

    /// Eased collapse of the refreshing state after the stop signal
    pub fn refresh_collapse() -> PropertyTransition {
        PropertyTransition::timing(REFRESH_COLLAPSE_MS, Easing::EaseIn)
    }
}
