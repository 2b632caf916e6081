//! Device orientation
//!
//! Raw device orientations arrive from the host in whatever form its sensor
//! reports them. [`OrientationDetector`] keeps only the variants it was asked
//! to track and drops repeats, so downstream layout only reacts to real
//! changes.

use std::fmt;
use std::str::FromStr;

use elastic_core::InterfaceOrientation;
use smallvec::SmallVec;

use crate::error::{PlatformError, Result};

/// Orientation as reported by the device sensor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceOrientation {
    #[default]
    Unknown,
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
    FaceUp,
    FaceDown,
}

impl DeviceOrientation {
    /// The interface orientation a bar lays itself out for
    pub fn interface(self) -> InterfaceOrientation {
        match self {
            DeviceOrientation::Portrait => InterfaceOrientation::Portrait,
            DeviceOrientation::LandscapeLeft => InterfaceOrientation::LandscapeLeft,
            DeviceOrientation::LandscapeRight => InterfaceOrientation::LandscapeRight,
            _ => InterfaceOrientation::Other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DeviceOrientation::Unknown => "unknown",
            DeviceOrientation::Portrait => "portrait",
            DeviceOrientation::PortraitUpsideDown => "portrait-upside-down",
            DeviceOrientation::LandscapeLeft => "landscape-left",
            DeviceOrientation::LandscapeRight => "landscape-right",
            DeviceOrientation::FaceUp => "face-up",
            DeviceOrientation::FaceDown => "face-down",
        }
    }
}

impl fmt::Display for DeviceOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeviceOrientation {
    type Err = PlatformError;

    /// Accepts kebab, snake and camel case (`landscape-left`, `landscape_left`, `landscapeLeft`)
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "unknown" => Ok(DeviceOrientation::Unknown),
            "portrait" => Ok(DeviceOrientation::Portrait),
            "portraitupsidedown" => Ok(DeviceOrientation::PortraitUpsideDown),
            "landscapeleft" => Ok(DeviceOrientation::LandscapeLeft),
            "landscaperight" => Ok(DeviceOrientation::LandscapeRight),
            "faceup" => Ok(DeviceOrientation::FaceUp),
            "facedown" => Ok(DeviceOrientation::FaceDown),
            _ => Err(PlatformError::UnknownOrientation(s.to_string())),
        }
    }
}

/// Parse an orientation name straight into the interface orientation it maps to
pub fn parse_orientation(name: &str) -> Result<InterfaceOrientation> {
    name.parse::<DeviceOrientation>().map(DeviceOrientation::interface)
}

/// Filters and deduplicates raw orientation notifications
#[derive(Clone, Debug)]
pub struct OrientationDetector {
    filter: SmallVec<[DeviceOrientation; 4]>,
    current: DeviceOrientation,
}

impl OrientationDetector {
    /// Track only the given orientations; an empty filter tracks nothing
    pub fn new(initial: DeviceOrientation, filter: &[DeviceOrientation]) -> Self {
        Self {
            filter: filter.iter().copied().collect(),
            current: initial,
        }
    }

    /// Track portrait and both landscape orientations
    pub fn interface(initial: DeviceOrientation) -> Self {
        Self::new(
            initial,
            &[
                DeviceOrientation::Portrait,
                DeviceOrientation::LandscapeLeft,
                DeviceOrientation::LandscapeRight,
            ],
        )
    }

    pub fn current(&self) -> DeviceOrientation {
        self.current
    }

    /// Feed a raw notification; returns the new orientation if it passed the
    /// filter and differs from the last accepted one
    pub fn observe(&mut self, raw: DeviceOrientation) -> Option<DeviceOrientation> {
        if !self.filter.contains(&raw) || raw == self.current {
            return None;
        }
        tracing::debug!(from = %self.current, to = %raw, "orientation changed");
        self.current = raw;
        Some(raw)
    }
}
