//! Geometry primitives
//!
//! Lengths are logical points (`f32`). The vertical scroll convention used
//! throughout the workspace is the *negated* content offset: positive values
//! mean content moved up under the bar, negative values mean the user pulled
//! the content down past its rest position.

use serde::{Deserialize, Serialize};

// ============================================================================
// Clamping
// ============================================================================

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics; when `min > max` the upper bound
/// wins, which keeps callers that derive bounds from user config total.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Clamp `value` from below only
#[inline]
pub fn clamp_min(value: f32, min: f32) -> f32 {
    value.max(min)
}

// ============================================================================
// Scroll direction predicates
// ============================================================================

/// Direction predicates over a (negated) vertical scroll offset
pub trait ScrollDirection {
    /// True once the content has been pulled down at least `beyond` points
    fn is_scrolled_down(&self, beyond: f32) -> bool;

    /// True once the content has moved up more than `beyond` points
    fn is_scrolled_up(&self, beyond: f32) -> bool;
}

impl ScrollDirection for f32 {
    #[inline]
    fn is_scrolled_down(&self, beyond: f32) -> bool {
        *self <= -beyond
    }

    #[inline]
    fn is_scrolled_up(&self, beyond: f32) -> bool {
        *self > beyond
    }
}

impl ScrollDirection for Point {
    fn is_scrolled_down(&self, beyond: f32) -> bool {
        self.y.is_scrolled_down(beyond)
    }

    fn is_scrolled_up(&self, beyond: f32) -> bool {
        self.y.is_scrolled_up(beyond)
    }
}

// ============================================================================
// Point / Size
// ============================================================================

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert a raw content offset reported by a scroll container into the
    /// bar's convention (y negated)
    pub fn from_content_offset(x: f32, y: f32) -> Self {
        Self { x, y: -y }
    }
}

/// A 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

// ============================================================================
// Edges
// ============================================================================

/// A single rectangle edge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Leading,
    Bottom,
    Trailing,
}

impl Edge {
    const fn bit(self) -> u8 {
        match self {
            Edge::Top => 0b0001,
            Edge::Leading => 0b0010,
            Edge::Bottom => 0b0100,
            Edge::Trailing => 0b1000,
        }
    }
}

/// A set of edges
///
/// Serialized as a list of edge names, e.g. `["leading", "trailing"]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Edge>", into = "Vec<Edge>")]
pub struct Edges {
    bits: u8,
}

impl Edges {
    pub const NONE: Edges = Edges { bits: 0 };
    pub const TOP: Edges = Edges { bits: 0b0001 };
    pub const LEADING: Edges = Edges { bits: 0b0010 };
    pub const BOTTOM: Edges = Edges { bits: 0b0100 };
    pub const TRAILING: Edges = Edges { bits: 0b1000 };
    pub const VERTICAL: Edges = Edges { bits: 0b0101 };
    pub const HORIZONTAL: Edges = Edges { bits: 0b1010 };
    pub const ALL: Edges = Edges { bits: 0b1111 };

    pub const fn union(self, other: Edges) -> Edges {
        Edges {
            bits: self.bits | other.bits,
        }
    }

    pub const fn contains(&self, edge: Edge) -> bool {
        self.bits & edge.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl From<Edge> for Edges {
    fn from(edge: Edge) -> Self {
        Edges { bits: edge.bit() }
    }
}

impl From<Vec<Edge>> for Edges {
    fn from(edges: Vec<Edge>) -> Self {
        edges
            .into_iter()
            .fold(Edges::NONE, |acc, edge| acc.union(edge.into()))
    }
}

impl From<Edges> for Vec<Edge> {
    fn from(edges: Edges) -> Self {
        [Edge::Top, Edge::Leading, Edge::Bottom, Edge::Trailing]
            .into_iter()
            .filter(|edge| edges.contains(*edge))
            .collect()
    }
}

// ============================================================================
// Insets
// ============================================================================

/// Insets from each edge of a rectangle (safe area, padding)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Insets with only the top edge set
    pub const fn top(top: f32) -> Self {
        Self::new(top, 0.0, 0.0, 0.0)
    }

    /// Zero out every edge contained in `edges`
    pub fn ignoring(&self, edges: Edges) -> EdgeInsets {
        EdgeInsets {
            top: if edges.contains(Edge::Top) { 0.0 } else { self.top },
            left: if edges.contains(Edge::Leading) {
                0.0
            } else {
                self.left
            },
            bottom: if edges.contains(Edge::Bottom) {
                0.0
            } else {
                self.bottom
            },
            right: if edges.contains(Edge::Trailing) {
                0.0
            } else {
                self.right
            },
        }
    }
}

// ============================================================================
// Orientation
// ============================================================================

/// Interface orientation as delivered by the host platform
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceOrientation {
    #[default]
    Portrait,
    LandscapeLeft,
    LandscapeRight,
    /// Face up/down, upside down or unknown
    Other,
}

impl InterfaceOrientation {
    pub fn is_landscape(&self) -> bool {
        matches!(
            self,
            InterfaceOrientation::LandscapeLeft | InterfaceOrientation::LandscapeRight
        )
    }

    /// Orientations a bar reacts to; everything else is filtered out
    pub fn is_tracked(&self) -> bool {
        !matches!(self, InterfaceOrientation::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_is_idempotent() {
        for x in [-500.0, -1.0, 0.0, 0.5, 47.0, 87.0, 1000.0] {
            for (lo, hi) in [(0.0, 87.0), (47.0, 47.0), (-10.0, 10.0)] {
                let once = clamp(x, lo, hi);
                assert_eq!(clamp(once, lo, hi), once);
                assert!(once >= lo && once <= hi);
            }
        }
    }

    #[test]
    fn test_clamp_inverted_bounds_does_not_panic() {
        assert_eq!(clamp(5.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_scroll_direction_boundaries() {
        assert!(0.0f32.is_scrolled_down(0.0));
        assert!(!0.0f32.is_scrolled_up(0.0));
        assert!((-1.0f32).is_scrolled_down(1.0));
        assert!(!(-0.5f32).is_scrolled_down(1.0));
        assert!(0.1f32.is_scrolled_up(0.0));
        assert!(Point::from_content_offset(0.0, 30.0).is_scrolled_down(30.0));
    }

    #[test]
    fn test_insets_ignoring() {
        let insets = EdgeInsets::new(47.0, 10.0, 34.0, 12.0);
        let ignored = insets.ignoring(Edges::VERTICAL.union(Edges::LEADING));
        assert_eq!(ignored, EdgeInsets::new(0.0, 0.0, 0.0, 12.0));
        assert_eq!(insets.ignoring(Edges::NONE), insets);
    }

    #[test]
    fn test_edges_list_conversion() {
        let edges: Edges = vec![Edge::Leading, Edge::Trailing].into();
        assert_eq!(edges, Edges::HORIZONTAL);
        let back: Vec<Edge> = edges.into();
        assert_eq!(back, vec![Edge::Leading, Edge::Trailing]);
    }

    #[test]
    fn test_orientation_landscape() {
        assert!(InterfaceOrientation::LandscapeLeft.is_landscape());
        assert!(!InterfaceOrientation::Portrait.is_landscape());
        assert!(!InterfaceOrientation::Other.is_tracked());
    }
}
