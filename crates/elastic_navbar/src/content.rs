//! Host-supplied bar content
//!
//! Everything here is opaque payload (`P`) threaded through to the renderer.
//! The layout only looks at whether a title is present and at the display mode.

use elastic_core::InterfaceOrientation;
use serde::{Deserialize, Serialize};

/// How the title is presented
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleDisplayMode {
    /// Large in portrait, inline in landscape
    #[default]
    Auto,
    /// Starts large and collapses to inline while scrolling
    Large,
    /// Always inline
    Inline,
}

impl TitleDisplayMode {
    /// Resolve `Auto` for an orientation; never returns `Auto`
    pub fn resolve(self, orientation: InterfaceOrientation) -> TitleDisplayMode {
        match self {
            TitleDisplayMode::Auto if orientation.is_landscape() => TitleDisplayMode::Inline,
            TitleDisplayMode::Auto => TitleDisplayMode::Large,
            mode => mode,
        }
    }

    pub fn is_large(self, orientation: InterfaceOrientation) -> bool {
        self.resolve(orientation) == TitleDisplayMode::Large
    }
}

/// Side of the bar an item sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    Leading,
    Trailing,
}

/// A single bar item
#[derive(Clone, Debug, PartialEq)]
pub struct ToolbarItem<P> {
    pub placement: Placement,
    pub content: P,
}

impl<P> ToolbarItem<P> {
    pub fn leading(content: P) -> Self {
        Self {
            placement: Placement::Leading,
            content,
        }
    }

    pub fn trailing(content: P) -> Self {
        Self {
            placement: Placement::Trailing,
            content,
        }
    }
}

/// Leading and trailing bar items; at most one of each
#[derive(Clone, Debug, PartialEq)]
pub struct Toolbar<P> {
    pub leading: Option<P>,
    pub trailing: Option<P>,
}

impl<P> Default for Toolbar<P> {
    fn default() -> Self {
        Self {
            leading: None,
            trailing: None,
        }
    }
}

impl<P> Toolbar<P> {
    pub fn is_empty(&self) -> bool {
        self.leading.is_none() && self.trailing.is_none()
    }
}

impl<P> FromIterator<ToolbarItem<P>> for Toolbar<P> {
    /// Keeps the first item for each placement; later ones are dropped
    fn from_iter<I: IntoIterator<Item = ToolbarItem<P>>>(items: I) -> Self {
        let mut toolbar = Toolbar::default();
        for item in items {
            let slot = match item.placement {
                Placement::Leading => &mut toolbar.leading,
                Placement::Trailing => &mut toolbar.trailing,
            };
            if slot.is_none() {
                *slot = Some(item.content);
            }
        }
        toolbar
    }
}

/// Everything the host puts into the bar
#[derive(Clone, Debug, PartialEq)]
pub struct BarContent<P> {
    pub title: Option<String>,
    pub display_mode: TitleDisplayMode,
    pub subtitle: Option<P>,
    pub toolbar: Toolbar<P>,
}

impl<P> Default for BarContent<P> {
    fn default() -> Self {
        Self {
            title: None,
            display_mode: TitleDisplayMode::Auto,
            subtitle: None,
            toolbar: Toolbar::default(),
        }
    }
}

impl<P> BarContent<P> {
    pub fn has_title(&self) -> bool {
        self.title.is_some()
    }
}
