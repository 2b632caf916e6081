//! Scroll geometry
//!
//! [`ScrollGeometryEngine::compute`] turns the current inputs into a complete
//! [`BarLayout`]. It is a pure function: no state is kept between calls and the
//! same inputs always give the same layout.
//!
//! Offsets follow the workspace convention: positive `offset_y` means content
//! moved up under the bar, negative means it was pulled down past rest.

use elastic_core::{
    clamp, clamp_min, EdgeInsets, Edges, InterfaceOrientation, Point, ScrollDirection, Size,
};
use serde::Serialize;

use crate::config::Config;
use crate::content::TitleDisplayMode;
use crate::refresh::RefreshState;

/// Everything a layout depends on
#[derive(Clone, Copy, Debug)]
pub struct LayoutInputs<'a> {
    pub config: &'a Config,
    pub offset_y: f32,
    pub orientation: InterfaceOrientation,
    pub safe_area: EdgeInsets,
    pub display_mode: TitleDisplayMode,
    pub has_title: bool,
    pub refreshable: bool,
    pub refresh: RefreshState,
    /// Last measured size of the large title block
    pub measured_large_title: Size,
}

impl<'a> LayoutInputs<'a> {
    /// Inputs for a titled, non-refreshable bar at rest in portrait
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            offset_y: 0.0,
            orientation: InterfaceOrientation::Portrait,
            safe_area: EdgeInsets::ZERO,
            display_mode: TitleDisplayMode::Auto,
            has_title: true,
            refreshable: false,
            refresh: RefreshState::default(),
            measured_large_title: Size::ZERO,
        }
    }
}

/// How the refresh indicator is drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressPhase {
    #[default]
    Hidden,
    /// Pie-masked reveal while pulling
    Revealing { fraction: f32 },
    /// Plain rotating spinner while refreshing
    Spinning,
}

impl ProgressPhase {
    /// Sweep of the reveal mask in degrees
    pub fn mask_sweep_degrees(&self) -> f32 {
        match self {
            ProgressPhase::Hidden => 0.0,
            ProgressPhase::Revealing { fraction } => fraction * 360.0,
            ProgressPhase::Spinning => 360.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, ProgressPhase::Hidden)
    }
}

/// Geometry of every layer of the bar for one frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BarLayout {
    pub height_to_cover: f32,
    pub extra_height_to_cover: f32,
    /// Vertical offset of the large title block (the scroll factor)
    pub large_title_offset_y: f32,
    pub large_title_opacity: f32,
    pub large_title_scale: f32,
    /// Scale anchor in unit coordinates; bottom-leading
    pub large_title_anchor: Point,
    /// Height hidden from the top of the large title layer while it floats over content
    pub large_title_mask_height: Option<f32>,
    pub small_title_opacity: f32,
    pub bar_background_opacity: f32,
    pub divider_visible: bool,
    pub is_bar_intersecting_content: bool,
    pub is_ready_to_collapse: bool,
    pub progress_visible: bool,
    pub progress_phase: ProgressPhase,
    pub reveal_fraction: f32,
    /// Spinner rotation; half a turn while refreshing
    pub progress_rotation: f32,
    pub progress_offset_y: f32,
    pub content_top_padding: f32,
    /// Horizontal and bottom safe-area padding for the main content
    pub content_insets: EdgeInsets,
}

impl BarLayout {
    pub fn scroll_factor(&self) -> f32 {
        self.large_title_offset_y
    }
}

/// Stateless layout computation
pub struct ScrollGeometryEngine;

impl ScrollGeometryEngine {
    pub fn compute(inputs: &LayoutInputs<'_>) -> BarLayout {
        let config = inputs.config;
        let offset = inputs.offset_y;
        let safe_top = inputs.safe_area.top;
        let large = inputs.display_mode.is_large(inputs.orientation);
        let refreshing = inputs.refresh.is_refreshing();

        let extra = Self::extra_height_to_cover(inputs);
        let height_to_cover = config.large_title.top_edge_inset + safe_top + extra;

        let scroll_factor = if offset.is_scrolled_up(0.0) {
            clamp_min(height_to_cover - clamp(offset, 0.0, height_to_cover), safe_top)
        } else {
            height_to_cover - offset
        };

        let intersecting = scroll_factor <= safe_top;
        let ready = scroll_factor
            <= config.large_title.top_padding + safe_top + config.small_title.bottom_padding;

        let large_title_opacity = if !ready && large { 1.0 } else { 0.0 };
        let small_title_opacity = if ready || (!inputs.refreshable && !large) {
            1.0
        } else {
            0.0
        };

        let large_title_scale = if inputs.refreshable && !offset.is_scrolled_up(0.0) {
            let d = config.elastic.stretch_distance;
            clamp((-offset + d) / d, 1.0, config.elastic.max_scale)
        } else {
            1.0
        };

        let bar_background_opacity = if intersecting {
            clamp((offset - extra).abs() / config.bar_opacity_threshold, 0.0, 1.0)
        } else {
            0.0
        };

        let progress_visible = if !inputs.refreshable {
            false
        } else if refreshing {
            !(ready && !inputs.has_title)
        } else {
            offset.is_scrolled_down(1.0)
        };

        let reveal_fraction = if refreshing {
            1.0
        } else {
            Self::reveal_fraction(config, inputs.orientation, offset)
        };

        let progress_phase = match (progress_visible, refreshing) {
            (false, _) => ProgressPhase::Hidden,
            (true, true) => ProgressPhase::Spinning,
            (true, false) => ProgressPhase::Revealing {
                fraction: reveal_fraction,
            },
        };

        let content_top_padding = inputs.measured_large_title.height
            + extra
            + safe_top
            + config.small_title.top_padding(inputs.orientation);

        let content_insets = inputs
            .safe_area
            .ignoring(config.content_ignores_safe_area_edges.union(Edges::VERTICAL));

        let layout = BarLayout {
            height_to_cover,
            extra_height_to_cover: extra,
            large_title_offset_y: scroll_factor,
            large_title_opacity,
            large_title_scale,
            large_title_anchor: Point::new(0.0, 1.0),
            large_title_mask_height: (!intersecting).then(|| config.large_title.block_height()),
            small_title_opacity,
            bar_background_opacity,
            divider_visible: intersecting,
            is_bar_intersecting_content: intersecting,
            is_ready_to_collapse: ready,
            progress_visible,
            progress_phase,
            reveal_fraction,
            progress_rotation: if refreshing { 180.0 } else { 0.0 },
            progress_offset_y: safe_top
                + config.large_title.top_edge_inset
                + config.large_title.top_padding
                + config.progress_top_offset,
            content_top_padding,
            content_insets,
        };

        tracing::trace!(
            offset_y = offset,
            scroll_factor,
            intersecting,
            ready,
            "computed bar layout"
        );
        layout
    }

    /// Height the large title adds below the small title row
    pub fn extra_height_to_cover(inputs: &LayoutInputs<'_>) -> f32 {
        if !inputs.has_title || !inputs.display_mode.is_large(inputs.orientation) {
            return 0.0;
        }
        inputs.config.large_title.top_padding + inputs.config.large_title.supposed_height
    }

    /// Fraction of the refresh indicator revealed at a given offset
    pub fn reveal_fraction(config: &Config, orientation: InterfaceOrientation, offset_y: f32) -> f32 {
        let progress = config.progress(orientation);
        let pulled = clamp_min(-offset_y, 0.0);
        let start = progress.start_reveal_offset();
        let span = progress.revealed_offset() - start;
        clamp((pulled - start) / span, 0.0, 1.0)
    }
}
