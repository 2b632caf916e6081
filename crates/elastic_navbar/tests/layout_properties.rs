//! Layout and refresh properties
//!
//! These tests check invariants of the geometry engine and the refresh
//! controller over sweeps of offsets rather than single samples:
//! - Collapse is monotonic and the large title never flickers back
//! - Pulling down grows the title block without bound
//! - The intersecting flag flips exactly at the safe-area boundary
//! - Refresh fires once per gesture and stop is idempotent while idle

use std::cell::Cell;
use std::rc::Rc;

use elastic_core::{clamp, EdgeInsets, InterfaceOrientation};
use elastic_navbar::{
    BarLayout, Config, LayoutInputs, Progress, RefreshController, RefreshPhase,
    ScrollGeometryEngine, TitleDisplayMode,
};
use elastic_platform::CountingHaptics;

const SAFE_TOP: f32 = 47.0;

fn layout_at(config: &Config, offset_y: f32) -> BarLayout {
    ScrollGeometryEngine::compute(&LayoutInputs {
        offset_y,
        safe_area: EdgeInsets::top(SAFE_TOP),
        display_mode: TitleDisplayMode::Large,
        ..LayoutInputs::new(config)
    })
}

fn counting_controller() -> (RefreshController, Rc<Cell<u32>>, CountingHaptics) {
    let refreshes = Rc::new(Cell::new(0));
    let counter = refreshes.clone();
    let haptics = CountingHaptics::new();
    let controller = RefreshController::new(
        Some(Rc::new(move || counter.set(counter.get() + 1))),
        Rc::new(haptics.clone()),
    );
    (controller, refreshes, haptics)
}

#[test]
fn test_collapse_is_monotonic() {
    let config = Config::default();
    let height = layout_at(&config, 0.0).height_to_cover;

    let mut previous = layout_at(&config, 0.0);
    let mut opacity_flips = 0;
    let mut offset = 0.0;
    while offset <= height {
        let layout = layout_at(&config, offset);
        assert!(
            layout.large_title_offset_y <= previous.large_title_offset_y,
            "scroll factor grew at offset {offset}"
        );
        if layout.large_title_opacity != previous.large_title_opacity {
            opacity_flips += 1;
            assert_eq!(layout.large_title_opacity, 0.0);
        }
        previous = layout;
        offset += 0.5;
    }
    assert_eq!(opacity_flips, 1);
}

#[test]
fn test_pull_down_grows_without_bound() {
    let config = Config::default();
    let mut previous = layout_at(&config, 0.0).large_title_offset_y;
    for step in 1..=400 {
        let offset = -(step as f32) * 5.0;
        let factor = layout_at(&config, offset).large_title_offset_y;
        assert!(factor > previous, "scroll factor stalled at offset {offset}");
        previous = factor;
    }
    assert!(previous > 2000.0);
}

#[test]
fn test_clamp_idempotence() {
    let bounds = [(0.0, 87.0), (47.0, 87.0), (-30.0, 30.0), (5.0, 5.0)];
    let mut x = -300.0;
    while x <= 300.0 {
        for (lo, hi) in bounds {
            let once = clamp(x, lo, hi);
            assert_eq!(clamp(once, lo, hi), once);
        }
        x += 7.5;
    }
}

#[test]
fn test_progress_fallback_keeps_threshold() {
    for (start, revealed, threshold) in [(110.0, 30.0, 15.0), (50.0, 50.0, 4.0), (900.0, -1.0, 0.0)] {
        let progress = Progress::new(start, revealed, threshold);
        assert_eq!(progress.start_reveal_offset(), 30.0);
        assert_eq!(progress.revealed_offset(), 110.0);
        assert_eq!(progress.triggering_offset(), 110.0 + threshold);
    }
}

#[test]
fn test_intersecting_boundary_is_inclusive() {
    let config = Config::default();

    // scroll factor == safe top exactly at offset == extra height
    let at = layout_at(&config, 40.0);
    assert_eq!(at.large_title_offset_y, SAFE_TOP);
    assert!(at.is_bar_intersecting_content);
    assert!(at.divider_visible);
    assert_eq!(at.large_title_mask_height, None);

    let before = layout_at(&config, 39.75);
    assert!(before.large_title_offset_y > SAFE_TOP);
    assert!(!before.is_bar_intersecting_content);
    assert_eq!(before.large_title_mask_height, Some(45.0));
}

#[test]
fn test_rest_scenario() {
    let layout = layout_at(&Config::default(), 0.0);
    assert_eq!(layout.height_to_cover, 87.0);
    assert_eq!(layout.large_title_offset_y, 87.0);
    assert!(!layout.is_ready_to_collapse);
    assert_eq!(layout.large_title_opacity, 1.0);
    assert_eq!(layout.small_title_opacity, 0.0);
}

#[test]
fn test_scrolled_far_up_scenario() {
    let layout = layout_at(&Config::default(), 200.0);
    assert_eq!(layout.large_title_offset_y, 47.0);
    assert!(layout.is_bar_intersecting_content);
    assert!(layout.is_ready_to_collapse);
    assert_eq!(layout.large_title_opacity, 0.0);
    assert_eq!(layout.small_title_opacity, 1.0);
    assert_eq!(layout.bar_background_opacity, 1.0);
}

#[test]
fn test_auto_mode_is_inline_in_landscape() {
    let config = Config::default();
    let layout = ScrollGeometryEngine::compute(&LayoutInputs {
        orientation: InterfaceOrientation::LandscapeLeft,
        safe_area: EdgeInsets::new(0.0, 47.0, 21.0, 47.0),
        ..LayoutInputs::new(&config)
    });

    assert_eq!(layout.extra_height_to_cover, 0.0);
    assert_eq!(layout.large_title_opacity, 0.0);
    assert_eq!(layout.small_title_opacity, 1.0);
    // landscape small title padding, no measured block yet
    assert_eq!(layout.content_top_padding, 10.0);
    assert_eq!(layout.content_insets, EdgeInsets::new(0.0, 47.0, 0.0, 47.0));
}

#[test]
fn test_two_gestures_refresh_twice() {
    let (mut refresh, refreshes, haptics) = counting_controller();
    let progress = Progress::portrait();

    for offset in [-20.0, -90.0, -130.0, -160.0, -40.0, 0.0] {
        refresh.on_scroll(offset, &progress);
    }
    assert!(refresh.on_stop_signal(true).is_some());
    refresh.on_stop_signal(false);

    for offset in [-50.0, -140.0, -10.0, 0.0] {
        refresh.on_scroll(offset, &progress);
    }

    assert_eq!(refreshes.get(), 2);
    assert_eq!(haptics.count(), 2);
    assert_eq!(refresh.phase(), RefreshPhase::Refreshing);
}

#[test]
fn test_second_dip_without_stop_does_not_retrigger() {
    let (mut refresh, refreshes, haptics) = counting_controller();
    let progress = Progress::portrait();

    for offset in [-130.0, 0.0, -130.0, 0.0] {
        refresh.on_scroll(offset, &progress);
    }

    assert_eq!(refreshes.get(), 1);
    assert_eq!(haptics.count(), 1);
    assert!(refresh.is_refreshing());
}

#[test]
fn test_stop_while_idle_changes_nothing() {
    let (mut refresh, refreshes, haptics) = counting_controller();
    let progress = Progress::portrait();
    refresh.on_scroll(-60.0, &progress);
    let before = refresh.state();

    for stop in [true, true, false, true] {
        assert!(refresh.on_stop_signal(stop).is_none());
    }

    assert_eq!(refresh.state(), before);
    assert_eq!(refreshes.get(), 0);
    assert_eq!(haptics.count(), 0);
}

#[test]
fn test_layout_serializes_for_dumps() {
    let layout = layout_at(&Config::default(), 0.0);
    let json = serde_json::to_value(layout).unwrap();

    assert_eq!(json["height_to_cover"], 87.0);
    assert_eq!(json["progress_phase"]["kind"], "hidden");
    assert_eq!(json["large_title_mask_height"], 45.0);
}
