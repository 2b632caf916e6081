//! Scroll trace simulation
//!
//! Mounts a bar on a recording renderer, replays raw scroll offsets and
//! collects one [`SimFrame`] per sample.

use anyhow::Result;
use elastic_core::EdgeInsets;
use elastic_navbar::{
    BarFrame, BarLayout, BarRenderer, Config, ElasticNavigation, HostEnvironment, Layer,
    NavigationHost, RefreshState, StopSignal, TitleDisplayMode,
};
use elastic_platform::{DeviceOrientation, SharedInsets};
use serde::Serialize;

/// Inputs for one simulation run
#[derive(Debug, Clone)]
pub struct Scenario {
    pub config: Config,
    pub orientation: DeviceOrientation,
    pub insets: EdgeInsets,
    pub title: Option<String>,
    pub display_mode: TitleDisplayMode,
    pub refreshable: bool,
    /// Raise the stop signal after this many samples
    pub stop_after: Option<usize>,
    /// Raw content offsets; positive values pull the content down
    pub offsets: Vec<f32>,
}

/// Bar state after one scroll sample
#[derive(Debug, Clone, Serialize)]
pub struct SimFrame {
    pub sample: usize,
    pub raw_y: f32,
    pub refresh: RefreshState,
    pub layout: BarLayout,
    /// Transitions started while handling this sample
    pub transitions: Vec<Layer>,
}

#[derive(Default)]
struct Recorder {
    started: Vec<Layer>,
}

impl BarRenderer<()> for Recorder {
    fn render(&mut self, frame: &BarFrame<'_, ()>) {
        self.started
            .extend(frame.transitions.iter().map(|transition| transition.layer));
    }
}

/// Replay the scenario and return a frame per offset
pub fn run(scenario: &Scenario) -> Result<Vec<SimFrame>> {
    scenario.config.validate()?;

    let mut nav = ElasticNavigation::new(())
        .with_display_mode(scenario.display_mode)
        .with_config(|c| *c = scenario.config);
    if let Some(title) = &scenario.title {
        nav = nav.with_title(title.clone());
    }
    let stop = StopSignal::new();
    if scenario.refreshable {
        nav = nav.with_refresh(stop.clone(), || tracing::info!("refresh requested"));
    }

    let env = HostEnvironment::new()
        .with_orientation(scenario.orientation)
        .with_insets(SharedInsets::new(scenario.insets));
    let mut host = NavigationHost::new(nav, Recorder::default(), env);

    let mut frames = Vec::with_capacity(scenario.offsets.len());
    for (sample, &raw_y) in scenario.offsets.iter().enumerate() {
        if scenario.stop_after == Some(sample) {
            tracing::debug!(sample, "raising stop signal");
            stop.set(true);
        }
        let layout = host.scroll(0.0, raw_y);
        let transitions = std::mem::take(&mut host.renderer_mut().started);
        frames.push(SimFrame {
            sample,
            raw_y,
            refresh: host.refresh_state(),
            layout,
            transitions,
        });
        host.tick(16.0);
    }
    Ok(frames)
}
