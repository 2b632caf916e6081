//! Elastic Navigation Bar
//!
//! A collapsing navigation bar for scrollable content. The large title
//! shrinks into an inline title as content scrolls up, stretches when pulled
//! down, and an optional pull-to-refresh indicator is revealed as the pull
//! grows.
//!
//! - [`ScrollGeometryEngine`]: pure function from inputs to a [`BarLayout`]
//! - [`RefreshController`]: pull-to-refresh state machine with haptics
//! - [`SizeFeedbackChannel`]: measured large title size fed back into layout
//! - [`NavigationHost`]: reactive binding that drives a [`BarRenderer`]
//!
//! # Example
//!
//! ```rust
//! use elastic_core::EdgeInsets;
//! use elastic_navbar::{BarFrame, BarRenderer, ElasticNavigation, HostEnvironment, NavigationHost};
//! use elastic_platform::SharedInsets;
//!
//! struct Log(Vec<f32>);
//!
//! impl BarRenderer<&'static str> for Log {
//!     fn render(&mut self, frame: &BarFrame<'_, &'static str>) {
//!         self.0.push(frame.layout.large_title_offset_y);
//!     }
//! }
//!
//! let nav = ElasticNavigation::new("rows").with_title("Inbox");
//! let env = HostEnvironment::new().with_insets(SharedInsets::new(EdgeInsets::top(47.0)));
//! let mut host = NavigationHost::new(nav, Log(Vec::new()), env);
//!
//! let layout = host.scroll(0.0, -200.0);
//! assert!(layout.is_ready_to_collapse);
//! assert_eq!(host.renderer().0, vec![87.0, 47.0]);
//! ```

pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod host;
pub mod measure;
pub mod refresh;
pub mod view;

pub use config::{Config, Elastic, LargeTitle, Progress, SmallTitle};
pub use content::{BarContent, Placement, TitleDisplayMode, Toolbar, ToolbarItem};
pub use engine::{BarLayout, LayoutInputs, ProgressPhase, ScrollGeometryEngine};
pub use error::{ConfigError, Result};
pub use host::{
    BarFrame, BarRenderer, Environment, HostEnvironment, Layer, LayerTransition, NavigationHost,
};
pub use measure::{SizeFeedbackChannel, SizeReporter};
pub use refresh::{
    OnRefresh, RefreshBinding, RefreshController, RefreshPhase, RefreshState, StopSignal,
};
pub use view::{BarStyle, ElasticNavigation};
