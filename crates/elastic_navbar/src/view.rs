//! Component description
//!
//! [`ElasticNavigation`] is an immutable value describing one bar: content,
//! configuration, style and optional refresh binding. Every `with_*` method
//! consumes the value and returns the modified one; clone first to keep the
//! original.
//!
//! ```rust
//! use elastic_navbar::{ElasticNavigation, StopSignal, TitleDisplayMode};
//!
//! let stop = StopSignal::new();
//! let nav = ElasticNavigation::new("feed")
//!     .with_title("Inbox")
//!     .with_display_mode(TitleDisplayMode::Large)
//!     .with_config(|c| c.large_title.top_padding = 15.0)
//!     .with_refresh(stop, || println!("reloading"));
//!
//! assert!(nav.is_refreshable());
//! ```

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::content::{BarContent, TitleDisplayMode, Toolbar};
use crate::refresh::{RefreshBinding, StopSignal};

/// Background of the bar once it touches content
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarStyle {
    /// Blurred translucent material
    #[default]
    Material,
    /// Solid RGBA color
    Solid([f32; 4]),
    Transparent,
}

/// A navigation bar over scrollable content
#[derive(Clone, Debug)]
pub struct ElasticNavigation<P> {
    content: P,
    bar: BarContent<P>,
    config: Config,
    bar_style: BarStyle,
    refresh: Option<RefreshBinding>,
}

impl<P> ElasticNavigation<P> {
    pub fn new(content: P) -> Self {
        Self {
            content,
            bar: BarContent::default(),
            config: Config::default(),
            bar_style: BarStyle::default(),
            refresh: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.bar.title = Some(title.into());
        self
    }

    pub fn with_display_mode(mut self, mode: TitleDisplayMode) -> Self {
        self.bar.display_mode = mode;
        self
    }

    pub fn with_subtitle(mut self, subtitle: P) -> Self {
        self.bar.subtitle = Some(subtitle);
        self
    }

    pub fn with_toolbar(mut self, toolbar: Toolbar<P>) -> Self {
        self.bar.toolbar = toolbar;
        self
    }

    /// Enable pull-to-refresh
    pub fn with_refresh(mut self, stop: StopSignal, on_refresh: impl Fn() + 'static) -> Self {
        self.refresh = Some(RefreshBinding::new(stop, on_refresh));
        self
    }

    pub fn with_bar_style(mut self, style: BarStyle) -> Self {
        self.bar_style = style;
        self
    }

    /// Replace the config with a modified copy
    pub fn with_config(mut self, mutation: impl FnOnce(&mut Config)) -> Self {
        self.config = self.config.with(mutation);
        self
    }

    pub fn content(&self) -> &P {
        &self.content
    }

    pub fn bar(&self) -> &BarContent<P> {
        &self.bar
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bar_style(&self) -> BarStyle {
        self.bar_style
    }

    pub fn refresh(&self) -> Option<&RefreshBinding> {
        self.refresh.as_ref()
    }

    pub fn is_refreshable(&self) -> bool {
        self.refresh.is_some()
    }

    pub(crate) fn into_parts(self) -> (P, BarContent<P>, Config, BarStyle, Option<RefreshBinding>) {
        (
            self.content,
            self.bar,
            self.config,
            self.bar_style,
            self.refresh,
        )
    }
}
