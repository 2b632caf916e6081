//! Navigation bar configuration
//!
//! ```text
//!                    safe area top edge
//! |--------------------------------------------------------|
//! |                    [top_edge_inset]                    |
//! |--------------------------------------------------------|
//! | leading item      small title block      trailing item |
//! |--------------------------------------------------------|
//! |                      [top_padding]                     |
//! |--------------------------------------------------------|
//! |            large title block [supposed_height]         |
//! |--------------------------------------------------------|
//! |                    [bottom_padding]                    |
//! |--------------------------------------------------------|
//! |                    subtitle content                    |
//! |--------------------------------------------------------|
//! ```
//!
//! A [`Config`] is a plain value. Overrides go through [`Config::with`], which
//! returns a modified copy and leaves the original untouched. Files are TOML;
//! every field is optional and falls back to its default.
//!
//! ```toml
//! bar_opacity_threshold = 12.0
//! content_ignores_safe_area_edges = ["leading", "trailing"]
//!
//! [large_title]
//! top_padding = 15.0
//!
//! [progress_landscape]
//! start_reveal_offset = 20.0
//! revealed_offset = 70.0
//! trigger_threshold = 5.0
//! ```

use std::fs;
use std::path::Path;

use elastic_core::{Edges, InterfaceOrientation};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Large title block geometry
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LargeTitle {
    /// Approximate height of the large title text
    pub supposed_height: f32,
    /// Gap between the safe area top edge and the small title block
    pub top_edge_inset: f32,
    /// Gap between the top of the large title block and the text
    pub top_padding: f32,
    /// Gap between the large title block and the subtitle content
    pub bottom_padding: f32,
}

impl Default for LargeTitle {
    fn default() -> Self {
        Self {
            supposed_height: 40.0,
            top_edge_inset: 0.0,
            top_padding: 0.0,
            bottom_padding: 5.0,
        }
    }
}

impl LargeTitle {
    /// Height of the block the mask hides while the bar floats over content
    pub fn block_height(&self) -> f32 {
        self.top_padding + self.supposed_height + self.bottom_padding
    }
}

/// Small (inline) title geometry
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmallTitle {
    pub top_padding_portrait: f32,
    pub top_padding_landscape: f32,
    pub bottom_padding: f32,
}

impl Default for SmallTitle {
    fn default() -> Self {
        Self {
            top_padding_portrait: 0.0,
            top_padding_landscape: 10.0,
            bottom_padding: 7.0,
        }
    }
}

impl SmallTitle {
    pub fn top_padding(&self, orientation: InterfaceOrientation) -> f32 {
        if orientation.is_landscape() {
            self.top_padding_landscape
        } else {
            self.top_padding_portrait
        }
    }
}

/// Pull distances that drive the refresh indicator
///
/// `start_reveal_offset < revealed_offset` always holds; [`Progress::new`]
/// substitutes the portrait defaults when given an inverted pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProgressFile", into = "ProgressFile")]
pub struct Progress {
    start_reveal_offset: f32,
    revealed_offset: f32,
    triggering_offset: f32,
}

impl Progress {
    const DEFAULT_START_REVEAL: f32 = 30.0;
    const DEFAULT_REVEALED: f32 = 110.0;

    pub fn new(start_reveal_offset: f32, revealed_offset: f32, trigger_threshold: f32) -> Self {
        let (start, revealed) = if start_reveal_offset >= revealed_offset {
            tracing::warn!(
                start_reveal_offset,
                revealed_offset,
                "progress reveal offsets are inverted, using portrait defaults"
            );
            (Self::DEFAULT_START_REVEAL, Self::DEFAULT_REVEALED)
        } else {
            (start_reveal_offset, revealed_offset)
        };

        Self {
            start_reveal_offset: start,
            revealed_offset: revealed,
            triggering_offset: revealed + trigger_threshold,
        }
    }

    pub fn portrait() -> Self {
        Self::new(Self::DEFAULT_START_REVEAL, Self::DEFAULT_REVEALED, 15.0)
    }

    pub fn landscape() -> Self {
        Self::new(20.0, 60.0, 5.0)
    }

    /// Pulled distance at which the indicator starts to appear
    pub fn start_reveal_offset(&self) -> f32 {
        self.start_reveal_offset
    }

    /// Pulled distance at which the indicator is fully revealed
    pub fn revealed_offset(&self) -> f32 {
        self.revealed_offset
    }

    /// Pulled distance at which a refresh fires
    pub fn triggering_offset(&self) -> f32 {
        self.triggering_offset
    }

    pub fn trigger_threshold(&self) -> f32 {
        self.triggering_offset - self.revealed_offset
    }
}

/// On-disk shape of [`Progress`]
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct ProgressFile {
    start_reveal_offset: f32,
    revealed_offset: f32,
    trigger_threshold: f32,
}

impl Default for ProgressFile {
    fn default() -> Self {
        Progress::portrait().into()
    }
}

impl From<ProgressFile> for Progress {
    fn from(file: ProgressFile) -> Self {
        Progress::new(
            file.start_reveal_offset,
            file.revealed_offset,
            file.trigger_threshold,
        )
    }
}

impl From<Progress> for ProgressFile {
    fn from(progress: Progress) -> Self {
        Self {
            start_reveal_offset: progress.start_reveal_offset,
            revealed_offset: progress.revealed_offset,
            trigger_threshold: progress.trigger_threshold(),
        }
    }
}

/// Elastic stretch of the large title while pulling down
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Elastic {
    /// Upper bound of the large title scale
    pub max_scale: f32,
    /// Pull distance over which the scale grows by 1.0
    pub stretch_distance: f32,
}

impl Default for Elastic {
    fn default() -> Self {
        Self {
            max_scale: 1.2,
            stretch_distance: 1000.0,
        }
    }
}

/// Complete navigation bar configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Fade distance of the bar background once it touches content
    #[serde(default = "default_bar_opacity_threshold")]
    pub bar_opacity_threshold: f32,
    /// Gap between the large title top padding and the refresh indicator
    #[serde(default = "default_progress_top_offset")]
    pub progress_top_offset: f32,
    /// Safe-area edges the main content extends under
    #[serde(default)]
    pub content_ignores_safe_area_edges: Edges,
    #[serde(default)]
    pub large_title: LargeTitle,
    #[serde(default)]
    pub small_title: SmallTitle,
    #[serde(default = "Progress::portrait")]
    pub progress_portrait: Progress,
    #[serde(default = "Progress::landscape")]
    pub progress_landscape: Progress,
    #[serde(default)]
    pub elastic: Elastic,
}

fn default_bar_opacity_threshold() -> f32 {
    10.0
}

fn default_progress_top_offset() -> f32 {
    10.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bar_opacity_threshold: default_bar_opacity_threshold(),
            progress_top_offset: default_progress_top_offset(),
            content_ignores_safe_area_edges: Edges::NONE,
            large_title: LargeTitle::default(),
            small_title: SmallTitle::default(),
            progress_portrait: Progress::portrait(),
            progress_landscape: Progress::landscape(),
            elastic: Elastic::default(),
        }
    }
}

impl Config {
    /// Return a copy with `mutation` applied
    pub fn with(&self, mutation: impl FnOnce(&mut Config)) -> Config {
        let mut copy = *self;
        mutation(&mut copy);
        copy
    }

    /// Progress distances for an orientation
    pub fn progress(&self, orientation: InterfaceOrientation) -> Progress {
        if orientation.is_landscape() {
            self.progress_landscape
        } else {
            self.progress_portrait
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded navigation bar config");
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check ranges the layout math relies on
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("large_title.supposed_height", self.large_title.supposed_height),
            ("large_title.top_edge_inset", self.large_title.top_edge_inset),
            ("large_title.top_padding", self.large_title.top_padding),
            ("large_title.bottom_padding", self.large_title.bottom_padding),
            ("small_title.top_padding_portrait", self.small_title.top_padding_portrait),
            ("small_title.top_padding_landscape", self.small_title.top_padding_landscape),
            ("small_title.bottom_padding", self.small_title.bottom_padding),
            ("progress_top_offset", self.progress_top_offset),
        ];
        for (field, value) in lengths {
            at_least(field, value, 0.0)?;
        }

        positive("bar_opacity_threshold", self.bar_opacity_threshold)?;
        positive("elastic.stretch_distance", self.elastic.stretch_distance)?;
        at_least("elastic.max_scale", self.elastic.max_scale, 1.0)?;
        Ok(())
    }
}

fn at_least(field: &'static str, value: f32, min: f32) -> Result<()> {
    if !value.is_finite() || value < min {
        return Err(ConfigError::BelowMinimum { field, value, min });
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use elastic_core::Edge;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.large_title.supposed_height, 40.0);
        assert_eq!(config.large_title.bottom_padding, 5.0);
        assert_eq!(config.small_title.bottom_padding, 7.0);
        assert_eq!(config.bar_opacity_threshold, 10.0);
        assert_eq!(config.progress_portrait.triggering_offset(), 125.0);
        assert_eq!(config.progress_landscape.triggering_offset(), 65.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_progress_fallback_keeps_threshold() {
        let progress = Progress::new(120.0, 50.0, 7.0);
        assert_eq!(progress.start_reveal_offset(), 30.0);
        assert_eq!(progress.revealed_offset(), 110.0);
        assert_eq!(progress.triggering_offset(), 117.0);

        let equal = Progress::new(80.0, 80.0, 0.0);
        assert_eq!(equal.start_reveal_offset(), 30.0);
        assert_eq!(equal.triggering_offset(), 110.0);
    }

    #[test]
    fn test_progress_for_orientation() {
        let config = Config::default();
        assert_eq!(
            config.progress(InterfaceOrientation::LandscapeRight),
            Progress::landscape()
        );
        assert_eq!(
            config.progress(InterfaceOrientation::Other),
            Progress::portrait()
        );
        assert_eq!(
            config
                .small_title
                .top_padding(InterfaceOrientation::LandscapeLeft),
            10.0
        );
    }

    #[test]
    fn test_with_returns_modified_copy() {
        let base = Config::default();
        let changed = base.with(|c| c.large_title.top_padding = 15.0);
        assert_eq!(base.large_title.top_padding, 0.0);
        assert_eq!(changed.large_title.top_padding, 15.0);
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            bar_opacity_threshold = 20.0
            content_ignores_safe_area_edges = ["leading", "trailing"]

            [large_title]
            top_padding = 15.0

            [progress_portrait]
            start_reveal_offset = 200.0
            revealed_offset = 100.0
            trigger_threshold = 10.0
            "#,
        )
        .unwrap();

        assert_eq!(config.bar_opacity_threshold, 20.0);
        assert_eq!(config.large_title.top_padding, 15.0);
        assert_eq!(config.large_title.supposed_height, 40.0);
        assert!(config.content_ignores_safe_area_edges.contains(Edge::Leading));
        assert!(!config.content_ignores_safe_area_edges.contains(Edge::Top));
        assert_eq!(config.progress_portrait.revealed_offset(), 110.0);
        assert_eq!(config.progress_portrait.triggering_offset(), 120.0);
        assert_eq!(config.progress_landscape, Progress::landscape());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default().with(|c| {
            c.content_ignores_safe_area_edges = Edges::HORIZONTAL;
            c.progress_landscape = Progress::new(10.0, 50.0, 8.0);
        });
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_validation_errors() {
        let err = Config::from_toml_str("bar_opacity_threshold = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "bar_opacity_threshold",
                ..
            }
        ));

        let err = Config::from_toml_str("[large_title]\nsupposed_height = -1.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::BelowMinimum {
                field: "large_title.supposed_height",
                ..
            }
        ));

        let err = Config::from_toml_str("[elastic]\nmax_scale = 0.5").unwrap_err();
        assert!(matches!(err, ConfigError::BelowMinimum { min, .. } if min == 1.0));

        assert!(matches!(
            Config::from_toml_str("bar_opacity_threshold = \"fast\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/elastic.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/elastic.toml"));
    }
}
