//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, validating or saving a [`Config`](crate::Config)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is below its allowed minimum (or not a finite number)
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        value: f32,
        min: f32,
    },

    /// A value that must be strictly positive is not
    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f32 },
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;
