//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Orientation name not recognised
    #[error("Unknown orientation: {0}")]
    UnknownOrientation(String),

    /// Publishing to a hub that has been closed
    #[error("Environment hub is closed")]
    HubClosed,

    /// Host could not report safe-area insets
    #[error("Safe-area insets unavailable: {0}")]
    InsetsUnavailable(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
