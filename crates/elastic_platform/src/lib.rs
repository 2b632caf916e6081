//! Elastic Platform Boundary
//!
//! The pieces of the host environment a navigation bar depends on, expressed
//! as plain Rust types the host implements or feeds:
//!
//! - **Orientation**: raw device orientation parsing, filtering and dedup
//! - **Safe area**: inset reads deferred until queued input is processed
//! - **Environment hub**: thread-safe notification fan-out with drop-to-unsubscribe
//! - **Haptics**: fire-and-forget impact sink

pub mod error;
pub mod haptics;
pub mod hub;
pub mod orientation;
pub mod safe_area;

pub use error::{PlatformError, Result};
pub use haptics::{CountingHaptics, HapticSink, ImpactStyle, NoopHaptics};
pub use hub::{EnvironmentHub, Subscription, SubscriptionId};
pub use orientation::{parse_orientation, DeviceOrientation, OrientationDetector};
pub use safe_area::{InsetsProvider, SafeAreaInsetsDetector, SharedInsets};
