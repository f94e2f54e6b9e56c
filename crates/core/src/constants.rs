//! Shared constants for the application

use std::time::Duration;

/// Generator sample period and UI drain period (16ms, ~60fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Frame interval in milliseconds (useful for calculations)
pub const FRAME_MS: u64 = 16;

/// Reported in place of a maximum the service could not provide.
/// Gauges treat it like any other non-positive maximum and fall back to their default.
pub const UNAVAILABLE_MAX: f64 = -1.0;

/// Pending samples the delivery channel holds before dropping new ones.
/// Two producers at 60Hz fill this in roughly half a second of a stalled UI.
pub const DELIVERY_CAPACITY: usize = 64;
