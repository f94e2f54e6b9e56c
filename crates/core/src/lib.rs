//! speedo-core: Core traits and gauge model for the speedo dashboard.
//!
//! This crate contains the generator service boundary (GeneratorService,
//! GeneratorListener), the lock-free listener slot the generator threads
//! deliver through, the gauge state model, and shared constants.

pub mod constants;
mod gauge_state;
mod listener_slot;
mod service;

pub use constants::{DELIVERY_CAPACITY, FRAME_INTERVAL, FRAME_MS, UNAVAILABLE_MAX};
pub use gauge_state::GaugeState;
pub use listener_slot::{ListenerSlot, NullListener};
pub use service::{BoxedListener, GeneratorListener, GeneratorService, ServiceError};

// Re-export types used in trait signatures for convenience
pub use speedo_types::{Channel, GaugeConfig, GeneratorConfig};
