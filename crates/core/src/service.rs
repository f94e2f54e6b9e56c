//! Generator service boundary and listener trait

use std::sync::Arc;

use speedo_types::Channel;
use thiserror::Error;

/// Failure of a call across the service boundary
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("generator service is not connected")]
    Disconnected,
}

/// Receives generated values.
///
/// Called from the generator threads, so implementations must not block.
pub trait GeneratorListener: Send + Sync {
    fn on_speed_value(&self, value: f64);

    fn on_rpm_value(&self, value: f64);

    /// Dispatch by channel
    fn on_value(&self, channel: Channel, value: f64) {
        match channel {
            Channel::Speed => self.on_speed_value(value),
            Channel::Rpm => self.on_rpm_value(value),
        }
    }
}

/// Shared listener handle
pub type BoxedListener = Arc<dyn GeneratorListener>;

/// Trait for value generator services
///
/// A service exposes its channel maxima and pushes samples to at most one
/// registered listener. Registering replaces the previous listener.
pub trait GeneratorService: Send + Sync {
    fn max_speed(&self) -> Result<f64, ServiceError>;

    fn max_rpm(&self) -> Result<f64, ServiceError>;

    fn register_callback(&self, listener: BoxedListener) -> Result<(), ServiceError>;

    fn unregister_callback(&self) -> Result<(), ServiceError>;

    /// Get the maximum for a channel
    fn max_value(&self, channel: Channel) -> Result<f64, ServiceError> {
        match channel {
            Channel::Speed => self.max_speed(),
            Channel::Rpm => self.max_rpm(),
        }
    }
}
