//! speedo: a speedometer and tachometer dashboard driven by a synthetic generator
//!
//! This library provides:
//! - The sine speed/rpm generator and its service boundary
//! - The delivery channel from generator threads to the UI thread
//! - The client session that binds the UI to a generator
//! - GTK gauge widgets and the main window
//! - Configuration management

pub mod channel;
pub mod config;
pub mod generator;
pub mod session;
pub mod ui;

// Re-export commonly used types
pub use channel::{delivery_channel, ChannelListener, GaugeEvent, GaugeEvents};
pub use config::AppConfig;
pub use generator::{GeneratorHandle, SpeedGenerator};
pub use session::{Maxima, Session};
