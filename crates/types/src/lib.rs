//! speedo-types: Shared data types for the speedo gauge dashboard.
//!
//! Pure data types (colors, gauge and generator configs) shared across all
//! speedo crates. Cairo helpers are behind the `gtk` feature so this
//! crate stays usable as a foundation layer.

pub mod color;
pub mod gauge;
pub mod generator;

pub use color::Color;
pub use gauge::{
    dp_to_px, GaugeConfig, GaugeMetrics, DEFAULT_DIVISION_VALUE, DEFAULT_MAX_VALUE,
    DEFAULT_TEXT_SIZE, END_ANGLE, START_ANGLE, SWEEP_ANGLE,
};
pub use generator::{Channel, GeneratorConfig};
