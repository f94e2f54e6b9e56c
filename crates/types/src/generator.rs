//! Value generator configuration types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which gauge a generated value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Speed,
    Rpm,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Speed, Channel::Rpm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Speed => "speed",
            Channel::Rpm => "rpm",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_max_speed() -> f64 {
    190.0
}

fn default_max_rpm() -> f64 {
    8000.0
}

fn default_frame_ms() -> u64 {
    16
}

fn default_speed_frequency() -> f64 {
    0.1
}

fn default_rpm_frequency() -> f64 {
    0.2
}

/// Generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Speed channel maximum (km/h)
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
    /// Rpm channel maximum
    #[serde(default = "default_max_rpm")]
    pub max_rpm: f64,
    /// Sample period in milliseconds
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Phase multiplier of the speed waveform
    #[serde(default = "default_speed_frequency")]
    pub speed_frequency: f64,
    /// Phase multiplier of the rpm waveform
    #[serde(default = "default_rpm_frequency")]
    pub rpm_frequency: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_speed: default_max_speed(),
            max_rpm: default_max_rpm(),
            frame_ms: default_frame_ms(),
            speed_frequency: default_speed_frequency(),
            rpm_frequency: default_rpm_frequency(),
        }
    }
}

impl GeneratorConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    /// Phase advance per sample: one full turn spread over `frame_ms` samples.
    pub fn phase_increment(&self) -> f64 {
        std::f64::consts::TAU / self.frame_ms.max(1) as f64
    }

    pub fn max_for(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Speed => self.max_speed,
            Channel::Rpm => self.max_rpm,
        }
    }

    pub fn frequency_for(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Speed => self.speed_frequency,
            Channel::Rpm => self.rpm_frequency,
        }
    }
}
