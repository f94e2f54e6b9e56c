//! Gauge configuration types

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Where the dial arc begins, in degrees clockwise from 3 o'clock.
pub const START_ANGLE: f64 = 135.0;
/// Angular length of the dial arc in degrees.
pub const SWEEP_ANGLE: f64 = 270.0;
pub const END_ANGLE: f64 = START_ANGLE + SWEEP_ANGLE;

pub const DEFAULT_MAX_VALUE: f64 = 220.0;
pub const DEFAULT_DIVISION_VALUE: f64 = 20.0;
pub const DEFAULT_TEXT_SIZE: f64 = 16.0;

/// Gauge configuration
///
/// Everything a gauge needs at construction. `max_value` can also be changed
/// at runtime through the gauge state, which applies the same fallback for
/// non-positive values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GaugeConfig {
    #[serde(default = "default_max_value")]
    pub max_value: f64,
    /// Value distance between two labeled marks
    #[serde(default = "default_division_value")]
    pub division_value: f64,
    /// Put an unlabeled mark halfway between labeled ones
    #[serde(default = "default_true")]
    pub draw_intermediate_marks: bool,
    /// Label marks with `value / division_value` (e.g. rpm x1000)
    #[serde(default)]
    pub divide_value_by_division: bool,
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default = "default_text_size")]
    pub value_text_size: f64, // sp
    #[serde(default = "default_text_size")]
    pub label_text_size: f64, // sp
    /// Pixels per dp/sp
    #[serde(default = "default_density")]
    pub density: f64,

    #[serde(default = "default_dark_gray")]
    pub rim_color: Color,
    #[serde(default = "default_dark_gray")]
    pub center_circle_color: Color,
    #[serde(default = "default_black")]
    pub main_circle_color: Color,
    #[serde(default = "default_white")]
    pub mark_color: Color,
    #[serde(default = "default_white")]
    pub value_color: Color,
    #[serde(default = "default_white")]
    pub needle_color: Color,
}

fn default_max_value() -> f64 {
    DEFAULT_MAX_VALUE
}

fn default_division_value() -> f64 {
    DEFAULT_DIVISION_VALUE
}

fn default_true() -> bool {
    true
}

fn default_label() -> String {
    "km/h".to_string()
}

fn default_text_size() -> f64 {
    DEFAULT_TEXT_SIZE
}

fn default_density() -> f64 {
    1.0
}

fn default_dark_gray() -> Color {
    Color::DARK_GRAY
}

fn default_black() -> Color {
    Color::BLACK
}

fn default_white() -> Color {
    Color::WHITE
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            max_value: default_max_value(),
            division_value: default_division_value(),
            draw_intermediate_marks: default_true(),
            divide_value_by_division: false,
            label: default_label(),
            value_text_size: default_text_size(),
            label_text_size: default_text_size(),
            density: default_density(),
            rim_color: default_dark_gray(),
            center_circle_color: default_dark_gray(),
            main_circle_color: default_black(),
            mark_color: default_white(),
            value_color: default_white(),
            needle_color: default_white(),
        }
    }
}

impl GaugeConfig {
    /// Speedometer preset (km/h, labeled every 20).
    pub fn speedometer() -> Self {
        Self::default()
    }

    /// Tachometer preset: labels in thousands of rpm.
    pub fn tachometer() -> Self {
        Self {
            max_value: 8000.0,
            division_value: 1000.0,
            divide_value_by_division: true,
            label: "x1000 rpm".to_string(),
            needle_color: Color::from_argb(0xFFFF_5722),
            ..Self::default()
        }
    }

    pub fn metrics(&self) -> GaugeMetrics {
        GaugeMetrics::new(self.density)
    }

    pub fn value_text_px(&self) -> f64 {
        dp_to_px(self.value_text_size, self.density)
    }

    pub fn label_text_px(&self) -> f64 {
        dp_to_px(self.label_text_size, self.density)
    }
}

/// Convert density-independent units to pixels. Non-positive sizes collapse to 0.
pub fn dp_to_px(dp: f64, density: f64) -> f64 {
    if dp > 0.0 {
        dp * density
    } else {
        0.0
    }
}

/// Fixed pixel geometry of the dial, scaled by display density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeMetrics {
    pub center_circle_radius: f64,
    pub rim_width: f64,
    pub mark_height: f64,
    pub needle_width: f64,
    /// How far the needle base extends past the hub
    pub needle_tail: f64,
}

impl GaugeMetrics {
    pub fn new(density: f64) -> Self {
        Self {
            center_circle_radius: dp_to_px(24.0, density),
            rim_width: dp_to_px(8.0, density),
            mark_height: dp_to_px(12.0, density),
            needle_width: dp_to_px(8.0, density),
            needle_tail: dp_to_px(8.0, density),
        }
    }
}

impl Default for GaugeMetrics {
    fn default() -> Self {
        Self::new(1.0)
    }
}
