//! Gauge model: value range, needle mapping and mark spacing
//!
//! `GaugeState` owns everything about a gauge that changes at runtime. Every
//! mutation that affects the picture sets the dirty flag; the widget polls
//! [`GaugeState::take_dirty`] to decide whether to queue a redraw.

use speedo_types::{GaugeConfig, DEFAULT_MAX_VALUE, START_ANGLE, SWEEP_ANGLE};

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeState {
    max_value: f64,
    current_value: f64,
    division_value: f64,
    draw_intermediate_marks: bool,
    mark_span: f64,
    dirty: bool,
}

impl GaugeState {
    pub fn new(config: &GaugeConfig) -> Self {
        let mut state = Self {
            max_value: DEFAULT_MAX_VALUE,
            current_value: 0.0,
            division_value: config.division_value,
            draw_intermediate_marks: config.draw_intermediate_marks,
            mark_span: 0.0,
            dirty: true,
        };
        state.set_max_value(config.max_value);
        state
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Non-positive (or non-finite) maxima fall back to [`DEFAULT_MAX_VALUE`].
    pub fn set_max_value(&mut self, value: f64) {
        self.max_value = if value.is_finite() && value > 0.0 {
            value
        } else {
            log::debug!("Rejecting gauge maximum {}, using {}", value, DEFAULT_MAX_VALUE);
            DEFAULT_MAX_VALUE
        };
        self.recalculate_mark_span();
        self.dirty = true;
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn set_current_value(&mut self, value: f64) {
        self.current_value = value;
        self.dirty = true;
    }

    pub fn division_value(&self) -> f64 {
        self.division_value
    }

    pub fn set_division_value(&mut self, value: f64) {
        self.division_value = value;
        self.recalculate_mark_span();
        self.dirty = true;
    }

    pub fn draw_intermediate_marks(&self) -> bool {
        self.draw_intermediate_marks
    }

    pub fn set_draw_intermediate_marks(&mut self, enabled: bool) {
        self.draw_intermediate_marks = enabled;
        self.recalculate_mark_span();
        self.dirty = true;
    }

    /// Degrees between two adjacent marks.
    pub fn mark_angular_span(&self) -> f64 {
        self.mark_span
    }

    /// Needle deflection from the start of the arc, in degrees.
    pub fn value_to_degree(&self, value: f64) -> f64 {
        value / self.max_value * SWEEP_ANGLE
    }

    /// Inverse of [`value_to_degree`](Self::value_to_degree) for an absolute dial angle.
    pub fn degree_to_value(&self, angle: f64) -> f64 {
        (angle - START_ANGLE) / SWEEP_ANGLE * self.max_value
    }

    /// Rotation applied to the upright needle polygon.
    pub fn needle_rotation(&self) -> f64 {
        90.0 + START_ANGLE + self.value_to_degree(self.current_value)
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning whether a redraw was pending.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    fn recalculate_mark_span(&mut self) {
        let step = if self.draw_intermediate_marks {
            self.division_value / 2.0
        } else {
            self.division_value
        };
        self.mark_span = self.value_to_degree(step);
    }
}

impl Default for GaugeState {
    fn default() -> Self {
        Self::new(&GaugeConfig::default())
    }
}
