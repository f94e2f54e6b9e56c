//! Gauge draw plan
//!
//! Turns a gauge config and state into concrete, widget-space geometry:
//! background disc, rim arc, hub, caption, tick marks with their labels and
//! the rotated needle polygon. Building the plan touches no drawing backend,
//! so every number the painter uses can be checked in isolation.

use speedo_core::GaugeState;
use speedo_types::{GaugeConfig, START_ANGLE, SWEEP_ANGLE};

use crate::layout::{GaugeLayout, Point, Rect};

/// Upper bound on marks per dial; a tiny division would otherwise explode the plan.
pub const MAX_TICKS: usize = 1024;

/// Tolerance for the last mark landing exactly on the end of the arc.
const TICK_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

/// Arc inscribed in `rect`, angles in degrees clockwise from 3 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RimArc {
    pub rect: Rect,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub width: f64,
}

/// Horizontally centered text anchored at its baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub anchor: Point,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Absolute dial angle of this mark
    pub angle: f64,
    pub start: Point,
    pub end: Point,
    pub label: Option<TextItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Needle {
    /// Rotation of the upright polygon around the gauge center
    pub rotation: f64,
    pub polygon: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugePlan {
    pub offset: Point,
    pub background: Circle,
    pub rim: RimArc,
    pub hub: Circle,
    pub caption: TextItem,
    pub mark_width: f64,
    pub ticks: Vec<Tick>,
    pub needle: Needle,
}

impl GaugePlan {
    pub fn build(config: &GaugeConfig, state: &GaugeState, layout: &GaugeLayout) -> Self {
        let metrics = &layout.metrics;
        let center = layout.center;

        let rim = RimArc {
            rect: layout.arc_rect,
            start_angle: START_ANGLE,
            sweep_angle: SWEEP_ANGLE,
            width: metrics.rim_width,
        };

        Self {
            offset: layout.offset,
            background: Circle {
                center,
                radius: layout.arc_rect.height() / 2.0,
            },
            rim,
            hub: Circle {
                center,
                radius: metrics.center_circle_radius,
            },
            caption: TextItem {
                text: config.label.clone(),
                anchor: Point::new(center.x, layout.side - center.y / 3.0),
                size: config.label_text_px(),
            },
            mark_width: metrics.mark_height / 3.0,
            ticks: build_ticks(config, state, layout),
            needle: build_needle(state, layout),
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.ticks
            .iter()
            .filter_map(|tick| tick.label.as_ref().map(|label| label.text.as_str()))
    }
}

fn build_ticks(config: &GaugeConfig, state: &GaugeState, layout: &GaugeLayout) -> Vec<Tick> {
    let span = state.mark_angular_span();
    if !span.is_finite() || span <= 0.0 {
        log::debug!("Mark span {} is not drawable, skipping ticks", span);
        return Vec::new();
    }

    let steps = (SWEEP_ANGLE / span + TICK_EPSILON).floor() as usize;
    if steps >= MAX_TICKS {
        log::warn!(
            "Division {} on max {} needs {} marks, skipping ticks",
            state.division_value(),
            state.max_value(),
            steps + 1
        );
        return Vec::new();
    }

    let center = layout.center;
    let top = layout.padding.top;
    let mark_start = Point::new(center.x, top);
    let mark_end = Point::new(center.x, top + layout.metrics.mark_height);
    let label_anchor = Point::new(center.x, top + layout.metrics.mark_height * 3.0);
    let text_size = config.value_text_px();

    (0..=steps)
        .map(|index| {
            let angle = START_ANGLE + span * index as f64;
            let rotation = 90.0 + angle;
            let labeled = !state.draw_intermediate_marks() || index % 2 == 0;

            Tick {
                angle,
                start: mark_start.rotate_around(center, rotation),
                end: mark_end.rotate_around(center, rotation),
                label: labeled.then(|| TextItem {
                    text: format_tick_value(config, state, angle),
                    anchor: label_anchor.rotate_around(center, rotation),
                    size: text_size,
                }),
            }
        })
        .collect()
}

fn format_tick_value(config: &GaugeConfig, state: &GaugeState, angle: f64) -> String {
    let value = state.degree_to_value(angle);
    let value = if config.divide_value_by_division {
        value / state.division_value()
    } else {
        value
    };
    // Halves round away from zero; `{:.0}` alone rounds them to even
    let value = value.round();
    // Avoid "-0" from rounding noise at the start of the arc
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.0}", value)
}

fn build_needle(state: &GaugeState, layout: &GaugeLayout) -> Needle {
    let metrics = &layout.metrics;
    let center = layout.center;
    let top = layout.padding.top;
    let half_width = metrics.needle_width / 2.0;

    let tip_y = top + metrics.rim_width / 2.0;
    let shoulder_y = top + metrics.rim_width * 1.1;
    let base_y = center.y + metrics.center_circle_radius + metrics.needle_tail;

    let rotation = state.needle_rotation();
    let polygon = [
        Point::new(center.x, tip_y),
        Point::new(center.x - half_width, shoulder_y),
        Point::new(center.x - half_width, base_y),
        Point::new(center.x + half_width, base_y),
        Point::new(center.x + half_width, shoulder_y),
    ]
    .into_iter()
    .map(|point| point.rotate_around(center, rotation))
    .collect();

    Needle { rotation, polygon }
}
