//! speedo-render: gauge draw plans and their Cairo painter.
//!
//! [`plan`] computes widget-space geometry from a gauge config and state;
//! [`gauge_display`] paints a plan onto a Cairo context.

pub mod gauge_display;
pub mod layout;
pub mod plan;

pub use gauge_display::{paint_plan, render_gauge, render_gauge_with_padding};
pub use layout::{GaugeLayout, Padding, Point, Rect};
pub use plan::{Circle, GaugePlan, Needle, RimArc, TextItem, Tick, MAX_TICKS};
