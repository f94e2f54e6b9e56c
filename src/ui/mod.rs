//! UI components

mod gauge_widget;
mod main_window;

pub use gauge_widget::GaugeWidget;
pub use main_window::{build_main_window, LaunchOptions};
