//! Gauge drawing area

use gtk4::prelude::*;
use gtk4::DrawingArea;
use log::warn;
use speedo_core::{GaugeConfig, GaugeState};
use speedo_render::render_gauge;
use std::cell::RefCell;
use std::rc::Rc;

struct GaugeData {
    config: GaugeConfig,
    state: GaugeState,
}

/// A [`DrawingArea`] rendering one gauge.
///
/// Lives on the GTK main thread. Setters mark the state dirty and queue a
/// redraw only when something actually changed.
#[derive(Clone)]
pub struct GaugeWidget {
    area: DrawingArea,
    data: Rc<RefCell<GaugeData>>,
}

impl GaugeWidget {
    pub fn new(config: GaugeConfig) -> Self {
        let area = DrawingArea::new();

        // Gauges look best in square layouts
        area.set_size_request(200, 200);
        area.set_hexpand(true);
        area.set_vexpand(true);

        let state = GaugeState::new(&config);
        let data = Rc::new(RefCell::new(GaugeData { config, state }));

        let data_clone = data.clone();
        area.set_draw_func(move |_, cr, width, height| {
            let Ok(data) = data_clone.try_borrow() else {
                return;
            };
            if let Err(e) = render_gauge(cr, &data.config, &data.state, width as f64, height as f64) {
                warn!("Failed to render gauge '{}': {}", data.config.label, e);
            }
        });

        Self { area, data }
    }

    pub fn widget(&self) -> &DrawingArea {
        &self.area
    }

    pub fn max_value(&self) -> f64 {
        self.data.borrow().state.max_value()
    }

    pub fn current_value(&self) -> f64 {
        self.data.borrow().state.current_value()
    }

    /// Non-positive maxima fall back to the default maximum.
    pub fn set_max_value(&self, value: f64) {
        self.update(|state| state.set_max_value(value));
    }

    pub fn set_current_value(&self, value: f64) {
        self.update(|state| state.set_current_value(value));
    }

    fn update(&self, mutate: impl FnOnce(&mut GaugeState)) {
        let redraw = {
            let mut data = self.data.borrow_mut();
            mutate(&mut data.state);
            data.state.take_dirty()
        };
        if redraw {
            self.area.queue_draw();
        }
    }
}
