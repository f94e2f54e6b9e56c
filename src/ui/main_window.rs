//! Main application window
//!
//! Hosts the speedometer and tachometer in a sliding stack, owns the
//! generator for the lifetime of the window and drains generated samples
//! into the gauges once per frame.

use anyhow::Result;
use gdk4::Key;
use gtk4::prelude::*;
use gtk4::{glib, Application, ApplicationWindow, Stack, StackTransitionType};
use log::{debug, info, warn};
use speedo_core::{Channel, GeneratorService, DELIVERY_CAPACITY, FRAME_INTERVAL};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use super::gauge_widget::GaugeWidget;
use crate::channel::{delivery_channel, GaugeEvent};
use crate::config::AppConfig;
use crate::generator::{GeneratorHandle, SpeedGenerator};
use crate::session::Session;

/// Gauge pages in swipe order
const PAGES: [Channel; 2] = Channel::ALL;

/// Horizontal swipe speed (px/s) below which a swipe is ignored
const SWIPE_MIN_VELOCITY: f64 = 200.0;

/// Window state requested on the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    pub fullscreen: bool,
    pub windowed: bool,
}

impl LaunchOptions {
    /// `--windowed` beats both `--fullscreen` and the saved setting.
    pub fn should_fullscreen(&self, config: &AppConfig) -> bool {
        !self.windowed && (self.fullscreen || config.window.fullscreen)
    }
}

/// Page reached by moving `delta` pages from `current`, clamped to the ends.
fn page_after(current: Option<&str>, delta: i32) -> Channel {
    let index = current
        .and_then(|name| PAGES.iter().position(|channel| channel.as_str() == name))
        .unwrap_or(0) as i32;
    let target = (index + delta).clamp(0, PAGES.len() as i32 - 1);
    PAGES[target as usize]
}

fn step_page(stack: &Stack, delta: i32) {
    let current = stack.visible_child_name();
    let target = page_after(current.as_deref(), delta);
    if current.as_deref() == Some(target.as_str()) {
        return;
    }

    let transition = if delta > 0 {
        StackTransitionType::SlideLeft
    } else {
        StackTransitionType::SlideRight
    };
    debug!("Showing {} gauge", target);
    stack.set_visible_child_full(target.as_str(), transition);
}

/// GTK reports a refused inhibit request as cookie 0.
fn accepted_inhibit(cookie: u32) -> Option<u32> {
    (cookie != 0).then_some(cookie)
}

fn toggle_fullscreen(window: &ApplicationWindow) {
    if window.is_fullscreen() {
        window.unfullscreen();
    } else {
        window.fullscreen();
    }
}

/// Build the main window and start generating.
///
/// The generator runs until the window's close request, which stops the
/// frame timer, unregisters the listener and joins the generator threads.
pub fn build_main_window(
    app: &Application,
    config: &AppConfig,
    options: LaunchOptions,
) -> Result<ApplicationWindow> {
    let window = ApplicationWindow::builder()
        .application(app)
        .title("Speedo")
        .default_width(config.window.width)
        .default_height(config.window.height)
        .build();

    let speedometer = GaugeWidget::new(config.speedometer.clone());
    let tachometer = GaugeWidget::new(config.tachometer.clone());

    let stack = Stack::new();
    stack.set_transition_type(StackTransitionType::SlideLeftRight);
    stack.add_named(speedometer.widget(), Some(Channel::Speed.as_str()));
    stack.add_named(tachometer.widget(), Some(Channel::Rpm.as_str()));
    window.set_child(Some(&stack));

    // Generator and the path from its threads to this one
    let generator = Arc::new(SpeedGenerator::new(config.generator.clone()));
    let service: Arc<dyn GeneratorService> = Arc::new(GeneratorHandle::new(&generator));
    let (listener, events) = delivery_channel(DELIVERY_CAPACITY);
    let session = Rc::new(RefCell::new(Session::new(listener.clone())));

    generator.start()?;

    // Samples only flow while the window is on screen
    {
        let session = session.clone();
        let speedometer = speedometer.clone();
        let tachometer = tachometer.clone();
        window.connect_map(move |_| {
            let maxima = session.borrow_mut().connect(service.clone());
            speedometer.set_max_value(maxima.speed);
            tachometer.set_max_value(maxima.rpm);
        });
    }
    {
        let session = session.clone();
        window.connect_unmap(move |_| {
            debug!("Window hidden, pausing delivery");
            session.borrow_mut().disconnect();
        });
    }

    let frame_source = {
        let speedometer = speedometer.clone();
        let tachometer = tachometer.clone();
        glib::timeout_add_local(FRAME_INTERVAL, move || {
            for event in events.drain() {
                match event {
                    GaugeEvent::Speed(value) => speedometer.set_current_value(value),
                    GaugeEvent::Rpm(value) => tachometer.set_current_value(value),
                }
            }
            glib::ControlFlow::Continue
        })
    };
    let frame_source = Rc::new(RefCell::new(Some(frame_source)));

    // Swipe between gauges
    let swipe = gtk4::GestureSwipe::new();
    swipe.set_touch_only(false);
    let stack_for_swipe = stack.clone();
    swipe.connect_swipe(move |_, velocity_x, velocity_y| {
        if velocity_x.abs() < SWIPE_MIN_VELOCITY || velocity_x.abs() < velocity_y.abs() {
            return;
        }
        // Swiping left reveals the next page
        let delta = if velocity_x < 0.0 { 1 } else { -1 };
        step_page(&stack_for_swipe, delta);
    });
    stack.add_controller(swipe);

    let key_controller = gtk4::EventControllerKey::new();
    let stack_for_keys = stack.clone();
    let window_for_keys = window.clone();
    key_controller.connect_key_pressed(move |_, key, _code, _modifiers| {
        match key {
            Key::Left => step_page(&stack_for_keys, -1),
            Key::Right => step_page(&stack_for_keys, 1),
            Key::F11 => toggle_fullscreen(&window_for_keys),
            Key::Escape if window_for_keys.is_fullscreen() => window_for_keys.unfullscreen(),
            _ => return glib::Propagation::Proceed,
        }
        glib::Propagation::Stop
    });
    window.add_controller(key_controller);

    if options.should_fullscreen(config) {
        window.fullscreen();
    }

    // Keep the screen from blanking while the gauges are shown
    let inhibit_cookie = accepted_inhibit(app.inhibit(
        Some(&window),
        gtk4::ApplicationInhibitFlags::IDLE,
        Some("Showing gauges"),
    ));
    if inhibit_cookie.is_none() {
        warn!("Session refused to inhibit idle, the screen may blank");
    }
    let inhibit_cookie = Rc::new(RefCell::new(inhibit_cookie));

    let app_for_close = app.clone();
    let session_for_close = session.clone();
    let frame_source_for_close = frame_source.clone();
    window.connect_close_request(move |_| {
        if let Some(cookie) = inhibit_cookie.borrow_mut().take() {
            app_for_close.uninhibit(cookie);
        }
        if let Some(source) = frame_source_for_close.borrow_mut().take() {
            source.remove();
        }
        session_for_close.borrow_mut().disconnect();
        generator.stop();
        info!("Dropped {} samples while the UI was busy", listener.dropped());
        glib::Propagation::Proceed
    });

    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_navigation_clamps_at_ends() {
        assert_eq!(page_after(Some("speed"), 1), Channel::Rpm);
        assert_eq!(page_after(Some("rpm"), 1), Channel::Rpm);
        assert_eq!(page_after(Some("rpm"), -1), Channel::Speed);
        assert_eq!(page_after(Some("speed"), -1), Channel::Speed);
    }

    #[test]
    fn test_unknown_page_starts_from_first() {
        assert_eq!(page_after(None, 0), Channel::Speed);
        assert_eq!(page_after(Some("fuel"), 1), Channel::Rpm);
    }

    #[test]
    fn test_refused_inhibit_is_not_released() {
        assert_eq!(accepted_inhibit(0), None);
        assert_eq!(accepted_inhibit(7), Some(7));
    }

    #[test]
    fn test_windowed_overrides_fullscreen() {
        let mut config = AppConfig::default();
        config.window.fullscreen = true;

        let options = LaunchOptions::default();
        assert!(options.should_fullscreen(&config));

        let options = LaunchOptions {
            fullscreen: true,
            windowed: true,
        };
        assert!(!options.should_fullscreen(&config));

        config.window.fullscreen = false;
        let options = LaunchOptions {
            fullscreen: true,
            windowed: false,
        };
        assert!(options.should_fullscreen(&config));
    }
}
