//! Lock-free holder for the current listener
//!
//! Producers load the slot once per sample; registration swaps it. A store is
//! visible to every load that starts after it, so a cleared slot is never
//! delivered to by a sample produced afterwards.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use speedo_types::Channel;

use crate::service::{BoxedListener, GeneratorListener};

#[derive(Default)]
pub struct ListenerSlot {
    current: ArcSwapOption<BoxedListener>,
}

impl ListenerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listener (last write wins).
    pub fn set(&self, listener: BoxedListener) {
        self.current.store(Some(Arc::new(listener)));
    }

    pub fn clear(&self) {
        self.current.store(None);
    }

    pub fn is_set(&self) -> bool {
        self.current.load().is_some()
    }

    /// Deliver to the current listener. Returns false when nobody is listening.
    pub fn deliver(&self, channel: Channel, value: f64) -> bool {
        let guard = self.current.load();
        match &*guard {
            Some(listener) => {
                listener.on_value(channel, value);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ListenerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSlot")
            .field("set", &self.is_set())
            .finish()
    }
}

/// Listener that discards everything, for callers that need a placeholder.
pub struct NullListener;

impl GeneratorListener for NullListener {
    fn on_speed_value(&self, _value: f64) {}

    fn on_rpm_value(&self, _value: f64) {}
}
