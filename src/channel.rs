//! Delivery channel from generator threads to the UI thread
//!
//! The producer side is a [`GeneratorListener`] that never blocks: each sample
//! is `try_send`-ed into a bounded queue and dropped when the queue is full.
//! The consumer side drains whatever is pending, in production order, from
//! the UI thread's frame timer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam::channel::{bounded, Receiver, Sender, TrySendError};
use log::trace;
use speedo_core::{Channel, GeneratorListener};

/// A generated sample addressed to one gauge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GaugeEvent {
    Speed(f64),
    Rpm(f64),
}

impl GaugeEvent {
    pub fn new(channel: Channel, value: f64) -> Self {
        match channel {
            Channel::Speed => GaugeEvent::Speed(value),
            Channel::Rpm => GaugeEvent::Rpm(value),
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            GaugeEvent::Speed(_) => Channel::Speed,
            GaugeEvent::Rpm(_) => Channel::Rpm,
        }
    }

    pub fn value(&self) -> f64 {
        match *self {
            GaugeEvent::Speed(value) | GaugeEvent::Rpm(value) => value,
        }
    }
}

/// Producer half, registered with the generator
pub struct ChannelListener {
    tx: Sender<GaugeEvent>,
    dropped: AtomicU64,
}

impl ChannelListener {
    /// Samples discarded because the queue was full or the consumer was gone
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn send(&self, event: GaugeEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                trace!("Delivery queue full, dropped {:?}", event);
            }
            Err(TrySendError::Disconnected(event)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                trace!("Consumer gone, dropped {:?}", event);
            }
        }
    }
}

impl GeneratorListener for ChannelListener {
    fn on_speed_value(&self, value: f64) {
        self.send(GaugeEvent::Speed(value));
    }

    fn on_rpm_value(&self, value: f64) {
        self.send(GaugeEvent::Rpm(value));
    }
}

/// Consumer half, owned by the UI thread
pub struct GaugeEvents {
    rx: Receiver<GaugeEvent>,
}

impl GaugeEvents {
    /// Everything queued so far, oldest first. Never blocks.
    pub fn drain(&self) -> impl Iterator<Item = GaugeEvent> + '_ {
        self.rx.try_iter()
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

/// Create a connected producer/consumer pair holding at most `capacity` samples.
pub fn delivery_channel(capacity: usize) -> (Arc<ChannelListener>, GaugeEvents) {
    let (tx, rx) = bounded(capacity.max(1));
    (
        Arc::new(ChannelListener {
            tx,
            dropped: AtomicU64::new(0),
        }),
        GaugeEvents { rx },
    )
}
