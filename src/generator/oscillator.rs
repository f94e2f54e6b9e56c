//! One sampling thread per channel

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam::channel::{bounded, RecvTimeoutError, Sender};
use log::{debug, trace, warn};
use speedo_core::{Channel, ListenerSlot};

use super::waveform::Waveform;

/// Handle to a running sampling thread
///
/// The thread samples its waveform once per period and hands the value to
/// whatever listener the shared slot holds at that moment. The sleep between
/// samples waits on a stop channel, so [`stop`](Self::stop) wakes it at once.
pub struct Oscillator {
    channel: Channel,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Oscillator {
    pub fn spawn(
        channel: Channel,
        mut waveform: Waveform,
        period: Duration,
        slot: Arc<ListenerSlot>,
    ) -> Result<Self> {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name(format!("speedo-{}", channel))
            .spawn(move || {
                debug!("{} oscillator started", channel);
                loop {
                    let value = waveform.next_sample();
                    if !slot.deliver(channel, value) {
                        trace!("No listener, dropped {} sample {:.2}", channel, value);
                    }

                    match stop_rx.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("{} oscillator stopped", channel);
            })
            .with_context(|| format!("Failed to spawn {} oscillator thread", channel))?;

        Ok(Self {
            channel,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stop sampling and wait for the thread to exit.
    ///
    /// When called from the oscillator's own thread (e.g. inside a listener)
    /// the loop is only signalled; it exits after the current sample.
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            // A full buffer means a stop is already pending
            let _ = stop_tx.try_send(());
        }

        let Some(handle) = self.handle.take() else {
            return;
        };

        if handle.thread().id() == thread::current().id() {
            return;
        }

        if handle.join().is_err() {
            warn!("{} oscillator thread panicked", self.channel);
        }
    }
}

impl Drop for Oscillator {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speedo_core::GeneratorListener;
    use std::sync::Mutex;
    use std::time::Instant;

    #[derive(Default)]
    struct Recorder {
        values: Mutex<Vec<f64>>,
    }

    impl GeneratorListener for Recorder {
        fn on_speed_value(&self, value: f64) {
            self.values.lock().unwrap().push(value);
        }

        fn on_rpm_value(&self, _value: f64) {
            panic!("speed oscillator delivered an rpm value");
        }
    }

    fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        false
    }

    #[test]
    fn test_delivers_samples_in_order() {
        let slot = Arc::new(ListenerSlot::new());
        let recorder = Arc::new(Recorder::default());
        slot.set(recorder.clone());

        let waveform = Waveform::new(190.0, 0.1, std::f64::consts::TAU / 16.0);
        let expected: Vec<f64> = waveform.clone().take(5).collect();

        let mut oscillator =
            Oscillator::spawn(Channel::Speed, waveform, Duration::from_millis(1), slot).unwrap();
        assert!(wait_for(|| recorder.values.lock().unwrap().len() >= 5));
        oscillator.stop();

        let values = recorder.values.lock().unwrap();
        assert_eq!(&values[..5], &expected[..]);
    }

    #[test]
    fn test_stop_interrupts_long_sleep() {
        let slot = Arc::new(ListenerSlot::new());
        let waveform = Waveform::new(1.0, 1.0, 1.0);
        let mut oscillator =
            Oscillator::spawn(Channel::Speed, waveform, Duration::from_secs(3600), slot).unwrap();
        assert!(oscillator.is_running());

        let started = Instant::now();
        oscillator.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!oscillator.is_running());

        // Second stop is a no-op
        oscillator.stop();
    }
}
