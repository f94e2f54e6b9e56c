//! Synthetic speed/rpm generator
//!
//! `SpeedGenerator` owns one [`Oscillator`] per [`Channel`] and a shared
//! [`ListenerSlot`]. It implements [`GeneratorService`] directly; clients that
//! must survive the generator going away use a [`GeneratorHandle`], which
//! reports [`ServiceError::Disconnected`] once the generator is dropped.

mod oscillator;
mod waveform;

pub use oscillator::Oscillator;
pub use waveform::Waveform;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use anyhow::Result;
use log::{debug, info, warn};
use speedo_core::{
    BoxedListener, Channel, GeneratorConfig, GeneratorService, ListenerSlot, ServiceError,
};

pub struct SpeedGenerator {
    config: GeneratorConfig,
    slot: Arc<ListenerSlot>,
    running: AtomicBool,
    oscillators: Mutex<Vec<Oscillator>>,
}

impl SpeedGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            slot: Arc::new(ListenerSlot::new()),
            running: AtomicBool::new(false),
            oscillators: Mutex::new(Vec::with_capacity(Channel::ALL.len())),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Start one sampling thread per channel. Starting a running generator is a no-op.
    pub fn start(&self) -> Result<()> {
        let mut oscillators = self.lock_oscillators();
        if self.running.load(Ordering::SeqCst) {
            return Ok(());
        }

        let period = self.config.frame_interval();
        let increment = self.config.phase_increment();

        for channel in Channel::ALL {
            let waveform = Waveform::new(
                self.config.max_for(channel),
                self.config.frequency_for(channel),
                increment,
            );
            match Oscillator::spawn(channel, waveform, period, self.slot.clone()) {
                Ok(oscillator) => oscillators.push(oscillator),
                Err(e) => {
                    // Dropping the already spawned oscillators stops them
                    oscillators.clear();
                    return Err(e);
                }
            }
        }
        self.running.store(true, Ordering::SeqCst);

        info!(
            "Generator started: max speed {}, max rpm {}, period {:?}",
            self.config.max_speed, self.config.max_rpm, period
        );
        Ok(())
    }

    /// Stop all sampling threads and wait for them. Safe to call from any thread, any number of times.
    pub fn stop(&self) {
        let stopping: Vec<Oscillator> = {
            let mut oscillators = self.lock_oscillators();
            if !self.running.swap(false, Ordering::SeqCst) {
                return;
            }
            oscillators.drain(..).collect()
        };

        for mut oscillator in stopping {
            debug!("Stopping {} oscillator", oscillator.channel());
            oscillator.stop();
        }
        info!("Generator stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Replace the listener; the next sample of every channel goes to it.
    pub fn set_listener(&self, listener: BoxedListener) {
        self.slot.set(listener);
    }

    pub fn clear_listener(&self) {
        self.slot.clear();
    }

    pub fn has_listener(&self) -> bool {
        self.slot.is_set()
    }

    fn lock_oscillators(&self) -> MutexGuard<'_, Vec<Oscillator>> {
        match self.oscillators.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Oscillator list lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl Default for SpeedGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Drop for SpeedGenerator {
    fn drop(&mut self) {
        self.stop();
    }
}

impl GeneratorService for SpeedGenerator {
    fn max_speed(&self) -> Result<f64, ServiceError> {
        Ok(self.config.max_speed)
    }

    fn max_rpm(&self) -> Result<f64, ServiceError> {
        Ok(self.config.max_rpm)
    }

    fn register_callback(&self, listener: BoxedListener) -> Result<(), ServiceError> {
        self.set_listener(listener);
        Ok(())
    }

    fn unregister_callback(&self) -> Result<(), ServiceError> {
        self.clear_listener();
        Ok(())
    }
}

/// Weak binding to a generator
#[derive(Clone)]
pub struct GeneratorHandle {
    inner: Weak<SpeedGenerator>,
}

impl GeneratorHandle {
    pub fn new(generator: &Arc<SpeedGenerator>) -> Self {
        Self {
            inner: Arc::downgrade(generator),
        }
    }

    fn generator(&self) -> Result<Arc<SpeedGenerator>, ServiceError> {
        self.inner.upgrade().ok_or(ServiceError::Disconnected)
    }
}

impl GeneratorService for GeneratorHandle {
    fn max_speed(&self) -> Result<f64, ServiceError> {
        self.generator()?.max_speed()
    }

    fn max_rpm(&self) -> Result<f64, ServiceError> {
        self.generator()?.max_rpm()
    }

    fn register_callback(&self, listener: BoxedListener) -> Result<(), ServiceError> {
        self.generator()?.register_callback(listener)
    }

    fn unregister_callback(&self) -> Result<(), ServiceError> {
        self.generator()?.unregister_callback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speedo_core::GeneratorListener;
    use std::thread;
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct Recorder {
        speed: Mutex<Vec<f64>>,
        rpm: Mutex<Vec<f64>>,
    }

    impl Recorder {
        fn counts(&self) -> (usize, usize) {
            (self.speed.lock().unwrap().len(), self.rpm.lock().unwrap().len())
        }
    }

    impl GeneratorListener for Recorder {
        fn on_speed_value(&self, value: f64) {
            self.speed.lock().unwrap().push(value);
        }

        fn on_rpm_value(&self, value: f64) {
            self.rpm.lock().unwrap().push(value);
        }
    }

    fn fast_config() -> GeneratorConfig {
        GeneratorConfig {
            frame_ms: 1,
            ..Default::default()
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
    fn test_both_channels_stay_in_range() {
        let generator = SpeedGenerator::new(fast_config());
        let recorder = Arc::new(Recorder::default());
        generator.set_listener(recorder.clone());
        generator.start().unwrap();

        assert!(wait_for(|| {
            let (speed, rpm) = recorder.counts();
            speed >= 20 && rpm >= 20
        }));
        generator.stop();

        assert!(recorder.speed.lock().unwrap().iter().all(|v| (0.0..=190.0).contains(v)));
        assert!(recorder.rpm.lock().unwrap().iter().all(|v| (0.0..=8000.0).contains(v)));
    }

    #[test]
    fn test_no_delivery_after_stop() {
        let generator = SpeedGenerator::new(fast_config());
        let recorder = Arc::new(Recorder::default());
        generator.set_listener(recorder.clone());
        generator.start().unwrap();
        assert!(wait_for(|| recorder.counts().0 > 0));

        generator.stop();
        assert!(!generator.is_running());
        let after_stop = recorder.counts();

        thread::sleep(Duration::from_millis(30));
        assert_eq!(recorder.counts(), after_stop);
    }

    #[test]
    fn test_replacing_listener_redirects_samples() {
        let generator = SpeedGenerator::new(fast_config());
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());

        generator.register_callback(first.clone()).unwrap();
        generator.start().unwrap();
        assert!(wait_for(|| first.counts().0 > 0));

        generator.unregister_callback().unwrap();
        assert!(!generator.has_listener());
        generator.register_callback(second.clone()).unwrap();

        // Once both threads have reached the new listener, nothing is in flight to the old one
        assert!(wait_for(|| {
            let (speed, rpm) = second.counts();
            speed > 0 && rpm > 0
        }));
        let first_frozen = first.counts();

        assert!(wait_for(|| second.counts().0 > 10));
        generator.stop();
        assert_eq!(first.counts(), first_frozen);
    }

    #[test]
    fn test_start_and_stop_are_idempotent() {
        let generator = Arc::new(SpeedGenerator::new(fast_config()));
        generator.start().unwrap();
        generator.start().unwrap();
        assert_eq!(generator.lock_oscillators().len(), 2);

        let remote = generator.clone();
        thread::spawn(move || remote.stop()).join().unwrap();
        assert!(!generator.is_running());
        generator.stop();
        assert!(generator.lock_oscillators().is_empty());

        // Restart after stop
        generator.start().unwrap();
        assert!(generator.is_running());
    }

    #[test]
    fn test_service_reports_maxima() {
        let generator = SpeedGenerator::default();
        assert_eq!(generator.max_speed().unwrap(), 190.0);
        assert_eq!(generator.max_value(Channel::Rpm).unwrap(), 8000.0);
    }

    #[test]
    fn test_handle_disconnects_when_generator_dropped() {
        let generator = Arc::new(SpeedGenerator::default());
        let handle = GeneratorHandle::new(&generator);
        assert_eq!(handle.max_rpm().unwrap(), 8000.0);

        drop(generator);
        assert!(matches!(handle.max_speed(), Err(ServiceError::Disconnected)));
        assert!(matches!(handle.unregister_callback(), Err(ServiceError::Disconnected)));
    }
}
