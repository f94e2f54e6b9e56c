//! Client side of the generator service
//!
//! A session binds one listener to one service at a time. Failed calls are
//! logged and never propagated: maxima that cannot be read come back as
//! [`UNAVAILABLE_MAX`], which gauges replace with their default maximum.

use std::sync::Arc;

use log::{error, info};
use speedo_core::{BoxedListener, Channel, GeneratorService, UNAVAILABLE_MAX};

/// Gauge maxima reported by the service
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Maxima {
    pub speed: f64,
    pub rpm: f64,
}

impl Maxima {
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Speed => self.speed,
            Channel::Rpm => self.rpm,
        }
    }
}

pub struct Session {
    listener: BoxedListener,
    service: Option<Arc<dyn GeneratorService>>,
}

impl Session {
    pub fn new(listener: BoxedListener) -> Self {
        Self {
            listener,
            service: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.service.is_some()
    }

    /// Read the maxima and register the listener. Replaces any previous binding.
    pub fn connect(&mut self, service: Arc<dyn GeneratorService>) -> Maxima {
        self.disconnect();

        let maxima = Maxima {
            speed: read_max(service.as_ref(), Channel::Speed),
            rpm: read_max(service.as_ref(), Channel::Rpm),
        };

        match service.register_callback(self.listener.clone()) {
            Ok(()) => info!("Connected to generator (max speed {}, max rpm {})", maxima.speed, maxima.rpm),
            Err(e) => error!("Failed to register generator callback: {}", e),
        }

        self.service = Some(service);
        maxima
    }

    /// Unregister the listener and drop the binding.
    pub fn disconnect(&mut self) {
        let Some(service) = self.service.take() else {
            return;
        };

        match service.unregister_callback() {
            Ok(()) => info!("Disconnected from generator"),
            Err(e) => error!("Failed to unregister generator callback: {}", e),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn read_max(service: &dyn GeneratorService, channel: Channel) -> f64 {
    service.max_value(channel).unwrap_or_else(|e| {
        error!("Failed to read max {} from generator: {}", channel, e);
        UNAVAILABLE_MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GeneratorHandle, SpeedGenerator};
    use speedo_core::{NullListener, ServiceError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingService {
        registered: AtomicUsize,
        unregistered: AtomicUsize,
    }

    impl GeneratorService for CountingService {
        fn max_speed(&self) -> Result<f64, ServiceError> {
            Ok(190.0)
        }

        fn max_rpm(&self) -> Result<f64, ServiceError> {
            Err(ServiceError::Disconnected)
        }

        fn register_callback(&self, _listener: BoxedListener) -> Result<(), ServiceError> {
            self.registered.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn unregister_callback(&self) -> Result<(), ServiceError> {
            self.unregistered.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_connect_reads_maxima_and_registers() {
        let generator = Arc::new(SpeedGenerator::default());
        let mut session = Session::new(Arc::new(NullListener));

        let maxima = session.connect(generator.clone());
        assert_eq!(maxima, Maxima { speed: 190.0, rpm: 8000.0 });
        assert!(generator.has_listener());

        session.disconnect();
        assert!(!session.is_connected());
        assert!(!generator.has_listener());
    }

    #[test]
    fn test_failed_max_falls_back_per_call() {
        let service = Arc::new(CountingService::default());
        let mut session = Session::new(Arc::new(NullListener));

        let maxima = session.connect(service.clone());
        assert_eq!(maxima.get(Channel::Speed), 190.0);
        assert_eq!(maxima.get(Channel::Rpm), UNAVAILABLE_MAX);
        assert_eq!(service.registered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_vanished_service_is_logged_not_fatal() {
        let generator = Arc::new(SpeedGenerator::default());
        let handle = Arc::new(GeneratorHandle::new(&generator));
        drop(generator);

        let mut session = Session::new(Arc::new(NullListener));
        let maxima = session.connect(handle);
        assert_eq!(maxima, Maxima { speed: UNAVAILABLE_MAX, rpm: UNAVAILABLE_MAX });

        // Unregister against the dead endpoint only logs
        session.disconnect();
        assert!(!session.is_connected());
    }

    #[test]
    fn test_disconnect_then_connect_resumes_delivery() {
        let generator = Arc::new(SpeedGenerator::default());
        let service: Arc<dyn GeneratorService> = Arc::new(GeneratorHandle::new(&generator));
        let mut session = Session::new(Arc::new(NullListener));

        session.connect(service.clone());
        session.disconnect();
        assert!(!generator.has_listener());

        let maxima = session.connect(service);
        assert_eq!(maxima.get(Channel::Rpm), 8000.0);
        assert!(generator.has_listener());
    }

    #[test]
    fn test_reconnect_unregisters_previous_service() {
        let first = Arc::new(CountingService::default());
        let second = Arc::new(CountingService::default());
        let mut session = Session::new(Arc::new(NullListener));

        session.connect(first.clone());
        session.connect(second.clone());
        assert_eq!(first.unregistered.load(Ordering::SeqCst), 1);
        assert_eq!(second.registered.load(Ordering::SeqCst), 1);

        drop(session);
        assert_eq!(second.unregistered.load(Ordering::SeqCst), 1);
    }
}
