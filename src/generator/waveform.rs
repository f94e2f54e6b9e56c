//! Sine sampler behind each oscillator

/// Bounded sine waveform
///
/// Emits `amplitude + amplitude * sin(frequency * phase)`, so every sample
/// lies in `[0, 2 * amplitude]`. The phase starts at one increment and
/// advances by one increment per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    amplitude: f64,
    frequency: f64,
    increment: f64,
    phase: f64,
}

impl Waveform {
    /// `max` is the top of the output range; negative or non-finite maxima give a flat zero signal.
    pub fn new(max: f64, frequency: f64, increment: f64) -> Self {
        let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        Self {
            amplitude: max / 2.0,
            frequency,
            increment,
            phase: increment,
        }
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn next_sample(&mut self) -> f64 {
        let value = self.amplitude + self.amplitude * (self.frequency * self.phase).sin();
        self.phase += self.increment;
        value
    }
}

impl Iterator for Waveform {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_sample())
    }
}
