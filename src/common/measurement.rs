// src/common/measurement.rs

use core::time::Duration;

/// Converts an echo pulse width into a one-way distance.
///
/// The pulse covers the round trip, so it is halved before applying
/// `speed_cm_per_ms`.
#[inline]
pub fn distance_cm_from_pulse(pulse: Duration, speed_cm_per_ms: f64) -> f64 {
    let pulse_ms = pulse.as_nanos() as f64 / 1_000_000.0;
    pulse_ms / 2.0 * speed_cm_per_ms
}

/// Result of one successful ranging cycle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Measurement {
    pulse: Duration,
    distance_cm: f64,
}

impl Measurement {
    pub fn new(pulse: Duration, distance_cm: f64) -> Self {
        Measurement { pulse, distance_cm }
    }

    /// Width of the echo pulse (falling edge minus rising edge).
    #[inline]
    pub const fn pulse(&self) -> Duration {
        self.pulse
    }

    #[inline]
    pub fn pulse_micros(&self) -> u64 {
        self.pulse.as_micros() as u64
    }

    #[inline]
    pub const fn distance_cm(&self) -> f64 {
        self.distance_cm
    }

    #[inline]
    pub fn distance_mm(&self) -> f64 {
        self.distance_cm * 10.0
    }

    #[inline]
    pub fn distance_m(&self) -> f64 {
        self.distance_cm / 100.0
    }
}
