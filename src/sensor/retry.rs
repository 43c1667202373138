// src/sensor/retry.rs

use super::DistanceSensor;
use crate::common::{
    error::SensorError,
    hal_traits::{GpioLine, MonotonicClock},
    measurement::Measurement,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

impl<TRIG, ECHO, D, C> DistanceSensor<TRIG, ECHO, D, C>
where
    TRIG: OutputPin + GpioLine,
    ECHO: InputPin + GpioLine<Error = TRIG::Error>,
    D: DelayNs,
    C: MonotonicClock,
{
    /// Measures the distance in centimeters.
    ///
    /// Shorthand for [`DistanceSensor::measure`].
    pub fn measure_distance_cm(&mut self) -> Result<f64, SensorError<TRIG::Error>> {
        self.measure().map(|m| m.distance_cm())
    }

    /// Measures the distance, retrying transient failures.
    ///
    /// A single ranging cycle fails when a context switch lands in the wrong
    /// moment or the target moves fast enough to garble the echo. Up to
    /// `max_attempts` cycles are run, each one spaced from the previous echo
    /// by the minimum interval. Returns [`SensorError::SensorUnresponsive`]
    /// once they are all used up. GPIO errors abort immediately.
    pub fn measure(&mut self) -> Result<Measurement, SensorError<TRIG::Error>> {
        self.ensure_open()?;

        let attempts = self.config.max_attempts;
        for attempt in 1..=attempts {
            match self.try_measure() {
                Ok(measurement) => return Ok(measurement),
                Err(e) if e.is_retryable() => {
                    warn!("hcsr04: attempt {} of {} failed: {}", attempt, attempts, e.label());
                }
                Err(e) => return Err(e),
            }
        }

        warn!("hcsr04: no valid reading after {} attempts", attempts);
        Err(SensorError::SensorUnresponsive { attempts })
    }
}
