// src/sensor/ranging.rs

use super::DistanceSensor;
use crate::common::{
    error::SensorError,
    hal_traits::{GpioLine, MonotonicClock},
    measurement::{distance_cm_from_pulse, Measurement},
    timing,
};
use core::time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use nb::Result as NbResult;

impl<TRIG, ECHO, D, C> DistanceSensor<TRIG, ECHO, D, C>
where
    TRIG: OutputPin + GpioLine,
    ECHO: InputPin + GpioLine<Error = TRIG::Error>,
    D: DelayNs,
    C: MonotonicClock,
{
    /// Runs exactly one ranging cycle, without retrying.
    ///
    /// Failures caused by jitter or a moving target come back as
    /// [`SensorError::TimeoutWaitingForEchoStart`],
    /// [`SensorError::TimeoutWaitingForEchoEnd`] or
    /// [`SensorError::OutOfRange`]; see [`SensorError::is_retryable`].
    pub fn try_measure(&mut self) -> Result<Measurement, SensorError<TRIG::Error>> {
        self.ensure_open()?;

        // 1. Respect the minimum spacing to the previous echo
        self.wait_for_interval();

        // 2. Start the burst
        let deadline = self.fire_trigger()?;

        // 3. Rising edge. Recorded before waiting for the falling edge so the
        //    spacing stays correct even if this attempt fails below.
        self.busy_poll_until(deadline, SensorError::TimeoutWaitingForEchoStart, |echo| {
            wait_for_level(echo, true)
        })?;
        let start = self.clock.now();
        self.last_measurement_time = Some(start);

        // 4. Falling edge
        self.busy_poll_until(deadline, SensorError::TimeoutWaitingForEchoEnd, |echo| {
            wait_for_level(echo, false)
        })?;
        let end = self.clock.now();

        // 5. Convert and sanity check
        let pulse = end - start;
        let distance_cm = distance_cm_from_pulse(pulse, timing::SPEED_OF_SOUND_CM_PER_MS);
        if distance_cm > self.config.max_range_cm {
            return Err(SensorError::OutOfRange { distance_cm });
        }

        trace!("hcsr04: pulse {} us -> {} cm", pulse.as_micros() as u64, distance_cm);

        Ok(Measurement::new(pulse, distance_cm))
    }

    /// Sleeps until `min_interval` has passed since the last rising edge.
    fn wait_for_interval(&mut self) {
        let Some(last) = self.last_measurement_time else {
            return;
        };

        let elapsed = self.clock.now() - last;
        if elapsed < self.config.min_interval {
            let remaining = self.config.min_interval - elapsed;
            debug!("hcsr04: waiting {} us before next trigger", remaining.as_micros() as u64);
            sleep_for(&mut self.delay, remaining);
        }
    }

    /// Pulses the trigger and returns the echo deadline for this attempt,
    /// counted from the trigger falling edge.
    fn fire_trigger(&mut self) -> Result<C::Instant, SensorError<TRIG::Error>> {
        self.trigger.set_high()?;
        sleep_for(&mut self.delay, self.config.trigger_pulse);
        self.trigger.set_low()?;

        Ok(self.clock.now() + self.config.echo_deadline)
    }

    /// Spins on `f` until it yields a value or the deadline passes.
    ///
    /// No delay between polls: the edges must be timestamped as soon as they
    /// happen.
    fn busy_poll_until<FN, T>(
        &mut self,
        deadline: C::Instant,
        on_timeout: SensorError<TRIG::Error>,
        mut f: FN,
    ) -> Result<T, SensorError<TRIG::Error>>
    where
        FN: FnMut(&mut ECHO) -> NbResult<T, TRIG::Error>,
    {
        loop {
            match f(&mut self.echo) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.clock.now() >= deadline {
                        return Err(on_timeout);
                    }
                }
                Err(nb::Error::Other(e)) => return Err(SensorError::Io(e)),
            }
        }
    }
}

/// Non-blocking check that the echo line is at the wanted level.
fn wait_for_level<P: InputPin>(echo: &mut P, high: bool) -> NbResult<(), P::Error> {
    if echo.is_high().map_err(nb::Error::Other)? == high {
        Ok(())
    } else {
        Err(nb::Error::WouldBlock)
    }
}

/// `DelayNs` only takes `u32` nanoseconds, so longer waits are chunked.
fn sleep_for<D: DelayNs>(delay: &mut D, duration: Duration) {
    let mut remaining = duration.as_nanos();
    while remaining > 0 {
        let chunk = remaining.min(u32::MAX as u128) as u32;
        delay.delay_ns(chunk);
        remaining -= chunk as u128;
    }
}
