// src/sensor/driver.rs

use crate::common::{
    config::SensorConfig,
    error::SensorError,
    hal_traits::{GpioLine, LineMode, MonotonicClock, Pull},
};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

/// HC-SR04 ultrasonic ranging module on a trigger/echo line pair.
///
/// The driver owns both lines, a delay used for the sleeping waits and a
/// monotonic clock used to time echo edges. Both lines must share one error
/// type so a single [`SensorError`] can carry it.
///
/// Measurement methods take `&mut self`, so one instance can only be driven
/// from one place at a time.
///
/// Dropping the driver does not release its lines. Call
/// [`DistanceSensor::close`] or [`DistanceSensor::release`] first so the
/// trigger is left low and both lines go back to the platform.
#[derive(Debug)]
pub struct DistanceSensor<TRIG, ECHO, D, C>
where
    TRIG: OutputPin + GpioLine,
    ECHO: InputPin + GpioLine<Error = TRIG::Error>,
    D: DelayNs,
    C: MonotonicClock,
{
    pub(super) trigger: TRIG,
    pub(super) echo: ECHO,
    pub(super) delay: D,
    pub(super) clock: C,
    pub(super) config: SensorConfig,
    /// Rising edge of the most recent echo, `None` until one has been seen.
    pub(super) last_measurement_time: Option<C::Instant>,
    closed: bool,
}

impl<TRIG, ECHO, D, C> DistanceSensor<TRIG, ECHO, D, C>
where
    TRIG: OutputPin + GpioLine,
    ECHO: InputPin + GpioLine<Error = TRIG::Error>,
    D: DelayNs,
    C: MonotonicClock,
{
    /// Creates a driver with the standard HC-SR04 timing profile.
    ///
    /// See [`DistanceSensor::with_config`].
    pub fn new(trigger: TRIG, echo: ECHO, delay: D, clock: C) -> Result<Self, SensorError<TRIG::Error>> {
        Self::with_config(trigger, echo, delay, clock, SensorConfig::default())
    }

    /// Creates a driver, configuring both lines.
    ///
    /// The echo line becomes a pulled-down input so an idle or unplugged
    /// sensor reads low. The trigger line becomes an output driven low. One
    /// echo read is then discarded to absorb first-access latency of the GPIO
    /// path, which otherwise tends to make the first measurement miss its
    /// echo.
    ///
    /// Any line failure is reported as [`SensorError::LineConfigurationFailed`];
    /// lines configured before the failure are released again.
    pub fn with_config(
        mut trigger: TRIG,
        mut echo: ECHO,
        delay: D,
        clock: C,
        config: SensorConfig,
    ) -> Result<Self, SensorError<TRIG::Error>> {
        config.validate().map_err(SensorError::InvalidConfig)?;

        echo.set_mode(LineMode::Input(Pull::Down))
            .map_err(SensorError::LineConfigurationFailed)?;

        if let Err(e) = trigger.set_mode(LineMode::Output) {
            let _ = echo.release();
            return Err(SensorError::LineConfigurationFailed(e));
        }

        let settle = trigger.set_low().and_then(|_| echo.is_high().map(|_| ()));
        if let Err(e) = settle {
            let _ = echo.release();
            let _ = trigger.release();
            return Err(SensorError::LineConfigurationFailed(e));
        }

        debug!("hcsr04: lines configured");

        Ok(DistanceSensor {
            trigger,
            echo,
            delay,
            clock,
            config,
            last_measurement_time: None,
            closed: false,
        })
    }

    /// Timing profile in use.
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Clock value of the most recent echo rising edge, if any.
    pub fn last_measurement_time(&self) -> Option<C::Instant> {
        self.last_measurement_time
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Drives the trigger low and releases both lines.
    ///
    /// Calling this again is a no-op. Both lines are released even if one
    /// step fails; the first failure is returned as [`SensorError::Io`].
    pub fn close(&mut self) -> Result<(), SensorError<TRIG::Error>> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let idle = self.trigger.set_low();
        let echo = self.echo.release();
        let trigger = self.trigger.release();

        debug!("hcsr04: lines released");

        idle.and(echo).and(trigger).map_err(SensorError::Io)
    }

    /// Closes the driver and hands back its parts.
    pub fn release(mut self) -> (TRIG, ECHO, D, C) {
        let _ = self.close();
        (self.trigger, self.echo, self.delay, self.clock)
    }

    pub(super) fn ensure_open(&self) -> Result<(), SensorError<TRIG::Error>> {
        if self.closed {
            Err(SensorError::Closed)
        } else {
            Ok(())
        }
    }
}
