// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Bias applied to a line configured as input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Pull {
    None,
    Up,
    Down,
}

/// Electrical mode requested for a GPIO line.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LineMode {
    Input(Pull),
    Output,
}

/// Runtime configuration and release of a GPIO line.
///
/// `embedded-hal` covers reading and driving levels but leaves configuring and
/// freeing a pin to each HAL. Line handles passed to the driver implement this
/// so construction and disposal can be expressed generically. HALs that fix a
/// pin's mode in its type can use [`Preconfigured`].
pub trait GpioLine: ErrorType {
    /// Puts the line into the requested mode.
    ///
    /// Fails if the line is claimed elsewhere or does not support the mode.
    fn set_mode(&mut self, mode: LineMode) -> Result<(), Self::Error>;

    /// Gives the line back to the platform.
    ///
    /// The driver calls this at most once per line.
    fn release(&mut self) -> Result<(), Self::Error>;
}

/// Point in time on a monotonic clock.
///
/// Subtracting two instants yields the elapsed `Duration` between them.
/// Implementations should saturate at zero rather than panic when the right
/// side is later.
pub trait EchoInstant:
    Copy + Ord + Debug + Sub<Self, Output = Duration> + Add<Duration, Output = Self>
{
}

impl<T> EchoInstant for T where
    T: Copy + Ord + Debug + Sub<T, Output = Duration> + Add<Duration, Output = T>
{
}

/// Monotonic high-resolution clock used to time echo edges.
///
/// Resolution must be one microsecond or finer, otherwise pulse widths (and so
/// distances) are quantized to useless steps.
pub trait MonotonicClock {
    type Instant: EchoInstant;

    /// Current instant. Must never go backwards.
    fn now(&self) -> Self::Instant;
}

/// Adapter for pins whose mode is already fixed by a type-state HAL.
///
/// `set_mode` and `release` succeed without touching hardware; the wrapped pin
/// is handed back by [`Preconfigured::into_inner`].
#[derive(Debug)]
pub struct Preconfigured<P>(P);

impl<P> Preconfigured<P> {
    pub fn new(pin: P) -> Self {
        Preconfigured(pin)
    }

    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: ErrorType> ErrorType for Preconfigured<P> {
    type Error = P::Error;
}

impl<P: ErrorType> GpioLine for Preconfigured<P> {
    fn set_mode(&mut self, _mode: LineMode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<P: InputPin> InputPin for Preconfigured<P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.0.is_high()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.0.is_low()
    }
}

impl<P: OutputPin> OutputPin for Preconfigured<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }
}
