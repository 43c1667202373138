// src/common/error.rs

use super::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum SensorError<E = ()>
where
    E: core::fmt::Debug, // Needed for the `{0:?}` formatting of HAL errors
{
    /// Echo line never went high within the attempt deadline.
    #[error("Timed out waiting for echo pulse to start")]
    TimeoutWaitingForEchoStart,

    /// Echo line went high but never returned low within the attempt deadline.
    #[error("Timed out waiting for echo pulse to end")]
    TimeoutWaitingForEchoEnd,

    /// Computed distance is beyond what the sensor can physically report.
    #[error("Reading out of range: {distance_cm} cm")]
    OutOfRange { distance_cm: f64 },

    /// Every attempt of a retrying measurement failed.
    #[error("Sensor unresponsive after {attempts} attempts")]
    SensorUnresponsive { attempts: u8 },

    /// A GPIO line could not be configured while constructing the driver.
    #[error("Line configuration failed: {0:?}")]
    LineConfigurationFailed(E),

    /// The timing profile handed to the constructor is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(ConfigError),

    /// A GPIO read or write failed during a measurement.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// The driver has been closed and no longer owns usable lines.
    #[error("Sensor is closed")]
    Closed,
}

impl<E: core::fmt::Debug> SensorError<E> {
    /// Whether a fresh ranging cycle might succeed where this one failed.
    ///
    /// Edge timeouts and impossible distances are caused by scheduling jitter
    /// or fast-moving targets. Everything else is either terminal or points at
    /// broken hardware.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SensorError::TimeoutWaitingForEchoStart
                | SensorError::TimeoutWaitingForEchoEnd
                | SensorError::OutOfRange { .. }
        )
    }

    /// Short static label, usable with logging back-ends that cannot format `E`.
    pub fn label(&self) -> &'static str {
        match self {
            SensorError::TimeoutWaitingForEchoStart => "timeout waiting for echo start",
            SensorError::TimeoutWaitingForEchoEnd => "timeout waiting for echo end",
            SensorError::OutOfRange { .. } => "out of range",
            SensorError::SensorUnresponsive { .. } => "sensor unresponsive",
            SensorError::LineConfigurationFailed(_) => "line configuration failed",
            SensorError::InvalidConfig(_) => "invalid configuration",
            SensorError::Io(_) => "i/o error",
            SensorError::Closed => "closed",
        }
    }
}

// Allow mapping from underlying HAL error with `?` inside measurement code.
// Construction-time failures are mapped explicitly to `LineConfigurationFailed`.
impl<E: core::fmt::Debug> From<E> for SensorError<E> {
    fn from(e: E) -> Self {
        SensorError::Io(e)
    }
}
