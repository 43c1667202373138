// src/common/config.rs

use super::timing;
use core::time::Duration;

/// Reasons a [`SensorConfig`] is rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("At least one attempt is required")]
    NoAttempts,

    #[error("Trigger pulse must be between 10us and 1ms")]
    TriggerPulseOutOfBounds,

    #[error("Measurement interval must be between 60ms and 1s")]
    IntervalOutOfBounds,

    #[error("Echo deadline must cover the longest echo pulse and stay below 1s")]
    EchoDeadlineOutOfBounds,

    #[error("Maximum range must be positive and at most 400cm")]
    InvalidRange,
}

/// HC-SR04 timing profile carried by a driver instance.
///
/// `Default` yields the datasheet values from [`timing`]. Fields may only be
/// moved to the safe side of the datasheet: longer spacing, a longer trigger
/// hold, a tighter range limit or fewer attempts. [`SensorConfig::validate`]
/// rejects anything that leaves the HC-SR04 envelope.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SensorConfig {
    pub min_interval: Duration,
    pub trigger_pulse: Duration,
    pub echo_deadline: Duration,
    pub max_range_cm: f64,
    pub max_attempts: u8,
}

impl SensorConfig {
    pub const HCSR04: SensorConfig = SensorConfig {
        min_interval: timing::MIN_MEASUREMENT_INTERVAL,
        trigger_pulse: timing::TRIGGER_PULSE_WIDTH,
        echo_deadline: timing::ECHO_DEADLINE,
        max_range_cm: timing::MAX_RANGE_CM,
        max_attempts: timing::MAX_ATTEMPTS,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if self.trigger_pulse < timing::TRIGGER_PULSE_WIDTH
            || self.trigger_pulse > timing::MAX_TRIGGER_PULSE_WIDTH
        {
            return Err(ConfigError::TriggerPulseOutOfBounds);
        }
        if self.min_interval < timing::MIN_MEASUREMENT_INTERVAL
            || self.min_interval > timing::MAX_MEASUREMENT_INTERVAL
        {
            return Err(ConfigError::IntervalOutOfBounds);
        }
        if self.echo_deadline < timing::MAX_ECHO_PULSE || self.echo_deadline > timing::MAX_ECHO_DEADLINE {
            return Err(ConfigError::EchoDeadlineOutOfBounds);
        }
        // Also rejects NaN
        if !(self.max_range_cm > 0.0 && self.max_range_cm <= timing::MAX_RANGE_CM) {
            return Err(ConfigError::InvalidRange);
        }
        Ok(())
    }

    /// Worst-case blocking time of one retrying measurement.
    pub fn worst_case_latency(&self) -> Duration {
        self.min_interval
            .saturating_add(self.trigger_pulse)
            .saturating_add(self.echo_deadline)
            .saturating_mul(self.max_attempts as u32)
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::HCSR04
    }
}
