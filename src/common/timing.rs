// src/common/timing.rs

use core::time::Duration;

// HC-SR04 timing profile. Values come from the module datasheet; the echo
// deadline is a driver policy rather than a datasheet figure.

// === Trigger ===

/// Minimum high time of the trigger pulse that starts a ranging cycle.
pub const TRIGGER_PULSE_WIDTH: Duration = Duration::from_micros(10);

/// Longest accepted trigger hold.
pub const MAX_TRIGGER_PULSE_WIDTH: Duration = Duration::from_millis(1);

// === Ranging cycle ===

/// Minimum spacing between the starts of two ranging cycles, measured from
/// the previous echo rising edge. Triggering sooner lets the new trigger
/// collide with a still-settling echo.
pub const MIN_MEASUREMENT_INTERVAL: Duration = Duration::from_millis(60);

/// Longest accepted spacing between ranging cycles.
pub const MAX_MEASUREMENT_INTERVAL: Duration = Duration::from_secs(1);

/// Longest echo pulse the sensor produces for its full range (~400 cm).
pub const MAX_ECHO_PULSE: Duration = Duration::from_millis(24);

/// Per-attempt budget for both echo edges, counted from the trigger falling
/// edge. Covers `MAX_ECHO_PULSE` plus scheduling jitter.
pub const ECHO_DEADLINE: Duration = Duration::from_millis(100);

/// Longest accepted echo deadline.
pub const MAX_ECHO_DEADLINE: Duration = Duration::from_secs(1);

// === Conversion ===

/// Speed of sound at room temperature, in centimeters per millisecond.
pub const SPEED_OF_SOUND_CM_PER_MS: f64 = 34.3;

/// Documented maximum range. Anything further is a corrupted edge capture.
pub const MAX_RANGE_CM: f64 = 400.0;

// === Retry ===

/// Attempts made by a single `measure` call before giving up.
pub const MAX_ATTEMPTS: u8 = 10;
