// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod config;
pub mod error;
pub mod hal_traits;
pub mod measurement;
pub mod timing;

#[cfg(feature = "std")]
pub mod std_impl;

// --- Re-export key types/traits/functions for easier access ---

// From config.rs
pub use config::{ConfigError, SensorConfig};

// From error.rs
pub use error::SensorError;

// From hal_traits.rs
pub use hal_traits::{EchoInstant, GpioLine, LineMode, MonotonicClock, Preconfigured, Pull};

// From measurement.rs
pub use measurement::{distance_cm_from_pulse, Measurement};

// From timing.rs (constants - users can access via common::timing::*)
// No re-exports by default.

// --- Feature-gated re-exports ---

#[cfg(feature = "std")]
pub use std_impl::{StdClock, StdDelay};
