// src/lib.rs

#![cfg_attr(not(test), no_std)] // no_std outside of unit tests

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together");

#[cfg(all(feature = "std", not(test)))]
extern crate std;

// Must come first so the logging macros are visible to the other modules
#[macro_use]
mod fmt;

pub mod common;
pub mod sensor;

// Re-export key types for convenience
pub use common::{Measurement, SensorConfig, SensorError};
pub use sensor::DistanceSensor;
