// src/sensor/mod.rs

// The HC-SR04 driver, split by concern:
mod driver;  // DistanceSensor struct, construction and disposal
mod ranging; // One ranging cycle: gate, trigger pulse, echo edges, range check
mod retry;   // Retrying measurement API built on top of `ranging`

#[cfg(test)]
mod bench;   // Simulated trigger/echo/clock/delay sharing one timeline

// --- Public Re-exports ---
pub use driver::DistanceSensor;
