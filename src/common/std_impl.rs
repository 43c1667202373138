// src/common/std_impl.rs

// Hosted adapters for running the driver on an OS (e.g. Linux GPIO character
// devices wrapped by the caller).

use super::hal_traits::MonotonicClock;
use embedded_hal::delay::DelayNs;
use std::time::{Duration, Instant};

/// `MonotonicClock` backed by `std::time::Instant`.
#[derive(Debug, Default, Copy, Clone)]
pub struct StdClock;

impl MonotonicClock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// `DelayNs` backed by `std::thread::sleep`.
///
/// Requests keep nanosecond precision; how closely the OS honors them depends
/// on the scheduler, but the sleep never ends early.
#[derive(Debug, Default, Copy, Clone)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }
}
