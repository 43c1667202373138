// src/sensor/bench.rs

// Simulated HC-SR04 for unit tests. Trigger, echo, delay and clock all share
// one timeline kept in nanoseconds. Every echo read samples the line and then
// advances time by 1us, which is what makes busy polls progress; clock reads
// are free. The echo waveform for the n-th trigger pulse comes from the n-th
// script entry (silence once the script runs out).

use super::DistanceSensor;
use crate::common::{
    config::SensorConfig,
    error::SensorError,
    hal_traits::{GpioLine, LineMode, MonotonicClock},
};
use core::cell::{Ref, RefCell, RefMut};
use core::time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use heapless::Vec;
use std::rc::Rc;

const READ_COST_NS: u64 = 1_000;

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(pub u64); // microseconds

impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Line Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BenchError {
    Config,
    Write,
    Read,
    Release,
}

impl embedded_hal::digital::Error for BenchError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Echo waveform produced in answer to one trigger pulse.
/// Offsets count from the falling edge of the trigger.
#[derive(Debug, Copy, Clone)]
pub enum Echo {
    Silent,
    Pulse { after_us: u64, width_us: u64 },
    StuckHigh { after_us: u64 },
}

#[derive(Debug, Default)]
pub struct BenchState {
    pub now_ns: u64,
    script: Vec<Echo, 16>,
    /// End of the latest trigger pulse, in microseconds.
    burst_at: Option<u64>,
    trigger_high: bool,
    last_echo_sample: bool,

    pub echo_mode: Option<LineMode>,
    pub trigger_mode: Option<LineMode>,
    pub echo_releases: u32,
    pub trigger_releases: u32,
    pub echo_reads: u32,
    pub trigger_pulses: usize,
    /// (level, time in us) for every trigger write.
    pub trigger_edges: Vec<(bool, u64), 64>,
    /// Time in us of each echo sample that first saw the line high.
    pub rising_edges: Vec<u64, 32>,
    pub sleeps_us: Vec<u64, 64>,

    pub fail_echo_config: bool,
    pub fail_trigger_config: bool,
    pub fail_trigger_write: bool,
    pub fail_echo_read: bool,
    pub fail_echo_release: bool,
}

impl BenchState {
    fn now_us(&self) -> u64 {
        self.now_ns / 1_000
    }

    fn echo_level(&self) -> bool {
        let (Some(burst_at), Some(echo)) = (
            self.burst_at,
            self.trigger_pulses.checked_sub(1).and_then(|i| self.script.get(i)),
        ) else {
            return false;
        };
        let t = self.now_us();
        match *echo {
            Echo::Silent => false,
            Echo::Pulse { after_us, width_us } => {
                let rise = burst_at + after_us;
                t >= rise && t < rise + width_us
            }
            Echo::StuckHigh { after_us } => t >= burst_at + after_us,
        }
    }
}

#[derive(Clone)]
pub struct Bench(Rc<RefCell<BenchState>>);

pub type BenchSensor = DistanceSensor<BenchTrigger, BenchEcho, BenchDelay, BenchClock>;

impl Bench {
    pub fn new(script: &[Echo]) -> Self {
        let mut state = BenchState::default();
        state.script = Vec::from_slice(script).expect("script too long");
        Bench(Rc::new(RefCell::new(state)))
    }

    pub fn state(&self) -> Ref<'_, BenchState> {
        self.0.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, BenchState> {
        self.0.borrow_mut()
    }

    pub fn now_us(&self) -> u64 {
        self.state().now_us()
    }

    pub fn parts(&self) -> (BenchTrigger, BenchEcho, BenchDelay, BenchClock) {
        (
            BenchTrigger(self.clone()),
            BenchEcho(self.clone()),
            BenchDelay(self.clone()),
            BenchClock(self.clone()),
        )
    }

    pub fn sensor(&self) -> Result<BenchSensor, SensorError<BenchError>> {
        self.sensor_with_config(SensorConfig::default())
    }

    pub fn sensor_with_config(&self, config: SensorConfig) -> Result<BenchSensor, SensorError<BenchError>> {
        let (trigger, echo, delay, clock) = self.parts();
        DistanceSensor::with_config(trigger, echo, delay, clock, config)
    }
}

// --- Mock Trigger ---
pub struct BenchTrigger(Bench);

impl ErrorType for BenchTrigger {
    type Error = BenchError;
}

impl OutputPin for BenchTrigger {
    fn set_low(&mut self) -> Result<(), BenchError> {
        let mut s = self.0.state_mut();
        if s.fail_trigger_write {
            return Err(BenchError::Write);
        }
        let now = s.now_us();
        s.trigger_edges.push((false, now)).expect("trigger log full");
        if s.trigger_high {
            s.trigger_high = false;
            s.burst_at = Some(now);
            s.trigger_pulses += 1;
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), BenchError> {
        let mut s = self.0.state_mut();
        if s.fail_trigger_write {
            return Err(BenchError::Write);
        }
        let now = s.now_us();
        s.trigger_edges.push((true, now)).expect("trigger log full");
        s.trigger_high = true;
        Ok(())
    }
}

impl GpioLine for BenchTrigger {
    fn set_mode(&mut self, mode: LineMode) -> Result<(), BenchError> {
        let mut s = self.0.state_mut();
        if s.fail_trigger_config {
            return Err(BenchError::Config);
        }
        s.trigger_mode = Some(mode);
        Ok(())
    }

    fn release(&mut self) -> Result<(), BenchError> {
        self.0.state_mut().trigger_releases += 1;
        Ok(())
    }
}

// --- Mock Echo ---
pub struct BenchEcho(Bench);

impl ErrorType for BenchEcho {
    type Error = BenchError;
}

impl InputPin for BenchEcho {
    fn is_high(&mut self) -> Result<bool, BenchError> {
        let mut s = self.0.state_mut();
        if s.fail_echo_read {
            return Err(BenchError::Read);
        }
        let level = s.echo_level();
        if level && !s.last_echo_sample {
            let now = s.now_us();
            s.rising_edges.push(now).expect("edge log full");
        }
        s.last_echo_sample = level;
        s.echo_reads += 1;
        s.now_ns += READ_COST_NS;
        Ok(level)
    }

    fn is_low(&mut self) -> Result<bool, BenchError> {
        self.is_high().map(|level| !level)
    }
}

impl GpioLine for BenchEcho {
    fn set_mode(&mut self, mode: LineMode) -> Result<(), BenchError> {
        let mut s = self.0.state_mut();
        if s.fail_echo_config {
            return Err(BenchError::Config);
        }
        s.echo_mode = Some(mode);
        Ok(())
    }

    fn release(&mut self) -> Result<(), BenchError> {
        let mut s = self.0.state_mut();
        s.echo_releases += 1;
        if s.fail_echo_release {
            return Err(BenchError::Release);
        }
        Ok(())
    }
}

// --- Mock Delay / Clock ---
pub struct BenchDelay(Bench);

impl DelayNs for BenchDelay {
    fn delay_ns(&mut self, ns: u32) {
        let mut s = self.0.state_mut();
        s.now_ns += ns as u64;
        s.sleeps_us.push(ns as u64 / 1_000).expect("sleep log full");
    }
}

pub struct BenchClock(Bench);

impl MonotonicClock for BenchClock {
    type Instant = MockInstant;

    fn now(&self) -> MockInstant {
        MockInstant(self.0.now_us())
    }
}
