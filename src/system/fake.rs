use std::collections::VecDeque;

use super::counters::CounterReading;
use super::process::{ProcessReadError, ProcessRecord};
use super::snapshot::{BatteryState, SystemIdentity};
use super::source::CounterSource;

/// Scripted counter source for tests and benchmarks.
///
/// Counter readings are consumed in order; once the script runs dry the last
/// reading is repeated, which reads as an idle machine.
#[derive(Debug, Default)]
pub struct FakeSource {
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub readings: VecDeque<CounterReading>,
    pub battery: Option<BatteryState>,
    pub process_entries: Vec<Result<ProcessRecord, ProcessReadError>>,
    pub identity: SystemIdentity,
    /// Number of times the process list was enumerated.
    pub enumerations: usize,
    pub refreshes: usize,
    last_reading: CounterReading,
}

impl FakeSource {
    pub fn with_readings(readings: impl IntoIterator<Item = CounterReading>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl CounterSource for FakeSource {
    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn cpu_percent(&self) -> f32 {
        self.cpu_percent
    }

    fn memory_percent(&self) -> f32 {
        self.memory_percent
    }

    fn counters(&mut self) -> CounterReading {
        if let Some(next) = self.readings.pop_front() {
            self.last_reading = next;
        }
        self.last_reading
    }

    fn battery(&mut self) -> Option<BatteryState> {
        self.battery
    }

    fn processes(&mut self) -> Vec<Result<ProcessRecord, ProcessReadError>> {
        self.enumerations += 1;
        self.process_entries.clone()
    }

    fn identity(&self) -> SystemIdentity {
        self.identity.clone()
    }
}
