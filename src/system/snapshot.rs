use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local};

use super::counters::RateSample;
use super::history::HistoryStore;
use super::process::ProcessInfo;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatteryState {
    pub percent: f32,
    pub charging: bool,
}

impl fmt::Display for BatteryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.charging {
            "(Charging)"
        } else {
            "(Discharging)"
        };
        write!(f, "{:.2}% {state}", self.percent)
    }
}

/// Static facts about the host, captured once per session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemIdentity {
    pub os_name: String,
    pub release: String,
    pub processor: String,
    pub machine: String,
}

impl fmt::Display for SystemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} | {} | {}",
            self.os_name, self.release, self.processor, self.machine
        )
    }
}

/// Everything one tick knows about the host. Built once by the monitor and
/// never touched again.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub taken_at: DateTime<Local>,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub disk_read: RateSample,
    pub disk_write: RateSample,
    pub net_sent: RateSample,
    pub net_received: RateSample,
    pub history: HistoryStore,
    pub processes: Arc<[ProcessInfo]>,
    pub battery: Option<BatteryState>,
    pub identity: Arc<SystemIdentity>,
}

impl Snapshot {
    pub fn battery_label(&self) -> String {
        match self.battery {
            Some(battery) => battery.to_string(),
            None => "N/A".to_string(),
        }
    }
}
