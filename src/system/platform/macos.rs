use std::process::Command;

use super::PlatformExtensions;
use crate::system::snapshot::BatteryState;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn battery() -> Option<BatteryState> {
        let output = Command::new("pmset").args(["-g", "batt"]).output().ok()?;
        if !output.status.success() {
            return None;
        }
        parse_pmset(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Reads the first `InternalBattery` line of `pmset -g batt`, e.g.
/// ` -InternalBattery-0 (id=4653155)	87%; discharging; 4:12 remaining present: true`.
fn parse_pmset(output: &str) -> Option<BatteryState> {
    let line = output.lines().find(|l| l.contains("InternalBattery"))?;
    let (_, fields) = line.split_once('\t')?;
    let mut parts = fields.split(';').map(str::trim);

    let percent: f32 = parts.next()?.strip_suffix('%')?.parse().ok()?;
    let state = parts.next().unwrap_or_default();
    Some(BatteryState {
        percent: percent.clamp(0.0, 100.0),
        charging: state != "discharging",
    })
}
