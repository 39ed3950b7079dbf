use super::PlatformExtensions;
use crate::system::snapshot::BatteryState;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn battery() -> Option<BatteryState> {
        let entries = std::fs::read_dir("/sys/class/power_supply").ok()?;
        for entry in entries.flatten() {
            let dir = entry.path();
            let kind = std::fs::read_to_string(dir.join("type")).unwrap_or_default();
            if kind.trim() != "Battery" {
                continue;
            }
            let Ok(capacity) = std::fs::read_to_string(dir.join("capacity")) else {
                continue;
            };
            let status = std::fs::read_to_string(dir.join("status")).unwrap_or_default();
            if let Some(state) = parse_battery(&capacity, &status) {
                return Some(state);
            }
        }
        None
    }
}

/// "Full" and "Not charging" both mean the charger is attached.
fn parse_battery(capacity: &str, status: &str) -> Option<BatteryState> {
    let percent: f32 = capacity.trim().parse().ok()?;
    Some(BatteryState {
        percent: percent.clamp(0.0, 100.0),
        charging: status.trim() != "Discharging",
    })
}
