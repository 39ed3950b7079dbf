use windows_sys::Win32::System::Power::{GetSystemPowerStatus, SYSTEM_POWER_STATUS};

use super::PlatformExtensions;
use crate::system::snapshot::BatteryState;

/// BatteryFlag bit set when the machine has no system battery.
const NO_SYSTEM_BATTERY: u8 = 128;
const UNKNOWN_PERCENT: u8 = 255;
const AC_ONLINE: u8 = 1;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn battery() -> Option<BatteryState> {
        // SAFETY: SYSTEM_POWER_STATUS is plain data and the pointer is valid
        // for the duration of the call.
        let mut status = unsafe { std::mem::zeroed::<SYSTEM_POWER_STATUS>() };
        let ok = unsafe { GetSystemPowerStatus(&mut status) };
        if ok == 0
            || status.BatteryFlag & NO_SYSTEM_BATTERY != 0
            || status.BatteryLifePercent == UNKNOWN_PERCENT
        {
            return None;
        }
        Some(BatteryState {
            percent: f32::from(status.BatteryLifePercent),
            charging: status.ACLineStatus == AC_ONLINE,
        })
    }
}
