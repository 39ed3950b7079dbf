use super::snapshot::BatteryState;

/// What sysinfo does not cover and each OS exposes its own way.
pub trait PlatformExtensions {
    fn battery() -> Option<BatteryState>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn battery() -> Option<BatteryState> {
    platform_impl::Platform::battery()
}
