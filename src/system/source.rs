use std::collections::HashSet;
use std::ffi::OsStr;

use sysinfo::{
    Disks, Networks, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System, UpdateKind,
};

use super::counters::CounterReading;
use super::platform;
use super::process::{ProcessReadError, ProcessRecord};
use super::snapshot::{BatteryState, SystemIdentity};

/// The narrow view of the operating system the monitor needs.
pub trait CounterSource {
    /// Update instantaneous gauges (CPU, memory) ahead of a tick.
    fn refresh(&mut self);
    fn cpu_percent(&self) -> f32;
    fn memory_percent(&self) -> f32;
    /// Cumulative byte counters since boot.
    fn counters(&mut self) -> CounterReading;
    fn battery(&mut self) -> Option<BatteryState>;
    /// Best effort: one entry per process, failed reads included as errors.
    fn processes(&mut self) -> Vec<Result<ProcessRecord, ProcessReadError>>;
    fn identity(&self) -> SystemIdentity;
}

pub struct SysinfoSource {
    sys: System,
    networks: Networks,
    disks: Disks,
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSource {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        SysinfoSource {
            sys,
            networks: Networks::new_with_refreshed_list(),
            disks: Disks::new_with_refreshed_list(),
        }
    }
}

impl CounterSource for SysinfoSource {
    fn refresh(&mut self) {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
    }

    fn cpu_percent(&self) -> f32 {
        self.sys.global_cpu_usage()
    }

    fn memory_percent(&self) -> f32 {
        percent_of(self.sys.used_memory(), self.sys.total_memory())
    }

    fn counters(&mut self) -> CounterReading {
        self.networks.refresh(true);
        let (sent, received) = self
            .networks
            .iter()
            .fold((0u64, 0u64), |(tx, rx), (_, data)| {
                (
                    tx.saturating_add(data.total_transmitted()),
                    rx.saturating_add(data.total_received()),
                )
            });

        self.disks.refresh(true);
        let disk = sum_disk_usage(self.disks.iter().map(|disk| {
            let usage = disk.usage();
            (disk.name(), usage.total_read_bytes, usage.total_written_bytes)
        }));

        CounterReading {
            disk_read: disk.map(|(read, _)| read),
            disk_written: disk.map(|(_, written)| written),
            net_sent: Some(sent),
            net_received: Some(received),
        }
    }

    fn battery(&mut self) -> Option<BatteryState> {
        platform::battery()
    }

    fn processes(&mut self) -> Vec<Result<ProcessRecord, ProcessReadError>> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_cpu()
                .with_memory()
                .with_cmd(UpdateKind::OnlyIfNotSet),
        );
        let total_memory = self.sys.total_memory();

        self.sys
            .processes()
            .iter()
            // Userland threads are listed alongside processes on Linux.
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(pid, process)| {
                let pid = pid.as_u32();
                if matches!(process.status(), ProcessStatus::Zombie | ProcessStatus::Dead) {
                    return Err(ProcessReadError::Gone(pid));
                }
                Ok(ProcessRecord {
                    pid,
                    name: process.name().to_string_lossy().into_owned(),
                    cpu_percent: process.cpu_usage(),
                    memory_percent: percent_of(process.memory(), total_memory),
                    cmdline: process
                        .cmd()
                        .iter()
                        .map(|token| token.to_string_lossy().into_owned())
                        .collect(),
                })
            })
            .collect()
    }

    fn identity(&self) -> SystemIdentity {
        SystemIdentity {
            os_name: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
            release: System::kernel_version().unwrap_or_default(),
            processor: self
                .sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().trim().to_string())
                .unwrap_or_default(),
            machine: std::env::consts::ARCH.to_string(),
        }
    }
}

/// Total (read, written) bytes over distinct devices. Bind mounts and btrfs
/// subvolumes show up as several disks with one device name; only the first
/// is counted. `None` when no disk is listed.
fn sum_disk_usage<'a>(
    disks: impl IntoIterator<Item = (&'a OsStr, u64, u64)>,
) -> Option<(u64, u64)> {
    let mut seen = HashSet::new();
    let mut total: Option<(u64, u64)> = None;
    for (name, read, written) in disks {
        if !seen.insert(name) {
            continue;
        }
        let (r, w) = total.unwrap_or_default();
        total = Some((r.saturating_add(read), w.saturating_add(written)));
    }
    total
}

fn percent_of(used: u64, total: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (used as f64 / total as f64 * 100.0) as f32
}
