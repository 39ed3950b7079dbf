use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;

use super::counters::{Counter, RateSample, RateSampler};
use super::history::{HistoryStore, Metric};
use super::process::ProcessCache;
use super::snapshot::{Snapshot, SystemIdentity};
use super::source::CounterSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonitorSettings {
    pub history_length: usize,
    pub process_update_interval: Duration,
    pub top_processes: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            history_length: super::history::DEFAULT_CAPACITY,
            process_update_interval: super::process::DEFAULT_UPDATE_INTERVAL,
            top_processes: super::process::DEFAULT_TOP_N,
        }
    }
}

/// One monitoring session: the sampler, the history and the process cache
/// all hang off this value, and `build` is the only thing callers drive.
pub struct Monitor<S> {
    source: S,
    sampler: RateSampler,
    history: HistoryStore,
    processes: ProcessCache,
    identity: Arc<SystemIdentity>,
}

impl<S: CounterSource> Monitor<S> {
    /// Takes the baseline counter reading, so the first tick already has
    /// something to diff against.
    pub fn new(mut source: S, settings: MonitorSettings, now: Instant) -> Self {
        let baseline = source.counters();
        let identity = Arc::new(source.identity());
        Self {
            source,
            sampler: RateSampler::new(baseline, now),
            history: HistoryStore::new(settings.history_length),
            processes: ProcessCache::new(settings.process_update_interval, settings.top_processes),
            identity,
        }
    }

    pub fn build(&mut self, now: Instant) -> Snapshot {
        let _span = tracing::debug_span!("monitor.build").entered();

        self.source.refresh();
        let cpu_percent = self.source.cpu_percent();
        let memory_percent = self.source.memory_percent();

        let reading = self.source.counters();
        let [disk_read, disk_write, net_sent, net_received] = self.sampler.sample(now, reading);

        self.history.push(Metric::Cpu, f64::from(cpu_percent));
        self.history.push(Metric::Memory, f64::from(memory_percent));
        for rate in [&disk_read, &disk_write, &net_sent, &net_received] {
            self.history.push(Metric::from(rate.counter), rate.kib_per_sec());
        }

        let processes = self.processes.maybe_refresh(now, &mut self.source);
        let battery = self.source.battery();

        Snapshot {
            taken_at: Local::now(),
            cpu_percent,
            memory_percent,
            disk_read,
            disk_write,
            net_sent,
            net_received,
            history: self.history.clone(),
            processes,
            battery,
            identity: Arc::clone(&self.identity),
        }
    }

    /// What the dashboard shows before the first tick: live gauges, idle
    /// rates, whatever history and process list already exist. Consumes no
    /// counter reading and pushes nothing into history, so the first real
    /// sample still covers the full interval since the baseline.
    pub fn idle_snapshot(&mut self) -> Snapshot {
        self.source.refresh();
        let [disk_read, disk_write, net_sent, net_received] = Counter::ALL.map(RateSample::zero);

        Snapshot {
            taken_at: Local::now(),
            cpu_percent: self.source.cpu_percent(),
            memory_percent: self.source.memory_percent(),
            disk_read,
            disk_write,
            net_sent,
            net_received,
            history: self.history.clone(),
            processes: self.processes.cached(),
            battery: self.source.battery(),
            identity: Arc::clone(&self.identity),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::counters::{Counter, CounterReading};
    use crate::system::fake::FakeSource;
    use crate::system::process::ProcessRecord;
    use crate::system::snapshot::BatteryState;

    fn reading(disk_read: u64, net_sent: u64) -> CounterReading {
        CounterReading {
            disk_read: Some(disk_read),
            disk_written: Some(0),
            net_sent: Some(net_sent),
            net_received: Some(0),
        }
    }

    #[test]
    fn first_tick_diffs_against_baseline() {
        let mut source = FakeSource::with_readings([reading(0, 0), reading(10_240, 2_048)]);
        source.cpu_percent = 42.0;
        source.memory_percent = 63.5;
        let t0 = Instant::now();
        let mut monitor = Monitor::new(source, MonitorSettings::default(), t0);

        let snapshot = monitor.build(t0 + Duration::from_secs(1));

        assert_eq!(snapshot.disk_read.counter, Counter::DiskRead);
        assert_eq!(snapshot.disk_read.display(), "10.00 KB/s");
        assert_eq!(snapshot.net_sent.display(), "2.00 KB/s");
        assert_eq!(snapshot.disk_write.display(), "0.00 B/s");
        assert_eq!(snapshot.cpu_percent, 42.0);
        assert_eq!(
            snapshot.history.snapshot(Metric::DiskRead).to_vec(),
            vec![10.0]
        );
        assert_eq!(snapshot.history.snapshot(Metric::Cpu).to_vec(), vec![42.0]);
        assert_eq!(snapshot.history.snapshot(Metric::Memory).to_vec(), vec![63.5]);
    }

    #[test]
    fn idle_snapshot_leaves_the_sampler_untouched() {
        let mut source = FakeSource::with_readings([reading(0, 0), reading(4_096, 0)]);
        source.cpu_percent = 12.0;
        let t0 = Instant::now();
        let mut monitor = Monitor::new(source, MonitorSettings::default(), t0);

        let idle = monitor.idle_snapshot();
        assert_eq!(idle.cpu_percent, 12.0);
        assert_eq!(idle.disk_read.bytes_per_sec, 0.0);
        assert!(idle.processes.is_empty());
        for metric in Metric::ALL {
            assert!(idle.history.snapshot(metric).is_empty());
        }
        assert_eq!(monitor.source().enumerations, 0);
        assert_eq!(monitor.source().readings.len(), 1);

        let first = monitor.build(t0 + Duration::from_secs(1));
        assert_eq!(first.disk_read.display(), "4.00 KB/s");
        assert_eq!(first.history.snapshot(Metric::DiskRead).to_vec(), vec![4.0]);
    }

    #[test]
    fn every_build_refreshes_gauges_once() {
        let t0 = Instant::now();
        let mut monitor = Monitor::new(FakeSource::default(), MonitorSettings::default(), t0);
        for tick in 1..=3u64 {
            monitor.build(t0 + Duration::from_secs(tick));
        }
        assert_eq!(monitor.source().refreshes, 3);
    }

    #[test]
    fn counter_reset_is_recorded_as_idle() {
        let source = FakeSource::with_readings([reading(5_000, 0), reading(100, 0)]);
        let t0 = Instant::now();
        let mut monitor = Monitor::new(source, MonitorSettings::default(), t0);

        let snapshot = monitor.build(t0 + Duration::from_secs(1));

        assert_eq!(snapshot.disk_read.bytes_per_sec, 0.0);
        assert_eq!(snapshot.history.snapshot(Metric::DiskRead).to_vec(), vec![0.0]);
    }

    #[test]
    fn history_fills_to_capacity_then_slides() {
        let readings = (0..=8).map(|i| reading(i * 1024, 0));
        let settings = MonitorSettings {
            history_length: 5,
            ..MonitorSettings::default()
        };
        let t0 = Instant::now();
        let mut monitor = Monitor::new(FakeSource::with_readings(readings), settings, t0);

        for tick in 1..=8u64 {
            monitor.build(t0 + Duration::from_secs(tick));
            let expected_len = (tick as usize).min(5);
            for metric in Metric::ALL {
                assert_eq!(monitor.history().snapshot(metric).len(), expected_len);
            }
        }
        assert_eq!(
            monitor.history().snapshot(Metric::DiskRead).to_vec(),
            vec![1.0; 5]
        );
    }

    #[test]
    fn snapshots_are_independent_of_later_ticks() {
        let source = FakeSource::with_readings([reading(0, 0), reading(1024, 0), reading(4096, 0)]);
        let t0 = Instant::now();
        let mut monitor = Monitor::new(source, MonitorSettings::default(), t0);

        let first = monitor.build(t0 + Duration::from_secs(1));
        let second = monitor.build(t0 + Duration::from_secs(2));

        assert_eq!(first.history.snapshot(Metric::DiskRead).to_vec(), vec![1.0]);
        assert_eq!(
            second.history.snapshot(Metric::DiskRead).to_vec(),
            vec![1.0, 3.0]
        );
    }

    #[test]
    fn process_list_is_reused_between_refreshes() {
        let mut source = FakeSource::default();
        source.process_entries = vec![Ok(ProcessRecord {
            pid: 7,
            name: "postgres".into(),
            cpu_percent: 12.0,
            memory_percent: 3.0,
            cmdline: vec!["postgres".into(), "-D".into(), "/var/lib/pg".into()],
        })];
        let t0 = Instant::now();
        let mut monitor = Monitor::new(source, MonitorSettings::default(), t0);

        let a = monitor.build(t0);
        let b = monitor.build(t0 + Duration::from_millis(250));
        let c = monitor.build(t0 + Duration::from_millis(2_250));

        assert!(Arc::ptr_eq(&a.processes, &b.processes));
        assert!(!Arc::ptr_eq(&b.processes, &c.processes));
        assert_eq!(monitor.source().enumerations, 2);
        assert_eq!(a.processes[0].command, "postgres -D");
    }

    #[test]
    fn battery_and_identity_pass_through() {
        let mut source = FakeSource::default();
        source.battery = Some(BatteryState {
            percent: 55.0,
            charging: false,
        });
        source.identity = SystemIdentity {
            os_name: "Linux".into(),
            release: "6.1".into(),
            processor: "cpu".into(),
            machine: "aarch64".into(),
        };
        let t0 = Instant::now();
        let mut monitor = Monitor::new(source, MonitorSettings::default(), t0);

        let snapshot = monitor.build(t0 + Duration::from_secs(1));

        assert_eq!(snapshot.battery_label(), "55.00% (Discharging)");
        assert_eq!(snapshot.identity.machine, "aarch64");

        let mut no_battery = Monitor::new(FakeSource::default(), MonitorSettings::default(), t0);
        assert_eq!(no_battery.build(t0).battery_label(), "N/A");
    }
}
