use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::system::Snapshot;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("cannot append to {path}: {source}")]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Append-only performance log. The file is opened, written and closed on
/// every call, so a crash loses at most the line being written.
#[derive(Debug, Clone)]
pub struct PerformanceLogger {
    path: PathBuf,
}

impl PerformanceLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, snapshot: &Snapshot) -> Result<(), LogError> {
        let mut line = format_line(snapshot);
        line.push('\n');
        self.write(line.as_bytes()).map_err(|source| LogError::Append {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(bytes)?;
        file.flush()
    }
}

pub fn format_line(snapshot: &Snapshot) -> String {
    let mut line = format!(
        "[{}] CPU: {:.1}%, Memory: {:.1}%",
        snapshot.taken_at.format("%Y-%m-%d %H:%M:%S"),
        snapshot.cpu_percent,
        snapshot.memory_percent,
    );
    for rate in [
        &snapshot.disk_read,
        &snapshot.disk_write,
        &snapshot.net_sent,
        &snapshot.net_received,
    ] {
        line.push_str(&format!(", {}: {}", rate.counter.label(), rate.display()));
    }
    line
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use chrono::{Local, TimeZone};
    use insta::assert_snapshot;

    use super::*;
    use crate::system::counters::CounterReading;
    use crate::system::fake::FakeSource;
    use crate::system::{Monitor, MonitorSettings};

    fn snapshot() -> Snapshot {
        let reading = |disk_read, disk_written, net_sent, net_received| CounterReading {
            disk_read: Some(disk_read),
            disk_written: Some(disk_written),
            net_sent: Some(net_sent),
            net_received: Some(net_received),
        };
        let mut source =
            FakeSource::with_readings([reading(0, 0, 0, 0), reading(1536, 0, 1_048_576, 512)]);
        source.cpu_percent = 12.5;
        source.memory_percent = 48.3;
        let t0 = Instant::now();
        let mut monitor = Monitor::new(source, MonitorSettings::default(), t0);
        let mut snapshot = monitor.build(t0 + Duration::from_secs(1));
        snapshot.taken_at = Local
            .with_ymd_and_hms(2026, 10, 16, 9, 30, 5)
            .single()
            .expect("unambiguous local time");
        snapshot
    }

    fn temp_log(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("vitals_{name}_{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn line_format() {
        assert_snapshot!(
            format_line(&snapshot()),
            @"[2026-10-16 09:30:05] CPU: 12.5%, Memory: 48.3%, Disk Read: 1.50 KB/s, Disk Write: 0.00 B/s, Network Sent: 1.00 MB/s, Network Received: 512.00 B/s"
        );
    }

    #[test]
    fn appends_one_line_per_call() {
        let path = temp_log("append");
        let logger = PerformanceLogger::new(&path);
        let snapshot = snapshot();

        logger.append(&snapshot).unwrap();
        logger.append(&snapshot).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(contents.ends_with('\n'));
        assert!(lines.iter().all(|l| l.starts_with("[2026-10-16 09:30:05] CPU:")));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unwritable_path_reports_error() {
        let logger = PerformanceLogger::new("/nonexistent-dir/vitals/perf.log");
        let err = logger.append(&snapshot()).unwrap_err();
        assert!(err.to_string().contains("/nonexistent-dir/vitals/perf.log"));
    }
}
