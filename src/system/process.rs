use std::cmp::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

use super::source::CounterSource;

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(2);

/// One row of the top-processes table.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub command: String,
}

/// What the counter source reports for a single live process.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub cmdline: Vec<String>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProcessReadError {
    #[error("process {0} exited during enumeration")]
    Gone(u32),
    #[error("access to process {0} denied")]
    AccessDenied(u32),
}

/// First two command-line tokens, or the bare name for processes without a
/// command line (kernel threads, restricted processes).
pub fn command_summary(name: &str, cmdline: &[String]) -> String {
    if cmdline.is_empty() {
        return name.to_string();
    }
    cmdline
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

impl From<ProcessRecord> for ProcessInfo {
    fn from(record: ProcessRecord) -> Self {
        let command = command_summary(&record.name, &record.cmdline);
        ProcessInfo {
            pid: record.pid,
            name: record.name,
            cpu_percent: record.cpu_percent,
            memory_percent: record.memory_percent,
            command,
        }
    }
}

fn by_usage_descending(a: &ProcessInfo, b: &ProcessInfo) -> Ordering {
    b.cpu_percent
        .total_cmp(&a.cpu_percent)
        .then_with(|| b.memory_percent.total_cmp(&a.memory_percent))
}

/// Heaviest `limit` processes by (cpu, memory), descending. The sort is
/// stable, so equal entries keep their enumeration order.
pub fn select_top(mut processes: Vec<ProcessInfo>, limit: usize) -> Vec<ProcessInfo> {
    processes.sort_by(by_usage_descending);
    processes.truncate(limit);
    processes
}

/// Keeps the last top-N list and only re-enumerates once the update
/// interval has passed.
#[derive(Debug)]
pub struct ProcessCache {
    interval: Duration,
    limit: usize,
    last_refresh: Option<Instant>,
    cached: Arc<[ProcessInfo]>,
    skipped_last_refresh: usize,
}

impl ProcessCache {
    pub fn new(interval: Duration, limit: usize) -> Self {
        Self {
            interval,
            limit,
            last_refresh: None,
            cached: Arc::from(Vec::new()),
            skipped_last_refresh: 0,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_refresh {
            Some(last) => now.saturating_duration_since(last) > self.interval,
            None => true,
        }
    }

    pub fn maybe_refresh<S: CounterSource + ?Sized>(
        &mut self,
        now: Instant,
        source: &mut S,
    ) -> Arc<[ProcessInfo]> {
        if !self.is_due(now) {
            return Arc::clone(&self.cached);
        }

        let _span = tracing::debug_span!("processes.refresh").entered();

        let mut readable = Vec::new();
        let mut skipped = 0;
        for entry in source.processes() {
            match entry {
                Ok(record) => readable.push(ProcessInfo::from(record)),
                Err(err) => {
                    tracing::trace!(%err, "skipping unreadable process");
                    skipped += 1;
                }
            }
        }
        let enumerated = readable.len() + skipped;

        self.cached = Arc::from(select_top(readable, self.limit));
        self.last_refresh = Some(now);
        self.skipped_last_refresh = skipped;

        tracing::debug!(enumerated, skipped, kept = self.cached.len(), "process list refreshed");
        Arc::clone(&self.cached)
    }

    pub fn cached(&self) -> Arc<[ProcessInfo]> {
        Arc::clone(&self.cached)
    }

    pub fn skipped_last_refresh(&self) -> usize {
        self.skipped_last_refresh
    }
}

impl Default for ProcessCache {
    fn default() -> Self {
        Self::new(DEFAULT_UPDATE_INTERVAL, DEFAULT_TOP_N)
    }
}
