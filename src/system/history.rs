use std::collections::VecDeque;

use super::counters::Counter;

pub const DEFAULT_CAPACITY: usize = 50;

/// The six graphed series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Cpu,
    Memory,
    DiskRead,
    DiskWrite,
    NetSent,
    NetReceived,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Cpu,
        Metric::Memory,
        Metric::DiskRead,
        Metric::DiskWrite,
        Metric::NetSent,
        Metric::NetReceived,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Metric::Cpu => "CPU Usage %",
            Metric::Memory => "Memory Usage %",
            Metric::DiskRead => "Disk Read KB/s",
            Metric::DiskWrite => "Disk Write KB/s",
            Metric::NetSent => "Net Sent KB/s",
            Metric::NetReceived => "Net Recv KB/s",
        }
    }

    /// Percent series have a fixed 0..100 scale; rate series do not.
    pub fn is_percent(self) -> bool {
        matches!(self, Metric::Cpu | Metric::Memory)
    }

    pub fn index(self) -> usize {
        match self {
            Metric::Cpu => 0,
            Metric::Memory => 1,
            Metric::DiskRead => 2,
            Metric::DiskWrite => 3,
            Metric::NetSent => 4,
            Metric::NetReceived => 5,
        }
    }
}

impl From<Counter> for Metric {
    fn from(counter: Counter) -> Self {
        match counter {
            Counter::DiskRead => Metric::DiskRead,
            Counter::DiskWrite => Metric::DiskWrite,
            Counter::NetSent => Metric::NetSent,
            Counter::NetReceived => Metric::NetReceived,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer {
    values: VecDeque<f64>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = f64> + ExactSizeIterator + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }
}

/// One ring buffer per graphed metric, all sharing a capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStore {
    buffers: [HistoryBuffer; 6],
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: std::array::from_fn(|_| HistoryBuffer::new(capacity)),
        }
    }

    pub fn push(&mut self, metric: Metric, value: f64) {
        self.buffers[metric.index()].push(value);
    }

    pub fn snapshot(&self, metric: Metric) -> &HistoryBuffer {
        &self.buffers[metric.index()]
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
