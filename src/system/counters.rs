use std::time::Instant;

use crate::format::format_rate;

/// The monotonic byte counters the sampler turns into rates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Counter {
    DiskRead,
    DiskWrite,
    NetSent,
    NetReceived,
}

impl Counter {
    pub const ALL: [Counter; 4] = [
        Counter::DiskRead,
        Counter::DiskWrite,
        Counter::NetSent,
        Counter::NetReceived,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Counter::DiskRead => "Disk Read",
            Counter::DiskWrite => "Disk Write",
            Counter::NetSent => "Network Sent",
            Counter::NetReceived => "Network Received",
        }
    }
}

/// Cumulative byte counts since boot. `None` means the platform could not
/// report the counter, which the sampler treats as "no movement".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CounterReading {
    pub disk_read: Option<u64>,
    pub disk_written: Option<u64>,
    pub net_sent: Option<u64>,
    pub net_received: Option<u64>,
}

impl CounterReading {
    pub fn get(&self, counter: Counter) -> Option<u64> {
        match counter {
            Counter::DiskRead => self.disk_read,
            Counter::DiskWrite => self.disk_written,
            Counter::NetSent => self.net_sent,
            Counter::NetReceived => self.net_received,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateSample {
    pub counter: Counter,
    pub bytes_per_sec: f64,
}

impl RateSample {
    pub fn zero(counter: Counter) -> Self {
        Self {
            counter,
            bytes_per_sec: 0.0,
        }
    }

    /// Scaled to the unit the trend graphs use.
    pub fn kib_per_sec(&self) -> f64 {
        self.bytes_per_sec / 1024.0
    }

    pub fn display(&self) -> String {
        format_rate(self.bytes_per_sec)
    }
}

/// Bytes moved between two readings. A counter that went backwards was reset
/// (device re-plugged, interface restarted, overflow) and contributes nothing.
pub fn clamped_delta(previous: Option<u64>, current: Option<u64>) -> u64 {
    match (previous, current) {
        (Some(previous), Some(current)) => current.saturating_sub(previous),
        _ => 0,
    }
}

/// Owns the single "previous" reading and turns each new reading into
/// per-second rates.
#[derive(Debug)]
pub struct RateSampler {
    previous: CounterReading,
    previous_at: Instant,
}

impl RateSampler {
    pub fn new(initial: CounterReading, taken_at: Instant) -> Self {
        Self {
            previous: initial,
            previous_at: taken_at,
        }
    }

    pub fn previous(&self) -> &CounterReading {
        &self.previous
    }

    /// Rates are divided by the real time since the last call, not by the
    /// nominal tick, so a late tick does not inflate them.
    pub fn sample(&mut self, now: Instant, current: CounterReading) -> [RateSample; 4] {
        let elapsed = now.saturating_duration_since(self.previous_at).as_secs_f64();

        let rates = Counter::ALL.map(|counter| {
            let delta = clamped_delta(self.previous.get(counter), current.get(counter));
            if elapsed > 0.0 {
                RateSample {
                    counter,
                    bytes_per_sec: delta as f64 / elapsed,
                }
            } else {
                RateSample::zero(counter)
            }
        });

        self.previous = current;
        self.previous_at = now;
        rates
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use proptest::prelude::*;

    use super::*;

    fn disk_read(value: u64) -> CounterReading {
        CounterReading {
            disk_read: Some(value),
            ..CounterReading::default()
        }
    }

    #[test]
    fn rate_is_delta_over_elapsed_seconds() {
        let start = Instant::now();
        let mut sampler = RateSampler::new(disk_read(0), start);

        let rates = sampler.sample(start + Duration::from_secs(1), disk_read(10_240));

        assert_eq!(rates[0].counter, Counter::DiskRead);
        assert_eq!(rates[0].bytes_per_sec, 10_240.0);
        assert_eq!(rates[0].display(), "10.00 KB/s");
        assert_eq!(rates[0].kib_per_sec(), 10.0);
    }

    #[test]
    fn uses_actual_elapsed_time() {
        let start = Instant::now();
        let mut sampler = RateSampler::new(disk_read(0), start);

        let rates = sampler.sample(start + Duration::from_millis(500), disk_read(1_000));

        assert_eq!(rates[0].bytes_per_sec, 2_000.0);
    }

    #[test]
    fn counter_reset_clamps_to_zero() {
        let start = Instant::now();
        let mut sampler = RateSampler::new(disk_read(5_000), start);

        let rates = sampler.sample(start + Duration::from_secs(1), disk_read(100));

        assert_eq!(rates[0].bytes_per_sec, 0.0);
        assert_eq!(clamped_delta(Some(5_000), Some(100)), 0);
    }

    #[test]
    fn missing_counters_mean_no_movement() {
        assert_eq!(clamped_delta(None, Some(10)), 0);
        assert_eq!(clamped_delta(Some(10), None), 0);
        assert_eq!(clamped_delta(None, None), 0);
    }

    #[test]
    fn zero_elapsed_yields_zero_rate() {
        let start = Instant::now();
        let mut sampler = RateSampler::new(disk_read(0), start);

        let rates = sampler.sample(start, disk_read(4_096));

        assert_eq!(rates[0].bytes_per_sec, 0.0);
    }

    #[test]
    fn current_reading_becomes_previous() {
        let start = Instant::now();
        let mut sampler = RateSampler::new(disk_read(0), start);

        sampler.sample(start + Duration::from_secs(1), disk_read(300));
        assert_eq!(sampler.previous().disk_read, Some(300));

        let rates = sampler.sample(start + Duration::from_secs(2), disk_read(600));
        assert_eq!(rates[0].bytes_per_sec, 300.0);
    }

    proptest! {
        #[test]
        fn rates_are_never_negative(
            readings in proptest::collection::vec(
                (proptest::option::of(any::<u64>()), proptest::option::of(any::<u64>())),
                1..40,
            ),
            step_ms in 0u64..2_000,
        ) {
            let start = Instant::now();
            let mut sampler = RateSampler::new(CounterReading::default(), start);
            for (i, (read, sent)) in readings.into_iter().enumerate() {
                let now = start + Duration::from_millis(step_ms * (i as u64 + 1));
                let reading = CounterReading {
                    disk_read: read,
                    net_sent: sent,
                    ..CounterReading::default()
                };
                for rate in sampler.sample(now, reading) {
                    prop_assert!(rate.bytes_per_sec >= 0.0);
                    prop_assert!(rate.bytes_per_sec.is_finite());
                }
            }
        }
    }
}
