pub mod counters;
pub mod engine;
pub mod fake;
pub mod history;
pub mod platform;
pub mod process;
pub mod snapshot;
pub mod source;

pub use engine::{Monitor, MonitorSettings};
pub use snapshot::Snapshot;
pub use source::{CounterSource, SysinfoSource};
