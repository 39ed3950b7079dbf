#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Sample immediately instead of waiting for the next tick.
    Refresh,
    None,
}
