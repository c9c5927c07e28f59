/// Outcome of one fan-out invocation. Dispatch never returns an error, so
/// partial failure is only visible through these counts and the log stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}
