/// Optional counters for monitoring queue behavior.
///
/// Only updated when `Config::enable_metrics` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub pushes: u64,
    pub pops: u64,
    /// Number of buffer reallocations
    pub grows: u64,
    /// Total elements moved into a new buffer across all grows
    pub relocated: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_push(&mut self) {
        self.pushes += 1;
    }

    #[inline]
    pub(crate) fn record_pop(&mut self) {
        self.pops += 1;
    }

    pub(crate) fn record_grow(&mut self, relocated: usize) {
        self.grows += 1;
        self.relocated += relocated as u64;
    }
}
