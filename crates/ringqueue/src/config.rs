/// Smallest backing buffer a queue will ever allocate.
pub const MIN_CAPACITY: usize = 4;

/// Smallest growth multiplier; anything lower would not grow the buffer.
pub const MIN_GROWTH_FACTOR: usize = 2;

/// Configuration for `RingQueue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of slots allocated at construction (clamped to `MIN_CAPACITY`)
    pub initial_capacity: usize,
    /// Capacity multiplier applied when a push finds the buffer full (default: 2)
    pub growth_factor: usize,
    /// Enable metrics collection (slight overhead)
    pub enable_metrics: bool,
}

impl Config {
    /// Creates a new configuration with custom settings.
    pub const fn new(initial_capacity: usize, growth_factor: usize, enable_metrics: bool) -> Self {
        Self {
            initial_capacity,
            growth_factor,
            enable_metrics,
        }
    }

    /// Returns a copy with out-of-range values raised to their minimums.
    pub const fn normalized(self) -> Self {
        let initial_capacity = if self.initial_capacity < MIN_CAPACITY {
            MIN_CAPACITY
        } else {
            self.initial_capacity
        };
        let growth_factor = if self.growth_factor < MIN_GROWTH_FACTOR {
            MIN_GROWTH_FACTOR
        } else {
            self.growth_factor
        };
        Self::new(initial_capacity, growth_factor, self.enable_metrics)
    }

    /// Returns the baseline capacity a queue built from this config starts with.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.normalized().initial_capacity
    }

    /// Returns the capacity a queue reaches after pushing `n` elements from empty
    /// without intervening pops.
    ///
    /// This is the smallest `capacity * growth_factor^k` that holds `n` elements,
    /// or `None` if that value overflows `usize`.
    pub fn capacity_for(&self, n: usize) -> Option<usize> {
        let config = self.normalized();
        let mut capacity = config.initial_capacity;
        while capacity < n {
            capacity = capacity.checked_mul(config.growth_factor)?;
        }
        Some(capacity)
    }

    /// Sets the baseline capacity.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the growth factor.
    pub fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor;
        self
    }

    /// Enables or disables metrics collection.
    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

/// Default configuration (4 slots, doubling growth)
pub const DEFAULT_CONFIG: Config = Config::new(MIN_CAPACITY, 2, false);

/// Default configuration with metrics collection enabled
pub const INSTRUMENTED_CONFIG: Config = Config::new(MIN_CAPACITY, 2, true);

/// High throughput configuration (1K slots up front, skips the early grows)
pub const HIGH_THROUGHPUT_CONFIG: Config = Config::new(1024, 2, false);
