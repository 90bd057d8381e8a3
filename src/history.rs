//! Bounded per-dimension rolling windows of drifted values.

use std::collections::VecDeque;

/// Default window capacity per dimension.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// One FIFO window per dimension; the oldest value is evicted once a window is full.
#[derive(Clone, Debug)]
pub struct DimensionHistory {
    windows: Vec<VecDeque<f64>>,
    capacity: usize,
}

impl DimensionHistory {
    /// Creates `dimensions` empty windows of `capacity` values each.
    pub fn new(dimensions: usize, capacity: usize) -> Self {
        Self {
            windows: (0..dimensions)
                .map(|_| VecDeque::with_capacity(capacity))
                .collect(),
            capacity,
        }
    }

    /// Number of tracked dimensions.
    pub fn dimensions(&self) -> usize {
        self.windows.len()
    }

    /// Window capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Adds empty windows until at least `dimensions` are tracked.
    pub fn ensure_dimensions(&mut self, dimensions: usize) {
        while self.windows.len() < dimensions {
            self.windows.push(VecDeque::with_capacity(self.capacity));
        }
    }

    /// Appends `value` to window `dimension`, evicting the oldest entry when full.
    ///
    /// # Panics
    /// Panics if `dimension` is not tracked.
    #[inline]
    pub fn push(&mut self, dimension: usize, value: f64) {
        if self.capacity == 0 {
            return;
        }
        let window = &mut self.windows[dimension];
        if window.len() >= self.capacity {
            window.pop_front();
        }
        window.push_back(value);
    }

    /// The window for `dimension`, oldest first. Empty if untracked.
    pub fn window(&self, dimension: usize) -> &VecDeque<f64> {
        static EMPTY: VecDeque<f64> = VecDeque::new();
        self.windows.get(dimension).unwrap_or(&EMPTY)
    }

    /// Number of samples held for `dimension`.
    pub fn len(&self, dimension: usize) -> usize {
        self.window(dimension).len()
    }

    /// True when no window holds any sample.
    pub fn is_empty(&self) -> bool {
        self.windows.iter().all(VecDeque::is_empty)
    }

    /// The most recent `n` samples of `dimension` (fewer if the window is shorter).
    pub fn last(&self, dimension: usize, n: usize) -> impl Iterator<Item = f64> + '_ {
        let window = self.window(dimension);
        window.iter().skip(window.len().saturating_sub(n)).copied()
    }
}

// ============================================================================
// Tests
// ============================================================================
