//! Fixed-window rolling accumulators.
//!
//! A [`RollingMean`] reports no value until its window is full, matching
//! rolling-mean semantics where the warm-up region is undefined rather
//! than averaged over a short window.

use std::collections::VecDeque;

/// Rolling arithmetic mean over a fixed window.
pub struct RollingMean {
    /// Window size in observations.
    window: usize,
    /// Recent observations.
    values: VecDeque<f64>,
    /// Running sum of the window contents.
    sum: f64,
}

impl RollingMean {
    /// Create a new rolling mean with the given window.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            values: VecDeque::with_capacity(window),
            sum: 0.0,
        }
    }

    /// Add an observation, evicting the oldest once the window is full.
    pub fn push(&mut self, value: f64) {
        if self.values.len() >= self.window {
            if let Some(old) = self.values.pop_front() {
                self.sum -= old;
            }
        }
        self.values.push_back(value);
        self.sum += value;
    }

    /// Current mean, or `None` until the window is full.
    pub fn mean(&self) -> Option<f64> {
        if self.values.len() < self.window {
            return None;
        }
        Some(self.sum / self.window as f64)
    }

    /// Check if the window is full.
    pub fn is_ready(&self) -> bool {
        self.values.len() >= self.window
    }

    /// Get the number of observations currently held.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Clear all data.
    pub fn clear(&mut self) {
        self.values.clear();
        self.sum = 0.0;
    }
}

/// Retains the most recent closes so that lagged values can be read off.
///
/// After pushing the close for day `t`, `lag(k)` is the close for day
/// `t - k`. The window holds `depth + 1` closes: the current one plus
/// `depth` predecessors.
pub struct LagWindow {
    /// Number of lags retained.
    depth: usize,
    /// Current close followed backwards by its predecessors.
    values: VecDeque<f64>,
}

impl LagWindow {
    /// Create a lag window retaining `depth` predecessors.
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            values: VecDeque::with_capacity(depth + 1),
        }
    }

    /// Record the newest close.
    pub fn push(&mut self, value: f64) {
        if self.values.len() > self.depth {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// The close `k` observations before the newest, for `1 <= k <= depth`.
    pub fn lag(&self, k: usize) -> Option<f64> {
        if k == 0 || k > self.depth {
            return None;
        }
        let len = self.values.len();
        if k >= len {
            return None;
        }
        Some(self.values[len - 1 - k])
    }

    /// Check if all `depth` lags are populated.
    pub fn is_ready(&self) -> bool {
        self.values.len() > self.depth
    }

    /// Clear all data.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
