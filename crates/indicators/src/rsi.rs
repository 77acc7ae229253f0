//! Relative strength index over rolling mean gains and losses.

use crate::rolling::RollingMean;

/// Map average gain and average loss to an RSI value.
///
/// A window with losses but no gains maps to 0, one with gains but no
/// losses maps to 100, and a completely flat window maps to the neutral 50.
pub(crate) fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            50.0
        } else {
            100.0
        }
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// Incremental RSI using simple rolling means of gains and losses.
///
/// Each close-to-close difference contributes its positive part to the gain
/// window and its negative part to the loss window; zeros occupy a slot in
/// both. A value is available once `period` differences have been observed.
pub struct Rsi {
    /// Rolling mean of positive close-to-close differences.
    gains: RollingMean,
    /// Rolling mean of negative close-to-close differences (as magnitudes).
    losses: RollingMean,
    /// Previous close, for the next difference.
    prev_close: Option<f64>,
}

impl Rsi {
    /// Create an RSI accumulator with the given lookback period.
    pub fn new(period: usize) -> Self {
        Self {
            gains: RollingMean::new(period),
            losses: RollingMean::new(period),
            prev_close: None,
        }
    }

    /// Add a close observation and return the current RSI if defined.
    pub fn update(&mut self, close: f64) -> Option<f64> {
        if let Some(prev) = self.prev_close {
            let delta = close - prev;
            self.gains.push(delta.max(0.0));
            self.losses.push((-delta).max(0.0));
        }
        self.prev_close = Some(close);
        self.value()
    }

    /// Current RSI, or `None` until `period` differences have been seen.
    pub fn value(&self) -> Option<f64> {
        let avg_gain = self.gains.mean()?;
        let avg_loss = self.losses.mean()?;
        Some(rsi_value(avg_gain, avg_loss))
    }

    /// Check if enough differences have been observed.
    pub fn is_ready(&self) -> bool {
        self.gains.is_ready()
    }

    /// Clear all data.
    pub fn clear(&mut self) {
        self.gains.clear();
        self.losses.clear();
        self.prev_close = None;
    }
}
