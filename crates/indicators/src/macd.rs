//! MACD histogram over running EMAs.

use crate::ema::Ema;

/// Incremental MACD histogram: fast EMA minus slow EMA, less a signal EMA
/// of that difference.
///
/// All three EMAs seed with their first input, so the histogram is defined
/// from the first observation (and is exactly zero there, the signal line
/// having just seeded on the MACD line).
pub struct MacdHistogram {
    /// Fast EMA of closes.
    fast: Ema,
    /// Slow EMA of closes.
    slow: Ema,
    /// Signal EMA of the MACD line.
    signal: Ema,
    /// Most recent histogram value.
    histogram: Option<f64>,
}

impl MacdHistogram {
    /// Create a MACD histogram accumulator from the three spans.
    pub fn new(fast_span: usize, slow_span: usize, signal_span: usize) -> Self {
        Self {
            fast: Ema::from_span(fast_span),
            slow: Ema::from_span(slow_span),
            signal: Ema::from_span(signal_span),
            histogram: None,
        }
    }

    /// Add a close observation and return the updated histogram value.
    pub fn update(&mut self, close: f64) -> f64 {
        let line = self.fast.update(close) - self.slow.update(close);
        let signal = self.signal.update(line);
        let histogram = line - signal;
        self.histogram = Some(histogram);
        histogram
    }

    /// Current histogram value, or `None` before the first observation.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.histogram
    }

    /// Clear all data.
    pub fn clear(&mut self) {
        self.fast.clear();
        self.slow.clear();
        self.signal.clear();
        self.histogram = None;
    }
}
