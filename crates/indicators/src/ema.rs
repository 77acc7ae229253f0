//! Running exponential moving average.

/// Exponentially weighted moving average with recursive updates.
///
/// Seeded with the first observation, so a value is available from the very
/// first update: `ema[0] = x[0]`, then
/// `ema[t] = alpha * x[t] + (1 - alpha) * ema[t-1]`.
pub struct Ema {
    /// Smoothing factor in `(0, 1]`.
    alpha: f64,
    /// Current average, `None` before the first observation.
    value: Option<f64>,
}

impl Ema {
    /// Create an EMA from a span, with `alpha = 2 / (span + 1)`.
    pub fn from_span(span: usize) -> Self {
        Self {
            alpha: 2.0 / (span as f64 + 1.0),
            value: None,
        }
    }

    /// Fold in an observation and return the updated average.
    pub fn update(&mut self, x: f64) -> f64 {
        let next = match self.value {
            Some(prev) => self.alpha * x + (1.0 - self.alpha) * prev,
            None => x,
        };
        self.value = Some(next);
        next
    }

    /// Current average, or `None` before the first observation.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// The smoothing factor.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Clear all data.
    pub fn clear(&mut self) {
        self.value = None;
    }
}
