//! Unified indicator computation engine.
//!
//! Combines all incremental accumulators behind one close-by-close
//! interface. Feeding the engine a series one close at a time produces
//! exactly the snapshots of the whole-series column functions, without
//! recomputing any window from scratch.

use crate::ema::Ema;
use crate::macd::MacdHistogram;
use crate::rolling::{LagWindow, RollingMean};
use crate::rsi::Rsi;
use pricecast_core::{IndicatorConfig, IndicatorSnapshot};

/// Incremental indicator engine over a stream of daily closes.
pub struct IndicatorEngine {
    /// Fast simple moving average.
    sma_fast: RollingMean,
    /// Slow simple moving average.
    sma_slow: RollingMean,
    /// Fast exponential moving average.
    ema_fast: Ema,
    /// Slow exponential moving average.
    ema_slow: Ema,
    /// Relative strength index.
    rsi: Rsi,
    /// MACD histogram.
    macd: MacdHistogram,
    /// Recent closes, newest last.
    lags: LagWindow,
    /// Newest close.
    last_close: Option<f64>,
    /// Most recent one-step fractional return.
    last_return: Option<f64>,
    /// Closes observed so far.
    count: usize,
    /// Closes required before snapshots are available.
    required: usize,
}

impl IndicatorEngine {
    /// Create an engine from indicator configuration.
    pub fn new(config: &IndicatorConfig) -> Self {
        Self {
            sma_fast: RollingMean::new(config.sma_fast),
            sma_slow: RollingMean::new(config.sma_slow),
            ema_fast: Ema::from_span(config.ema_fast),
            ema_slow: Ema::from_span(config.ema_slow),
            rsi: Rsi::new(config.rsi_period),
            macd: MacdHistogram::new(config.ema_fast, config.ema_slow, config.macd_signal),
            lags: LagWindow::new(config.lag_depth.max(2)),
            last_close: None,
            last_return: None,
            count: 0,
            required: config.warmup(),
        }
    }

    /// Feed the next close into every accumulator.
    pub fn push_close(&mut self, close: f64) {
        self.sma_fast.push(close);
        self.sma_slow.push(close);
        self.ema_fast.update(close);
        self.ema_slow.update(close);
        self.rsi.update(close);
        self.macd.update(close);
        if let Some(prev) = self.last_close {
            self.last_return = Some((close - prev) / prev);
        }
        self.lags.push(close);
        self.last_close = Some(close);
        self.count += 1;
    }

    /// Snapshot aligned for predicting the day after the most recent close,
    /// once every accumulator has warmed up.
    pub fn snapshot(&self) -> Option<IndicatorSnapshot> {
        let sma_20 = self.sma_fast.mean()?;
        let sma_50 = self.sma_slow.mean()?;
        let ema_12 = self.ema_fast.value()?;
        let ema_26 = self.ema_slow.value()?;
        let rsi = self.rsi.value()?;
        let macd = self.macd.value()?;
        let ret = self.last_return?;
        // The whole lag window must be full, matching the batch table's
        // dropped leading rows.
        if !self.lags.is_ready() {
            return None;
        }
        let lag_1 = self.last_close?;
        let lag_2 = self.lags.lag(1)?;
        let lag_3 = self.lags.lag(2)?;
        Some(IndicatorSnapshot {
            sma_20,
            sma_50,
            sma_diff: sma_20 - sma_50,
            ema_12,
            ema_26,
            rsi,
            macd,
            ret,
            lag_1,
            lag_2,
            lag_3,
        })
    }

    /// Check if every accumulator has enough data.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Closes observed so far.
    #[inline]
    pub fn observed(&self) -> usize {
        self.count
    }

    /// Closes required before snapshots become available.
    #[inline]
    pub fn required(&self) -> usize {
        self.required
    }

    /// Clear all state.
    pub fn clear(&mut self) {
        self.sma_fast.clear();
        self.sma_slow.clear();
        self.ema_fast.clear();
        self.ema_slow.clear();
        self.rsi.clear();
        self.macd.clear();
        self.lags.clear();
        self.last_close = None;
        self.last_return = None;
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::IndicatorFrame;
    use chrono::NaiveDate;
    use pricecast_core::{PricePoint, PriceSeries};

    fn wavy_closes(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1)
            .collect()
    }

    fn make_series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + chrono::Days::new(i as u64), c))
            .collect();
        PriceSeries::from_points(points).unwrap()
    }

    #[test]
    fn test_not_ready_before_warmup() {
        let config = IndicatorConfig::default();
        let mut engine = IndicatorEngine::new(&config);

        for close in wavy_closes(49) {
            engine.push_close(close);
        }
        assert!(!engine.is_ready());
        assert!(engine.snapshot().is_none());

        engine.push_close(105.0);
        assert!(engine.is_ready());
        assert!(engine.snapshot().is_some());
        assert_eq!(engine.observed(), 50);
        assert_eq!(engine.required(), 50);
    }

    #[test]
    fn test_engine_matches_whole_series_columns() {
        let config = IndicatorConfig::default();
        let closes = wavy_closes(80);
        let series = make_series(&closes);
        let frame = IndicatorFrame::compute(&series, &config);

        let mut engine = IndicatorEngine::new(&config);
        let mut snapshots = Vec::new();
        for &close in &closes {
            engine.push_close(close);
            if let Some(snap) = engine.snapshot() {
                snapshots.push(snap);
            }
        }

        assert_eq!(snapshots.len(), frame.len());
        for (incremental, row) in snapshots.iter().zip(frame.rows()) {
            let batch = &row.snapshot;
            assert!((incremental.sma_20 - batch.sma_20).abs() < 1e-9);
            assert!((incremental.sma_50 - batch.sma_50).abs() < 1e-9);
            assert!((incremental.sma_diff - batch.sma_diff).abs() < 1e-9);
            assert!((incremental.ema_12 - batch.ema_12).abs() < 1e-9);
            assert!((incremental.ema_26 - batch.ema_26).abs() < 1e-9);
            assert!((incremental.rsi - batch.rsi).abs() < 1e-9);
            assert!((incremental.macd - batch.macd).abs() < 1e-9);
            assert!((incremental.ret - batch.ret).abs() < 1e-12);
            assert!((incremental.lag_1 - batch.lag_1).abs() < 1e-12);
            assert!((incremental.lag_2 - batch.lag_2).abs() < 1e-12);
            assert!((incremental.lag_3 - batch.lag_3).abs() < 1e-12);
        }
    }

    #[test]
    fn test_snapshot_reflects_latest_close() {
        let config = IndicatorConfig::default();
        let mut engine = IndicatorEngine::new(&config);
        let closes = wavy_closes(60);
        for &close in &closes {
            engine.push_close(close);
        }

        let snap = engine.snapshot().unwrap();
        assert!((snap.lag_1 - closes[59]).abs() < 1e-12);
        assert!((snap.lag_2 - closes[58]).abs() < 1e-12);
        assert!((snap.lag_3 - closes[57]).abs() < 1e-12);

        let expected_ret = (closes[59] - closes[58]) / closes[58];
        assert!((snap.ret - expected_ret).abs() < 1e-12);
    }

    #[test]
    fn test_clear_resets() {
        let config = IndicatorConfig::default();
        let mut engine = IndicatorEngine::new(&config);
        for close in wavy_closes(60) {
            engine.push_close(close);
        }
        assert!(engine.is_ready());

        engine.clear();
        assert!(!engine.is_ready());
        assert!(engine.snapshot().is_none());
        assert_eq!(engine.observed(), 0);
    }
}
