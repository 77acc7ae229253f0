//! Whole-series indicator columns and the complete-rows feature table.
//!
//! The column functions mirror dataframe semantics: windowed indicators are
//! `None` across their warm-up region, EMAs are defined from the first
//! observation. [`IndicatorFrame`] joins the columns and keeps only rows
//! where every indicator is defined.

use crate::ema::Ema;
use crate::rolling::RollingMean;
use crate::rsi::rsi_value;
use chrono::NaiveDate;
use pricecast_core::{IndicatorConfig, IndicatorSnapshot, PriceSeries};

/// Simple moving average; `None` until `window` observations are available.
pub fn sma(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(closes.len());
    let mut mean = RollingMean::new(window);
    for &close in closes {
        mean.push(close);
        out.push(mean.mean());
    }
    out
}

/// Exponential moving average with `alpha = 2 / (span + 1)`, seeded with
/// the first close and defined from index 0.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut state = Ema::from_span(span);
    for &value in values {
        out.push(state.update(value));
    }
    out
}

/// RSI over rolling mean gains and losses; `None` until `period`
/// close-to-close differences are available.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(closes.len());
    let mut gains = RollingMean::new(period);
    let mut losses = RollingMean::new(period);
    let mut prev: Option<f64> = None;
    for &close in closes {
        if let Some(p) = prev {
            let delta = close - p;
            gains.push(delta.max(0.0));
            losses.push((-delta).max(0.0));
        }
        out.push(match (gains.mean(), losses.mean()) {
            (Some(g), Some(l)) => Some(rsi_value(g, l)),
            _ => None,
        });
        prev = Some(close);
    }
    out
}

/// MACD histogram: fast EMA minus slow EMA, less a signal EMA of that
/// difference. Defined from index 0.
pub fn macd_histogram(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Vec<f64> {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);
    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&line, signal);
    line.iter()
        .zip(&signal_line)
        .map(|(l, s)| l - s)
        .collect()
}

/// One-step fractional returns; `None` at index 0.
pub fn returns(closes: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(closes.len());
    let mut prev: Option<f64> = None;
    for &close in closes {
        out.push(prev.map(|p| (close - p) / p));
        prev = Some(close);
    }
    out
}

/// One complete feature row: the observation, plus the indicator snapshot
/// computed from history up to and including its close.
#[derive(Debug, Clone)]
pub struct IndicatorRow {
    /// Observation date.
    pub date: NaiveDate,
    /// Closing price on that date.
    pub close: f64,
    /// Indicators as of that close.
    pub snapshot: IndicatorSnapshot,
}

/// Complete-rows indicator table for a series.
///
/// Rows where any indicator is still warming up are dropped, so the first
/// retained row sits at the warm-up boundary of the configuration.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    rows: Vec<IndicatorRow>,
}

impl IndicatorFrame {
    /// Compute the full indicator set over a series.
    pub fn compute(series: &PriceSeries, config: &IndicatorConfig) -> Self {
        let closes: Vec<f64> = series.closes().collect();
        let sma_fast = sma(&closes, config.sma_fast);
        let sma_slow = sma(&closes, config.sma_slow);
        let ema_fast = ema(&closes, config.ema_fast);
        let ema_slow = ema(&closes, config.ema_slow);
        let rsi_col = rsi(&closes, config.rsi_period);
        let macd_col = macd_histogram(
            &closes,
            config.ema_fast,
            config.ema_slow,
            config.macd_signal,
        );
        let rets = returns(&closes);

        let mut rows = Vec::new();
        for (i, point) in series.points().iter().enumerate() {
            // Lags mirror shifted close columns, undefined over the first
            // lag_depth rows. lag_1 is the row's own close.
            if i < config.lag_depth.max(2) {
                continue;
            }
            let (sma_20, sma_50) = match (sma_fast[i], sma_slow[i]) {
                (Some(f), Some(s)) => (f, s),
                _ => continue,
            };
            let rsi = match rsi_col[i] {
                Some(v) => v,
                None => continue,
            };
            let ret = match rets[i] {
                Some(v) => v,
                None => continue,
            };
            rows.push(IndicatorRow {
                date: point.date,
                close: point.close,
                snapshot: IndicatorSnapshot {
                    sma_20,
                    sma_50,
                    sma_diff: sma_20 - sma_50,
                    ema_12: ema_fast[i],
                    ema_26: ema_slow[i],
                    rsi,
                    macd: macd_col[i],
                    ret,
                    lag_1: closes[i],
                    lag_2: closes[i - 1],
                    lag_3: closes[i - 2],
                },
            });
        }
        Self { rows }
    }

    /// All complete rows in date order.
    #[inline]
    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    /// Number of complete rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no row survived warm-up.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
