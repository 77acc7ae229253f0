//! Runtime configuration for the forecasting pipeline.
//!
//! A [`Config`] is constructed explicitly (defaults or a JSON file) and handed
//! to each component; a failed load surfaces as an error, never as a silent
//! fallback to defaults.

use crate::error::{Error, Result};
use crate::types::FeatureSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the forecasting system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Forecast-loop configuration.
    pub forecast: ForecastConfig,
    /// Indicator window configuration.
    pub indicators: IndicatorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            forecast: ForecastConfig::default(),
            indicators: IndicatorConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&raw)
            .map_err(|e| Error::config(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Forecast-loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Feature shape this deployment produces and its predictor consumes.
    pub schema: FeatureSchema,
    /// How RSI and MACD behave once the loop runs on its own output.
    pub momentum_policy: MomentumPolicy,
    /// Trailing historical points attached to each forecast result.
    pub history_window: usize,
    /// Decimal places applied to calendar-schema predictions.
    pub price_decimals: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            schema: FeatureSchema::Indicator,
            momentum_policy: MomentumPolicy::default(),
            history_window: 30,
            price_decimals: 2,
        }
    }
}

/// Indicator window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Fast simple-moving-average window.
    pub sma_fast: usize,
    /// Slow simple-moving-average window.
    pub sma_slow: usize,
    /// Fast exponential-moving-average span.
    pub ema_fast: usize,
    /// Slow exponential-moving-average span.
    pub ema_slow: usize,
    /// Relative-strength-index lookback.
    pub rsi_period: usize,
    /// MACD signal-line span.
    pub macd_signal: usize,
    /// Number of lagged closes carried as features.
    pub lag_depth: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_fast: 20,
            sma_slow: 50,
            ema_fast: 12,
            ema_slow: 26,
            rsi_period: 14,
            macd_signal: 9,
            lag_depth: 3,
        }
    }
}

impl IndicatorConfig {
    /// Observations required before every indicator in the set is defined.
    ///
    /// RSI needs one close beyond its period for the first difference and
    /// the deepest lag one beyond its depth; the slow SMA dominates under
    /// the default windows.
    pub fn warmup(&self) -> usize {
        self.sma_fast
            .max(self.sma_slow)
            .max(self.rsi_period + 1)
            .max(self.lag_depth + 1)
    }
}

/// Behavior of the momentum indicators (RSI, MACD histogram) once the
/// forecast loop extends past observed history.
///
/// Only the RSI and MACD fields of a snapshot are affected; every other
/// feature always recomputes over the extended series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumPolicy {
    /// Recompute RSI and MACD over the extended series each step.
    Recompute,
    /// Hold the last values computed from observed history.
    HoldLast,
    /// Substitute neutral values: RSI 50, MACD histogram 0.
    Neutral,
}

impl Default for MomentumPolicy {
    fn default() -> Self {
        MomentumPolicy::Recompute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.forecast.schema, FeatureSchema::Indicator);
        assert_eq!(config.forecast.momentum_policy, MomentumPolicy::Recompute);
        assert_eq!(config.forecast.history_window, 30);
        assert_eq!(config.indicators.sma_slow, 50);
        assert_eq!(config.indicators.rsi_period, 14);
    }

    #[test]
    fn test_warmup_dominated_by_slow_sma() {
        assert_eq!(IndicatorConfig::default().warmup(), 50);
    }

    #[test]
    fn test_warmup_dominated_by_rsi() {
        let config = IndicatorConfig {
            sma_fast: 5,
            sma_slow: 10,
            rsi_period: 14,
            ..IndicatorConfig::default()
        };
        assert_eq!(config.warmup(), 15);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.forecast.schema, config.forecast.schema);
        assert_eq!(back.indicators.sma_fast, config.indicators.sma_fast);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"forecast": {"schema": "calendar"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.forecast.schema, FeatureSchema::Calendar);
        assert_eq!(config.forecast.history_window, 30);
        assert_eq!(config.indicators.sma_slow, 50);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        assert!(Config::from_json_file("/nonexistent/config.json").is_err());
    }
}
