//! Core data types for the pricecast system.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single (date, closing-price) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date (daily resolution).
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Create a new price point.
    #[inline]
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Technical indicators computed over a series tail, aligned for predicting
/// the day after it.
///
/// The lag fields are named relative to the predicted day: `lag_1` is the
/// newest close in the tail, one day before the day the snapshot feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Fast simple moving average (20-day default).
    pub sma_20: f64,
    /// Slow simple moving average (50-day default).
    pub sma_50: f64,
    /// Fast SMA minus slow SMA.
    pub sma_diff: f64,
    /// Fast exponential moving average (12-day default).
    pub ema_12: f64,
    /// Slow exponential moving average (26-day default).
    pub ema_26: f64,
    /// Relative Strength Index (period 14 default).
    pub rsi: f64,
    /// MACD histogram (12/26/9 default).
    pub macd: f64,
    /// Most recent day-over-day fractional return.
    pub ret: f64,
    /// Newest close in the tail.
    pub lag_1: f64,
    /// Second newest close.
    pub lag_2: f64,
    /// Third newest close.
    pub lag_3: f64,
}

/// Calendar feature names in training order.
pub const CALENDAR_FEATURES: &[&str] = &["Day", "Month", "Year"];

/// Indicator feature names in training order.
///
/// The order MUST match the column order the deployed model was fitted with;
/// reordering silently invalidates every prediction.
pub const INDICATOR_FEATURES: &[&str] = &[
    "SMA_20", "SMA_50", "RSI", "MACD", "EMA_12", "EMA_26", "Return", "Lag_1", "Lag_2", "Lag_3",
    "SMA_diff",
];

/// Feature layouts a predictor can be trained against.
///
/// Fixed once per deployment and embedded in the model manifest; the two
/// layouts are never mixed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSchema {
    /// Calendar features of the predicted date: day, month, year.
    Calendar,
    /// Eleven technical-indicator features derived from price history.
    Indicator,
}

impl FeatureSchema {
    /// Feature names in training order.
    pub fn feature_names(self) -> &'static [&'static str] {
        match self {
            FeatureSchema::Calendar => CALENDAR_FEATURES,
            FeatureSchema::Indicator => INDICATOR_FEATURES,
        }
    }

    /// Number of features in this layout.
    #[inline]
    pub fn arity(self) -> usize {
        self.feature_names().len()
    }

    /// Human-readable shape label, e.g. `Indicator(11)`.
    pub fn shape_label(self) -> String {
        format!("{:?}({})", self, self.arity())
    }
}

/// An ordered tuple of named scalar features matching a trained model layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Layout this vector was assembled for.
    pub schema: FeatureSchema,
    /// Values in the layout's training order.
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Create a vector; the caller guarantees values are in training order.
    pub fn new(schema: FeatureSchema, values: Vec<f64>) -> Self {
        Self { schema, values }
    }

    /// Look up a feature value by its training name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.schema
            .feature_names()
            .iter()
            .position(|n| *n == name)
            .and_then(|i| self.values.get(i).copied())
    }

    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector has no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Human-readable shape label, e.g. `Calendar(3)`.
    pub fn shape_label(&self) -> String {
        format!("{:?}({})", self.schema, self.values.len())
    }
}

/// Supported symbolic forecast horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizon {
    /// One day ahead.
    OneDay = 1,
    /// Seven days ahead.
    OneWeek = 7,
    /// Thirty days ahead.
    OneMonth = 30,
    /// Ninety days ahead.
    OneQuarter = 90,
}

impl Horizon {
    /// All supported horizons.
    pub fn all() -> [Horizon; 4] {
        [
            Horizon::OneDay,
            Horizon::OneWeek,
            Horizon::OneMonth,
            Horizon::OneQuarter,
        ]
    }

    /// Number of calendar days this horizon spans.
    #[inline]
    pub fn as_days(self) -> u32 {
        self as u32
    }

    /// Parse a horizon label such as "7d".
    pub fn from_label(label: &str) -> Option<Horizon> {
        match label {
            "1d" => Some(Horizon::OneDay),
            "7d" => Some(Horizon::OneWeek),
            "30d" => Some(Horizon::OneMonth),
            "90d" => Some(Horizon::OneQuarter),
            _ => None,
        }
    }

    /// Label for this horizon, e.g. "7d".
    pub fn label(self) -> &'static str {
        match self {
            Horizon::OneDay => "1d",
            Horizon::OneWeek => "7d",
            Horizon::OneMonth => "30d",
            Horizon::OneQuarter => "90d",
        }
    }
}

/// A forecast request: an explicit target date or a symbolic horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastRequest {
    /// Extend the series up to this date.
    TargetDate(NaiveDate),
    /// Extend the series by a fixed number of days.
    Horizon(Horizon),
}

impl ForecastRequest {
    /// Parse user input: an ISO `YYYY-MM-DD` date or a horizon label.
    pub fn parse(input: &str) -> Result<ForecastRequest> {
        let trimmed = input.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(ForecastRequest::TargetDate(date));
        }
        Horizon::from_label(trimmed)
            .map(ForecastRequest::Horizon)
            .ok_or_else(|| Error::data(format!("unrecognized forecast request: {:?}", trimmed)))
    }
}

/// Output of a forecast run. Immutable after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    /// The requested (final) predicted point.
    pub target: PricePoint,
    /// Every intermediate prediction in step order, target included last.
    pub steps: Vec<PricePoint>,
    /// Trailing window of pre-forecast history for charting.
    pub history: Vec<PricePoint>,
}

impl ForecastResult {
    /// Number of predicted steps.
    #[inline]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_days() {
        assert_eq!(Horizon::OneDay.as_days(), 1);
        assert_eq!(Horizon::OneWeek.as_days(), 7);
        assert_eq!(Horizon::OneMonth.as_days(), 30);
        assert_eq!(Horizon::OneQuarter.as_days(), 90);
    }

    #[test]
    fn test_horizon_labels() {
        for horizon in Horizon::all() {
            assert_eq!(Horizon::from_label(horizon.label()), Some(horizon));
        }
        assert_eq!(Horizon::from_label("2w"), None);
    }

    #[test]
    fn test_request_parse_date() {
        let request = ForecastRequest::parse("2024-05-01").unwrap();
        assert_eq!(
            request,
            ForecastRequest::TargetDate(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        );
    }

    #[test]
    fn test_request_parse_horizon() {
        let request = ForecastRequest::parse(" 30d ").unwrap();
        assert_eq!(request, ForecastRequest::Horizon(Horizon::OneMonth));
    }

    #[test]
    fn test_request_parse_garbage() {
        assert!(ForecastRequest::parse("next tuesday").is_err());
        assert!(ForecastRequest::parse("2024-13-40").is_err());
    }

    #[test]
    fn test_schema_arity() {
        assert_eq!(FeatureSchema::Calendar.arity(), 3);
        assert_eq!(FeatureSchema::Indicator.arity(), 11);
    }

    #[test]
    fn test_indicator_feature_order() {
        // Column order is the training contract; lock it down.
        assert_eq!(INDICATOR_FEATURES[0], "SMA_20");
        assert_eq!(INDICATOR_FEATURES[6], "Return");
        assert_eq!(INDICATOR_FEATURES[10], "SMA_diff");
    }

    #[test]
    fn test_vector_get_by_name() {
        let vector = FeatureVector::new(FeatureSchema::Calendar, vec![15.0, 6.0, 2024.0]);
        assert_eq!(vector.get("Day"), Some(15.0));
        assert_eq!(vector.get("Month"), Some(6.0));
        assert_eq!(vector.get("Year"), Some(2024.0));
        assert_eq!(vector.get("SMA_20"), None);
    }

    #[test]
    fn test_shape_labels() {
        assert_eq!(FeatureSchema::Indicator.shape_label(), "Indicator(11)");
        let vector = FeatureVector::new(FeatureSchema::Calendar, vec![1.0]);
        assert_eq!(vector.shape_label(), "Calendar(1)");
    }
}
