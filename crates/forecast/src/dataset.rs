//! Training-set construction.
//!
//! Builds supervised (features, close) pairs from a historical series, with
//! rows aligned exactly as the forecast loop assembles them at serving time.

use crate::assembler::FeatureAssembler;
use pricecast_core::{Config, Error, FeatureSchema, PriceSeries, Result};
use pricecast_indicators::IndicatorFrame;

/// Build the training set for a series under a deployment configuration.
///
/// Indicator shape: each complete indicator row predicts the close of the
/// following day, the same one-step-ahead alignment the forecast loop uses.
/// Calendar shape: each date's calendar features map to that date's own
/// close, with no warm-up requirement.
pub fn training_pairs(series: &PriceSeries, config: &Config) -> Result<(Vec<Vec<f64>>, Vec<f64>)> {
    match config.forecast.schema {
        FeatureSchema::Calendar => calendar_pairs(series),
        FeatureSchema::Indicator => indicator_pairs(series, config),
    }
}

fn calendar_pairs(series: &PriceSeries) -> Result<(Vec<Vec<f64>>, Vec<f64>)> {
    if series.is_empty() {
        return Err(Error::insufficient_history(1, 0));
    }
    let mut rows = Vec::with_capacity(series.len());
    let mut targets = Vec::with_capacity(series.len());
    for point in series.points() {
        rows.push(FeatureAssembler::calendar_vector(point.date).values);
        targets.push(point.close);
    }
    Ok((rows, targets))
}

fn indicator_pairs(series: &PriceSeries, config: &Config) -> Result<(Vec<Vec<f64>>, Vec<f64>)> {
    let frame = IndicatorFrame::compute(series, &config.indicators);
    // One pair needs a complete row plus the day after it.
    if frame.len() < 2 {
        return Err(Error::insufficient_history(
            config.indicators.warmup() + 1,
            series.len(),
        ));
    }
    let mut rows = Vec::with_capacity(frame.len() - 1);
    let mut targets = Vec::with_capacity(frame.len() - 1);
    for pair in frame.rows().windows(2) {
        rows.push(FeatureAssembler::indicator_vector(&pair[0].snapshot).values);
        targets.push(pair[1].close);
    }
    Ok((rows, targets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecaster::Forecaster;
    use chrono::NaiveDate;
    use pricecast_core::PricePoint;
    use pricecast_model::ForestPredictor;

    fn make_series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + chrono::Days::new(i as u64), c))
            .collect();
        PriceSeries::from_points(points).unwrap()
    }

    fn wavy_closes(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn test_indicator_pairs_alignment() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let series = make_series(&closes);

        let (rows, targets) = training_pairs(&series, &Config::default()).unwrap();

        // 11 complete rows after warm-up, so 10 one-step-ahead pairs.
        assert_eq!(rows.len(), 10);
        assert_eq!(targets.len(), 10);
        assert_eq!(rows[0].len(), 11);

        // The first row is day 49's features; its target is day 50's close.
        assert!((rows[0][7] - closes[49]).abs() < 1e-12); // Lag_1
        assert!((targets[0] - closes[50]).abs() < 1e-12);
        assert!((targets[9] - closes[59]).abs() < 1e-12);
    }

    #[test]
    fn test_indicator_pairs_need_two_complete_rows() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let series = make_series(&closes);

        let err = training_pairs(&series, &Config::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientHistory {
                required: 51,
                available: 50
            }
        ));
    }

    #[test]
    fn test_calendar_pairs_same_day() {
        let closes = [100.0, 101.0, 99.5, 102.0, 103.0];
        let series = make_series(&closes);
        let mut config = Config::default();
        config.forecast.schema = FeatureSchema::Calendar;

        let (rows, targets) = training_pairs(&series, &config).unwrap();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2], vec![3.0, 6.0, 2023.0]);
        assert_eq!(targets, closes.to_vec());
    }

    #[test]
    fn test_calendar_pairs_empty_series() {
        let mut config = Config::default();
        config.forecast.schema = FeatureSchema::Calendar;

        let err = training_pairs(&PriceSeries::new(), &config).unwrap_err();
        assert!(matches!(err, Error::InsufficientHistory { .. }));
    }

    #[test]
    fn test_forest_end_to_end() {
        // Train a forest on the first stretch of a series, then forecast
        // past its end. Forest output averages training targets, so every
        // prediction stays inside the observed close range.
        let closes = wavy_closes(120);
        let series = make_series(&closes);
        let config = Config::default();

        let (rows, targets) = training_pairs(&series, &config).unwrap();
        assert_eq!(rows.len(), 70);

        let forest = ForestPredictor::fit(FeatureSchema::Indicator, &rows, &targets).unwrap();
        let forecaster = Forecaster::new(config, forest).unwrap();

        let result = forecaster.forecast_steps(&series, 5).unwrap();
        assert_eq!(result.step_count(), 5);

        let lo = closes.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = closes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for step in &result.steps {
            assert!(step.close.is_finite());
            assert!(step.close >= lo - 1e-9 && step.close <= hi + 1e-9);
        }
    }
}
