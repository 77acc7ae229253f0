//! Feature assembly from price history.
//!
//! Translates a series and a prediction date into the exact vector layout
//! the deployed predictor was trained on. Only observations strictly before
//! the predicted day ever contribute; the predicted day's own close is never
//! an input to its own features.

use chrono::{Datelike, NaiveDate};
use pricecast_core::{
    Config, Error, FeatureSchema, FeatureVector, IndicatorConfig, IndicatorSnapshot, PriceSeries,
    Result,
};
use pricecast_indicators::IndicatorEngine;

/// Builds model-ready feature vectors for a single prediction date.
pub struct FeatureAssembler {
    /// Feature shape this deployment produces.
    schema: FeatureSchema,
    /// Indicator windows used by the indicator shape.
    indicators: IndicatorConfig,
}

impl FeatureAssembler {
    /// Create an assembler from the deployment configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            schema: config.forecast.schema,
            indicators: config.indicators.clone(),
        }
    }

    /// The feature shape this assembler produces.
    #[inline]
    pub fn schema(&self) -> FeatureSchema {
        self.schema
    }

    /// Assemble the feature vector for predicting `date`.
    ///
    /// `date` does not need to extend the series: assembling for a date in
    /// the middle of history reads only the observations before it, which
    /// is what makes training rows and serving rows line up.
    pub fn assemble(&self, series: &PriceSeries, date: NaiveDate) -> Result<FeatureVector> {
        match self.schema {
            FeatureSchema::Calendar => Ok(Self::calendar_vector(date)),
            FeatureSchema::Indicator => {
                let snapshot = self.snapshot_before(series, date)?;
                Ok(Self::indicator_vector(&snapshot))
            }
        }
    }

    /// Indicator snapshot over every observation strictly before `date`.
    fn snapshot_before(&self, series: &PriceSeries, date: NaiveDate) -> Result<IndicatorSnapshot> {
        let mut engine = IndicatorEngine::new(&self.indicators);
        let mut available = 0usize;
        for point in series.points() {
            if point.date >= date {
                break;
            }
            engine.push_close(point.close);
            available += 1;
        }
        engine
            .snapshot()
            .ok_or_else(|| Error::insufficient_history(self.indicators.warmup(), available))
    }

    /// Calendar features of the predicted date itself.
    pub fn calendar_vector(date: NaiveDate) -> FeatureVector {
        FeatureVector::new(
            FeatureSchema::Calendar,
            vec![date.day() as f64, date.month() as f64, date.year() as f64],
        )
    }

    /// Indicator features in training column order.
    pub fn indicator_vector(snapshot: &IndicatorSnapshot) -> FeatureVector {
        FeatureVector::new(
            FeatureSchema::Indicator,
            vec![
                snapshot.sma_20,
                snapshot.sma_50,
                snapshot.rsi,
                snapshot.macd,
                snapshot.ema_12,
                snapshot.ema_26,
                snapshot.ret,
                snapshot.lag_1,
                snapshot.lag_2,
                snapshot.lag_3,
                snapshot.sma_diff,
            ],
        )
    }
}
