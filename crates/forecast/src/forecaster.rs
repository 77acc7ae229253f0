//! The autoregressive forecast loop.
//!
//! Extends a price series one calendar day at a time: each step assembles
//! features from everything known so far, observed history plus earlier
//! predictions, asks the predictor for the next close, and appends the
//! result so later steps see it as history. Every calendar day is stepped,
//! weekends included.

use crate::assembler::FeatureAssembler;
use chrono::NaiveDate;
use pricecast_core::{
    Config, Error, FeatureSchema, ForecastRequest, ForecastResult, IndicatorSnapshot,
    MomentumPolicy, PricePoint, PriceSeries, Result,
};
use pricecast_indicators::IndicatorEngine;
use pricecast_model::Predictor;
use tracing::info;

/// Drives a [`Predictor`] forward through time.
///
/// A forecast never mutates the caller's series: the loop works on an
/// isolated copy and hands every intermediate prediction back in the result.
#[derive(Debug)]
pub struct Forecaster<P: Predictor> {
    /// Deployment configuration.
    config: Config,
    /// The opaque prediction model.
    predictor: P,
}

impl<P: Predictor> Forecaster<P> {
    /// Create a forecaster, verifying the predictor against the configured
    /// feature shape.
    ///
    /// A predictor trained on one shape silently misreads vectors of the
    /// other, so the mismatch is rejected here instead of surfacing later
    /// as nonsense predictions.
    pub fn new(config: Config, predictor: P) -> Result<Self> {
        if predictor.schema() != config.forecast.schema {
            return Err(Error::shape_mismatch(
                config.forecast.schema.shape_label(),
                predictor.schema().shape_label(),
            ));
        }
        Ok(Self { config, predictor })
    }

    /// Run a forecast request against a series.
    pub fn forecast(
        &self,
        series: &PriceSeries,
        request: ForecastRequest,
    ) -> Result<ForecastResult> {
        match request {
            ForecastRequest::TargetDate(date) => self.forecast_to_date(series, date),
            ForecastRequest::Horizon(horizon) => {
                self.forecast_steps(series, horizon.as_days() as usize)
            }
        }
    }

    /// Extend the series day by day up to `target` (inclusive).
    pub fn forecast_to_date(
        &self,
        series: &PriceSeries,
        target: NaiveDate,
    ) -> Result<ForecastResult> {
        let last = series
            .last_date()
            .ok_or_else(|| Error::insufficient_history(self.min_observations(), 0))?;
        if target <= last {
            return Err(Error::invalid_target_date(target, last));
        }
        let steps = target.signed_duration_since(last).num_days() as usize;
        self.run(series, last, steps)
    }

    /// Extend the series by `steps` consecutive calendar days.
    pub fn forecast_steps(&self, series: &PriceSeries, steps: usize) -> Result<ForecastResult> {
        let last = series
            .last_date()
            .ok_or_else(|| Error::insufficient_history(self.min_observations(), 0))?;
        if steps == 0 {
            return Err(Error::invalid_target_date(last, last));
        }
        self.run(series, last, steps)
    }

    /// Observations a run needs before its first step.
    fn min_observations(&self) -> usize {
        match self.config.forecast.schema {
            // One point to anchor the next date.
            FeatureSchema::Calendar => 1,
            FeatureSchema::Indicator => self.config.indicators.warmup(),
        }
    }

    /// The autoregressive loop itself.
    fn run(&self, series: &PriceSeries, last: NaiveDate, steps: usize) -> Result<ForecastResult> {
        let mut working = series.clone();
        let mut engine = IndicatorEngine::new(&self.config.indicators);
        for close in series.closes() {
            engine.push_close(close);
        }

        // Indicator deployments need full warm-up before the first step;
        // failing here keeps a doomed run from producing partial output.
        let baseline = match self.config.forecast.schema {
            FeatureSchema::Indicator => Some(engine.snapshot().ok_or_else(|| {
                Error::insufficient_history(self.config.indicators.warmup(), series.len())
            })?),
            FeatureSchema::Calendar => None,
        };

        let mut predicted: Vec<PricePoint> = Vec::with_capacity(steps);
        let mut current = last;
        for _ in 0..steps {
            let next_date = current
                .succ_opt()
                .ok_or_else(|| Error::data(format!("calendar overflow after {current}")))?;

            let features = match self.config.forecast.schema {
                FeatureSchema::Calendar => FeatureAssembler::calendar_vector(next_date),
                FeatureSchema::Indicator => {
                    let mut snapshot = engine.snapshot().ok_or_else(|| {
                        Error::insufficient_history(self.config.indicators.warmup(), working.len())
                    })?;
                    self.apply_momentum_policy(&mut snapshot, baseline.as_ref());
                    FeatureAssembler::indicator_vector(&snapshot)
                }
            };

            let mut price = self.predictor.predict(&features)?;
            if self.config.forecast.schema == FeatureSchema::Calendar {
                price = round_to_decimals(price, self.config.forecast.price_decimals);
            }

            let point = PricePoint::new(next_date, price);
            working.push(point)?;
            engine.push_close(price);
            predicted.push(point);
            current = next_date;
        }

        let target = *predicted
            .last()
            .ok_or_else(|| Error::data("forecast produced no steps"))?;
        info!(
            "{} forecast: {} steps to {}, final close {:.4}",
            self.predictor.name(),
            predicted.len(),
            target.date,
            target.close
        );

        Ok(ForecastResult {
            target,
            steps: predicted,
            history: series.tail(self.config.forecast.history_window).to_vec(),
        })
    }

    /// Overwrite the momentum fields per the configured policy.
    ///
    /// Only RSI and the MACD histogram are eligible for freezing; every
    /// other feature always recomputes over the extended series.
    fn apply_momentum_policy(
        &self,
        snapshot: &mut IndicatorSnapshot,
        baseline: Option<&IndicatorSnapshot>,
    ) {
        match self.config.forecast.momentum_policy {
            MomentumPolicy::Recompute => {}
            MomentumPolicy::HoldLast => {
                if let Some(base) = baseline {
                    snapshot.rsi = base.rsi;
                    snapshot.macd = base.macd;
                }
            }
            MomentumPolicy::Neutral => {
                snapshot.rsi = 50.0;
                snapshot.macd = 0.0;
            }
        }
    }
}

/// Round to a fixed number of decimal places.
fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
