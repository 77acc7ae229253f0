//! Append-only historical price series.
//!
//! The store a forecast run reads and extends: dates are unique and strictly
//! ascending, and the series never shrinks during a run.

use crate::error::{Error, Result};
use crate::types::PricePoint;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered, date-indexed closing-price series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a series from points, validating strict date order.
    pub fn from_points(points: Vec<PricePoint>) -> Result<Self> {
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(Error::data(format!(
                    "series dates must be strictly ascending: {} followed by {}",
                    pair[0].date, pair[1].date
                )));
            }
        }
        Ok(Self { points })
    }

    /// Append a point; its date must be strictly after the current last date.
    pub fn push(&mut self, point: PricePoint) -> Result<()> {
        if let Some(last) = self.points.last() {
            if point.date <= last.date {
                return Err(Error::data(format!(
                    "appended date {} is not after last date {}",
                    point.date, last.date
                )));
            }
        }
        self.points.push(point);
        Ok(())
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in date order.
    #[inline]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// The most recent observation.
    #[inline]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// The most recent observation date.
    #[inline]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Closing prices in date order.
    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.close)
    }

    /// The trailing `n` points (fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[PricePoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }
}
