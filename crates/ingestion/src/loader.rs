//! CSV price-history loading.
//!
//! Reads `Date,Close` exports (extra columns are ignored), drops rows with a
//! missing or non-numeric close, and produces a strictly date-ordered
//! [`PriceSeries`].

use chrono::NaiveDate;
use pricecast_core::{Error, PricePoint, PriceSeries, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One raw CSV row; columns beyond these two are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Close")]
    close: Option<f64>,
}

/// Loader for daily closing-price CSV files.
pub struct SeriesLoader;

impl SeriesLoader {
    /// Load a series from a CSV file on disk.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::data(format!("failed to open {}: {}", path.display(), e)))?;
        let series = Self::from_reader(file)?;
        info!("loaded {} observations from {}", series.len(), path.display());
        Ok(series)
    }

    /// Load a series from any CSV reader.
    ///
    /// Rows without a usable close are dropped and counted; dates must be
    /// unique once parsed. Input order does not matter, the result is sorted.
    pub fn from_reader<R: Read>(reader: R) -> Result<PriceSeries> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut points = Vec::new();
        let mut dropped = 0usize;

        for record in csv_reader.deserialize::<RawRow>() {
            let row = record.map_err(|e| Error::data(format!("malformed CSV row: {}", e)))?;
            let close = match row.close {
                Some(c) if c.is_finite() => c,
                _ => {
                    dropped += 1;
                    continue;
                }
            };
            let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d").map_err(|e| {
                Error::data(format!("unparseable date {:?}: {}", row.date, e))
            })?;
            points.push(PricePoint::new(date, close));
        }

        if dropped > 0 {
            debug!("dropped {} rows without a usable close", dropped);
        }

        points.sort_by_key(|p| p.date);
        for pair in points.windows(2) {
            if pair[1].date == pair[0].date {
                return Err(Error::data(format!(
                    "duplicate date in input: {}",
                    pair[0].date
                )));
            }
        }

        PriceSeries::from_points(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_str(csv: &str) -> Result<PriceSeries> {
        SeriesLoader::from_reader(csv.as_bytes())
    }

    #[test]
    fn test_load_basic() {
        let csv = "Date,Close\n2024-01-01,100.0\n2024-01-02,101.5\n2024-01-03,99.25\n";
        let series = load_str(csv).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[0].close, 100.0);
        assert_eq!(
            series.last_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = "Date,Open,High,Low,Close,Volume\n2024-01-01,99.0,102.0,98.0,100.0,12345\n";
        let series = load_str(csv).unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series.points()[0].close, 100.0);
    }

    #[test]
    fn test_blank_close_dropped() {
        let csv = "Date,Close\n2024-01-01,100.0\n2024-01-02,\n2024-01-03,102.0\n";
        let series = load_str(csv).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].close, 102.0);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let csv = "Date,Close\n2024-01-03,103.0\n2024-01-01,101.0\n2024-01-02,102.0\n";
        let series = load_str(csv).unwrap();

        let closes: Vec<f64> = series.closes().collect();
        assert_eq!(closes, vec![101.0, 102.0, 103.0]);
    }

    #[test]
    fn test_duplicate_date_rejected() {
        let csv = "Date,Close\n2024-01-01,100.0\n2024-01-01,101.0\n";
        assert!(load_str(csv).is_err());
    }

    #[test]
    fn test_bad_date_rejected() {
        let csv = "Date,Close\n01/02/2024,100.0\n";
        assert!(load_str(csv).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(SeriesLoader::load_path("/nonexistent/prices.csv").is_err());
    }
}
