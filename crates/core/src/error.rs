//! Error types for the pricecast system.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pricecast system.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data error (invalid or missing data).
    #[error("Data error: {0}")]
    Data(String),

    /// Warm-up window not satisfied for feature assembly.
    #[error("Insufficient history: need {required} observations, have {available}")]
    InsufficientHistory {
        /// Observations required before every indicator is defined.
        required: usize,
        /// Observations actually available.
        available: usize,
    },

    /// Requested target date is not strictly after the last observed date.
    #[error("Invalid target date: {target} is not after last observed date {last}")]
    InvalidTargetDate {
        /// The requested date.
        target: NaiveDate,
        /// The last date present in the series.
        last: NaiveDate,
    },

    /// Feature vector shape differs from the shape the predictor was trained on.
    #[error("Feature shape mismatch: predictor expects {expected}, got {actual}")]
    FeatureShapeMismatch {
        /// Shape the predictor was trained against.
        expected: String,
        /// Shape of the vector it was invoked with.
        actual: String,
    },

    /// Predictor collaborator failed to load.
    #[error("Predictor unavailable: {0}")]
    PredictorUnavailable(String),

    /// Model backend error during prediction.
    #[error("Model error: {0}")]
    Model(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }

    /// Create an insufficient history error.
    pub fn insufficient_history(required: usize, available: usize) -> Self {
        Error::InsufficientHistory {
            required,
            available,
        }
    }

    /// Create an invalid target date error.
    pub fn invalid_target_date(target: NaiveDate, last: NaiveDate) -> Self {
        Error::InvalidTargetDate { target, last }
    }

    /// Create a feature shape mismatch error.
    pub fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Error::FeatureShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a predictor unavailable error.
    pub fn predictor_unavailable(msg: impl Into<String>) -> Self {
        Error::PredictorUnavailable(msg.into())
    }

    /// Create a model backend error.
    pub fn model(msg: impl Into<String>) -> Self {
        Error::Model(msg.into())
    }
}
