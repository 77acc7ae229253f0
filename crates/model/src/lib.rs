//! Prediction models for the price forecasting system.
//!
//! This crate handles:
//! - The opaque [`Predictor`] contract the forecast loop consumes
//! - A random forest implementation with JSON manifest persistence
//! - Manifest validation (schema tag and training-column names)

pub mod forest;
pub mod predictor;

pub use forest::{Forest, ForestPredictor, ModelManifest};
pub use predictor::Predictor;
