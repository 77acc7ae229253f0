//! Autoregressive forecasting engine for the pricecast system.
//!
//! This crate provides:
//! - Per-date feature assembly from price history
//! - The day-by-day autoregressive forecast loop
//! - Training-set construction aligned with serving-time assembly

pub mod assembler;
pub mod dataset;
pub mod forecaster;

pub use assembler::FeatureAssembler;
pub use dataset::training_pairs;
pub use forecaster::Forecaster;
