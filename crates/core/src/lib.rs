//! Core types and configuration for the price forecasting system.
//!
//! This crate provides shared types used across all other crates:
//! - Price series and observation types
//! - Feature schemas and feature vectors
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod series;
pub mod types;

pub use config::{Config, ForecastConfig, IndicatorConfig, MomentumPolicy};
pub use error::{Error, Result};
pub use series::PriceSeries;
pub use types::*;
