//! Data ingestion for the price forecasting system.
//!
//! This crate handles:
//! - CSV price-history loading (`Date,Close` exports)
//! - Row filtering (missing or non-numeric closes)
//! - Date parsing, ordering, and duplicate detection

pub mod loader;

pub use loader::SeriesLoader;
