//! Technical indicator computation for the price forecasting system.
//!
//! This crate handles:
//! - Rolling means and lagged closes
//! - Exponential moving averages (first-value seeded)
//! - RSI over rolling mean gains and losses
//! - MACD histogram
//! - Whole-series columns and the complete-rows feature table
//! - An incremental engine equivalent to the whole-series columns

pub mod ema;
pub mod engine;
pub mod frame;
pub mod macd;
pub mod rolling;
pub mod rsi;

pub use ema::Ema;
pub use engine::IndicatorEngine;
pub use frame::{IndicatorFrame, IndicatorRow};
pub use macd::MacdHistogram;
pub use rolling::{LagWindow, RollingMean};
pub use rsi::Rsi;
