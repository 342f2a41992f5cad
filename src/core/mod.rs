//! Core data structures for cost series and forecasts.

mod forecast;
mod series;

pub use forecast::{ForecastMethod, ForecastResult, PredictionPoint};
pub use series::{CostObservation, Period, Series};
