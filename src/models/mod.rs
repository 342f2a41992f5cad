//! Forecasting strategies and the engine that dispatches between them.

mod engine;
mod exponential;
mod growth;
mod linear;
mod seasonal;
mod traits;

pub use engine::{ForecastConfig, ForecastEngine};
pub use exponential::{smooth, ExponentialSmoothing};
pub use growth::CompoundGrowth;
pub use linear::{linear_fit, LinearFit, LinearRegression};
pub use seasonal::{phase_averages, SeasonalAverage};
pub use traits::{BoxedForecaster, Forecaster, Projection};
