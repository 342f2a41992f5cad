//! # cost-insights
//!
//! Analytics over daily cloud cost series.
//!
//! Four engines share one data model ([`core::Series`] of
//! [`core::CostObservation`]s):
//!
//! - [`models::ForecastEngine`] projects future daily costs with linear,
//!   exponential, seasonal or growth methods.
//! - [`trend::TrendAnalyzer`] classifies the direction and volatility of a
//!   series and explains it.
//! - [`detection::AnomalyDetector`] flags statistically unusual days.
//! - [`comparison::EntityComparator`] ranks and benchmarks aggregated
//!   entities such as teams, services or regions.
//!
//! Fetching data is left to the host through [`provider::SeriesProvider`];
//! [`CostInsights`] binds a provider to the engines.

pub mod comparison;
pub mod core;
pub mod detection;
pub mod error;
pub mod insights;
pub mod models;
pub mod provider;
pub mod trend;
pub mod utils;

pub use error::{InsightError, Result};
pub use insights::CostInsights;

use crate::comparison::{ComparisonResult, EntityComparator, EntityRow};
use crate::core::{ForecastResult, Series};
use crate::detection::{Anomaly, AnomalyDetector};
use crate::models::ForecastEngine;
use crate::trend::{TrendAnalyzer, TrendResult};

/// Forecast `horizon` days after `series` with the default engine.
///
/// # Example
/// ```
/// use cost_insights::core::Series;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let series = Series::from_values(start, "api", &[100.0, 110.0, 120.0]).unwrap();
///
/// let result = cost_insights::forecast(&series, "linear", 3).unwrap();
/// assert_eq!(result.horizon(), 3);
/// assert!(cost_insights::forecast(&series, "prophet", 3).is_err());
/// ```
pub fn forecast(series: &Series, method: &str, horizon: usize) -> Result<ForecastResult> {
    ForecastEngine::new().forecast(series, method, horizon)
}

/// Analyse the trend of `series` with default thresholds.
pub fn analyze_trend(series: &Series) -> TrendResult {
    TrendAnalyzer::new().analyze_trend(series)
}

/// Flag observations more than `threshold` standard deviations from the mean.
pub fn detect_anomalies(series: &Series, threshold: f64) -> Vec<Anomaly> {
    AnomalyDetector::new().detect_anomalies(series, threshold)
}

/// Rank `rows` along the axis named by `axis`.
pub fn compare_entities(rows: &[EntityRow], axis: &str) -> Result<ComparisonResult> {
    EntityComparator::new().compare_entities(rows, axis)
}

pub mod prelude {
    pub use crate::comparison::{ComparisonAxis, ComparisonResult, EntityComparator, EntityRow};
    pub use crate::core::{CostObservation, ForecastMethod, ForecastResult, Period, Series};
    pub use crate::detection::{Anomaly, AnomalyDetector, AnomalyType, Severity};
    pub use crate::error::{InsightError, Result};
    pub use crate::insights::CostInsights;
    pub use crate::models::{ForecastEngine, Forecaster};
    pub use crate::provider::{GroupingKey, InMemorySeriesProvider, SeriesProvider};
    pub use crate::trend::{TrendAnalyzer, TrendClassification, TrendResult};
}
