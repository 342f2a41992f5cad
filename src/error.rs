//! Error types for the cost-insights library.

use thiserror::Error;

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, InsightError>;

/// Errors that can occur during forecasting and comparison.
///
/// Only structural input problems are reported here. Numerically degenerate
/// input (a single point, zero variance) produces neutral results instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsightError {
    /// Forecast method name is not one of the known strategies.
    #[error("unsupported forecast method: {0}")]
    UnsupportedMethod(String),

    /// Comparison axis name is not teams, services or regions.
    #[error("unsupported comparison axis: {0}")]
    UnsupportedComparisonAxis(String),

    /// The series handed to the forecast engine is empty.
    #[error("no historical data available for forecasting")]
    NoHistoricalData,

    /// An observation carries an invalid amount.
    #[error("invalid observation: {0}")]
    InvalidObservation(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The series provider failed to supply data.
    #[error("series provider error: {0}")]
    Provider(String),
}
