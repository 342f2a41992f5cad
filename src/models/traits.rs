//! Forecaster trait defining the common interface for all strategies.

use crate::core::ForecastMethod;
use crate::error::{InsightError, Result};
use std::collections::BTreeMap;

/// Undated output of a forecasting strategy.
///
/// The engine turns a projection into dated [`PredictionPoint`]s.
///
/// [`PredictionPoint`]: crate::core::PredictionPoint
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Raw estimates for steps `1..=horizon`, before flooring at zero.
    pub estimates: Vec<f64>,
    /// Symmetric relative width of the prediction band.
    pub band: f64,
    /// Method-specific reliability score.
    pub confidence: f64,
    /// Parameters and fitted quantities worth reporting.
    pub metadata: BTreeMap<String, f64>,
}

/// Common interface for all forecasting strategies.
///
/// Strategies are stateless: every call to [`Forecaster::project`] works only
/// on the values it is given. The trait is object-safe and can be used with
/// `Box<dyn Forecaster>`.
pub trait Forecaster: Send + Sync {
    /// Method this strategy implements.
    fn method(&self) -> ForecastMethod;

    /// Check that the configured parameters are usable.
    fn validate(&self) -> Result<()>;

    /// Project `horizon` steps past the end of `values`.
    ///
    /// `values` is expected to be non-empty; empty input yields zero estimates.
    fn project(&self, values: &[f64], horizon: usize) -> Projection;

    /// Display name of the strategy.
    fn name(&self) -> &str {
        self.method().as_str()
    }
}

/// Type alias for boxed forecaster trait objects.
///
/// # Example
///
/// ```
/// use cost_insights::models::{BoxedForecaster, ExponentialSmoothing, Forecaster};
///
/// let model: BoxedForecaster = Box::new(ExponentialSmoothing::default());
/// assert_eq!(model.name(), "exponential");
/// ```
pub type BoxedForecaster = Box<dyn Forecaster>;

/// Shared validation for band and confidence parameters.
pub(crate) fn validate_band(name: &str, band: f64) -> Result<()> {
    if !band.is_finite() || !(0.0..1.0).contains(&band) {
        return Err(InsightError::InvalidParameter(format!(
            "{} band must be within [0, 1), got {}",
            name, band
        )));
    }
    Ok(())
}

pub(crate) fn validate_confidence(name: &str, confidence: f64) -> Result<()> {
    if !confidence.is_finite() {
        return Err(InsightError::InvalidParameter(format!(
            "{} confidence must be finite, got {}",
            name, confidence
        )));
    }
    Ok(())
}
