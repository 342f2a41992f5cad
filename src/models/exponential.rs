//! Exponential smoothing with linear drift.
//!
//! The level is smoothed as `s_t = α × y_t + (1-α) × s_{t-1}` starting from the
//! first observation; the average per-step change of the smoothed level over
//! the history is carried forward as a drift term.

use crate::core::ForecastMethod;
use crate::error::{InsightError, Result};
use crate::models::traits::{validate_band, validate_confidence, Forecaster, Projection};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Smoothed levels for `values` with smoothing factor `alpha`.
///
/// The first smoothed value equals the first observation.
pub fn smooth(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut smoothed = Vec::with_capacity(values.len());
    let mut level = match values.first() {
        Some(&first) => first,
        None => return smoothed,
    };
    smoothed.push(level);
    for &y in &values[1..] {
        level = alpha * y + (1.0 - alpha) * level;
        smoothed.push(level);
    }
    smoothed
}

/// Exponential smoothing forecaster.
///
/// # Example
/// ```
/// use cost_insights::models::{ExponentialSmoothing, Forecaster};
///
/// let model = ExponentialSmoothing::default();
/// let projection = model.project(&[10.0, 12.0, 11.0, 13.0], 3);
/// assert_eq!(projection.estimates.len(), 3);
/// assert_eq!(projection.confidence, 0.8);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExponentialSmoothing {
    /// Smoothing parameter (0 < alpha <= 1).
    pub alpha: f64,
    /// Relative prediction band (0.15 = ±15%).
    pub band: f64,
    /// Reported confidence.
    pub confidence: f64,
}

impl ExponentialSmoothing {
    /// Create a model with the given smoothing parameter and default band.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }
}

impl Default for ExponentialSmoothing {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            band: 0.15,
            confidence: 0.8,
        }
    }
}

impl Forecaster for ExponentialSmoothing {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Exponential
    }

    fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(InsightError::InvalidParameter(format!(
                "alpha must be in (0, 1], got {}",
                self.alpha
            )));
        }
        validate_band("exponential", self.band)?;
        validate_confidence("exponential", self.confidence)
    }

    fn project(&self, values: &[f64], horizon: usize) -> Projection {
        let smoothed = smooth(values, self.alpha);
        let (first, last) = match (smoothed.first(), smoothed.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => (0.0, 0.0),
        };
        let trend = if values.is_empty() {
            0.0
        } else {
            (last - first) / values.len() as f64
        };

        let estimates = (1..=horizon).map(|i| last + trend * i as f64).collect();

        let mut metadata = BTreeMap::new();
        metadata.insert("alpha".to_string(), self.alpha);
        metadata.insert("level".to_string(), last);
        metadata.insert("trend".to_string(), trend);
        metadata.insert("data_points".to_string(), values.len() as f64);

        Projection {
            estimates,
            band: self.band,
            confidence: self.confidence,
            metadata,
        }
    }
}
