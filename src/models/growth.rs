//! Compound growth extrapolation.

use crate::core::ForecastMethod;
use crate::error::{InsightError, Result};
use crate::models::traits::{validate_band, validate_confidence, Forecaster, Projection};
use crate::utils::stats::mean;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Grows the historical average at a fixed annual rate, compounded daily.
///
/// Step `i` is `average × (1 + annual_rate / days_per_year)^i`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompoundGrowth {
    /// Annual growth rate (0.05 = 5%).
    pub annual_rate: f64,
    /// Days used to convert the annual rate into a daily one.
    pub days_per_year: f64,
    /// Relative prediction band (0.10 = ±10%).
    pub band: f64,
    /// Reported confidence.
    pub confidence: f64,
}

impl CompoundGrowth {
    pub fn new(annual_rate: f64) -> Self {
        Self {
            annual_rate,
            ..Self::default()
        }
    }

    fn daily_factor(&self) -> f64 {
        1.0 + self.annual_rate / self.days_per_year
    }
}

impl Default for CompoundGrowth {
    fn default() -> Self {
        Self {
            annual_rate: 0.05,
            days_per_year: 365.0,
            band: 0.10,
            confidence: 0.75,
        }
    }
}

impl Forecaster for CompoundGrowth {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Growth
    }

    fn validate(&self) -> Result<()> {
        if !self.annual_rate.is_finite() || self.annual_rate <= -1.0 {
            return Err(InsightError::InvalidParameter(format!(
                "annual growth rate must be finite and above -100%, got {}",
                self.annual_rate
            )));
        }
        if !(self.days_per_year.is_finite() && self.days_per_year > 0.0) {
            return Err(InsightError::InvalidParameter(format!(
                "days_per_year must be positive, got {}",
                self.days_per_year
            )));
        }
        validate_band("growth", self.band)?;
        validate_confidence("growth", self.confidence)
    }

    fn project(&self, values: &[f64], horizon: usize) -> Projection {
        let average = mean(values);
        let factor = self.daily_factor();

        let estimates = (1..=horizon)
            .map(|i| average * factor.powf(i as f64))
            .collect();

        let mut metadata = BTreeMap::new();
        metadata.insert("annual_growth_rate".to_string(), self.annual_rate);
        metadata.insert("average_cost".to_string(), average);
        metadata.insert("data_points".to_string(), values.len() as f64);

        Projection {
            estimates,
            band: self.band,
            confidence: self.confidence,
            metadata,
        }
    }
}
