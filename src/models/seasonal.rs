//! Seasonal average forecasting.
//!
//! Costs are grouped by phase (`index mod season_length`) and each forecast
//! step nudges the overall average toward the phase average, plus a small
//! linear drift.

use crate::core::ForecastMethod;
use crate::error::{InsightError, Result};
use crate::models::traits::{validate_band, validate_confidence, Forecaster, Projection};
use crate::utils::stats::mean;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Average cost per phase of the season.
///
/// Phases with no observations (series shorter than one season) fall back to
/// `fallback`.
pub fn phase_averages(values: &[f64], season_length: usize, fallback: f64) -> Vec<f64> {
    if season_length == 0 {
        return Vec::new();
    }
    let mut sums = vec![0.0; season_length];
    let mut counts = vec![0usize; season_length];
    for (i, &y) in values.iter().enumerate() {
        sums[i % season_length] += y;
        counts[i % season_length] += 1;
    }
    sums.iter()
        .zip(&counts)
        .map(|(&sum, &count)| {
            if count == 0 {
                fallback
            } else {
                sum / count as f64
            }
        })
        .collect()
}

/// Weekly seasonal forecaster.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeasonalAverage {
    /// Number of days in one season.
    pub season_length: usize,
    /// Per-step relative drift applied to the overall average.
    pub drift: f64,
    /// Weight of the phase deviation from the overall average.
    pub seasonal_weight: f64,
    /// Relative prediction band (0.20 = ±20%).
    pub band: f64,
    /// Reported confidence.
    pub confidence: f64,
}

impl SeasonalAverage {
    /// Create a model with the given season length and default weights.
    pub fn new(season_length: usize) -> Self {
        Self {
            season_length,
            ..Self::default()
        }
    }
}

impl Default for SeasonalAverage {
    fn default() -> Self {
        Self {
            season_length: 7,
            drift: 0.001,
            seasonal_weight: 0.3,
            band: 0.20,
            confidence: 0.85,
        }
    }
}

impl Forecaster for SeasonalAverage {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Seasonal
    }

    fn validate(&self) -> Result<()> {
        if self.season_length == 0 {
            return Err(InsightError::InvalidParameter(
                "season_length must be positive".to_string(),
            ));
        }
        if !self.drift.is_finite() || !self.seasonal_weight.is_finite() {
            return Err(InsightError::InvalidParameter(format!(
                "seasonal drift and weight must be finite, got {} and {}",
                self.drift, self.seasonal_weight
            )));
        }
        validate_band("seasonal", self.band)?;
        validate_confidence("seasonal", self.confidence)
    }

    fn project(&self, values: &[f64], horizon: usize) -> Projection {
        let average = mean(values);
        let seasonal = phase_averages(values, self.season_length, average);

        // Phase of step i is `i mod season_length`, counted from the forecast start.
        let estimates = (1..=horizon)
            .map(|i| {
                let phase = seasonal
                    .get(i % self.season_length.max(1))
                    .copied()
                    .unwrap_or(average);
                average * (1.0 + i as f64 * self.drift) + self.seasonal_weight * (phase - average)
            })
            .collect();

        let mut metadata = BTreeMap::new();
        metadata.insert("season_length".to_string(), self.season_length as f64);
        metadata.insert("average_cost".to_string(), average);
        metadata.insert("drift".to_string(), self.drift);
        metadata.insert("seasonal_weight".to_string(), self.seasonal_weight);
        metadata.insert("data_points".to_string(), values.len() as f64);

        Projection {
            estimates,
            band: self.band,
            confidence: self.confidence,
            metadata,
        }
    }
}
