//! Linear regression forecasting.
//!
//! Fits `cost = slope × day + intercept` by ordinary least squares over the
//! 1-based day index and extends the line past the last observation.

use crate::core::ForecastMethod;
use crate::error::Result;
use crate::models::traits::{validate_band, Forecaster, Projection};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Closed-form least squares fit against the day index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, not clamped to `[0, 1]`.
    pub r_squared: f64,
}

/// Fit a line through `values` with x = 1, 2, ..., n.
///
/// A single observation (zero x-variance) yields a flat line through its
/// value. When the values themselves have no variance the fit is exact and
/// `r_squared` is reported as 1.
///
/// # Example
/// ```
/// use cost_insights::models::linear_fit;
///
/// let fit = linear_fit(&[3.0, 5.0, 7.0]);
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!((fit.intercept - 1.0).abs() < 1e-12);
/// assert!((fit.r_squared - 1.0).abs() < 1e-12);
/// ```
pub fn linear_fit(values: &[f64]) -> LinearFit {
    if values.is_empty() {
        return LinearFit {
            slope: 0.0,
            intercept: 0.0,
            r_squared: 1.0,
        };
    }

    let n = values.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for (i, &y) in values.iter().enumerate() {
        let x = (i + 1) as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    let slope = if denominator.abs() < f64::EPSILON {
        0.0
    } else {
        (n * sum_xy - sum_x * sum_y) / denominator
    };
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let sum_y2: f64 = values.iter().map(|&y| y * y).sum();
    let ss_tot: f64 = values.iter().map(|&y| (y - mean_y).powi(2)).sum();
    let ss_res: f64 = values
        .iter()
        .enumerate()
        .map(|(i, &y)| {
            let fitted = slope * (i + 1) as f64 + intercept;
            (y - fitted).powi(2)
        })
        .sum();

    // SStot below rounding noise of the data means the values are constant
    let r_squared = if ss_tot <= f64::EPSILON * sum_y2 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    LinearFit {
        slope,
        intercept,
        r_squared,
    }
}

/// Linear regression forecaster.
///
/// Confidence is the unclamped R² of the in-sample fit. A fit worse than the
/// mean reports a negative score.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinearRegression {
    /// Relative prediction band (0.10 = ±10%).
    pub band: f64,
}

impl LinearRegression {
    pub fn new(band: f64) -> Self {
        Self { band }
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self { band: 0.10 }
    }
}

impl Forecaster for LinearRegression {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Linear
    }

    fn validate(&self) -> Result<()> {
        validate_band("linear", self.band)
    }

    fn project(&self, values: &[f64], horizon: usize) -> Projection {
        let fit = linear_fit(values);
        let n = values.len();

        let estimates = (1..=horizon)
            .map(|i| fit.slope * (n + i) as f64 + fit.intercept)
            .collect();

        let mut metadata = BTreeMap::new();
        metadata.insert("slope".to_string(), fit.slope);
        metadata.insert("intercept".to_string(), fit.intercept);
        metadata.insert("r_squared".to_string(), fit.r_squared);
        metadata.insert("data_points".to_string(), n as f64);

        Projection {
            estimates,
            band: self.band,
            confidence: fit.r_squared,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fit_recovers_exact_line() {
        let values: Vec<f64> = (1..=10).map(|x| 100.0 + 5.0 * x as f64).collect();
        let fit = linear_fit(&values);

        assert_relative_eq!(fit.slope, 5.0, epsilon = 1e-9);
        assert_relative_eq!(fit.intercept, 100.0, epsilon = 1e-9);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn single_point_is_flat_line() {
        let fit = linear_fit(&[42.0]);
        assert_eq!(fit.slope, 0.0);
        assert_relative_eq!(fit.intercept, 42.0);
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn constant_values_report_perfect_fit() {
        let fit = linear_fit(&[7.0; 12]);
        assert_relative_eq!(fit.slope, 0.0, epsilon = 1e-12);
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn small_magnitude_costs_keep_their_r_squared() {
        // fitted 1e-6 + 0.5e-6 x: SSres 1.5e-12, SStot 2e-12
        let fit = linear_fit(&[1e-6, 3e-6, 2e-6]);
        assert_relative_eq!(fit.slope, 0.5e-6, epsilon = 1e-18);
        assert_relative_eq!(fit.r_squared, 0.25, epsilon = 1e-9);
    }

    #[test]
    fn r_squared_is_between_zero_and_one_for_noisy_line() {
        let values = [10.0, 14.0, 11.0, 16.0, 13.0, 18.0, 15.0, 20.0];
        let fit = linear_fit(&values);
        assert!(fit.slope > 0.0);
        assert!(fit.r_squared > 0.0 && fit.r_squared < 1.0);
    }

    #[test]
    fn projection_extends_the_line() {
        let model = LinearRegression::default();
        let projection = model.project(&[10.0, 20.0, 30.0], 2);

        // slope 10, intercept 0: day 4 -> 40, day 5 -> 50
        assert_relative_eq!(projection.estimates[0], 40.0, epsilon = 1e-9);
        assert_relative_eq!(projection.estimates[1], 50.0, epsilon = 1e-9);
        assert_eq!(projection.band, 0.10);
        assert_relative_eq!(projection.confidence, 1.0, epsilon = 1e-9);
        assert_eq!(projection.metadata["data_points"], 3.0);
    }

    #[test]
    fn falling_costs_project_below_zero_before_flooring() {
        let model = LinearRegression::default();
        let projection = model.project(&[30.0, 20.0, 10.0], 3);
        assert!(projection.estimates[2] < 0.0);
    }

    #[test]
    fn invalid_band_is_rejected() {
        assert!(LinearRegression::new(1.5).validate().is_err());
        assert!(LinearRegression::new(1.0).validate().is_err());
        assert!(LinearRegression::default().validate().is_ok());
    }
}
