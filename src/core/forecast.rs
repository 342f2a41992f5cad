//! Forecast result structures.

use crate::error::{InsightError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Forecasting strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Ordinary least squares against the day index.
    Linear,
    /// Exponential smoothing with a linear drift.
    Exponential,
    /// Weekly phase averages on top of the overall mean.
    Seasonal,
    /// Compound daily growth at a fixed annual rate.
    Growth,
}

impl ForecastMethod {
    /// Every supported method.
    pub const ALL: [ForecastMethod; 4] = [
        ForecastMethod::Linear,
        ForecastMethod::Exponential,
        ForecastMethod::Seasonal,
        ForecastMethod::Growth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::Linear => "linear",
            ForecastMethod::Exponential => "exponential",
            ForecastMethod::Seasonal => "seasonal",
            ForecastMethod::Growth => "growth",
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastMethod {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        ForecastMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| InsightError::UnsupportedMethod(s.to_string()))
    }
}

/// A single forecast day with its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionPoint {
    pub date: NaiveDate,
    pub predicted_cost: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl PredictionPoint {
    /// Build a point from a raw estimate and a symmetric relative band.
    ///
    /// The estimate is floored at zero before the band is applied, so
    /// `0 <= lower_bound <= predicted_cost <= upper_bound` holds for any
    /// band in `[0, 1]`.
    pub fn from_estimate(date: NaiveDate, estimate: f64, band: f64) -> Self {
        // f64::max also maps NaN to zero
        let predicted_cost = estimate.max(0.0);
        Self {
            date,
            predicted_cost,
            lower_bound: predicted_cost * (1.0 - band),
            upper_bound: predicted_cost * (1.0 + band),
        }
    }
}

/// A dated multi-day cost forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    method: ForecastMethod,
    predictions: Vec<PredictionPoint>,
    confidence: f64,
    metadata: BTreeMap<String, f64>,
}

impl ForecastResult {
    pub(crate) fn new(
        method: ForecastMethod,
        predictions: Vec<PredictionPoint>,
        confidence: f64,
        metadata: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            method,
            predictions,
            confidence,
            metadata,
        }
    }

    pub fn method(&self) -> ForecastMethod {
        self.method
    }

    pub fn predictions(&self) -> &[PredictionPoint] {
        &self.predictions
    }

    /// Method-specific reliability score.
    ///
    /// For the linear method this is the raw R² of the fit and may be
    /// negative; the other methods report fixed heuristic values.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Parameters the method ran with, keyed by name.
    pub fn metadata(&self) -> &BTreeMap<String, f64> {
        &self.metadata
    }

    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.metadata.get(name).copied()
    }

    /// Number of forecast days.
    pub fn horizon(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// Sum of predicted costs over the horizon.
    pub fn total_predicted_cost(&self) -> f64 {
        self.predictions.iter().map(|p| p.predicted_cost).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn method_names_parse_case_insensitively() {
        assert_eq!("linear".parse::<ForecastMethod>(), Ok(ForecastMethod::Linear));
        assert_eq!(
            " Seasonal ".parse::<ForecastMethod>(),
            Ok(ForecastMethod::Seasonal)
        );
        assert_eq!(
            "bogus".parse::<ForecastMethod>(),
            Err(InsightError::UnsupportedMethod("bogus".to_string()))
        );
        for method in ForecastMethod::ALL {
            assert_eq!(method.to_string().parse::<ForecastMethod>(), Ok(method));
        }
    }

    #[test]
    fn prediction_point_floors_and_bands() {
        let point = PredictionPoint::from_estimate(date(), 100.0, 0.2);
        assert_eq!(point.predicted_cost, 100.0);
        assert!((point.lower_bound - 80.0).abs() < 1e-12);
        assert!((point.upper_bound - 120.0).abs() < 1e-12);

        let point = PredictionPoint::from_estimate(date(), -5.0, 0.1);
        assert_eq!(point.predicted_cost, 0.0);
        assert_eq!(point.lower_bound, 0.0);
        assert_eq!(point.upper_bound, 0.0);

        let point = PredictionPoint::from_estimate(date(), f64::NAN, 0.1);
        assert_eq!(point.predicted_cost, 0.0);
    }

    #[test]
    fn forecast_result_accessors() {
        let points = vec![
            PredictionPoint::from_estimate(date(), 10.0, 0.1),
            PredictionPoint::from_estimate(date(), 20.0, 0.1),
        ];
        let mut metadata = BTreeMap::new();
        metadata.insert("alpha".to_string(), 0.3);
        let result = ForecastResult::new(ForecastMethod::Exponential, points, 0.8, metadata);

        assert_eq!(result.horizon(), 2);
        assert!(!result.is_empty());
        assert_eq!(result.parameter("alpha"), Some(0.3));
        assert_eq!(result.parameter("beta"), None);
        assert!((result.total_predicted_cost() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn method_serializes_in_snake_case() {
        let json = serde_json::to_string(&ForecastMethod::Growth).unwrap();
        assert_eq!(json, "\"growth\"");
    }
}
