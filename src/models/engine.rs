//! Forecast engine dispatching between the four strategies.

use crate::core::{ForecastMethod, ForecastResult, PredictionPoint, Series};
use crate::error::{InsightError, Result};
use crate::models::{
    CompoundGrowth, ExponentialSmoothing, Forecaster, LinearRegression, SeasonalAverage,
};
use chrono::Days;
use serde::Deserialize;
use tracing::debug;

/// Parameters for every forecasting strategy.
///
/// Deserializes with defaults for any missing field, so a host application
/// can override only what it needs:
///
/// ```
/// use cost_insights::models::ForecastConfig;
///
/// let config: ForecastConfig = serde_json::from_str(r#"{"exponential": {"alpha": 0.5}}"#).unwrap();
/// assert_eq!(config.exponential.alpha, 0.5);
/// assert_eq!(config.seasonal.season_length, 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub linear: LinearRegression,
    pub exponential: ExponentialSmoothing,
    pub seasonal: SeasonalAverage,
    pub growth: CompoundGrowth,
    /// Largest accepted horizon. `None` leaves the horizon uncapped.
    pub max_horizon: Option<usize>,
}

impl ForecastConfig {
    /// Validate every strategy's parameters.
    pub fn validate(&self) -> Result<()> {
        self.linear.validate()?;
        self.exponential.validate()?;
        self.seasonal.validate()?;
        self.growth.validate()
    }
}

/// Produces dated forecasts from a cost series.
///
/// # Example
/// ```
/// use cost_insights::core::Series;
/// use cost_insights::models::ForecastEngine;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let series = Series::from_values(start, "team-a", &[100.0, 110.0, 120.0, 130.0]).unwrap();
///
/// let engine = ForecastEngine::new();
/// let forecast = engine.forecast(&series, "linear", 3).unwrap();
/// assert_eq!(forecast.horizon(), 3);
/// assert_eq!(forecast.predictions()[0].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl ForecastEngine {
    /// Engine with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with validated custom parameters.
    pub fn with_config(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Strategy implementing `method`.
    pub fn strategy(&self, method: ForecastMethod) -> &dyn Forecaster {
        match method {
            ForecastMethod::Linear => &self.config.linear,
            ForecastMethod::Exponential => &self.config.exponential,
            ForecastMethod::Seasonal => &self.config.seasonal,
            ForecastMethod::Growth => &self.config.growth,
        }
    }

    /// Forecast `horizon` days using a method given by name.
    ///
    /// Fails with [`InsightError::UnsupportedMethod`] for unknown names and
    /// [`InsightError::NoHistoricalData`] for an empty series.
    pub fn forecast(&self, series: &Series, method: &str, horizon: usize) -> Result<ForecastResult> {
        let method: ForecastMethod = method.parse()?;
        self.forecast_with(series, method, horizon)
    }

    /// Forecast `horizon` days with an already-parsed method.
    pub fn forecast_with(
        &self,
        series: &Series,
        method: ForecastMethod,
        horizon: usize,
    ) -> Result<ForecastResult> {
        let last_date = series.last_date().ok_or(InsightError::NoHistoricalData)?;

        if let Some(max) = self.config.max_horizon {
            if horizon > max {
                return Err(InsightError::InvalidParameter(format!(
                    "horizon {} exceeds the configured maximum of {}",
                    horizon, max
                )));
            }
        }

        let values = series.values();
        let projection = self.strategy(method).project(&values, horizon);

        let predictions = projection
            .estimates
            .iter()
            .enumerate()
            .map(|(i, &estimate)| {
                let step = i as u64 + 1;
                let date = last_date.checked_add_days(Days::new(step)).ok_or_else(|| {
                    InsightError::InvalidParameter(format!(
                        "forecast day {} after {} is out of range",
                        step, last_date
                    ))
                })?;
                Ok(PredictionPoint::from_estimate(date, estimate, projection.band))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            method = %method,
            data_points = values.len(),
            horizon,
            confidence = projection.confidence,
            "computed cost forecast"
        );

        Ok(ForecastResult::new(
            method,
            predictions,
            projection.confidence,
            projection.metadata,
        ))
    }
}
