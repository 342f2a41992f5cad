//! Facade binding a [`SeriesProvider`] to the analytics engines.

use crate::core::{ForecastMethod, ForecastResult, Period};
use crate::detection::{Anomaly, AnomalyDetector};
use crate::error::Result;
use crate::models::ForecastEngine;
use crate::provider::{GroupingKey, SeriesProvider};
use crate::trend::{TrendAnalyzer, TrendResult};
use tracing::debug;

/// Fetches series from a provider and runs the engines on them.
///
/// # Example
/// ```
/// use cost_insights::core::{CostObservation, Period};
/// use cost_insights::provider::{GroupingKey, InMemorySeriesProvider};
/// use cost_insights::CostInsights;
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let observations = (1..=10).map(|d| CostObservation::new(day(d), "data", 100.0 + d as f64).unwrap());
/// let provider = InMemorySeriesProvider::new()
///     .with_observations(GroupingKey::team("data"), observations);
///
/// let insights = CostInsights::new(provider);
/// let period = Period::new(day(1), day(10)).unwrap();
/// let forecast = insights.forecast(&GroupingKey::team("data"), period, "linear", 7).unwrap();
/// assert_eq!(forecast.horizon(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct CostInsights<P> {
    provider: P,
    forecast_engine: ForecastEngine,
    trend_analyzer: TrendAnalyzer,
    anomaly_detector: AnomalyDetector,
}

impl<P: SeriesProvider> CostInsights<P> {
    /// Facade with default engine configuration.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            forecast_engine: ForecastEngine::new(),
            trend_analyzer: TrendAnalyzer::new(),
            anomaly_detector: AnomalyDetector::new(),
        }
    }

    pub fn with_forecast_engine(mut self, engine: ForecastEngine) -> Self {
        self.forecast_engine = engine;
        self
    }

    pub fn with_trend_analyzer(mut self, analyzer: TrendAnalyzer) -> Self {
        self.trend_analyzer = analyzer;
        self
    }

    pub fn with_anomaly_detector(mut self, detector: AnomalyDetector) -> Self {
        self.anomaly_detector = detector;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Forecast costs for `key` from its history over `period`.
    ///
    /// The method name is validated before any data is fetched.
    pub fn forecast(
        &self,
        key: &GroupingKey,
        period: Period,
        method: &str,
        horizon: usize,
    ) -> Result<ForecastResult> {
        let method: ForecastMethod = method.parse()?;
        let series = self.provider.fetch_series(key, period)?;
        debug!(key = %key, period = %period, observations = series.len(), "fetched series for forecast");
        self.forecast_engine.forecast_with(&series, method, horizon)
    }

    /// Analyse the cost trend of `key` over `period`.
    pub fn analyze_trend(&self, key: &GroupingKey, period: Period) -> Result<TrendResult> {
        let series = self.provider.fetch_series(key, period)?;
        Ok(self.trend_analyzer.analyze_trend(&series))
    }

    /// Flag anomalous days of `key` over `period`.
    pub fn detect_anomalies(
        &self,
        key: &GroupingKey,
        period: Period,
        threshold: f64,
    ) -> Result<Vec<Anomaly>> {
        let series = self.provider.fetch_series(key, period)?;
        Ok(self.anomaly_detector.detect_anomalies(&series, threshold))
    }
}
