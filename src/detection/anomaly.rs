//! Z-score anomaly detection over a cost series.
//!
//! Every point is scored by its distance from the population mean in units of
//! the population standard deviation.

use crate::core::{CostObservation, Series};
use crate::utils::stats::{is_constant, mean, population_std_dev};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How far outside the expected range an anomaly lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Medium,
    High,
}

/// Direction of an anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    /// Cost above the expected value.
    Spike,
    /// Cost at or below the expected value.
    Drop,
}

/// A flagged point of a cost series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub date: NaiveDate,
    /// Entity the cost belongs to, when known.
    pub entity_label: Option<String>,
    pub actual_value: f64,
    pub expected_value: f64,
    /// Method-specific distance from the expected value.
    pub deviation_score: f64,
    pub severity: Severity,
    pub anomaly_type: AnomalyType,
}

impl Anomaly {
    /// Build an anomaly for `observation`, classifying severity and direction.
    ///
    /// Severity is high when `deviation_score` exceeds `high_cutoff`.
    pub(crate) fn classify(
        observation: &CostObservation,
        expected_value: f64,
        deviation_score: f64,
        high_cutoff: f64,
    ) -> Self {
        let actual_value = observation.amount();
        let entity_label = Some(observation.entity_key())
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        Self {
            date: observation.date(),
            entity_label,
            actual_value,
            expected_value,
            deviation_score,
            severity: if deviation_score > high_cutoff {
                Severity::High
            } else {
                Severity::Medium
            },
            anomaly_type: if actual_value > expected_value {
                AnomalyType::Spike
            } else {
                AnomalyType::Drop
            },
        }
    }
}

/// Configuration for anomaly detection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// A score above `threshold × high_severity_multiplier` is high severity.
    pub high_severity_multiplier: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            high_severity_multiplier: 1.5,
        }
    }
}

/// Flags points whose z-score exceeds a caller-supplied threshold.
#[derive(Debug, Clone, Default)]
pub struct AnomalyDetector {
    config: AnomalyConfig,
}

impl AnomalyDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnomalyConfig) -> Self {
        Self { config }
    }

    /// Detect anomalies in `series`.
    ///
    /// A point is flagged when `|cost - mean| / stddev > threshold`. A series
    /// without variance (empty, a single point, or constant) has no anomalies.
    ///
    /// # Example
    /// ```
    /// use cost_insights::core::Series;
    /// use cost_insights::detection::{AnomalyDetector, AnomalyType};
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let mut values = vec![100.0; 20];
    /// values[10] = 400.0;
    /// let series = Series::from_values(start, "search", &values).unwrap();
    ///
    /// let anomalies = AnomalyDetector::new().detect_anomalies(&series, 2.0);
    /// assert_eq!(anomalies.len(), 1);
    /// assert_eq!(anomalies[0].anomaly_type, AnomalyType::Spike);
    /// ```
    pub fn detect_anomalies(&self, series: &Series, threshold: f64) -> Vec<Anomaly> {
        let values = series.values();
        let avg = mean(&values);
        let std_dev = population_std_dev(&values);

        if is_constant(&values) || std_dev == 0.0 {
            if !values.is_empty() {
                warn!(
                    data_points = values.len(),
                    "series has zero variance, skipping anomaly scoring"
                );
            }
            return Vec::new();
        }

        let high_cutoff = threshold * self.config.high_severity_multiplier;
        let anomalies: Vec<Anomaly> = series
            .observations()
            .iter()
            .filter_map(|obs| {
                let score = (obs.amount() - avg).abs() / std_dev;
                (score > threshold).then(|| Anomaly::classify(obs, avg, score, high_cutoff))
            })
            .collect();

        debug!(
            data_points = values.len(),
            threshold,
            anomalies = anomalies.len(),
            "scanned series for anomalies"
        );

        anomalies
    }
}
