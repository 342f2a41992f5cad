//! Growth, volatility and trend classification for a cost series.

use super::types::{TrendClassification, TrendResult, TrendSummary};
use crate::core::Series;
use crate::detection::Anomaly;
use crate::utils::stats::{maximum, mean, minimum, population_std_dev, ratio_or_zero};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Thresholds used by [`TrendAnalyzer`]. Percentages are in percent units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Growth below this magnitude is stable.
    pub stable_growth_percent: f64,
    /// Growth beyond this magnitude is rapid.
    pub rapid_growth_percent: f64,
    /// Trailing window length for the deviation scan.
    pub anomaly_window: usize,
    /// Relative deviation from the window mean that flags a point (0.30 = 30%).
    pub anomaly_deviation: f64,
    /// A flagged deviation above `anomaly_deviation × high_severity_multiplier` is high.
    pub high_severity_multiplier: f64,
    /// Volatility above which spikes should be investigated.
    pub high_volatility_percent: f64,
    /// More anomalies than this call for investigation.
    pub anomaly_count_alert: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            stable_growth_percent: 5.0,
            rapid_growth_percent: 20.0,
            anomaly_window: 7,
            anomaly_deviation: 0.30,
            high_severity_multiplier: 1.5,
            high_volatility_percent: 50.0,
            anomaly_count_alert: 5,
        }
    }
}

/// Classifies the direction of a cost series and explains it.
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Analyse `series`.
    ///
    /// Fewer than two observations produce an `insufficient_data` result with
    /// zero growth and volatility.
    ///
    /// # Example
    /// ```
    /// use cost_insights::core::Series;
    /// use cost_insights::trend::{TrendAnalyzer, TrendClassification};
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let values: Vec<f64> = (0..30).map(|i| 1000.0 + 50.0 * i as f64).collect();
    /// let series = Series::from_values(start, "ml-platform", &values).unwrap();
    ///
    /// let result = TrendAnalyzer::new().analyze_trend(&series);
    /// assert_eq!(result.overall_trend, TrendClassification::RapidlyIncreasing);
    /// ```
    pub fn analyze_trend(&self, series: &Series) -> TrendResult {
        let values = series.values();
        let n = values.len();

        if n < 2 {
            return self.insufficient_data(series, &values);
        }

        let mid = n / 2;
        let first_half_avg = mean(&values[..mid]);
        let second_half_avg = mean(&values[mid..]);
        if first_half_avg == 0.0 {
            warn!("first half of series averages zero, reporting zero growth");
        }
        let growth_rate_percent =
            ratio_or_zero(second_half_avg - first_half_avg, first_half_avg) * 100.0;

        let avg = mean(&values);
        let std_dev = population_std_dev(&values);
        let volatility_percent = ratio_or_zero(std_dev, avg) * 100.0;

        let overall_trend = self.classify(growth_rate_percent);
        let anomalies = self.scan_anomalies(series, &values);

        let mut details = base_details(series, &values);
        details.insert("first_half_avg".to_string(), first_half_avg);
        details.insert("second_half_avg".to_string(), second_half_avg);
        details.insert("anomaly_count".to_string(), anomalies.len() as f64);

        let summary = TrendSummary {
            narrative: narrative(overall_trend, growth_rate_percent),
            recommendation: self.recommendation(
                growth_rate_percent,
                volatility_percent,
                anomalies.len(),
            ),
            details,
        };

        debug!(
            data_points = n,
            trend = %overall_trend,
            growth_rate_percent,
            volatility_percent,
            anomalies = anomalies.len(),
            "analyzed cost trend"
        );

        TrendResult {
            data_point_count: n,
            period: series.period(),
            overall_trend,
            growth_rate_percent,
            volatility_percent,
            anomalies,
            summary,
        }
    }

    /// Classify a growth rate given in percent.
    pub fn classify(&self, growth_rate_percent: f64) -> TrendClassification {
        let stable = self.config.stable_growth_percent;
        let rapid = self.config.rapid_growth_percent;
        if growth_rate_percent.abs() < stable {
            TrendClassification::Stable
        } else if growth_rate_percent > 0.0 {
            if growth_rate_percent > rapid {
                TrendClassification::RapidlyIncreasing
            } else {
                TrendClassification::Increasing
            }
        } else if growth_rate_percent < -rapid {
            TrendClassification::RapidlyDecreasing
        } else {
            TrendClassification::Decreasing
        }
    }

    /// Flag points deviating from the mean of the preceding window.
    ///
    /// Windows averaging zero are skipped.
    fn scan_anomalies(&self, series: &Series, values: &[f64]) -> Vec<Anomaly> {
        let window = self.config.anomaly_window;
        if window == 0 || values.len() < window {
            return Vec::new();
        }

        let threshold = self.config.anomaly_deviation;
        let high_cutoff = threshold * self.config.high_severity_multiplier;
        let observations = series.observations();

        (window..values.len())
            .filter_map(|i| {
                let window_mean = mean(&values[i - window..i]);
                if window_mean == 0.0 {
                    return None;
                }
                let deviation = (values[i] - window_mean).abs() / window_mean;
                (deviation > threshold).then(|| {
                    Anomaly::classify(&observations[i], window_mean, deviation, high_cutoff)
                })
            })
            .collect()
    }

    fn recommendation(&self, growth: f64, volatility: f64, anomaly_count: usize) -> String {
        if volatility > self.config.high_volatility_percent {
            "High cost volatility detected - investigate spikes and irregular usage".to_string()
        } else if growth > self.config.rapid_growth_percent {
            "Rapid cost growth - review optimization opportunities".to_string()
        } else if anomaly_count > self.config.anomaly_count_alert {
            "Multiple anomalies detected - investigate unusual spending patterns".to_string()
        } else {
            "Cost patterns are within normal parameters".to_string()
        }
    }

    fn insufficient_data(&self, series: &Series, values: &[f64]) -> TrendResult {
        let mut details = base_details(series, values);
        details.insert("anomaly_count".to_string(), 0.0);

        TrendResult {
            data_point_count: values.len(),
            period: series.period(),
            overall_trend: TrendClassification::InsufficientData,
            growth_rate_percent: 0.0,
            volatility_percent: 0.0,
            anomalies: Vec::new(),
            summary: TrendSummary {
                narrative: narrative(TrendClassification::InsufficientData, 0.0),
                recommendation: "Collect at least two days of cost data for trend analysis"
                    .to_string(),
                details,
            },
        }
    }
}

fn narrative(trend: TrendClassification, growth: f64) -> String {
    match trend {
        TrendClassification::Stable => {
            format!("Costs are stable with {:.1}% change over the period", growth)
        }
        TrendClassification::Increasing => {
            format!("Costs are increasing at {:.1}% rate", growth)
        }
        TrendClassification::RapidlyIncreasing => format!(
            "Costs are rapidly increasing at {:.1}% rate - immediate attention needed",
            growth
        ),
        TrendClassification::Decreasing => {
            format!("Costs are decreasing at {:.1}% rate", growth.abs())
        }
        TrendClassification::RapidlyDecreasing => format!(
            "Costs are rapidly decreasing at {:.1}% rate - verify workloads are healthy",
            growth.abs()
        ),
        TrendClassification::InsufficientData => {
            "Not enough data points to determine a cost trend".to_string()
        }
    }
}

fn base_details(series: &Series, values: &[f64]) -> BTreeMap<String, f64> {
    let mut details = BTreeMap::new();
    details.insert("data_points".to_string(), values.len() as f64);
    details.insert("total_cost".to_string(), series.total());
    details.insert("mean_cost".to_string(), mean(values));
    details.insert("std_dev".to_string(), population_std_dev(values));
    details.insert("min_cost".to_string(), minimum(values));
    details.insert("max_cost".to_string(), maximum(values));
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{AnomalyType, Severity};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_series(values: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        Series::from_values(start, "compute", values).unwrap()
    }

    #[test]
    fn single_point_is_insufficient() {
        let result = TrendAnalyzer::new().analyze_trend(&make_series(&[100.0]));
        assert_eq!(result.overall_trend, TrendClassification::InsufficientData);
        assert_eq!(result.growth_rate_percent, 0.0);
        assert_eq!(result.volatility_percent, 0.0);
        assert_eq!(result.data_point_count, 1);
        assert_eq!(result.summary.details["mean_cost"], 100.0);
    }

    #[test]
    fn empty_series_is_insufficient() {
        let result = TrendAnalyzer::new().analyze_trend(&Series::empty());
        assert_eq!(result.overall_trend, TrendClassification::InsufficientData);
        assert!(result.period.is_none());
    }

    #[test]
    fn growth_compares_halves() {
        // first half avg 100, second half avg 110
        let series = make_series(&[100.0, 100.0, 110.0, 110.0]);
        let result = TrendAnalyzer::new().analyze_trend(&series);
        assert_relative_eq!(result.growth_rate_percent, 10.0, epsilon = 1e-9);
        assert_eq!(result.overall_trend, TrendClassification::Increasing);
        assert_eq!(result.summary.details["first_half_avg"], 100.0);
    }

    #[test]
    fn odd_length_puts_middle_in_second_half() {
        // mid = 1: first [100], second [100, 130] -> 15%
        let result = TrendAnalyzer::new().analyze_trend(&make_series(&[100.0, 100.0, 130.0]));
        assert_relative_eq!(result.growth_rate_percent, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_first_half_reports_zero_growth() {
        let result = TrendAnalyzer::new().analyze_trend(&make_series(&[0.0, 0.0, 50.0, 60.0]));
        assert_eq!(result.growth_rate_percent, 0.0);
        assert_eq!(result.overall_trend, TrendClassification::Stable);
    }

    #[test]
    fn all_zero_series_has_zero_volatility() {
        let result = TrendAnalyzer::new().analyze_trend(&make_series(&[0.0; 10]));
        assert_eq!(result.volatility_percent, 0.0);
        assert!(result.anomalies.is_empty());
    }

    #[test]
    fn classification_boundaries() {
        let analyzer = TrendAnalyzer::new();
        assert_eq!(analyzer.classify(0.0), TrendClassification::Stable);
        assert_eq!(analyzer.classify(4.99), TrendClassification::Stable);
        assert_eq!(analyzer.classify(-4.99), TrendClassification::Stable);
        assert_eq!(analyzer.classify(5.0), TrendClassification::Increasing);
        assert_eq!(analyzer.classify(20.0), TrendClassification::Increasing);
        assert_eq!(analyzer.classify(20.01), TrendClassification::RapidlyIncreasing);
        assert_eq!(analyzer.classify(-5.0), TrendClassification::Decreasing);
        assert_eq!(analyzer.classify(-20.0), TrendClassification::Decreasing);
        assert_eq!(analyzer.classify(-20.01), TrendClassification::RapidlyDecreasing);
    }

    #[test]
    fn volatility_is_coefficient_of_variation() {
        let result = TrendAnalyzer::new().analyze_trend(&make_series(&[50.0, 150.0]));
        // mean 100, population std 50
        assert_relative_eq!(result.volatility_percent, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn window_scan_flags_deviation_from_trailing_mean() {
        let mut values = vec![100.0; 14];
        values[10] = 140.0; // 40% above trailing mean of 100
        values[12] = 60.0;
        let result = TrendAnalyzer::new().analyze_trend(&make_series(&values));

        assert_eq!(result.anomalies.len(), 2);
        let spike = &result.anomalies[0];
        assert_eq!(spike.anomaly_type, AnomalyType::Spike);
        assert_eq!(spike.severity, Severity::Medium);
        assert_relative_eq!(spike.deviation_score, 0.4, epsilon = 1e-9);
        assert_eq!(spike.date, NaiveDate::from_ymd_opt(2024, 2, 11).unwrap());

        // trailing window of day 12 includes the spike: mean ~105.71
        let drop = &result.anomalies[1];
        assert_eq!(drop.anomaly_type, AnomalyType::Drop);
        assert_eq!(drop.severity, Severity::Medium);
    }

    #[test]
    fn first_window_is_never_flagged() {
        let mut values = vec![100.0; 7];
        values[3] = 500.0;
        let result = TrendAnalyzer::new().analyze_trend(&make_series(&values));
        assert!(result.anomalies.is_empty());
    }

    #[test]
    fn large_window_deviation_is_high_severity() {
        let mut values = vec![100.0; 8];
        values[7] = 200.0;
        let result = TrendAnalyzer::new().analyze_trend(&make_series(&values));
        assert_eq!(result.anomalies.len(), 1);
        assert_eq!(result.anomalies[0].severity, Severity::High);
    }

    #[test]
    fn recommendation_priority() {
        let analyzer = TrendAnalyzer::new();
        assert!(analyzer.recommendation(30.0, 60.0, 10).contains("investigate spikes"));
        assert!(analyzer
            .recommendation(30.0, 10.0, 10)
            .contains("review optimization opportunities"));
        assert!(analyzer
            .recommendation(10.0, 10.0, 6)
            .contains("investigate unusual spending patterns"));
        assert!(analyzer
            .recommendation(10.0, 10.0, 5)
            .contains("within normal parameters"));
    }

    #[test]
    fn narratives_mention_rate() {
        assert_eq!(
            narrative(TrendClassification::RapidlyIncreasing, 25.04),
            "Costs are rapidly increasing at 25.0% rate - immediate attention needed"
        );
        assert_eq!(
            narrative(TrendClassification::Decreasing, -12.0),
            "Costs are decreasing at 12.0% rate"
        );
    }

    #[test]
    fn linear_ramp_is_increasing() {
        let values: Vec<f64> = (0..30).map(|i| 1000.0 + 5.0 * i as f64).collect();
        let result = TrendAnalyzer::new().analyze_trend(&make_series(&values));
        assert!(result.overall_trend.is_increasing());
        assert!(result.growth_rate_percent > 0.0);
        assert_eq!(result.period.map(|p| p.days()), Some(30));
    }
}
