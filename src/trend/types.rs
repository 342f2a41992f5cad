use crate::core::Period;
use crate::detection::Anomaly;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Overall direction of a cost series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendClassification {
    Stable,
    Increasing,
    RapidlyIncreasing,
    Decreasing,
    RapidlyDecreasing,
    InsufficientData,
}

impl TrendClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendClassification::Stable => "stable",
            TrendClassification::Increasing => "increasing",
            TrendClassification::RapidlyIncreasing => "rapidly_increasing",
            TrendClassification::Decreasing => "decreasing",
            TrendClassification::RapidlyDecreasing => "rapidly_decreasing",
            TrendClassification::InsufficientData => "insufficient_data",
        }
    }

    /// True for both increasing classifications.
    pub fn is_increasing(&self) -> bool {
        matches!(
            self,
            TrendClassification::Increasing | TrendClassification::RapidlyIncreasing
        )
    }

    /// True for both decreasing classifications.
    pub fn is_decreasing(&self) -> bool {
        matches!(
            self,
            TrendClassification::Decreasing | TrendClassification::RapidlyDecreasing
        )
    }
}

impl fmt::Display for TrendClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable interpretation of a trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSummary {
    pub narrative: String,
    pub recommendation: String,
    /// Supporting statistics keyed by name.
    pub details: BTreeMap<String, f64>,
}

/// Result of analysing one cost series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendResult {
    pub data_point_count: usize,
    /// Dates covered by the series, `None` when it is empty.
    pub period: Option<Period>,
    pub overall_trend: TrendClassification,
    pub growth_rate_percent: f64,
    pub volatility_percent: f64,
    /// Points deviating from their trailing window.
    pub anomalies: Vec<Anomaly>,
    pub summary: TrendSummary,
}
