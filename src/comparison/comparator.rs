//! Ranking and benchmarking of aggregated entities.

use crate::core::Period;
use crate::error::{InsightError, Result};
use crate::utils::stats::{mean, ratio_or_zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Dimension entities are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonAxis {
    Teams,
    Services,
    Regions,
}

impl ComparisonAxis {
    pub const ALL: [ComparisonAxis; 3] = [
        ComparisonAxis::Teams,
        ComparisonAxis::Services,
        ComparisonAxis::Regions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonAxis::Teams => "teams",
            ComparisonAxis::Services => "services",
            ComparisonAxis::Regions => "regions",
        }
    }

    /// What the derived count of a row measures on this axis.
    pub fn derived_count_label(&self) -> &'static str {
        match self {
            ComparisonAxis::Teams => "distinct services",
            ComparisonAxis::Services => "distinct teams",
            ComparisonAxis::Regions => "distinct services",
        }
    }
}

impl fmt::Display for ComparisonAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonAxis {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        ComparisonAxis::ALL
            .into_iter()
            .find(|axis| axis.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| InsightError::UnsupportedComparisonAxis(s.to_string()))
    }
}

/// Pre-aggregated cost figures for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRow {
    pub key: String,
    pub total_cost: f64,
    /// Average daily cost over the period.
    pub avg_cost: f64,
    /// Count used to normalise cost, e.g. distinct services used by a team.
    pub derived_count: u64,
}

impl EntityRow {
    pub fn new(key: impl Into<String>, total_cost: f64, avg_cost: f64, derived_count: u64) -> Self {
        Self {
            key: key.into(),
            total_cost,
            avg_cost,
            derived_count,
        }
    }
}

/// A ranked entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityMetric {
    pub key: String,
    pub total_cost: f64,
    pub avg_cost: f64,
    pub derived_count: u64,
    /// 1 for the most expensive entity.
    pub rank: usize,
    /// `total_cost / derived_count`, zero when the count is zero.
    pub efficiency: f64,
}

/// Averages across all compared entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Benchmarks {
    pub avg_total_cost: f64,
    pub avg_efficiency: f64,
}

/// Ranked comparison across entities of one axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub comparison_type: ComparisonAxis,
    pub period: Option<Period>,
    /// Sorted by total cost, most expensive first.
    pub metrics: Vec<EntityMetric>,
    pub benchmarks: Benchmarks,
}

impl ComparisonResult {
    /// Metric for `key`, if it was part of the comparison.
    pub fn metric(&self, key: &str) -> Option<&EntityMetric> {
        self.metrics.iter().find(|m| m.key == key)
    }

    /// Entities whose total cost is above the benchmark average.
    pub fn above_benchmark(&self) -> impl Iterator<Item = &EntityMetric> {
        self.metrics
            .iter()
            .filter(move |m| m.total_cost > self.benchmarks.avg_total_cost)
    }
}

/// Ranks entities by cost and benchmarks them against each other.
#[derive(Debug, Clone, Default)]
pub struct EntityComparator {
    period: Option<Period>,
}

impl EntityComparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the reporting period to produced results.
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// Compare rows along an axis given by name.
    ///
    /// # Example
    /// ```
    /// use cost_insights::comparison::{EntityComparator, EntityRow};
    ///
    /// let rows = vec![
    ///     EntityRow::new("A", 100.0, 10.0, 2),
    ///     EntityRow::new("B", 80.0, 8.0, 4),
    ///     EntityRow::new("C", 120.0, 12.0, 3),
    /// ];
    /// let result = EntityComparator::new().compare_entities(&rows, "teams").unwrap();
    /// let order: Vec<_> = result.metrics.iter().map(|m| m.key.as_str()).collect();
    /// assert_eq!(order, vec!["C", "A", "B"]);
    /// ```
    pub fn compare_entities(&self, rows: &[EntityRow], axis: &str) -> Result<ComparisonResult> {
        let axis: ComparisonAxis = axis.parse()?;
        Ok(self.compare(rows, axis))
    }

    /// Compare rows along an already-parsed axis.
    ///
    /// Equal total costs are ordered by key so that ranking is reproducible.
    pub fn compare(&self, rows: &[EntityRow], axis: ComparisonAxis) -> ComparisonResult {
        let mut sorted: Vec<&EntityRow> = rows.iter().collect();
        sorted.sort_by(|a, b| rank_order(a, b));

        let metrics: Vec<EntityMetric> = sorted
            .into_iter()
            .enumerate()
            .map(|(position, row)| EntityMetric {
                key: row.key.clone(),
                total_cost: row.total_cost,
                avg_cost: row.avg_cost,
                derived_count: row.derived_count,
                rank: position + 1,
                efficiency: ratio_or_zero(row.total_cost, row.derived_count as f64),
            })
            .collect();

        let totals: Vec<f64> = metrics.iter().map(|m| m.total_cost).collect();
        let efficiencies: Vec<f64> = metrics.iter().map(|m| m.efficiency).collect();
        let benchmarks = Benchmarks {
            avg_total_cost: mean(&totals),
            avg_efficiency: mean(&efficiencies),
        };

        debug!(
            axis = %axis,
            entities = metrics.len(),
            normalised_by = axis.derived_count_label(),
            avg_total_cost = benchmarks.avg_total_cost,
            "compared entities"
        );

        ComparisonResult {
            comparison_type: axis,
            period: self.period,
            metrics,
            benchmarks,
        }
    }
}

/// Order used when ranking: descending cost, then ascending key.
pub fn rank_order(a: &EntityRow, b: &EntityRow) -> Ordering {
    b.total_cost
        .total_cmp(&a.total_cost)
        .then_with(|| a.key.cmp(&b.key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn rows() -> Vec<EntityRow> {
        vec![
            EntityRow::new("A", 100.0, 10.0, 2),
            EntityRow::new("B", 80.0, 8.0, 4),
            EntityRow::new("C", 120.0, 12.0, 3),
        ]
    }

    #[test]
    fn ranks_by_total_cost_descending() {
        let result = EntityComparator::new()
            .compare_entities(&rows(), "teams")
            .unwrap();

        let ranked: Vec<_> = result
            .metrics
            .iter()
            .map(|m| (m.key.as_str(), m.rank))
            .collect();
        assert_eq!(ranked, vec![("C", 1), ("A", 2), ("B", 3)]);
        assert_eq!(result.comparison_type, ComparisonAxis::Teams);
    }

    #[test]
    fn efficiency_and_benchmarks() {
        let result = EntityComparator::new().compare(&rows(), ComparisonAxis::Services);

        assert_relative_eq!(result.metric("A").unwrap().efficiency, 50.0);
        assert_relative_eq!(result.metric("B").unwrap().efficiency, 20.0);
        assert_relative_eq!(result.metric("C").unwrap().efficiency, 40.0);
        assert_relative_eq!(result.benchmarks.avg_total_cost, 100.0, epsilon = 1e-9);
        assert_relative_eq!(result.benchmarks.avg_efficiency, 110.0 / 3.0, epsilon = 1e-9);

        let above: Vec<_> = result.above_benchmark().map(|m| m.key.as_str()).collect();
        assert_eq!(above, vec!["C"]);
    }

    #[test]
    fn zero_derived_count_has_zero_efficiency() {
        let rows = vec![EntityRow::new("idle", 50.0, 5.0, 0)];
        let result = EntityComparator::new().compare(&rows, ComparisonAxis::Regions);
        assert_eq!(result.metrics[0].efficiency, 0.0);
    }

    #[test]
    fn ties_are_broken_by_key() {
        let rows = vec![
            EntityRow::new("us-west-2", 10.0, 1.0, 1),
            EntityRow::new("eu-west-1", 10.0, 1.0, 1),
            EntityRow::new("ap-south-1", 10.0, 1.0, 1),
        ];
        let result = EntityComparator::new().compare(&rows, ComparisonAxis::Regions);
        let keys: Vec<_> = result.metrics.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["ap-south-1", "eu-west-1", "us-west-2"]);
        assert_eq!(rank_order(&rows[1], &rows[0]), Ordering::Less);
    }

    #[test]
    fn empty_rows_have_zero_benchmarks() {
        let result = EntityComparator::new().compare(&[], ComparisonAxis::Teams);
        assert!(result.metrics.is_empty());
        assert_eq!(result.benchmarks.avg_total_cost, 0.0);
        assert_eq!(result.benchmarks.avg_efficiency, 0.0);
    }

    #[test]
    fn unknown_axis_is_rejected() {
        let result = EntityComparator::new().compare_entities(&rows(), "planets");
        assert_eq!(
            result,
            Err(InsightError::UnsupportedComparisonAxis("planets".to_string()))
        );
        assert_eq!("Regions".parse::<ComparisonAxis>(), Ok(ComparisonAxis::Regions));
    }

    #[test]
    fn derived_count_labels_name_the_other_axis() {
        assert_eq!(ComparisonAxis::Teams.derived_count_label(), "distinct services");
        assert_eq!(ComparisonAxis::Services.derived_count_label(), "distinct teams");
        assert_eq!(ComparisonAxis::Regions.derived_count_label(), "distinct services");
    }

    #[test]
    fn period_is_attached() {
        let period = Period::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap();
        let result = EntityComparator::new()
            .with_period(period)
            .compare(&rows(), ComparisonAxis::Teams);
        assert_eq!(result.period, Some(period));
    }
}
