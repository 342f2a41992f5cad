//! Source of historical cost series.
//!
//! The analytics engines never fetch data themselves. A [`SeriesProvider`]
//! is the seam through which the host application hands over daily,
//! pre-aggregated observations for one grouping key.

use crate::comparison::ComparisonAxis;
use crate::core::{CostObservation, Period, Series};
use crate::error::Result;
use std::collections::HashMap;
use std::fmt;

/// Identifies the entity a series belongs to, e.g. team `platform`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupingKey {
    pub axis: ComparisonAxis,
    pub key: String,
}

impl GroupingKey {
    pub fn new(axis: ComparisonAxis, key: impl Into<String>) -> Self {
        Self {
            axis,
            key: key.into(),
        }
    }

    pub fn team(key: impl Into<String>) -> Self {
        Self::new(ComparisonAxis::Teams, key)
    }

    pub fn service(key: impl Into<String>) -> Self {
        Self::new(ComparisonAxis::Services, key)
    }

    pub fn region(key: impl Into<String>) -> Self {
        Self::new(ComparisonAxis::Regions, key)
    }
}

impl fmt::Display for GroupingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.axis, self.key)
    }
}

/// Supplies a date-ordered daily series for a grouping key and period.
pub trait SeriesProvider {
    fn fetch_series(&self, key: &GroupingKey, period: Period) -> Result<Series>;
}

impl<P: SeriesProvider + ?Sized> SeriesProvider for &P {
    fn fetch_series(&self, key: &GroupingKey, period: Period) -> Result<Series> {
        (**self).fetch_series(key, period)
    }
}

impl<P: SeriesProvider + ?Sized> SeriesProvider for Box<P> {
    fn fetch_series(&self, key: &GroupingKey, period: Period) -> Result<Series> {
        (**self).fetch_series(key, period)
    }
}

/// Provider backed by observations held in memory.
///
/// Observations falling on the same day are summed. Unknown keys yield an
/// empty series.
#[derive(Debug, Clone, Default)]
pub struct InMemorySeriesProvider {
    observations: HashMap<GroupingKey, Vec<CostObservation>>,
}

impl InMemorySeriesProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add observations for `key`.
    pub fn insert(&mut self, key: GroupingKey, observations: impl IntoIterator<Item = CostObservation>) {
        self.observations.entry(key).or_default().extend(observations);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_observations(
        mut self,
        key: GroupingKey,
        observations: impl IntoIterator<Item = CostObservation>,
    ) -> Self {
        self.insert(key, observations);
        self
    }

    /// Number of grouping keys with data.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl SeriesProvider for InMemorySeriesProvider {
    fn fetch_series(&self, key: &GroupingKey, period: Period) -> Result<Series> {
        let in_period = self
            .observations
            .get(key)
            .into_iter()
            .flatten()
            .filter(|obs| period.contains(obs.date()))
            .cloned()
            .collect();
        Ok(Series::daily_totals(in_period))
    }
}
