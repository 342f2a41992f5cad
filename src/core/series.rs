//! Daily cost observations and the series built from them.

use crate::error::{InsightError, Result};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A single dated cost amount for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostObservation {
    date: NaiveDate,
    entity_key: String,
    amount: f64,
}

impl CostObservation {
    /// Create an observation.
    ///
    /// Fails with [`InsightError::InvalidObservation`] when the amount is
    /// negative or not finite.
    pub fn new(date: NaiveDate, entity_key: impl Into<String>, amount: f64) -> Result<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(InsightError::InvalidObservation(format!(
                "amount must be a finite non-negative number, got {} on {}",
                amount, date
            )));
        }
        Ok(Self {
            date,
            entity_key: entity_key.into(),
            amount,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn entity_key(&self) -> &str {
        &self.entity_key
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// Inclusive date range covered by a series or a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// Create a period. `start` must not be after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(InsightError::InvalidParameter(format!(
                "period start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Check whether a date falls inside the period (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Observations for one grouping key, ordered ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    observations: Vec<CostObservation>,
}

impl Series {
    /// Build a series, sorting observations by date.
    ///
    /// The sort is stable, so observations sharing a date keep their input order.
    pub fn new(mut observations: Vec<CostObservation>) -> Self {
        observations.sort_by_key(|o| o.date);
        Self { observations }
    }

    /// Create an empty series.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build one observation per consecutive day starting at `start`.
    ///
    /// # Example
    /// ```
    /// use cost_insights::core::Series;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let series = Series::from_values(start, "platform", &[10.0, 12.0, 11.0]).unwrap();
    /// assert_eq!(series.len(), 3);
    /// assert_eq!(series.last_date(), NaiveDate::from_ymd_opt(2024, 1, 3));
    /// ```
    pub fn from_values(start: NaiveDate, entity_key: &str, values: &[f64]) -> Result<Self> {
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, &amount)| {
                let date = start.checked_add_days(Days::new(i as u64)).ok_or_else(|| {
                    InsightError::InvalidParameter(format!(
                        "day offset {} from {} is out of range",
                        i, start
                    ))
                })?;
                CostObservation::new(date, entity_key, amount)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { observations })
    }

    /// Collapse observations that share a date into a single daily total.
    ///
    /// The entity key of each day is taken from the first observation seen for it.
    pub fn daily_totals(observations: Vec<CostObservation>) -> Self {
        let mut days: BTreeMap<NaiveDate, CostObservation> = BTreeMap::new();
        for obs in observations {
            let amount = obs.amount;
            days.entry(obs.date)
                .and_modify(|day| day.amount += amount)
                .or_insert(obs);
        }
        Self {
            observations: days.into_values().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[CostObservation] {
        &self.observations
    }

    /// Cost amounts in date order.
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.amount).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Date range spanned by the series, `None` when empty.
    pub fn period(&self) -> Option<Period> {
        match (self.first_date(), self.last_date()) {
            (Some(start), Some(end)) => Some(Period { start, end }),
            _ => None,
        }
    }

    /// Sum of all amounts.
    pub fn total(&self) -> f64 {
        self.observations.iter().map(|o| o.amount).sum()
    }
}

impl FromIterator<CostObservation> for Series {
    fn from_iter<I: IntoIterator<Item = CostObservation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
