//! Trend classification and narrative insight for cost series.

pub mod analyzer;
pub mod types;

pub use analyzer::{TrendAnalyzer, TrendConfig};
pub use types::{TrendClassification, TrendResult, TrendSummary};
