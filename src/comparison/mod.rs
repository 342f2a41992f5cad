//! Cross-entity cost comparison.

mod comparator;

pub use comparator::{
    rank_order, Benchmarks, ComparisonAxis, ComparisonResult, EntityComparator, EntityMetric,
    EntityRow,
};
