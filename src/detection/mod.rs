//! Anomaly detection for cost series.

mod anomaly;

pub use anomaly::{Anomaly, AnomalyConfig, AnomalyDetector, AnomalyType, Severity};
