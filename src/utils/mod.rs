//! Numeric helpers shared by the engines.

pub mod stats;
