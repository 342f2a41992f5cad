//! Statistical utility functions.
//!
//! Degenerate input never produces NaN here: empty slices yield zero so that
//! callers can render neutral results.

/// Arithmetic mean of a slice, `0.0` when empty.
///
/// # Example
/// ```
/// use cost_insights::utils::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert_eq!(mean(&[]), 0.0);
/// ```
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (n denominator), `0.0` when empty.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn population_std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Smallest value, `0.0` when empty.
pub fn minimum(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Largest value, `0.0` when empty.
pub fn maximum(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Whether every value is identical. True for empty and single-value slices.
///
/// Checked on the values themselves: the mean of a constant slice can carry
/// rounding error, leaving a tiny nonzero standard deviation.
pub fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// `numerator / denominator`, or `0.0` when the denominator is zero.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
