//! Descriptive statistics over return slices.

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().sum::<f64>() / returns.len() as f64
}

/// Population variance (divides by n, not n - 1).
pub fn population_variance(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = mean(returns);
    returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n
}

/// Population standard deviation.
pub fn population_std(returns: &[f64]) -> f64 {
    population_variance(returns).sqrt()
}

/// Scale a per-period standard deviation to a yearly one.
///
/// # Arguments
///
/// * `period_std` - Standard deviation of per-period returns
/// * `periods_per_year` - Number of periods in a year (252 for equities, 365 for crypto)
pub fn annualize_volatility(period_std: f64, periods_per_year: usize) -> f64 {
    period_std * (periods_per_year as f64).sqrt()
}
