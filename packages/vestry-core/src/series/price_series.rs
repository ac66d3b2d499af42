//! Price series with return and volatility calculations.

use super::stats;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to series constructed without one.
pub const DEFAULT_SERIES_NAME: &str = "unnamed";

/// Time-ordered series of prices, index 0 being the earliest observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Prices indexed by time
    values: Vec<f64>,
    /// Series identifier
    name: String,
}

/// Snapshot of a series' statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Series identifier
    pub name: String,
    /// Number of prices
    pub length: usize,
    /// Most recent price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<f64>,
    /// Total return as a decimal (0.05 = 5%)
    pub total_return: f64,
    /// Annualized volatility of log returns as a decimal
    pub annualized_volatility: f64,
    /// Annualization factor used for the volatility
    pub periods_per_year: usize,
}

impl Default for PriceSeries {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            name: DEFAULT_SERIES_NAME.to_string(),
        }
    }
}

impl PriceSeries {
    /// Annualization convention for US equities.
    pub const TRADING_DAYS_PER_YEAR: usize = 252;

    /// Create a series from prices and a name.
    ///
    /// The series owns its own copy of the prices.
    pub fn new(values: impl Into<Vec<f64>>, name: impl Into<String>) -> Self {
        let series = Self {
            values: values.into(),
            name: name.into(),
        };
        tracing::debug!("Created {}", series.describe());
        series
    }

    /// Create a series named [`DEFAULT_SERIES_NAME`].
    pub fn unnamed(values: impl Into<Vec<f64>>) -> Self {
        Self::new(values, DEFAULT_SERIES_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of stored prices.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent price, if any.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Returns the prices at `t - 1` and `t`.
    fn step(&self, t: usize) -> Result<(f64, f64)> {
        if t == 0 || t >= self.values.len() {
            return Err(Error::IndexOutOfRange {
                index: t,
                len: self.values.len(),
            });
        }
        Ok((self.values[t - 1], self.values[t]))
    }

    /// Linear (arithmetic) return between `t - 1` and `t`.
    ///
    /// - Not adjusted for dividends (use adjusted prices for that)
    /// - Additive across assets: r_portfolio = Σ(weight_i × r_i)
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` unless `1 <= t < len()`, `InvalidPrice` if the
    /// previous price is zero.
    pub fn linear_return(&self, t: usize) -> Result<f64> {
        let (prev, current) = self.step(t)?;
        if prev == 0.0 {
            tracing::warn!(series = %self.name, index = t - 1, "Zero price in linear return");
            return Err(Error::InvalidPrice {
                index: t - 1,
                price: prev,
            });
        }
        Ok((current - prev) / prev)
    }

    /// Log return between `t - 1` and `t`.
    ///
    /// Log returns are additive over time: Σ log returns = ln(P_T / P_0).
    ///
    /// # Errors
    ///
    /// Same as [`linear_return`](Self::linear_return), plus `InvalidPrice`
    /// when the price ratio is not strictly positive.
    pub fn log_return(&self, t: usize) -> Result<f64> {
        let (prev, current) = self.step(t)?;
        let ratio = current / prev;
        if prev == 0.0 || ratio.is_nan() || ratio <= 0.0 {
            let (index, price) = if prev <= 0.0 {
                (t - 1, prev)
            } else {
                (t, current)
            };
            tracing::warn!(series = %self.name, index, price, "Non-positive price ratio in log return");
            return Err(Error::InvalidPrice { index, price });
        }
        Ok(ratio.ln())
    }

    /// Total (non-annualized) return over the whole series.
    ///
    /// Returns 0.0 for series with fewer than two prices.
    pub fn total_return(&self) -> Result<f64> {
        let (first, last) = match (self.values.first(), self.values.last()) {
            (Some(&first), Some(&last)) if self.values.len() >= 2 => (first, last),
            _ => return Ok(0.0),
        };

        if first == 0.0 {
            return Err(Error::InvalidPrice {
                index: 0,
                price: first,
            });
        }
        Ok((last - first) / first)
    }

    /// Linear returns for every step; empty when there are fewer than two prices.
    pub fn all_linear_returns(&self) -> Result<Vec<f64>> {
        (1..self.values.len()).map(|t| self.linear_return(t)).collect()
    }

    /// Log returns for every step; empty when there are fewer than two prices.
    pub fn all_log_returns(&self) -> Result<Vec<f64>> {
        (1..self.values.len()).map(|t| self.log_return(t)).collect()
    }

    /// Annualized volatility of log returns using [`Self::TRADING_DAYS_PER_YEAR`].
    ///
    /// Uses the population variance. Returns 0.0 when there are no returns.
    pub fn annualized_volatility(&self) -> Result<f64> {
        self.annualized_volatility_over(Self::TRADING_DAYS_PER_YEAR)
    }

    /// Annualized volatility with an explicit number of periods per year.
    pub fn annualized_volatility_over(&self, periods_per_year: usize) -> Result<f64> {
        if periods_per_year == 0 {
            return Err(Error::InvalidOperation(
                "Periods per year must be positive".to_string(),
            ));
        }

        let log_returns = self.all_log_returns()?;
        if log_returns.is_empty() {
            return Ok(0.0);
        }

        let daily_volatility = stats::population_std(&log_returns);
        Ok(stats::annualize_volatility(daily_volatility, periods_per_year))
    }

    /// Summarize the series using [`Self::TRADING_DAYS_PER_YEAR`].
    pub fn summary(&self) -> Result<SeriesSummary> {
        self.summary_over(Self::TRADING_DAYS_PER_YEAR)
    }

    /// Summarize the series with an explicit annualization factor.
    pub fn summary_over(&self, periods_per_year: usize) -> Result<SeriesSummary> {
        Ok(SeriesSummary {
            name: self.name.clone(),
            length: self.len(),
            latest: self.latest(),
            total_return: self.total_return()?,
            annualized_volatility: self.annualized_volatility_over(periods_per_year)?,
            periods_per_year,
        })
    }

    /// Developer-oriented description, e.g. `PriceSeries("SPY", 3 values)`.
    pub fn describe(&self) -> String {
        format!("PriceSeries({:?}, {} values)", self.name, self.values.len())
    }
}

impl fmt::Display for PriceSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.latest() {
            Some(latest) => write!(f, "{}: {:.2} (latest)", self.name, latest),
            None => write!(f, "{}: empty", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> PriceSeries {
        PriceSeries::new([100.0, 110.0, 99.0], "X")
    }

    #[test]
    fn test_linear_returns() {
        let series = sample();
        assert_relative_eq!(series.linear_return(1).unwrap(), 0.10);
        assert_relative_eq!(series.linear_return(2).unwrap(), -0.10);
    }

    #[test]
    fn test_total_return() {
        assert_relative_eq!(sample().total_return().unwrap(), -0.01);
    }

    #[test]
    fn test_total_return_short_series() {
        assert_eq!(PriceSeries::unnamed(vec![]).total_return().unwrap(), 0.0);
        assert_eq!(PriceSeries::unnamed(vec![42.0]).total_return().unwrap(), 0.0);
    }

    #[test]
    fn test_total_return_zero_start() {
        let series = PriceSeries::unnamed(vec![0.0, 10.0]);
        assert!(matches!(
            series.total_return(),
            Err(Error::InvalidPrice { index: 0, .. })
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        let series = sample();
        assert!(matches!(
            series.linear_return(0),
            Err(Error::IndexOutOfRange { index: 0, len: 3 })
        ));
        assert!(matches!(
            series.log_return(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_zero_previous_price() {
        let series = PriceSeries::unnamed(vec![10.0, 0.0, 5.0]);
        assert!(matches!(
            series.linear_return(2),
            Err(Error::InvalidPrice { index: 1, price }) if price == 0.0
        ));
        assert!(matches!(
            series.log_return(2),
            Err(Error::InvalidPrice { index: 1, .. })
        ));
        // Going to zero is a valid -100% linear return but has no log return
        assert_relative_eq!(series.linear_return(1).unwrap(), -1.0);
        assert!(matches!(
            series.log_return(1),
            Err(Error::InvalidPrice { index: 1, .. })
        ));
    }

    #[test]
    fn test_negative_price_log_return() {
        let series = PriceSeries::unnamed(vec![10.0, -5.0]);
        assert!(matches!(
            series.log_return(1),
            Err(Error::InvalidPrice { index: 1, price }) if price == -5.0
        ));
        assert!(series.all_log_returns().is_err());
        assert!(series.annualized_volatility().is_err());
    }

    #[test]
    fn test_log_return_between_negative_prices() {
        // Ratio of two negative prices is positive, so the log return is defined
        let series = PriceSeries::unnamed(vec![-10.0, -5.0]);
        assert_relative_eq!(series.log_return(1).unwrap(), 0.5f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_log_return_matches_linear() {
        let series = sample();
        for t in 1..series.len() {
            let linear = series.linear_return(t).unwrap();
            let log = series.log_return(t).unwrap();
            assert_relative_eq!(log.exp(), 1.0 + linear, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_all_returns_length() {
        assert!(PriceSeries::unnamed(vec![]).all_linear_returns().unwrap().is_empty());
        assert!(PriceSeries::unnamed(vec![1.0]).all_log_returns().unwrap().is_empty());
        assert_eq!(sample().all_linear_returns().unwrap().len(), 2);
        assert_eq!(sample().all_log_returns().unwrap().len(), 2);
    }

    #[test]
    fn test_annualized_volatility() {
        let series = sample();
        let r1 = (1.1f64).ln();
        let r2 = (0.9f64).ln();
        // Population std of two values is half their distance
        let expected = ((r1 - r2) / 2.0).abs() * 252f64.sqrt();
        assert_relative_eq!(
            series.annualized_volatility().unwrap(),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_annualized_volatility_constant_series() {
        let series = PriceSeries::unnamed(vec![50.0; 10]);
        assert_eq!(series.annualized_volatility().unwrap(), 0.0);
    }

    #[test]
    fn test_annualized_volatility_no_returns() {
        assert_eq!(PriceSeries::unnamed(vec![]).annualized_volatility().unwrap(), 0.0);
        assert_eq!(PriceSeries::unnamed(vec![3.0]).annualized_volatility().unwrap(), 0.0);
    }

    #[test]
    fn test_annualized_volatility_over() {
        let series = sample();
        let equity = series.annualized_volatility().unwrap();
        let crypto = series.annualized_volatility_over(365).unwrap();
        assert_relative_eq!(crypto / equity, (365.0f64 / 252.0).sqrt(), epsilon = 1e-12);

        assert!(matches!(
            series.annualized_volatility_over(0),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_geometric_growth_has_no_volatility() {
        let values: Vec<f64> = (0..20).map(|i| 1.01f64.powi(i)).collect();
        let vol = PriceSeries::unnamed(values).annualized_volatility().unwrap();
        assert!(vol.abs() < 1e-10);
    }

    #[test]
    fn test_defensive_copy() {
        let mut prices = vec![1.0, 2.0, 3.0];
        let series = PriceSeries::new(prices.as_slice(), "copy");
        prices[0] = 100.0;
        assert_eq!(series.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_default_name() {
        assert_eq!(PriceSeries::unnamed(vec![1.0]).name(), "unnamed");
        assert_eq!(PriceSeries::default().name(), DEFAULT_SERIES_NAME);
        assert!(PriceSeries::default().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "X: 99.00 (latest)");
        assert_eq!(PriceSeries::new(vec![], "Y").to_string(), "Y: empty");
        assert_eq!(sample().describe(), "PriceSeries(\"X\", 3 values)");
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary().unwrap();
        assert_eq!(summary.name, "X");
        assert_eq!(summary.length, 3);
        assert_eq!(summary.latest, Some(99.0));
        assert_relative_eq!(summary.total_return, -0.01);
        assert_eq!(summary.periods_per_year, PriceSeries::TRADING_DAYS_PER_YEAR);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["length"], 3);
    }

    #[test]
    fn test_summary_empty_series() {
        let summary = PriceSeries::unnamed(vec![]).summary().unwrap();
        assert_eq!(summary.latest, None);
        assert_eq!(summary.total_return, 0.0);
        assert_eq!(summary.annualized_volatility, 0.0);
    }
}
