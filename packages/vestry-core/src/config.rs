//! Environment-derived defaults.
//!
//! Overrides:
//!
//! - `VESTRY_PERIODS_PER_YEAR`: annualization factor (default 252)
//! - `VESTRY_DEFAULT_CURRENCY`: quote currency for new assets (default USD)
//! - `VESTRY_SERIES_NAME`: name for series created without one (default "unnamed")

use crate::series::{PriceSeries, DEFAULT_SERIES_NAME};
use crate::types::Currency;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const PERIODS_PER_YEAR_VAR: &str = "VESTRY_PERIODS_PER_YEAR";
pub const DEFAULT_CURRENCY_VAR: &str = "VESTRY_DEFAULT_CURRENCY";
pub const SERIES_NAME_VAR: &str = "VESTRY_SERIES_NAME";

/// Defaults applied when a caller does not specify a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Periods per year used to annualize volatility
    pub periods_per_year: usize,
    /// Currency assigned to new assets
    pub default_currency: Currency,
    /// Name given to unnamed series
    pub default_series_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            periods_per_year: PriceSeries::TRADING_DAYS_PER_YEAR,
            default_currency: Currency::default(),
            default_series_name: DEFAULT_SERIES_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(PERIODS_PER_YEAR_VAR) {
            config.periods_per_year = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(Error::InvalidOperation(format!(
                        "{} must be a positive integer, got {:?}",
                        PERIODS_PER_YEAR_VAR, raw
                    )))
                }
            };
        }

        if let Some(raw) = lookup(DEFAULT_CURRENCY_VAR) {
            config.default_currency = raw.parse()?;
        }

        if let Some(raw) = lookup(SERIES_NAME_VAR) {
            let name = raw.trim();
            if !name.is_empty() {
                config.default_series_name = name.to_string();
            }
        }

        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }
}
