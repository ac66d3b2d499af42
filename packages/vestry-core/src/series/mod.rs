//! Price series module.
//!
//! Provides the price history type along with return and volatility statistics.

mod price_series;
pub mod stats;

pub use price_series::{PriceSeries, SeriesSummary, DEFAULT_SERIES_NAME};
pub use stats::{annualize_volatility, mean, population_std, population_variance};
