//! Vestry Core - Price series returns and volatility library.
//!
//! This crate provides:
//!
//! - **Price series**: Ordered price history with linear/log returns
//! - **Volatility**: Annualized volatility from log returns (population variance)
//! - **Assets**: Ticker symbol paired with its owned price history
//! - **Config**: Environment-derived defaults for the CLI
//!
//! # Example
//!
//! ```rust
//! use vestry_core::{Asset, PriceSeries};
//!
//! let series = PriceSeries::new([100.0, 110.0, 99.0], "X");
//! assert!((series.linear_return(1).unwrap() - 0.10).abs() < 1e-12);
//! assert!((series.total_return().unwrap() + 0.01).abs() < 1e-12);
//!
//! let asset = Asset::new("aapl", series).unwrap();
//! assert_eq!(asset.ticker(), "AAPL");
//! assert_eq!(asset.to_string(), "AAPL: $99.00");
//! ```

pub mod asset;
pub mod config;
pub mod series;
pub mod types;

// Re-export commonly used types
pub use asset::Asset;
pub use config::Config;
pub use series::{PriceSeries, SeriesSummary};
pub use types::{ApiResponse, Currency};

/// Error types for vestry-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Ticker cannot be empty")]
    EmptyTicker,

    #[error("Price series cannot be empty")]
    EmptyPriceSeries,

    #[error("Index {index} out of range for series of length {len} (expected 1..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid price {price} at index {index}")]
    InvalidPrice { index: usize, price: f64 },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

impl Error {
    /// Whether this error was raised by input validation at construction time.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::EmptyTicker | Error::EmptyPriceSeries)
    }
}

/// Result type for vestry-core operations.
pub type Result<T> = std::result::Result<T, Error>;
