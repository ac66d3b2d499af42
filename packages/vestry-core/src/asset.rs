//! Financial asset: a ticker symbol owning its price history.

use crate::series::PriceSeries;
use crate::types::Currency;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A financial asset with its price history.
///
/// The asset owns its [`PriceSeries`]; constructing one moves the series in.
/// Deserialization goes through [`Asset::new`], so the same checks apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AssetRepr")]
pub struct Asset {
    /// Ticker symbol (uppercase)
    ticker: String,
    /// Price history
    prices: PriceSeries,
    /// Optional sector classification
    #[serde(skip_serializing_if = "Option::is_none")]
    sector: Option<String>,
    /// Currency the prices are quoted in
    currency: Currency,
}

/// Unvalidated wire form of an [`Asset`].
#[derive(Deserialize)]
struct AssetRepr {
    ticker: String,
    prices: PriceSeries,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    currency: Currency,
}

impl TryFrom<AssetRepr> for Asset {
    type Error = Error;

    fn try_from(repr: AssetRepr) -> Result<Self> {
        let asset = Asset::new(&repr.ticker, repr.prices)?.with_currency(repr.currency);
        Ok(match repr.sector {
            Some(sector) => asset.with_sector(sector),
            None => asset,
        })
    }
}

impl Asset {
    /// Create an asset, validating the ticker and the price history.
    ///
    /// Leading and trailing whitespace is stripped from the ticker before it is
    /// uppercased, so `" aapl "` becomes `"AAPL"`. Currency defaults to USD.
    ///
    /// # Errors
    ///
    /// `EmptyTicker` if the ticker is blank, `EmptyPriceSeries` if there are no prices.
    pub fn new(ticker: &str, prices: PriceSeries) -> Result<Self> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(Error::EmptyTicker);
        }
        if prices.is_empty() {
            return Err(Error::EmptyPriceSeries);
        }

        let asset = Self {
            ticker: ticker.to_uppercase(),
            prices,
            sector: None,
            currency: Currency::default(),
        };
        tracing::debug!("Created {}", asset.describe());
        Ok(asset)
    }

    /// Set the sector classification.
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Set the quote currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn prices(&self) -> &PriceSeries {
        &self.prices
    }

    pub fn sector(&self) -> Option<&str> {
        self.sector.as_deref()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Consume the asset, returning its price history.
    pub fn into_prices(self) -> PriceSeries {
        self.prices
    }

    /// Most recent price.
    pub fn current_price(&self) -> Result<f64> {
        self.prices.latest().ok_or(Error::EmptyPriceSeries)
    }

    /// Developer-oriented description, e.g. `Asset("AAPL", 3 prices)`.
    pub fn describe(&self) -> String {
        format!("Asset({:?}, {} prices)", self.ticker, self.prices.len())
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current_price() {
            Ok(price) => write!(f, "{}: ${:.2}", self.ticker, price),
            Err(_) => write!(f, "{}: no prices", self.ticker),
        }
    }
}
