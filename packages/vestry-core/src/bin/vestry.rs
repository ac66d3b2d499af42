//! Vestry CLI - Command line interface for price series statistics.
//!
//! Prices are passed as a comma-separated argument; output is JSON on stdout.

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vestry_core::{ApiResponse, Asset, Config, Currency, PriceSeries};

#[derive(Parser)]
#[command(name = "vestry")]
#[command(about = "Vestry CLI - price series returns and volatility")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-step returns of a price series
    Returns {
        /// Comma-separated prices, earliest first
        #[arg(short, long, allow_hyphen_values = true)]
        prices: String,
        /// Series name
        #[arg(short, long)]
        name: Option<String>,
        /// Log returns instead of linear returns
        #[arg(long)]
        log: bool,
    },
    /// Annualized volatility of log returns
    Volatility {
        /// Comma-separated prices, earliest first
        #[arg(short, long, allow_hyphen_values = true)]
        prices: String,
        /// Periods per year (252 for equities, 365 for crypto)
        #[arg(long)]
        periods_per_year: Option<usize>,
    },
    /// Summary statistics of a price series
    Summary {
        /// Comma-separated prices, earliest first
        #[arg(short, long, allow_hyphen_values = true)]
        prices: String,
        /// Series name
        #[arg(short, long)]
        name: Option<String>,
        /// Periods per year (252 for equities, 365 for crypto)
        #[arg(long)]
        periods_per_year: Option<usize>,
    },
    /// Build an asset and show its current price
    Asset {
        /// Ticker symbol
        #[arg(short, long)]
        ticker: String,
        /// Comma-separated prices, earliest first
        #[arg(short, long, allow_hyphen_values = true)]
        prices: String,
        /// Sector classification
        #[arg(short, long)]
        sector: Option<String>,
        /// Quote currency code (e.g. USD, EUR)
        #[arg(short, long)]
        currency: Option<String>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let output = match Config::from_env() {
        Ok(config) => match cli.command {
            Commands::Returns { prices, name, log } => handle_returns(&config, &prices, name, log),
            Commands::Volatility {
                prices,
                periods_per_year,
            } => handle_volatility(&config, &prices, periods_per_year),
            Commands::Summary {
                prices,
                name,
                periods_per_year,
            } => handle_summary(&config, &prices, name, periods_per_year),
            Commands::Asset {
                ticker,
                prices,
                sector,
                currency,
            } => handle_asset(&config, &ticker, &prices, sector, currency),
        },
        Err(e) => error_response(e.to_string()),
    };

    println!("{}", output);
}

fn to_json<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize response: {}", e);
        format!("{{\"ok\":false,\"error\":\"{}\"}}", e)
    })
}

fn error_response(error: String) -> String {
    tracing::debug!("Command failed: {}", error);
    to_json(&ApiResponse::<()>::err(error))
}

fn respond<T: Serialize>(result: vestry_core::Result<T>) -> String {
    match result {
        Ok(data) => to_json(&ApiResponse::ok(data)),
        Err(e) => error_response(e.to_string()),
    }
}

/// Parse a comma-separated list of prices.
fn parse_prices(raw: &str) -> Result<Vec<f64>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<f64>() {
            Ok(price) if price.is_finite() => Ok(price),
            _ => Err(format!("Invalid price: {:?}", s)),
        })
        .collect()
}

fn build_series(config: &Config, raw: &str, name: Option<String>) -> Result<PriceSeries, String> {
    let values = parse_prices(raw)?;
    let name = name.unwrap_or_else(|| config.default_series_name.clone());
    Ok(PriceSeries::new(values, name))
}

fn handle_returns(config: &Config, prices: &str, name: Option<String>, log: bool) -> String {
    let series = match build_series(config, prices, name) {
        Ok(series) => series,
        Err(e) => return error_response(e),
    };

    let returns = if log {
        series.all_log_returns()
    } else {
        series.all_linear_returns()
    };

    respond(returns.map(|returns| {
        json!({
            "name": series.name(),
            "kind": if log { "log" } else { "linear" },
            "returns": returns,
        })
    }))
}

fn handle_volatility(config: &Config, prices: &str, periods_per_year: Option<usize>) -> String {
    let series = match build_series(config, prices, None) {
        Ok(series) => series,
        Err(e) => return error_response(e),
    };
    let periods = periods_per_year.unwrap_or(config.periods_per_year);

    respond(series.annualized_volatility_over(periods).map(|volatility| {
        json!({
            "annualized_volatility": volatility,
            "periods_per_year": periods,
        })
    }))
}

fn handle_summary(
    config: &Config,
    prices: &str,
    name: Option<String>,
    periods_per_year: Option<usize>,
) -> String {
    let series = match build_series(config, prices, name) {
        Ok(series) => series,
        Err(e) => return error_response(e),
    };
    let periods = periods_per_year.unwrap_or(config.periods_per_year);

    respond(series.summary_over(periods))
}

fn handle_asset(
    config: &Config,
    ticker: &str,
    prices: &str,
    sector: Option<String>,
    currency: Option<String>,
) -> String {
    let series = match build_series(config, prices, Some(ticker.trim().to_uppercase())) {
        Ok(series) => series,
        Err(e) => return error_response(e),
    };

    let currency = match currency {
        Some(code) => match code.parse::<Currency>() {
            Ok(currency) => currency,
            Err(e) => return error_response(e.to_string()),
        },
        None => config.default_currency,
    };

    let asset = match Asset::new(ticker, series) {
        Ok(asset) => asset.with_currency(currency),
        Err(e) => return error_response(e.to_string()),
    };
    let asset = match sector {
        Some(sector) => asset.with_sector(sector),
        None => asset,
    };

    respond(asset.current_price().map(|current_price| {
        json!({
            "ticker": asset.ticker(),
            "sector": asset.sector(),
            "currency": asset.currency(),
            "current_price": current_price,
            "display": asset.to_string(),
            "prices": asset.prices().len(),
        })
    }))
}
