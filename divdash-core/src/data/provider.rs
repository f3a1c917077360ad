//! Market data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over the quote/history source
//! (Yahoo Finance in production, in-memory fixtures in tests) so the
//! pipeline never talks HTTP directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Current quote fields for one symbol. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteFields {
    pub current_price: Option<f64>,
    pub regular_market_price: Option<f64>,
    pub dividend_rate: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub market_cap: Option<u64>,
    pub sector: Option<String>,
    pub short_name: Option<String>,
}

impl QuoteFields {
    /// Current price, falling back to the regular market price, then 0.
    pub fn effective_price(&self) -> f64 {
        self.current_price
            .filter(|p| *p > 0.0)
            .or(self.regular_market_price)
            .unwrap_or(0.0)
    }
}

/// One daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// One historical dividend payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividendPayment {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Trailing history window requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "3y")]
    ThreeYear,
    #[serde(rename = "5y")]
    FiveYear,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::OneYear, Period::ThreeYear, Period::FiveYear];

    pub fn label(self) -> &'static str {
        match self {
            Period::OneYear => "1y",
            Period::ThreeYear => "3y",
            Period::FiveYear => "5y",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("HTTP {status} for {symbol}")]
    HttpStatus { status: u16, symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for quote and history sources.
///
/// Implementations are called sequentially, one symbol at a time. Each call
/// is independent: a failure for one symbol or period says nothing about
/// the next.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the current quote fields for a symbol.
    fn quote(&self, symbol: &str) -> Result<QuoteFields, DataError>;

    /// Fetch daily closes for the trailing `period`, oldest first.
    fn closes(&self, symbol: &str, period: Period) -> Result<Vec<ClosePoint>, DataError>;

    /// Fetch the full dividend history, oldest first.
    fn dividends(&self, symbol: &str) -> Result<Vec<DividendPayment>, DataError>;
}
