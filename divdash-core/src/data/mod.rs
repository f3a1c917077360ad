//! Market data access: provider trait, Yahoo implementation, ticker universe.

pub mod provider;
pub mod universe;
pub mod yahoo;

pub use provider::{ClosePoint, DataError, DividendPayment, MarketDataProvider, Period, QuoteFields};
pub use universe::Universe;
pub use yahoo::{YahooProvider, DEFAULT_BASE_URL, DEFAULT_SESSION_URL};
