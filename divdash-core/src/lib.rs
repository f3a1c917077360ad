//! divdash core: market data access and dividend metric derivation.
//!
//! This crate contains:
//! - The `MarketDataProvider` trait and the Yahoo Finance implementation
//! - The ordered ticker universe
//! - Pure metric functions (yield normalization, returns, streaks, resampling)
//! - `derive_record`, which turns one ticker's raw data into a `TickerRecord`

pub mod data;
pub mod derive;
pub mod domain;
pub mod metrics;

pub use derive::{derive_record, TickerSnapshot, DEFAULT_HISTORY_LIMIT};
pub use domain::{DividendPoint, MonthlyPrice, PeriodReturn, TickerRecord};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: records and provider types cross thread boundaries.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<TickerRecord>();
        require_sync::<TickerRecord>();
        require_send::<data::QuoteFields>();
        require_sync::<data::QuoteFields>();
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<data::Universe>();
        require_sync::<data::Universe>();
    }
}
