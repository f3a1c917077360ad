//! Dividend yield normalization.
//!
//! Providers disagree on whether `dividendYield` is a fraction or a percent,
//! so the yield is recomputed from rate and price whenever both are usable.

use crate::data::QuoteFields;

/// Reported yields above this are assumed to be expressed in percent.
pub const PERCENT_YIELD_THRESHOLD: f64 = 0.20;

/// Normalized yield as a decimal. A result <= 0 means the ticker is excluded.
pub fn normalize_yield(quote: &QuoteFields) -> f64 {
    let rate = quote.dividend_rate.unwrap_or(0.0);
    let price = quote.effective_price();
    let reported = quote.dividend_yield.unwrap_or(0.0);

    if rate > 0.0 && price > 0.0 {
        rate / price
    } else if reported > PERCENT_YIELD_THRESHOLD {
        reported / 100.0
    } else {
        reported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn quote(rate: Option<f64>, price: Option<f64>, reported: Option<f64>) -> QuoteFields {
        QuoteFields {
            current_price: price,
            dividend_rate: rate,
            dividend_yield: reported,
            ..Default::default()
        }
    }

    #[test]
    fn rate_over_price_wins() {
        let q = quote(Some(3.96), Some(110.0), Some(3.4));
        assert_eq!(normalize_yield(&q), 3.96 / 110.0);
    }

    #[test]
    fn percent_style_yield_is_scaled_down() {
        assert_eq!(normalize_yield(&quote(None, Some(50.0), Some(0.25))), 0.0025);
        assert_eq!(normalize_yield(&quote(Some(1.0), None, Some(0.25))), 0.0025);
    }

    #[test]
    fn small_reported_yield_is_kept() {
        assert_eq!(normalize_yield(&quote(None, None, Some(0.031))), 0.031);
        assert_eq!(normalize_yield(&quote(None, None, Some(0.20))), 0.20);
    }

    #[test]
    fn missing_everything_is_zero() {
        assert_eq!(normalize_yield(&QuoteFields::default()), 0.0);
    }

    #[test]
    fn uses_regular_market_price_fallback() {
        let q = QuoteFields {
            regular_market_price: Some(40.0),
            dividend_rate: Some(2.0),
            ..Default::default()
        };
        assert_eq!(normalize_yield(&q), 0.05);
    }

    proptest! {
        #[test]
        fn positive_rate_and_price_give_exact_ratio(
            rate in 0.01..20.0_f64,
            price in 1.0..1000.0_f64,
            reported in proptest::option::of(0.0..50.0_f64),
        ) {
            let q = quote(Some(rate), Some(price), reported);
            prop_assert_eq!(normalize_yield(&q), rate / price);
        }
    }
}
