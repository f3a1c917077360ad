//! Trailing price and total returns.

use super::round_to;
use crate::data::{ClosePoint, DividendPayment};
use crate::domain::PeriodReturn;

/// Percent change from `first` to `last`. None when `first` is not positive.
pub fn percent_change(first: f64, last: f64) -> Option<f64> {
    if first > 0.0 {
        Some((last - first) / first * 100.0)
    } else {
        None
    }
}

fn endpoints(series: &[ClosePoint]) -> Option<(&ClosePoint, &ClosePoint)> {
    if series.len() < 2 {
        return None;
    }
    Some((series.first()?, series.last()?))
}

/// One-year price return in percent (2 dp); None with fewer than 2 closes.
pub fn year_return(series: &[ClosePoint]) -> Option<f64> {
    let (first, last) = endpoints(series)?;
    percent_change(first.close, last.close).map(|r| round_to(r, 2))
}

/// Price, dividend, and total return over the span of `series`.
///
/// Dividends count when their date falls within the first..=last close
/// date. Each component is rounded to 2 dp; the total is summed before
/// rounding.
pub fn period_return(series: &[ClosePoint], dividends: &[DividendPayment]) -> Option<PeriodReturn> {
    let (first, last) = endpoints(series)?;
    let price_return = percent_change(first.close, last.close)?;

    let div_sum: f64 = dividends
        .iter()
        .filter(|d| d.date >= first.date && d.date <= last.date)
        .map(|d| d.amount)
        .sum();
    let div_return = div_sum / first.close * 100.0;

    Some(PeriodReturn {
        price_return: round_to(price_return, 2),
        div_return: round_to(div_return, 2),
        total_return: round_to(price_return + div_return, 2),
    })
}
