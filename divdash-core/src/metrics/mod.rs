//! Pure metric functions over quote fields and price/dividend series.

pub mod dividends;
pub mod monthly;
pub mod returns;
pub mod yields;

pub use dividends::{annual_totals, consecutive_increases, dividend_history, dividend_months};
pub use monthly::monthly_closes;
pub use returns::{percent_change, period_return, year_return};
pub use yields::normalize_yield;

/// Round to `dp` decimal places.
///
/// Rounds the exact binary value, with exact ties going to the even digit:
/// 61.125 becomes 61.12, while 2.675 (stored just below the tie) becomes 2.67.
pub fn round_to(value: f64, dp: usize) -> f64 {
    format!("{value:.dp$}").parse().unwrap_or(value)
}
