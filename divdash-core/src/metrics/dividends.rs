//! Dividend calendar, growth streak, and payment history.

use super::round_to;
use crate::data::DividendPayment;
use crate::domain::DividendPoint;
use chrono::Datelike;
use std::collections::{BTreeMap, BTreeSet};

/// Distinct calendar months (1-12) with at least one payment, ascending.
pub fn dividend_months(payments: &[DividendPayment]) -> Vec<u32> {
    payments
        .iter()
        .map(|p| p.date.month())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sum of payments per calendar year.
pub fn annual_totals(payments: &[DividendPayment]) -> BTreeMap<i32, f64> {
    let mut totals = BTreeMap::new();
    for p in payments {
        *totals.entry(p.date.year()).or_insert(0.0) += p.amount;
    }
    totals
}

/// Count of consecutive year-over-year increases, walking back from the
/// most recent pair of years and stopping at the first non-increase.
///
/// The most recent year is taken as-is, even when it is still in progress.
pub fn consecutive_increases(totals: &BTreeMap<i32, f64>) -> u32 {
    let values: Vec<f64> = totals.values().copied().collect();
    values
        .windows(2)
        .rev()
        .take_while(|pair| pair[1] > pair[0])
        .count() as u32
}

/// Payments as (date, amount at 4 dp), keeping the most recent `limit`.
pub fn dividend_history(payments: &[DividendPayment], limit: usize) -> Vec<DividendPoint> {
    let skip = payments.len().saturating_sub(limit);
    payments
        .iter()
        .skip(skip)
        .map(|p| DividendPoint {
            date: p.date,
            amount: round_to(p.amount, 4),
        })
        .collect()
}
