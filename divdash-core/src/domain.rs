//! Derived per-ticker records.
//!
//! A `TickerRecord` is built once by `derive::derive_record` and never
//! mutated afterwards; partitioning and export only borrow it.

use crate::data::Period;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Price, dividend, and total return over one trailing period, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReturn {
    pub price_return: f64,
    pub div_return: f64,
    pub total_return: f64,
}

/// Last observed close of a calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPrice {
    /// `YYYY-MM`
    pub date: String,
    pub price: f64,
}

/// One dividend payment as emitted to the simulator view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividendPoint {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Everything derived for one dividend-paying ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerRecord {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub price: f64,
    pub market_cap: u64,
    /// Normalized yield as a decimal (0.035 = 3.5%). Always > 0.
    pub dividend_yield: f64,
    pub dividend_rate: f64,
    /// Payout ratio as a fraction; None when absent or zero.
    pub payout_ratio: Option<f64>,
    /// One-year price return in percent, rounded to 2 dp.
    pub year_return: Option<f64>,
    pub total_returns: BTreeMap<Period, PeriodReturn>,
    /// Distinct calendar months (1-12) with historical payments, ascending.
    pub div_months: Vec<u32>,
    pub consec_increases: u32,
    pub monthly_prices: Vec<MonthlyPrice>,
    /// Most recent payments, oldest first.
    pub dividend_history: Vec<DividendPoint>,
}

impl TickerRecord {
    /// Yield in percent at output precision. This is the sort key for views.
    pub fn yield_percent(&self) -> f64 {
        crate::metrics::round_to(self.dividend_yield * 100.0, 2)
    }

    pub fn one_year_total_return(&self) -> Option<f64> {
        self.total_returns
            .get(&Period::OneYear)
            .map(|r| r.total_return)
    }
}
