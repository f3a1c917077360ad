//! Partition the collected records into dashboard views.
//!
//! All views borrow from the same slice of records. The yield-descending
//! order is computed once and reused; sorts are stable, so ties keep
//! processing order.

use divdash_core::TickerRecord;

/// Stand-in 1y total return for records without one; below any real return.
pub const RETURN_SENTINEL: f64 = -999.0;

/// Default size of the top-yield view.
pub const DEFAULT_TOP_YIELD_LIMIT: usize = 30;

/// The five output views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    TopYield,
    Scatter,
    ReturnsRanked,
    Simulator,
    Calendar,
}

impl View {
    pub const ALL: [View; 5] = [
        View::TopYield,
        View::Scatter,
        View::ReturnsRanked,
        View::Simulator,
        View::Calendar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            View::TopYield => "top-yield",
            View::Scatter => "scatter",
            View::ReturnsRanked => "returns-ranked",
            View::Simulator => "simulator",
            View::Calendar => "calendar",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            View::TopYield => "dividend_data.json",
            View::Scatter => "scatter_data.json",
            View::ReturnsRanked => "total_return_data.json",
            View::Simulator => "simulator_data.json",
            View::Calendar => "calendar_data.json",
        }
    }
}

/// Borrowed record lists, one per view.
#[derive(Debug, Clone)]
pub struct Views<'a> {
    /// Every record, yield descending. The simulator view is built from this.
    pub by_yield: Vec<&'a TickerRecord>,
    pub top_yield: Vec<&'a TickerRecord>,
    pub scatter: Vec<&'a TickerRecord>,
    pub returns_ranked: Vec<&'a TickerRecord>,
    pub calendar: Vec<&'a TickerRecord>,
}

/// Records sorted by output yield percent, descending, stable.
pub fn sort_by_yield(records: &[TickerRecord]) -> Vec<&TickerRecord> {
    let mut sorted: Vec<&TickerRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.yield_percent().total_cmp(&a.yield_percent()));
    sorted
}

fn one_year_rank_key(record: &TickerRecord) -> f64 {
    record.one_year_total_return().unwrap_or(RETURN_SENTINEL)
}

pub fn partition(records: &[TickerRecord], top_yield_limit: usize) -> Views<'_> {
    let by_yield = sort_by_yield(records);

    let top_yield = by_yield.iter().take(top_yield_limit).copied().collect();

    let scatter = by_yield
        .iter()
        .filter(|r| r.year_return.is_some())
        .copied()
        .collect();

    let mut returns_ranked: Vec<&TickerRecord> = by_yield
        .iter()
        .filter(|r| !r.total_returns.is_empty())
        .copied()
        .collect();
    returns_ranked.sort_by(|a, b| one_year_rank_key(b).total_cmp(&one_year_rank_key(a)));

    let calendar = by_yield
        .iter()
        .filter(|r| !r.div_months.is_empty())
        .copied()
        .collect();

    Views {
        by_yield,
        top_yield,
        scatter,
        returns_ranked,
        calendar,
    }
}
