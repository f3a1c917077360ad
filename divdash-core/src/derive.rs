//! Per-ticker derivation: raw fetch results in, one `TickerRecord` out.

use crate::data::{ClosePoint, DataError, DividendPayment, Period, QuoteFields};
use crate::domain::TickerRecord;
use crate::metrics::{self, round_to};
use log::warn;
use std::collections::BTreeMap;

/// Default number of dividend payments kept in the history payload.
pub const DEFAULT_HISTORY_LIMIT: usize = 60;

/// Everything fetched for one ticker.
///
/// Each period's series is fetched independently, so each carries its own
/// result; a failed period only loses that period's metrics.
#[derive(Debug)]
pub struct TickerSnapshot {
    pub quote: QuoteFields,
    pub dividends: Vec<DividendPayment>,
    pub series: BTreeMap<Period, Result<Vec<ClosePoint>, DataError>>,
}

impl TickerSnapshot {
    /// Successfully fetched series for `period`, if any.
    pub fn closes(&self, period: Period) -> Option<&[ClosePoint]> {
        match self.series.get(&period) {
            Some(Ok(points)) => Some(points.as_slice()),
            _ => None,
        }
    }
}

/// Derive a record, or None when the normalized yield is not positive.
pub fn derive_record(
    symbol: &str,
    snapshot: &TickerSnapshot,
    history_limit: usize,
) -> Option<TickerRecord> {
    let quote = &snapshot.quote;
    let dividend_yield = metrics::normalize_yield(quote);
    if dividend_yield <= 0.0 {
        return None;
    }

    for (period, result) in &snapshot.series {
        if let Err(e) = result {
            warn!("{symbol}: {period} history unavailable: {e}");
        }
    }

    let dividends = &snapshot.dividends;
    let year_return = snapshot
        .closes(Period::OneYear)
        .and_then(metrics::year_return);

    let total_returns: BTreeMap<Period, _> = Period::ALL
        .iter()
        .filter_map(|&period| {
            let series = snapshot.closes(period)?;
            metrics::period_return(series, dividends).map(|r| (period, r))
        })
        .collect();

    let monthly_prices = snapshot
        .closes(Period::FiveYear)
        .map(metrics::monthly_closes)
        .unwrap_or_default();

    Some(TickerRecord {
        symbol: symbol.to_string(),
        name: quote
            .short_name
            .clone()
            .unwrap_or_else(|| symbol.to_string()),
        sector: quote.sector.clone().unwrap_or_else(|| "N/A".to_string()),
        price: round_to(quote.effective_price(), 2),
        market_cap: quote.market_cap.unwrap_or(0),
        dividend_yield,
        dividend_rate: round_to(quote.dividend_rate.unwrap_or(0.0), 2),
        payout_ratio: quote.payout_ratio.filter(|r| *r != 0.0),
        year_return,
        total_returns,
        div_months: metrics::dividend_months(dividends),
        consec_increases: metrics::consecutive_increases(&metrics::annual_totals(dividends)),
        monthly_prices,
        dividend_history: metrics::dividend_history(dividends, history_limit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(points: &[(NaiveDate, f64)]) -> Vec<ClosePoint> {
        points
            .iter()
            .map(|&(date, close)| ClosePoint { date, close })
            .collect()
    }

    fn snapshot() -> TickerSnapshot {
        let y1 = series(&[(d(2023, 10, 2), 100.0), (d(2024, 9, 30), 110.0)]);
        let y3 = series(&[(d(2021, 10, 1), 80.0), (d(2024, 9, 30), 110.0)]);
        let y5 = series(&[
            (d(2019, 10, 1), 70.0),
            (d(2019, 10, 31), 72.0),
            (d(2024, 9, 30), 110.0),
        ]);
        TickerSnapshot {
            quote: QuoteFields {
                current_price: Some(110.0),
                dividend_rate: Some(4.4),
                payout_ratio: Some(0.65),
                market_cap: Some(1_000_000),
                sector: Some("Utilities".into()),
                short_name: Some("Example Power".into()),
                ..Default::default()
            },
            dividends: vec![
                DividendPayment { date: d(2022, 12, 15), amount: 1.0 },
                DividendPayment { date: d(2023, 12, 15), amount: 1.0 },
                DividendPayment { date: d(2024, 6, 14), amount: 1.2 },
            ],
            series: BTreeMap::from([
                (Period::OneYear, Ok(y1)),
                (Period::ThreeYear, Ok(y3)),
                (Period::FiveYear, Ok(y5)),
            ]),
        }
    }

    #[test]
    fn derives_full_record() {
        let r = derive_record("EXP", &snapshot(), DEFAULT_HISTORY_LIMIT).unwrap();
        assert_eq!(r.name, "Example Power");
        assert_eq!(r.dividend_yield, 4.4 / 110.0);
        assert_eq!(r.yield_percent(), 4.0);
        assert_eq!(r.year_return, Some(10.0));
        assert_eq!(r.total_returns.len(), 3);
        let y1 = r.total_returns[&Period::OneYear];
        assert_eq!(y1.price_return, 10.0);
        assert_eq!(y1.div_return, 2.2);
        assert_eq!(y1.total_return, 12.2);
        assert_eq!(r.div_months, vec![6, 12]);
        // 2023: 1.0 vs 2022: 1.0 is flat, 2024: 1.2 beats 2023
        assert_eq!(r.consec_increases, 1);
        assert_eq!(r.monthly_prices.len(), 2);
        assert_eq!(r.monthly_prices[0].date, "2019-10");
        assert_eq!(r.monthly_prices[0].price, 72.0);
        assert_eq!(r.dividend_history.len(), 3);
    }

    #[test]
    fn non_positive_yield_is_excluded() {
        let mut s = snapshot();
        s.quote.dividend_rate = None;
        s.quote.dividend_yield = Some(0.0);
        assert!(derive_record("EXP", &s, DEFAULT_HISTORY_LIMIT).is_none());
    }

    #[test]
    fn failed_period_only_drops_that_period() {
        let mut s = snapshot();
        s.series.insert(
            Period::ThreeYear,
            Err(DataError::Other("connection reset".into())),
        );
        let r = derive_record("EXP", &s, DEFAULT_HISTORY_LIMIT).unwrap();
        assert!(r.total_returns.contains_key(&Period::OneYear));
        assert!(!r.total_returns.contains_key(&Period::ThreeYear));
        assert!(r.total_returns.contains_key(&Period::FiveYear));
        assert_eq!(r.year_return, Some(10.0));
    }

    #[test]
    fn failed_one_year_series_nulls_year_return() {
        let mut s = snapshot();
        s.series.insert(Period::OneYear, Err(DataError::RateLimited));
        let r = derive_record("EXP", &s, DEFAULT_HISTORY_LIMIT).unwrap();
        assert_eq!(r.year_return, None);
        assert_eq!(r.one_year_total_return(), None);
    }

    #[test]
    fn missing_quote_fields_get_defaults() {
        let mut s = snapshot();
        s.quote.short_name = None;
        s.quote.sector = None;
        s.quote.market_cap = None;
        s.quote.payout_ratio = Some(0.0);
        let r = derive_record("EXP", &s, DEFAULT_HISTORY_LIMIT).unwrap();
        assert_eq!(r.name, "EXP");
        assert_eq!(r.sector, "N/A");
        assert_eq!(r.market_cap, 0);
        assert_eq!(r.payout_ratio, None);
    }
}
