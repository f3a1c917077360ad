//! Month-end resampling of daily closes.

use super::round_to;
use crate::data::ClosePoint;
use crate::domain::MonthlyPrice;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Last observed close per calendar month, oldest month first.
///
/// Months without any close are absent rather than filled.
pub fn monthly_closes(series: &[ClosePoint]) -> Vec<MonthlyPrice> {
    let mut last: BTreeMap<(i32, u32), (NaiveDate, f64)> = BTreeMap::new();
    for p in series.iter().filter(|p| p.close.is_finite()) {
        let key = (p.date.year(), p.date.month());
        match last.get(&key) {
            Some((seen, _)) if *seen > p.date => {}
            _ => {
                last.insert(key, (p.date, p.close));
            }
        }
    }

    last.into_iter()
        .map(|((year, month), (_, close))| MonthlyPrice {
            date: format!("{year:04}-{month:02}"),
            price: round_to(close, 2),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(y: i32, m: u32, d: u32, close: f64) -> ClosePoint {
        ClosePoint {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            close,
        }
    }

    #[test]
    fn takes_last_close_of_each_month() {
        let series = [
            close(2024, 1, 2, 10.0),
            close(2024, 1, 31, 11.234),
            close(2024, 2, 1, 12.0),
            close(2024, 2, 29, 12.5),
        ];
        let m = monthly_closes(&series);
        assert_eq!(
            m,
            vec![
                MonthlyPrice { date: "2024-01".into(), price: 11.23 },
                MonthlyPrice { date: "2024-02".into(), price: 12.5 },
            ]
        );
    }

    #[test]
    fn gaps_are_dropped() {
        let series = [close(2023, 11, 30, 5.0), close(2024, 2, 1, 6.0)];
        let m = monthly_closes(&series);
        assert_eq!(m.len(), 2);
        assert_eq!(m[0].date, "2023-11");
        assert_eq!(m[1].date, "2024-02");
    }

    #[test]
    fn empty_series_is_empty() {
        assert!(monthly_closes(&[]).is_empty());
    }

    #[test]
    fn later_date_wins_regardless_of_input_order() {
        let series = [close(2024, 3, 28, 9.0), close(2024, 3, 5, 7.0)];
        assert_eq!(monthly_closes(&series)[0].price, 9.0);
    }
}
