//! JSON export of the dashboard views.
//!
//! Each view is rendered and written on its own. A failure in one view is
//! recorded in the `EmitReport` and the remaining views are still attempted.
//! Every document carries a top-level `updated` stamp (`YYYY-MM-DD HH:MM`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{error, info};
use serde::Serialize;
use thiserror::Error;

use divdash_core::data::Period;
use divdash_core::metrics::round_to;
use divdash_core::{DividendPoint, MonthlyPrice, PeriodReturn, TickerRecord};

use crate::partition::{View, Views};

/// strftime format of the `updated` field.
pub const UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize {view} view: {source}")]
    Serialize {
        view: &'static str,
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Local wall-clock time in the `updated` format.
pub fn timestamp_now() -> String {
    chrono::Local::now().format(UPDATED_FORMAT).to_string()
}

// ─── document shapes ────────────────────────────────────────────────

/// One stock as the dashboards consume it. Percent fields are pre-scaled.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRow<'a> {
    pub ticker: &'a str,
    pub name: &'a str,
    pub price: f64,
    pub dividend_yield: f64,
    pub dividend_rate: f64,
    pub payout_ratio: Option<f64>,
    pub market_cap: u64,
    pub sector: &'a str,
    pub year_return: Option<f64>,
    pub div_months: &'a [u32],
    pub consec_increases: u32,
    pub total_returns: &'a BTreeMap<Period, PeriodReturn>,
}

impl<'a> From<&'a TickerRecord> for StockRow<'a> {
    fn from(r: &'a TickerRecord) -> Self {
        Self {
            ticker: &r.symbol,
            name: &r.name,
            price: r.price,
            dividend_yield: r.yield_percent(),
            dividend_rate: r.dividend_rate,
            payout_ratio: r.payout_ratio.map(|p| round_to(p * 100.0, 1)),
            market_cap: r.market_cap,
            sector: &r.sector,
            year_return: r.year_return,
            div_months: &r.div_months,
            consec_increases: r.consec_increases,
            total_returns: &r.total_returns,
        }
    }
}

fn rows<'a>(records: &[&'a TickerRecord]) -> Vec<StockRow<'a>> {
    records.iter().map(|r| StockRow::from(*r)).collect()
}

#[derive(Debug, Serialize)]
struct TopYieldDoc<'a> {
    updated: &'a str,
    count: usize,
    stocks: Vec<StockRow<'a>>,
}

#[derive(Debug, Serialize)]
struct StocksDoc<'a> {
    updated: &'a str,
    stocks: Vec<StockRow<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRow<'a> {
    monthly_prices: &'a [MonthlyPrice],
    dividends: &'a [DividendPoint],
}

#[derive(Debug, Serialize)]
struct SimulatorDoc<'a> {
    updated: &'a str,
    histories: BTreeMap<&'a str, HistoryRow<'a>>,
    tickers: Vec<&'a str>,
    names: BTreeMap<&'a str, &'a str>,
}

fn simulator_doc<'a>(views: &Views<'a>, updated: &'a str) -> SimulatorDoc<'a> {
    let all = &views.by_yield;
    SimulatorDoc {
        updated,
        histories: all
            .iter()
            .map(|&r| {
                (
                    r.symbol.as_str(),
                    HistoryRow {
                        monthly_prices: &r.monthly_prices,
                        dividends: &r.dividend_history,
                    },
                )
            })
            .collect(),
        tickers: all.iter().map(|&r| r.symbol.as_str()).collect(),
        names: all
            .iter()
            .map(|&r| (r.symbol.as_str(), r.name.as_str()))
            .collect(),
    }
}

// ─── rendering and writing ──────────────────────────────────────────

/// Render one view as pretty JSON.
pub fn render_view(view: View, views: &Views<'_>, updated: &str) -> Result<String, ExportError> {
    let result = match view {
        View::TopYield => serde_json::to_string_pretty(&TopYieldDoc {
            updated,
            count: views.top_yield.len(),
            stocks: rows(&views.top_yield),
        }),
        View::Scatter => serde_json::to_string_pretty(&StocksDoc {
            updated,
            stocks: rows(&views.scatter),
        }),
        View::ReturnsRanked => serde_json::to_string_pretty(&StocksDoc {
            updated,
            stocks: rows(&views.returns_ranked),
        }),
        View::Simulator => serde_json::to_string_pretty(&simulator_doc(views, updated)),
        View::Calendar => serde_json::to_string_pretty(&StocksDoc {
            updated,
            stocks: rows(&views.calendar),
        }),
    };
    result.map_err(|source| ExportError::Serialize {
        view: view.name(),
        source,
    })
}

/// Render and write one view into `output_dir`, returning the file path.
pub fn write_view(
    view: View,
    views: &Views<'_>,
    output_dir: &Path,
    updated: &str,
) -> Result<PathBuf, ExportError> {
    let json = render_view(view, views, updated)?;
    std::fs::create_dir_all(output_dir).map_err(|source| ExportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let path = output_dir.join(view.file_name());
    std::fs::write(&path, json).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Outcome of writing every view.
#[derive(Debug, Default)]
pub struct EmitReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(View, ExportError)>,
}

impl EmitReport {
    pub fn all_written(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write all five views. Never stops early.
pub fn emit_all(views: &Views<'_>, output_dir: &Path, updated: &str) -> EmitReport {
    let mut report = EmitReport::default();
    for view in View::ALL {
        match write_view(view, views, output_dir, updated) {
            Ok(path) => {
                info!("wrote {} view to {}", view.name(), path.display());
                report.written.push(path);
            }
            Err(e) => {
                error!("{e}");
                report.failed.push((view, e));
            }
        }
    }
    report
}
