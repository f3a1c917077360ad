//! Fetch → derive → collect, one ticker at a time.
//!
//! The loop is strictly sequential with a fixed pause between tickers. A
//! ticker that fails at any step is recorded as skipped with its reason and
//! the loop moves on; nothing a single ticker does can end the run.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, warn};

use divdash_core::data::{DataError, MarketDataProvider, Period};
use divdash_core::metrics::normalize_yield;
use divdash_core::{derive_record, TickerRecord, TickerSnapshot};

use crate::config::PipelineConfig;
use crate::progress::PipelineProgress;

/// Why a ticker produced no record.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Normalized yield was zero or negative; not a dividend payer.
    NonPositiveYield,
    /// Fetching the quote or dividend history failed.
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NonPositiveYield => f.write_str("no positive dividend yield"),
            SkipReason::Failed(msg) => f.write_str(msg),
        }
    }
}

/// Result of processing a single ticker.
#[derive(Debug, Clone)]
pub enum TickerOutcome {
    Collected(TickerRecord),
    Skipped { symbol: String, reason: SkipReason },
}

impl TickerOutcome {
    fn failed(symbol: &str, err: DataError) -> Self {
        TickerOutcome::Skipped {
            symbol: symbol.to_string(),
            reason: SkipReason::Failed(err.to_string()),
        }
    }

    fn excluded(symbol: &str) -> Self {
        TickerOutcome::Skipped {
            symbol: symbol.to_string(),
            reason: SkipReason::NonPositiveYield,
        }
    }
}

/// Everything collected over one run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub total: usize,
    pub records: Vec<TickerRecord>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl RunSummary {
    pub fn collected(&self) -> usize {
        self.records.len()
    }

    /// Tickers lost to fetch errors (as opposed to excluded for yield).
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.skipped.iter().filter_map(|(sym, reason)| match reason {
            SkipReason::Failed(msg) => Some((sym.as_str(), msg.as_str())),
            SkipReason::NonPositiveYield => None,
        })
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn excluded_count(&self) -> usize {
        self.skipped.len() - self.failed_count()
    }

    fn push(&mut self, outcome: TickerOutcome) {
        match outcome {
            TickerOutcome::Collected(record) => self.records.push(record),
            TickerOutcome::Skipped { symbol, reason } => self.skipped.push((symbol, reason)),
        }
    }
}

/// Fetch and derive one ticker.
///
/// The yield is checked right after the quote so non-payers cost a single
/// request. Quote and dividend failures skip the ticker; a failed price
/// series only loses that period.
pub fn process_ticker(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    history_limit: usize,
) -> TickerOutcome {
    let quote = match provider.quote(symbol) {
        Ok(q) => q,
        Err(e) => return TickerOutcome::failed(symbol, e),
    };
    if normalize_yield(&quote) <= 0.0 {
        return TickerOutcome::excluded(symbol);
    }

    let dividends = match provider.dividends(symbol) {
        Ok(d) => d,
        Err(e) => return TickerOutcome::failed(symbol, e),
    };

    let series: BTreeMap<Period, _> = Period::ALL
        .iter()
        .map(|&period| (period, provider.closes(symbol, period)))
        .collect();

    let snapshot = TickerSnapshot {
        quote,
        dividends,
        series,
    };

    match derive_record(symbol, &snapshot, history_limit) {
        Some(record) => TickerOutcome::Collected(record),
        None => TickerOutcome::excluded(symbol),
    }
}

/// Run the whole universe through the provider, sequentially.
pub fn run_pipeline(
    provider: &dyn MarketDataProvider,
    config: &PipelineConfig,
    progress: &dyn PipelineProgress,
) -> RunSummary {
    let symbols = config.universe.symbols();
    let total = symbols.len();
    let pause = config.request_pause();
    let mut summary = RunSummary {
        total,
        ..Default::default()
    };

    progress.on_start(provider.name(), total);

    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 && !pause.is_zero() {
            std::thread::sleep(pause);
        }

        let outcome = process_ticker(provider, symbol, config.dividend_history_limit);
        match &outcome {
            TickerOutcome::Collected(record) => {
                debug!("{symbol}: yield {:.2}%", record.yield_percent());
            }
            TickerOutcome::Skipped {
                reason: SkipReason::NonPositiveYield,
                ..
            } => debug!("{symbol}: excluded, no positive dividend yield"),
            TickerOutcome::Skipped { reason, .. } => warn!("{symbol}: skipped: {reason}"),
        }

        progress.on_ticker(i, total, &outcome);
        summary.push(outcome);
    }

    progress.on_batch_complete(&summary);
    summary
}
