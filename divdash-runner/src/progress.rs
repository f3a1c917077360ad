//! Progress callbacks for the pipeline loop.

use crate::pipeline::{RunSummary, TickerOutcome};

/// Progress callback for a pipeline run.
pub trait PipelineProgress {
    /// Called once before the first ticker.
    fn on_start(&self, provider: &str, total: usize);

    /// Called after each ticker, whatever its outcome.
    fn on_ticker(&self, index: usize, total: usize, outcome: &TickerOutcome);

    /// Called when every ticker has been processed.
    fn on_batch_complete(&self, summary: &RunSummary);
}

/// Prints a line every `every` tickers and the failure list at the end.
pub struct StdoutProgress {
    pub every: usize,
}

impl StdoutProgress {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }

    pub fn start_line(provider: &str, total: usize) -> String {
        format!("Fetching data for {total} tickers from {provider}...")
    }

    /// The line for the ticker at `index`, if it completes a batch of `every`.
    pub fn progress_line(&self, index: usize, total: usize) -> Option<String> {
        let done = index + 1;
        (done % self.every == 0).then(|| format!("  Progress: {done}/{total}"))
    }

    pub fn failure_lines(summary: &RunSummary) -> Vec<String> {
        summary
            .failures()
            .map(|(symbol, reason)| format!("  Error {symbol}: {reason}"))
            .collect()
    }
}

impl PipelineProgress for StdoutProgress {
    fn on_start(&self, provider: &str, total: usize) {
        println!("{}", Self::start_line(provider, total));
    }

    fn on_ticker(&self, index: usize, total: usize, _outcome: &TickerOutcome) {
        if let Some(line) = self.progress_line(index, total) {
            println!("{line}");
        }
    }

    fn on_batch_complete(&self, summary: &RunSummary) {
        for line in Self::failure_lines(summary) {
            println!("{line}");
        }
    }
}

/// Discards all progress events.
pub struct NoProgress;

impl PipelineProgress for NoProgress {
    fn on_start(&self, _provider: &str, _total: usize) {}
    fn on_ticker(&self, _index: usize, _total: usize, _outcome: &TickerOutcome) {}
    fn on_batch_complete(&self, _summary: &RunSummary) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SkipReason;

    #[test]
    fn progress_line_every_n_tickers() {
        let p = StdoutProgress::new(10);
        let lines: Vec<(usize, String)> = (0..25)
            .filter_map(|i| p.progress_line(i, 25).map(|line| (i, line)))
            .collect();
        assert_eq!(
            lines,
            vec![
                (9, "  Progress: 10/25".to_string()),
                (19, "  Progress: 20/25".to_string()),
            ]
        );
    }

    #[test]
    fn zero_interval_prints_every_ticker() {
        let p = StdoutProgress::new(0);
        assert_eq!(p.progress_line(0, 3).as_deref(), Some("  Progress: 1/3"));
    }

    #[test]
    fn start_and_failure_lines() {
        assert_eq!(
            StdoutProgress::start_line("yahoo_finance", 81),
            "Fetching data for 81 tickers from yahoo_finance..."
        );
        let summary = RunSummary {
            total: 2,
            records: Vec::new(),
            skipped: vec![
                ("TSLA".into(), SkipReason::NonPositiveYield),
                ("ZZZZ".into(), SkipReason::Failed("symbol not found: ZZZZ".into())),
            ],
        };
        assert_eq!(
            StdoutProgress::failure_lines(&summary),
            vec!["  Error ZZZZ: symbol not found: ZZZZ"]
        );
    }
}
