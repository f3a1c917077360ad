//! One complete batch run: pipeline, partition, emit.

use divdash_core::data::MarketDataProvider;

use crate::config::PipelineConfig;
use crate::export::{emit_all, timestamp_now, EmitReport};
use crate::partition::partition;
use crate::pipeline::{run_pipeline, RunSummary};
use crate::progress::PipelineProgress;

/// Everything a run produced.
#[derive(Debug)]
pub struct JobReport {
    pub summary: RunSummary,
    pub emit: EmitReport,
    /// The `updated` stamp written into every view.
    pub updated: String,
}

impl JobReport {
    pub fn succeeded(&self) -> bool {
        self.emit.all_written()
    }
}

/// Process the configured universe and write all views to `config.output_dir`.
///
/// The timestamp is taken after the last ticker, so it marks completion.
pub fn run_job(
    provider: &dyn MarketDataProvider,
    config: &PipelineConfig,
    progress: &dyn PipelineProgress,
) -> JobReport {
    let summary = run_pipeline(provider, config, progress);
    let updated = timestamp_now();
    let views = partition(&summary.records, config.top_yield_limit);
    let emit = emit_all(&views, &config.output_dir, &updated);

    JobReport {
        summary,
        emit,
        updated,
    }
}
