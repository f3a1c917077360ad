//! divdash runner: batch orchestration on top of `divdash-core`.
//!
//! This crate provides:
//! - TOML pipeline configuration with defaults for the stock job
//! - The sequential fetch → derive → collect loop with per-ticker outcomes
//! - Progress reporting
//! - Partitioning into the five dashboard views
//! - Independent JSON export of each view

pub mod config;
pub mod export;
pub mod job;
pub mod partition;
pub mod pipeline;
pub mod progress;

pub use config::{ConfigError, PipelineConfig};
pub use export::{emit_all, render_view, write_view, EmitReport, ExportError, StockRow};
pub use job::{run_job, JobReport};
pub use partition::{partition, sort_by_yield, View, Views, RETURN_SENTINEL};
pub use pipeline::{process_ticker, run_pipeline, RunSummary, SkipReason, TickerOutcome};
pub use progress::{NoProgress, PipelineProgress, StdoutProgress};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_is_send_sync() {
        assert_send::<PipelineConfig>();
        assert_sync::<PipelineConfig>();
    }

    #[test]
    fn outcomes_are_send_sync() {
        assert_send::<TickerOutcome>();
        assert_sync::<TickerOutcome>();
        assert_send::<RunSummary>();
        assert_sync::<RunSummary>();
    }

    #[test]
    fn emit_report_is_send_sync() {
        assert_send::<EmitReport>();
        assert_sync::<EmitReport>();
    }
}
