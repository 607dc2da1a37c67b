pub mod consolidate;
pub mod filter;
pub mod runner;
pub mod source;
pub mod stats;

pub use consolidate::{consolidate, consolidate_at, job_signature, Consolidation};
pub use filter::{apply_filters, apply_filters_at, JobFilters};
pub use runner::{Pipeline, PipelineReport, PipelineRun, ScraperCounts, SourceConfig, SourceError};
pub use source::{JobSource, JsonFileSource, SourceResult};
pub use stats::{compute_stats, JobStats};

/// Recorded in `metadata.pipeline` and in run reports.
pub const PIPELINE_NAME: &str = env!("CARGO_PKG_NAME");
