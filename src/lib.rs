//! Tag extraction and consolidation for scraped job postings.
//!
//! Postings from many sources are normalized into [`Job`]s, tagged against a
//! shared [`KeywordCatalog`], deduplicated, filtered and summarized.

pub mod error;
pub mod job;
pub mod pipeline;
pub mod settings;
pub mod sink;
pub mod tags;
pub mod utils;

pub use error::{CatalogError, PipelineError};
pub use job::{Job, JobNormalizer, RawJob};
pub use pipeline::{
    apply_filters, compute_stats, consolidate, JobFilters, JobSource, JobStats, JsonFileSource,
    Pipeline, PipelineReport, PipelineRun, SourceConfig, SourceResult,
};
pub use settings::Settings;
pub use sink::JsonSink;
pub use tags::{CatalogBuilder, ExtractOptions, KeywordCatalog, TagCategory, TagExtractor, TagSystem};
