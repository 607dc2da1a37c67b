use std::cmp::Reverse;
use std::time::Instant;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::consolidate::consolidate_at;
use super::filter::{apply_filters_at, JobFilters};
use super::source::{JobSource, SourceResult};
use super::stats::{compute_stats, JobStats, DEFAULT_TOP_TAGS};
use super::PIPELINE_NAME;
use crate::error::PipelineError;
use crate::job::{Job, JobNormalizer};

pub const SCRAPER_ERROR: &str = "scraper_error";
pub const DEFAULT_MAX_CONCURRENT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub enabled: bool,
    /// Higher runs first in sequential mode.
    pub priority: i32,
    /// Per-source overrides merged onto the global filters.
    pub filters: JobFilters,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: 1,
            filters: JobFilters::default(),
        }
    }
}

/// A source that failed during a run. Failures never abort the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceError {
    #[serde(rename = "type")]
    pub kind: String,
    pub scraper: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl SourceError {
    fn new(scraper: &str, err: &PipelineError) -> Self {
        Self {
            kind: SCRAPER_ERROR.to_string(),
            scraper: scraper.to_string(),
            message: err.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScraperCounts {
    pub total: usize,
    pub executed: usize,
    pub errors: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub pipeline: String,
    pub executed_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub scrapers: ScraperCounts,
    pub duplicates: usize,
    #[serde(flatten)]
    pub stats: JobStats,
    pub errors: Vec<SourceError>,
}

#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub jobs: Vec<Job>,
    pub results: Vec<SourceResult>,
    pub report: PipelineReport,
}

struct Registered {
    name: String,
    source: Box<dyn JobSource>,
    config: SourceConfig,
}

type Outcome = Result<Vec<Job>, PipelineError>;

/// Runs registered sources, then consolidates, filters and summarizes what
/// they returned. Sources run one by one or on a pool of `max_concurrent`
/// threads; consolidation always walks results in registration order.
pub struct Pipeline {
    normalizer: JobNormalizer,
    sources: Vec<Registered>,
    parallel: bool,
    max_concurrent: usize,
    top_tags: usize,
}

impl Pipeline {
    pub fn new(normalizer: JobNormalizer) -> Self {
        Self {
            normalizer,
            sources: Vec::new(),
            parallel: false,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            top_tags: DEFAULT_TOP_TAGS,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(1);
        self
    }

    pub fn top_tags(mut self, n: usize) -> Self {
        self.top_tags = n;
        self
    }

    pub fn normalizer(&self) -> &JobNormalizer {
        &self.normalizer
    }

    /// Registering an existing name swaps the source in place and keeps its
    /// registration slot.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        source: impl JobSource + 'static,
        config: SourceConfig,
    ) -> &mut Self {
        let entry = Registered {
            name: name.into(),
            source: Box::new(source),
            config,
        };
        match self.sources.iter_mut().find(|s| s.name == entry.name) {
            Some(slot) => {
                debug!(source = %entry.name, "replacing registered source");
                *slot = entry;
            }
            None => self.sources.push(entry),
        }
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn run(&self, global: &JobFilters) -> Result<PipelineRun, PipelineError> {
        let started = Instant::now();
        let executed_at = Utc::now();
        let enabled: Vec<&Registered> = self.sources.iter().filter(|s| s.config.enabled).collect();
        info!(
            sources = enabled.len(),
            parallel = self.parallel,
            max_concurrent = self.max_concurrent,
            "pipeline started"
        );

        let outcomes = if self.parallel {
            self.fetch_parallel(&enabled)?
        } else {
            self.fetch_sequential(&enabled)
        };

        let mut results = Vec::new();
        let mut errors = Vec::new();
        for (entry, outcome) in enabled.iter().zip(outcomes) {
            match outcome {
                Ok(jobs) => {
                    let filters = global.merged_with(&entry.config.filters);
                    let kept = apply_filters_at(&jobs, &filters, executed_at);
                    info!(source = %entry.name, fetched = jobs.len(), kept = kept.len(), "source finished");
                    results.push(SourceResult {
                        source: entry.name.clone(),
                        jobs: kept,
                    });
                }
                Err(err) => {
                    warn!(source = %entry.name, error = %err, "source failed");
                    errors.push(SourceError::new(&entry.name, &err));
                }
            }
        }

        let consolidation = consolidate_at(&results, executed_at);
        info!(
            jobs = consolidation.jobs.len(),
            duplicates = consolidation.duplicates,
            sources = results.len(),
            "consolidated"
        );

        let jobs = apply_filters_at(&consolidation.jobs, global, executed_at);
        debug!(before = consolidation.jobs.len(), after = jobs.len(), "global filters applied");

        let stats = compute_stats(&jobs, self.normalizer.system(), self.top_tags);
        let report = PipelineReport {
            pipeline: PIPELINE_NAME.to_string(),
            executed_at,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            scrapers: ScraperCounts {
                total: self.sources.len(),
                executed: results.len(),
                errors: errors.len(),
            },
            duplicates: consolidation.duplicates,
            stats,
            errors,
        };
        info!(
            jobs = jobs.len(),
            unique_companies = report.stats.unique_companies,
            unique_tags = report.stats.unique_tags,
            duration_ms = report.duration_ms,
            "pipeline finished"
        );

        Ok(PipelineRun {
            jobs,
            results,
            report,
        })
    }

    fn fetch_one(&self, entry: &Registered) -> Outcome {
        debug!(source = %entry.name, "running source");
        entry.source.fetch(&self.normalizer)
    }

    /// Runs in priority order, hands results back in registration order.
    fn fetch_sequential(&self, enabled: &[&Registered]) -> Vec<Outcome> {
        enabled
            .iter()
            .enumerate()
            .sorted_by_key(|(_, entry)| Reverse(entry.config.priority))
            .map(|(i, entry)| (i, self.fetch_one(entry)))
            .collect::<Vec<_>>()
            .into_iter()
            .sorted_by_key(|(i, _)| *i)
            .map(|(_, outcome)| outcome)
            .collect()
    }

    #[cfg(feature = "rayon")]
    fn fetch_parallel(&self, enabled: &[&Registered]) -> Result<Vec<Outcome>, PipelineError> {
        use rayon::prelude::*;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_concurrent)
            .build()
            .map_err(|e| PipelineError::ThreadPool(e.to_string()))?;
        Ok(pool.install(|| {
            enabled
                .par_iter()
                .map(|entry| self.fetch_one(entry))
                .collect()
        }))
    }

    #[cfg(not(feature = "rayon"))]
    fn fetch_parallel(&self, enabled: &[&Registered]) -> Result<Vec<Outcome>, PipelineError> {
        debug!("built without rayon, running sources sequentially");
        Ok(self.fetch_sequential(enabled))
    }
}
