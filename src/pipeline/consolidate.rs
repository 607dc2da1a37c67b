use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use super::source::SourceResult;
use super::PIPELINE_NAME;
use crate::job::Job;

pub const META_CONSOLIDATED_AT: &str = "consolidatedAt";
pub const META_PIPELINE: &str = "pipeline";

#[derive(Debug, Clone, Default)]
pub struct Consolidation {
    pub jobs: Vec<Job>,
    pub duplicates: usize,
}

/// Dedup key: `title-company-location`, lowercased, with whitespace and
/// punctuation other than `-` stripped. Letters outside ASCII are kept so
/// that Spanish titles do not collapse into each other.
pub fn job_signature(job: &Job) -> String {
    format!(
        "{}-{}-{}",
        job.title.trim(),
        job.company.trim(),
        job.location.trim()
    )
    .to_lowercase()
    .chars()
    .filter(|c| c.is_alphanumeric() || *c == '-')
    .collect()
}

pub fn consolidate(results: &[SourceResult]) -> Consolidation {
    consolidate_at(results, Utc::now())
}

/// First occurrence of a signature wins, in the order `results` are given.
/// Kept jobs are only touched to record when and by what they were merged.
pub fn consolidate_at(results: &[SourceResult], at: DateTime<Utc>) -> Consolidation {
    let stamp = Value::String(at.to_rfc3339());
    let mut seen = HashSet::new();
    let mut out = Consolidation::default();

    for result in results {
        for job in &result.jobs {
            let signature = job_signature(job);
            if !seen.insert(signature.clone()) {
                debug!(source = %result.source, id = %job.id, %signature, "duplicate job dropped");
                out.duplicates += 1;
                continue;
            }
            let mut job = job.clone();
            job.metadata
                .entry(META_CONSOLIDATED_AT.to_string())
                .or_insert_with(|| stamp.clone());
            job.metadata
                .entry(META_PIPELINE.to_string())
                .or_insert_with(|| Value::String(PIPELINE_NAME.to_string()));
            out.jobs.push(job);
        }
    }
    out
}
