use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::PipelineError;
use crate::job::{Job, JobNormalizer, RawJob};

/// Anything that can produce postings for one employer. Site-specific
/// scraping lives behind this trait; the pipeline only sees the result.
pub trait JobSource: Send + Sync {
    fn fetch(&self, normalizer: &JobNormalizer) -> Result<Vec<Job>, PipelineError>;
}

impl<F> JobSource for F
where
    F: Fn(&JobNormalizer) -> Result<Vec<Job>, PipelineError> + Send + Sync,
{
    fn fetch(&self, normalizer: &JobNormalizer) -> Result<Vec<Job>, PipelineError> {
        self(normalizer)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceResult {
    pub source: String,
    pub jobs: Vec<Job>,
}

/// Reads a JSON array of postings written by an external scraper. Both raw
/// adapter records and already-normalized jobs are accepted; either way they
/// go through the normalizer again so tags end up canonical.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    name: String,
    path: PathBuf,
    company: String,
}

impl JsonFileSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, company: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            company: company.into(),
        }
    }

    fn read(&self) -> Result<Vec<RawJob>, PipelineError> {
        let text = fs::read_to_string(&self.path).map_err(|source| PipelineError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| PipelineError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

impl JobSource for JsonFileSource {
    fn fetch(&self, normalizer: &JobNormalizer) -> Result<Vec<Job>, PipelineError> {
        let raw = self.read()?;
        debug!(source = %self.name, path = ?self.path, records = raw.len(), "read source file");
        let jobs: Vec<Job> = raw
            .into_iter()
            .map(|r| normalizer.normalize(r, &self.company, &self.name))
            .collect();
        info!(source = %self.name, jobs = jobs.len(), "source fetched");
        Ok(jobs)
    }
}
