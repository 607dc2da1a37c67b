use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::error::PipelineError;
use crate::job::Job;
use crate::pipeline::PipelineReport;
use crate::settings::PipelineSettings;

/// Writes run output as pretty-printed JSON under one directory.
#[derive(Debug, Clone)]
pub struct JsonSink {
    dir: PathBuf,
    jobs_file: String,
    report_file: String,
}

impl JsonSink {
    pub fn new(
        dir: impl Into<PathBuf>,
        jobs_file: impl Into<String>,
        report_file: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            jobs_file: jobs_file.into(),
            report_file: report_file.into(),
        }
    }

    pub fn from_settings(settings: &PipelineSettings) -> Self {
        Self::new(
            settings.output_dir.clone(),
            settings.consolidated_file.clone(),
            settings.stats_file.clone(),
        )
    }

    pub fn write_jobs(&self, jobs: &[Job]) -> Result<PathBuf, PipelineError> {
        let path = self.write(&self.jobs_file, jobs)?;
        info!(path = ?path, jobs = jobs.len(), "wrote consolidated jobs");
        Ok(path)
    }

    pub fn write_report(&self, report: &PipelineReport) -> Result<PathBuf, PipelineError> {
        let path = self.write(&self.report_file, report)?;
        info!(path = ?path, "wrote pipeline report");
        Ok(path)
    }

    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<PathBuf, PipelineError> {
        fs::create_dir_all(&self.dir).map_err(|source| PipelineError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.dir.join(file);
        let body = serde_json::to_string_pretty(value)?;
        fs::write(&path, body).map_err(|source| PipelineError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
