use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::job::Job;
use crate::utils::contains_ci;

/// Dimensions are ANDed together; inside a dimension any entry may match.
/// An empty dimension places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobFilters {
    /// Job must carry at least one of these.
    #[serde(alias = "required_tags", alias = "requiredtags")]
    pub required_tags: Vec<String>,
    /// Job must carry none of these.
    #[serde(alias = "exclude_tags", alias = "excludetags")]
    pub exclude_tags: Vec<String>,
    pub locations: Vec<String>,
    pub companies: Vec<String>,
    #[serde(alias = "job_types", alias = "jobtypes")]
    pub job_types: Vec<String>,
    #[serde(alias = "max_age_days", alias = "maxagedays", skip_serializing_if = "Option::is_none")]
    pub max_age_days: Option<u32>,
}

impl JobFilters {
    pub fn is_empty(&self) -> bool {
        self.required_tags.is_empty()
            && self.exclude_tags.is_empty()
            && self.locations.is_empty()
            && self.companies.is_empty()
            && self.job_types.is_empty()
            && self.max_age_days.is_none()
    }

    /// `overrides` replaces every dimension it sets.
    pub fn merged_with(&self, overrides: &JobFilters) -> JobFilters {
        fn pick(base: &[String], over: &[String]) -> Vec<String> {
            let chosen = if over.is_empty() { base } else { over };
            chosen.to_vec()
        }
        JobFilters {
            required_tags: pick(&self.required_tags, &overrides.required_tags),
            exclude_tags: pick(&self.exclude_tags, &overrides.exclude_tags),
            locations: pick(&self.locations, &overrides.locations),
            companies: pick(&self.companies, &overrides.companies),
            job_types: pick(&self.job_types, &overrides.job_types),
            max_age_days: overrides.max_age_days.or(self.max_age_days),
        }
    }

    pub fn matches(&self, job: &Job, now: DateTime<Utc>) -> bool {
        let has_tag = |wanted: &String| {
            let wanted = wanted.trim().to_lowercase();
            job.tags.iter().any(|t| t.to_lowercase() == wanted)
        };

        if !self.required_tags.is_empty() && !self.required_tags.iter().any(has_tag) {
            return false;
        }
        if self.exclude_tags.iter().any(has_tag) {
            return false;
        }
        if !any_substring(&job.location, &self.locations)
            || !any_substring(&job.company, &self.companies)
            || !any_substring(&job.job_type, &self.job_types)
        {
            return false;
        }
        match self.max_age_days {
            Some(days) => now - job.published_date <= Duration::days(i64::from(days)),
            None => true,
        }
    }
}

fn any_substring(value: &str, wanted: &[String]) -> bool {
    wanted.is_empty() || wanted.iter().any(|w| contains_ci(value, w))
}

pub fn apply_filters(jobs: &[Job], filters: &JobFilters) -> Vec<Job> {
    apply_filters_at(jobs, filters, Utc::now())
}

/// Keeps jobs matching `filters`, in input order. `now` anchors `max_age_days`.
pub fn apply_filters_at(jobs: &[Job], filters: &JobFilters, now: DateTime<Utc>) -> Vec<Job> {
    if filters.is_empty() {
        return jobs.to_vec();
    }
    jobs.iter()
        .filter(|job| filters.matches(job, now))
        .cloned()
        .collect()
}
