use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::CatalogError;
use crate::tags::{ExtractOptions, KeywordCatalog, TagExtractor, TagSystem};
use crate::utils::{parse_timestamp, slugify};

pub const DEFAULT_JOB_TYPE: &str = "Full-time";
pub const DEFAULT_EXPIRY_DAYS: i64 = 30;

pub const META_SCRAPED_AT: &str = "scrapedAt";
pub const META_SCRAPER: &str = "scraper";
pub const META_SOURCE: &str = "source";

/// A normalized posting. `tags` only ever holds canonical, unique forms;
/// anything source-specific lives in `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub department: String,
    pub published_date: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub job_url: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl Job {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// What an adapter hands over: every field optional, unknown keys kept in
/// `extra` and folded into `metadata` on normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJob {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub department: Option<String>,
    pub published_date: Option<String>,
    pub expires_at: Option<String>,
    pub job_url: Option<String>,
    pub source: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Turns adapter records into [`Job`]s: fills defaults, extracts tags from
/// title, description and requirements, records provenance.
pub struct JobNormalizer {
    extractor: TagExtractor,
    system: TagSystem,
    options: ExtractOptions,
}

impl JobNormalizer {
    pub fn new(catalog: Arc<KeywordCatalog>, options: ExtractOptions) -> Result<Self, CatalogError> {
        Ok(Self {
            extractor: TagExtractor::new(Arc::clone(&catalog))?,
            system: TagSystem::new(catalog),
            options,
        })
    }

    pub fn extractor(&self) -> &TagExtractor {
        &self.extractor
    }

    pub fn system(&self) -> &TagSystem {
        &self.system
    }

    pub fn normalize(&self, raw: RawJob, company: &str, scraper: &str) -> Job {
        self.normalize_at(raw, company, scraper, Utc::now())
    }

    pub fn normalize_at(
        &self,
        raw: RawJob,
        company: &str,
        scraper: &str,
        now: DateTime<Utc>,
    ) -> Job {
        let title = non_empty(raw.title).unwrap_or_default();
        let description = non_empty(raw.description).unwrap_or_default();
        let requirements = non_empty(raw.requirements).unwrap_or_default();
        let company = non_empty(raw.company).unwrap_or_else(|| company.to_string());
        let location = non_empty(raw.location).unwrap_or_default();

        let found = [&title, &description, &requirements]
            .into_iter()
            .flat_map(|text| self.extractor.extract(text, &self.options))
            .chain(raw.tags);
        let tags = self
            .system
            .normalize_tags(self.system.validate_and_clean(found));

        let published_date = raw
            .published_date
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now);
        let expires_at = raw
            .expires_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(|| now + Duration::days(DEFAULT_EXPIRY_DAYS));

        let id = non_empty(raw.id)
            .unwrap_or_else(|| slugify(&format!("{title}-{company}-{location}")));

        let mut metadata = raw.metadata;
        metadata
            .entry(META_SCRAPED_AT.to_string())
            .or_insert_with(|| Value::String(now.to_rfc3339()));
        metadata
            .entry(META_SCRAPER.to_string())
            .or_insert_with(|| Value::String(scraper.to_string()));
        metadata
            .entry(META_SOURCE.to_string())
            .or_insert_with(|| Value::String(raw.source.unwrap_or_else(|| company.clone())));
        for (key, value) in raw.extra {
            metadata.entry(key).or_insert(value);
        }

        debug!(id = %id, tags = tags.len(), "normalized job");

        Job {
            id,
            title,
            description,
            company,
            location,
            job_type: non_empty(raw.job_type).unwrap_or_else(|| DEFAULT_JOB_TYPE.to_string()),
            department: non_empty(raw.department).unwrap_or_default(),
            published_date,
            expires_at,
            job_url: non_empty(raw.job_url).unwrap_or_default(),
            tags,
            metadata,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn normalizer() -> JobNormalizer {
        let catalog = Arc::new(KeywordCatalog::standard().unwrap());
        JobNormalizer::new(catalog, ExtractOptions::default()).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn defaults_are_filled() {
        let job = normalizer().normalize_at(RawJob::default(), "Acme", "acme", now());
        assert_eq!(job.company, "Acme");
        assert_eq!(job.job_type, DEFAULT_JOB_TYPE);
        assert_eq!(job.title, "");
        assert_eq!(job.published_date, now());
        assert_eq!(job.expires_at, now() + Duration::days(30));
        assert!(job.tags.is_empty());
        assert_eq!(job.metadata[META_SCRAPER], "acme");
        assert_eq!(job.metadata[META_SOURCE], "Acme");
    }

    #[test]
    fn tags_come_from_all_text_fields() {
        let raw = RawJob {
            title: Some("Backend Engineer (Node)".into()),
            description: Some("Trabajarás con Postgres y K8s".into()),
            requirements: Some("3 años con TypeScript".into()),
            tags: vec!["JS".into(), "x".into()],
            ..Default::default()
        };
        let job = normalizer().normalize_at(raw, "Acme", "acme", now());
        for expected in ["backend", "nodejs", "postgresql", "kubernetes", "typescript", "javascript"] {
            assert!(job.has_tag(expected), "missing {expected}: {:?}", job.tags);
        }
        assert!(!job.has_tag("node"));
        assert!(!job.has_tag("x"));
    }

    #[test]
    fn extras_land_in_metadata_without_clobbering_provenance() {
        let json = r#"{
            "title": "Data Analyst",
            "publishedDate": "2025-05-20",
            "salary": "2.000.000 CLP",
            "scraper": "spoofed",
            "metadata": { "source": "lever" }
        }"#;
        let raw: RawJob = serde_json::from_str(json).unwrap();
        let job = normalizer().normalize_at(raw, "Fintual", "fintual", now());
        assert_eq!(job.metadata["salary"], "2.000.000 CLP");
        assert_eq!(job.metadata[META_SCRAPER], "fintual");
        assert_eq!(job.metadata[META_SOURCE], "lever");
        assert_eq!(
            job.published_date,
            Utc.with_ymd_and_hms(2025, 5, 20, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn derived_id_is_stable() {
        let raw = RawJob {
            title: Some("Backend Engineer".into()),
            location: Some("Santiago, Chile".into()),
            ..Default::default()
        };
        let job = normalizer().normalize_at(raw.clone(), "Acme", "acme", now());
        assert_eq!(job.id, "backend-engineer-acme-santiago-chile");
        let again = normalizer().normalize_at(raw, "Acme", "acme", now());
        assert_eq!(job.id, again.id);
    }

    #[test]
    fn job_json_uses_camel_case() {
        let job = normalizer().normalize_at(RawJob::default(), "Acme", "acme", now());
        let value = serde_json::to_value(&job).unwrap();
        for key in ["jobType", "publishedDate", "expiresAt", "jobUrl", "metadata", "tags"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
