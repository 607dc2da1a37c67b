use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CatalogError, PipelineError};
use crate::job::JobNormalizer;
use crate::pipeline::runner::DEFAULT_MAX_CONCURRENT;
use crate::pipeline::stats::DEFAULT_TOP_TAGS;
use crate::pipeline::{JobFilters, JsonFileSource, Pipeline, SourceConfig};
use crate::tags::{CatalogBuilder, ExtractOptions, KeywordCatalog};

pub const ENV_PREFIX: &str = "JOBS";
/// Looked up in the working directory when no file is given; optional.
pub const DEFAULT_CONFIG_NAME: &str = "jobs_consolidator";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub output_dir: PathBuf,
    pub consolidated_file: String,
    pub stats_file: String,
    pub parallel: bool,
    pub max_concurrent: usize,
    pub top_tags: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output"),
            consolidated_file: "all_jobs.json".into(),
            stats_file: "pipeline_stats.json".into(),
            parallel: false,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            top_tags: DEFAULT_TOP_TAGS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagExtractionSettings {
    pub min_word_length: usize,
    pub case_sensitive: bool,
    pub include_variations: bool,
    pub max_tags: usize,
    pub normalize: bool,
    /// Extra keywords appended to the built-in list.
    pub custom_tags: Vec<String>,
    /// Extra canonical -> aliases entries, merged with the built-in table.
    pub local_variations: BTreeMap<String, Vec<String>>,
}

impl Default for TagExtractionSettings {
    fn default() -> Self {
        let options = ExtractOptions::default();
        Self {
            min_word_length: options.min_word_length,
            case_sensitive: options.case_sensitive,
            include_variations: options.include_variations,
            max_tags: options.max_tags,
            normalize: options.normalize,
            custom_tags: Vec::new(),
            local_variations: BTreeMap::new(),
        }
    }
}

impl TagExtractionSettings {
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            min_word_length: self.min_word_length,
            case_sensitive: self.case_sensitive,
            include_variations: self.include_variations,
            max_tags: self.max_tags,
            normalize: self.normalize,
        }
    }

    pub fn catalog(&self) -> Result<KeywordCatalog, CatalogError> {
        let mut builder = CatalogBuilder::standard().keywords(self.custom_tags.iter().cloned());
        for (canonical, aliases) in &self.local_variations {
            builder = builder.variation(canonical.as_str(), aliases.iter().cloned());
        }
        builder.build()
    }
}

/// A file-backed source: a JSON array of postings from some scraper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub filters: JobFilters,
}

fn enabled_by_default() -> bool {
    true
}

fn default_priority() -> i32 {
    SourceConfig::default().priority
}

impl SourceSettings {
    fn config(&self) -> SourceConfig {
        SourceConfig {
            enabled: self.enabled,
            priority: self.priority,
            filters: self.filters.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pipeline: PipelineSettings,
    pub tag_extraction: TagExtractionSettings,
    pub global_filters: JobFilters,
    pub sources: Vec<SourceSettings>,
}

impl Settings {
    /// Defaults, then the config file, then `JOBS_*` environment variables
    /// (`JOBS_PIPELINE__PARALLEL=true`, `JOBS_GLOBAL_FILTERS__LOCATIONS=chile,remote`).
    pub fn load(path: Option<&Path>) -> Result<Self, PipelineError> {
        Self::load_from(path, environment())
    }

    fn load_from(path: Option<&Path>, env: Environment) -> Result<Self, PipelineError> {
        let mut builder = Config::builder();
        builder = match path {
            Some(path) => {
                debug!(path = ?path, "loading settings file");
                builder.add_source(File::from(path))
            }
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };
        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;
        info!(
            sources = settings.sources.len(),
            parallel = settings.pipeline.parallel,
            output_dir = ?settings.pipeline.output_dir,
            "settings loaded"
        );
        Ok(settings)
    }

    pub fn normalizer(&self) -> Result<JobNormalizer, PipelineError> {
        let catalog = Arc::new(self.tag_extraction.catalog()?);
        Ok(JobNormalizer::new(catalog, self.tag_extraction.options())?)
    }

    /// A pipeline with every configured file source registered.
    pub fn build_pipeline(&self) -> Result<Pipeline, PipelineError> {
        let mut pipeline = Pipeline::new(self.normalizer()?)
            .parallel(self.pipeline.parallel)
            .max_concurrent(self.pipeline.max_concurrent)
            .top_tags(self.pipeline.top_tags);
        for source in &self.sources {
            let company = source.company.clone().unwrap_or_else(|| source.name.clone());
            pipeline.register(
                source.name.clone(),
                JsonFileSource::new(source.name.clone(), source.path.clone(), company),
                source.config(),
            );
        }
        Ok(pipeline)
    }
}

fn environment() -> Environment {
    let mut env = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",");
    for key in [
        "tag_extraction.custom_tags",
        "global_filters.required_tags",
        "global_filters.exclude_tags",
        "global_filters.locations",
        "global_filters.companies",
        "global_filters.job_types",
    ] {
        env = env.with_list_parse_key(key);
    }
    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn no_env() -> Environment {
        environment().source(Some(config::Map::new()))
    }

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.pipeline.consolidated_file, "all_jobs.json");
        assert_eq!(settings.pipeline.stats_file, "pipeline_stats.json");
        assert_eq!(settings.pipeline.max_concurrent, 3);
        assert_eq!(settings.pipeline.top_tags, 20);
        assert!(!settings.pipeline.parallel);
        assert_eq!(settings.tag_extraction.options(), ExtractOptions::default());
        assert!(settings.global_filters.is_empty());
    }

    #[test]
    fn file_layer() {
        let file = toml_file(
            r#"
            [pipeline]
            parallel = true
            max_concurrent = 5

            [tag_extraction]
            max_tags = 10
            custom_tags = ["sap"]

            [tag_extraction.local_variations]
            sap = ["sap erp"]

            [global_filters]
            locations = ["chile"]
            required_tags = ["python"]

            [[sources]]
            name = "acme"
            path = "data/acme.json"
            priority = 2
            "#,
        );
        let settings = Settings::load_from(Some(file.path()), no_env()).unwrap();
        assert!(settings.pipeline.parallel);
        assert_eq!(settings.pipeline.max_concurrent, 5);
        assert_eq!(settings.pipeline.stats_file, "pipeline_stats.json");
        assert_eq!(settings.tag_extraction.max_tags, 10);
        assert_eq!(settings.global_filters.locations, vec!["chile"]);
        assert_eq!(settings.global_filters.required_tags, vec!["python"]);
        assert_eq!(settings.sources.len(), 1);
        assert!(settings.sources[0].enabled);
        assert_eq!(settings.sources[0].priority, 2);

        let catalog = settings.tag_extraction.catalog().unwrap();
        assert_eq!(catalog.canonical("sap erp"), Some("sap"));
    }

    // The config crate lowercases keys read from files.
    #[test]
    fn camel_case_filter_keys_from_toml() {
        let file = toml_file(
            r#"
            [global_filters]
            requiredTags = ["python"]
            maxAgeDays = 7
            excludeTags = ["senior"]

            [[sources]]
            name = "acme"
            path = "data/acme.json"
            filters = { jobTypes = ["full-time"], requiredTags = ["rust"] }
            "#,
        );
        let settings = Settings::load_from(Some(file.path()), no_env()).unwrap();
        let global = &settings.global_filters;
        assert_eq!(global.required_tags, vec!["python"]);
        assert_eq!(global.exclude_tags, vec!["senior"]);
        assert_eq!(global.max_age_days, Some(7));
        assert!(!global.is_empty());

        let source = &settings.sources[0].filters;
        assert_eq!(source.job_types, vec!["full-time"]);
        assert_eq!(source.required_tags, vec!["rust"]);
    }

    #[test]
    fn camel_case_filter_keys_from_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(
            br#"{"global_filters": {"requiredTags": ["python"], "jobTypes": ["full"], "maxAgeDays": 30}}"#,
        )
        .unwrap();
        let settings = Settings::load_from(Some(file.path()), no_env()).unwrap();
        assert_eq!(settings.global_filters.required_tags, vec!["python"]);
        assert_eq!(settings.global_filters.job_types, vec!["full"]);
        assert_eq!(settings.global_filters.max_age_days, Some(30));
    }

    #[test]
    fn env_overrides_file() {
        let file = toml_file("[pipeline]\nparallel = false\ntop_tags = 7\n");
        let vars: config::Map<String, String> = [
            ("JOBS_PIPELINE__PARALLEL", "true"),
            ("JOBS_GLOBAL_FILTERS__LOCATIONS", "chile,remote"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let env = environment().source(Some(vars));
        let settings = Settings::load_from(Some(file.path()), env).unwrap();
        assert!(settings.pipeline.parallel);
        assert_eq!(settings.pipeline.top_tags, 7);
        assert_eq!(settings.global_filters.locations, vec!["chile", "remote"]);
    }

    #[test]
    fn bad_local_variation_is_a_catalog_error() {
        let mut settings = Settings::default();
        // "js" already belongs to javascript
        settings
            .tag_extraction
            .local_variations
            .insert("typescript".into(), vec!["js".into()]);
        let err = settings.normalizer().err().unwrap();
        assert!(matches!(
            err,
            PipelineError::Catalog(CatalogError::ConflictingAlias { .. })
        ));
    }

    #[test]
    fn pipeline_registers_sources() {
        let settings = Settings {
            sources: vec![SourceSettings {
                name: "acme".into(),
                path: "acme.json".into(),
                company: None,
                enabled: true,
                priority: 1,
                filters: JobFilters::default(),
            }],
            ..Default::default()
        };
        let pipeline = settings.build_pipeline().unwrap();
        assert_eq!(pipeline.source_names(), vec!["acme"]);
    }
}
