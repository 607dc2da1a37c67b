use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Raised while building a [`KeywordCatalog`](crate::tags::KeywordCatalog).
/// Catalog data is validated once, up front, so lookups never have to pick
/// between two answers.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("empty term in {context}")]
    EmptyTerm { context: String },
    #[error("alias '{alias}' maps to both '{first}' and '{second}'")]
    ConflictingAlias {
        alias: String,
        first: String,
        second: String,
    },
    #[error("alias '{alias}' of '{canonical}' is itself a canonical tag")]
    AliasChain { alias: String, canonical: String },
    #[error("'{member}' in {owner} is an alias of '{canonical}'; use the canonical form")]
    NonCanonicalMember {
        member: String,
        canonical: String,
        owner: String,
    },
    #[error("tag '{tag}' belongs to both group '{first}' and group '{second}'")]
    OverlappingGroup {
        tag: String,
        first: String,
        second: String,
    },
    #[error("group key '{0}' is declared twice")]
    DuplicateGroup(String),
    #[error("tag '{tag}' belongs to both category '{first}' and category '{second}'")]
    OverlappingCategory {
        tag: String,
        first: String,
        second: String,
    },
    #[error("could not compile matcher for '{term}': {source}")]
    Pattern {
        term: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors surfaced by the pipeline layer (sources, sinks, settings).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source '{source_name}' failed: {reason}")]
    Source { source_name: String, reason: String },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("could not start worker pool: {0}")]
    ThreadPool(String),
}
