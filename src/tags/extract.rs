use std::borrow::Cow;
use std::sync::Arc;

use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::catalog::KeywordCatalog;
use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Terms shorter than this (in chars) are never matched.
    pub min_word_length: usize,
    pub case_sensitive: bool,
    /// Also match the alias table, not only the keyword list.
    pub include_variations: bool,
    pub max_tags: usize,
    /// Record canonical forms instead of the literal term that matched.
    pub normalize: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_word_length: 2,
            case_sensitive: false,
            include_variations: true,
            max_tags: 50,
            normalize: true,
        }
    }
}

struct Matcher {
    term: String,
    canonical: String,
    char_len: usize,
    pattern: Regex,
}

impl Matcher {
    fn new(term: &str, canonical: String) -> Result<Self, CatalogError> {
        Ok(Self {
            term: term.to_string(),
            canonical,
            char_len: term.chars().count(),
            pattern: whole_word(term)?,
        })
    }
}

/// `\w` is Unicode-aware, so accented letters count as part of a word:
/// `ios` never matches inside `envíos`. The boundary is checked on the
/// characters around the term rather than with `\b`, which keeps terms that
/// start or end with punctuation (`c++`, `.net`, `c#`) matchable.
fn whole_word(term: &str) -> Result<Regex, CatalogError> {
    Regex::new(&format!(r"(?:^|\W){}(?:\W|$)", regex::escape(term))).map_err(|source| {
        CatalogError::Pattern {
            term: term.to_string(),
            source,
        }
    })
}

/// Finds catalog terms in free text. Matchers are compiled once at
/// construction; `extract` itself holds no state and is safe to share.
pub struct TagExtractor {
    catalog: Arc<KeywordCatalog>,
    keywords: Vec<Matcher>,
    aliases: Vec<Matcher>,
}

impl TagExtractor {
    pub fn new(catalog: Arc<KeywordCatalog>) -> Result<Self, CatalogError> {
        let keywords = catalog
            .keywords()
            .iter()
            .map(|k| Matcher::new(k, catalog.resolve(k)))
            .collect::<Result<Vec<_>, _>>()?;

        let aliases = catalog
            .variations()
            .iter()
            .flat_map(|(canonical, aliases)| aliases.iter().map(move |a| (a, canonical)))
            .map(|(alias, canonical)| Matcher::new(alias, canonical.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            catalog,
            keywords,
            aliases,
        })
    }

    pub fn catalog(&self) -> &KeywordCatalog {
        &self.catalog
    }

    /// Keyword hits first, then alias hits, both in catalog order; duplicates
    /// collapse to the first occurrence and the list is cut at `max_tags`.
    pub fn extract(&self, text: &str, options: &ExtractOptions) -> Vec<String> {
        if text.trim().is_empty() || options.max_tags == 0 {
            return Vec::new();
        }

        let haystack: Cow<'_, str> = if options.case_sensitive {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(text.to_lowercase())
        };

        let aliases: &[Matcher] = if options.include_variations {
            &self.aliases
        } else {
            &[]
        };

        self.keywords
            .iter()
            .chain(aliases)
            .filter(|m| m.char_len >= options.min_word_length)
            .filter(|m| m.pattern.is_match(&haystack))
            .map(|m| {
                if options.normalize {
                    m.canonical.as_str()
                } else {
                    m.term.as_str()
                }
            })
            .unique()
            .take(options.max_tags)
            .map(str::to_string)
            .collect()
    }

    pub fn extract_default(&self, text: &str) -> Vec<String> {
        self.extract(text, &ExtractOptions::default())
    }
}
