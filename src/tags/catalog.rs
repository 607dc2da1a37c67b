use std::collections::{HashMap, HashSet};
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::data;
use crate::error::CatalogError;

/// Coarse classification every tag receives; `Other` is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Languages,
    Frameworks,
    Databases,
    Cloud,
    Tools,
    Concepts,
    Other,
}

impl TagCategory {
    pub const ALL: [TagCategory; 7] = [
        TagCategory::Languages,
        TagCategory::Frameworks,
        TagCategory::Databases,
        TagCategory::Cloud,
        TagCategory::Tools,
        TagCategory::Concepts,
        TagCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TagCategory::Languages => "languages",
            TagCategory::Frameworks => "frameworks",
            TagCategory::Databases => "databases",
            TagCategory::Cloud => "cloud",
            TagCategory::Tools => "tools",
            TagCategory::Concepts => "concepts",
            TagCategory::Other => "other",
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named cluster of canonical tags sharing a role, e.g. `containerization`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagGroup {
    pub key: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl TagGroup {
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Read-only keyword catalog plus the alias, group and category indices
/// derived from it. Build once, share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct KeywordCatalog {
    keywords: Vec<String>,
    variations: Vec<(String, Vec<String>)>,
    aliases: HashMap<String, String>,
    canonical_terms: Vec<String>,
    groups: Vec<TagGroup>,
    group_index: HashMap<String, usize>,
    categories: Vec<(TagCategory, Vec<String>)>,
    category_index: HashMap<String, TagCategory>,
}

impl KeywordCatalog {
    /// The built-in catalog from [`data`].
    pub fn standard() -> Result<Self, CatalogError> {
        CatalogBuilder::standard().build()
    }

    /// Match terms in catalog order, as listed. A few are spellings of
    /// another tag (`k8s`, `golang`); the extractor folds those on match.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Canonical forms of the keyword list, deduplicated in catalog order,
    /// keeping those with at least `min_len` characters.
    pub fn keywords_min_len(&self, min_len: usize) -> Vec<String> {
        self.keywords
            .iter()
            .map(|k| self.resolve(k))
            .filter(|k| k.chars().count() >= min_len)
            .unique()
            .collect()
    }

    /// Canonical term -> alias list, in declaration order.
    pub fn variations(&self) -> &[(String, Vec<String>)] {
        &self.variations
    }

    /// Every canonical form the catalog knows about, in first-seen order.
    pub fn canonical_terms(&self) -> &[String] {
        &self.canonical_terms
    }

    /// Case-insensitive alias lookup. `None` when the term is not part of
    /// any variation entry.
    pub fn canonical(&self, term: &str) -> Option<&str> {
        self.aliases
            .get(&term.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Lowercase, trim and fold aliases. Unknown terms come back as-is.
    pub fn resolve(&self, term: &str) -> String {
        let clean = term.trim().to_lowercase();
        match self.aliases.get(&clean) {
            Some(canonical) => canonical.clone(),
            None => clean,
        }
    }

    pub fn groups(&self) -> &[TagGroup] {
        &self.groups
    }

    /// Group of an already canonical tag.
    pub fn group_of(&self, canonical: &str) -> Option<&TagGroup> {
        self.group_index.get(canonical).map(|&i| &self.groups[i])
    }

    /// Category of an already canonical tag, `None` when unclassified.
    pub fn category_of(&self, canonical: &str) -> Option<TagCategory> {
        self.category_index.get(canonical).copied()
    }

    pub fn category_members(&self, category: TagCategory) -> &[String] {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, tags)| tags.as_slice())
            .unwrap_or(&[])
    }
}

/// Collects catalog data and validates it into a [`KeywordCatalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    keywords: Vec<String>,
    variations: Vec<(String, Vec<String>)>,
    groups: Vec<TagGroup>,
    categories: Vec<(TagCategory, Vec<String>)>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut builder = Self::new().keywords(data::TECH_KEYWORDS.iter().copied());
        for (canonical, aliases) in data::TAG_VARIATIONS {
            builder = builder.variation(*canonical, aliases.iter().copied());
        }
        for group in data::TAG_GROUPS {
            builder = builder.group(
                group.key,
                group.name,
                group.description,
                group.tags.iter().copied(),
            );
        }
        for (category, tags) in data::TAG_CATEGORIES {
            builder = builder.category(*category, tags.iter().copied());
        }
        builder
    }

    pub fn keyword(mut self, term: impl Into<String>) -> Self {
        self.keywords.push(term.into());
        self
    }

    pub fn keywords<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(terms.into_iter().map(Into::into));
        self
    }

    /// Adds aliases for `canonical`; repeated calls for the same canonical merge.
    pub fn variation<I, S>(mut self, canonical: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let canonical = canonical.into();
        let aliases = aliases.into_iter().map(Into::into);
        match self.variations.iter_mut().find(|(c, _)| *c == canonical) {
            Some((_, existing)) => existing.extend(aliases),
            None => self.variations.push((canonical, aliases.collect())),
        }
        self
    }

    pub fn group<I, S>(
        mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        tags: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups.push(TagGroup {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn category<I, S>(mut self, category: TagCategory, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags.into_iter().map(Into::into);
        match self.categories.iter_mut().find(|(c, _)| *c == category) {
            Some((_, existing)) => existing.extend(tags),
            None => self.categories.push((category, tags.collect())),
        }
        self
    }

    pub fn build(self) -> Result<KeywordCatalog, CatalogError> {
        let keywords: Vec<String> = clean_terms(self.keywords, "keywords")?
            .into_iter()
            .unique()
            .collect();

        let mut variations = Vec::with_capacity(self.variations.len());
        for (canonical, aliases) in self.variations {
            let canonical = clean_term(&canonical, "variations")?;
            let aliases: Vec<String> = clean_terms(aliases, &canonical)?
                .into_iter()
                .unique()
                .collect();
            variations.push((canonical, aliases));
        }

        let aliases = build_alias_map(&variations)?;
        let resolve = |term: &str| aliases.get(term).cloned().unwrap_or_else(|| term.to_string());

        let canonical_terms: Vec<String> = keywords
            .iter()
            .map(|k| resolve(k))
            .chain(variations.iter().map(|(c, _)| c.clone()))
            .unique()
            .collect();

        let mut groups: Vec<TagGroup> = Vec::with_capacity(self.groups.len());
        let mut group_index: HashMap<String, usize> = HashMap::new();
        for group in self.groups {
            let key = clean_term(&group.key, "group keys")?;
            if groups.iter().any(|g| g.key == key) {
                return Err(CatalogError::DuplicateGroup(key));
            }
            let owner = format!("group '{key}'");
            let tags: Vec<String> = clean_terms(group.tags, &owner)?
                .into_iter()
                .unique()
                .collect();
            for tag in &tags {
                ensure_canonical(&aliases, tag, &owner)?;
                if let Some(&other) = group_index.get(tag) {
                    return Err(CatalogError::OverlappingGroup {
                        tag: tag.clone(),
                        first: groups[other].key.clone(),
                        second: key,
                    });
                }
                group_index.insert(tag.clone(), groups.len());
            }
            groups.push(TagGroup {
                key,
                name: group.name,
                description: group.description,
                tags,
            });
        }

        let mut categories = Vec::with_capacity(self.categories.len());
        let mut category_index: HashMap<String, TagCategory> = HashMap::new();
        for (category, tags) in self.categories {
            let owner = format!("category '{category}'");
            let tags: Vec<String> = clean_terms(tags, &owner)?.into_iter().unique().collect();
            for tag in &tags {
                ensure_canonical(&aliases, tag, &owner)?;
                if let Some(&other) = category_index.get(tag) {
                    return Err(CatalogError::OverlappingCategory {
                        tag: tag.clone(),
                        first: other.to_string(),
                        second: category.to_string(),
                    });
                }
                category_index.insert(tag.clone(), category);
            }
            categories.push((category, tags));
        }

        Ok(KeywordCatalog {
            keywords,
            variations,
            aliases,
            canonical_terms,
            groups,
            group_index,
            categories,
            category_index,
        })
    }
}

fn clean_term(term: &str, context: &str) -> Result<String, CatalogError> {
    let clean = term.trim().to_lowercase();
    if clean.is_empty() {
        return Err(CatalogError::EmptyTerm {
            context: context.to_string(),
        });
    }
    Ok(clean)
}

fn clean_terms(terms: Vec<String>, context: &str) -> Result<Vec<String>, CatalogError> {
    terms.iter().map(|t| clean_term(t, context)).collect()
}

/// Every canonical maps to itself, every alias to exactly one canonical.
/// An alias may not be another entry's canonical, so one lookup always
/// lands on the final form.
fn build_alias_map(
    variations: &[(String, Vec<String>)],
) -> Result<HashMap<String, String>, CatalogError> {
    let canonicals: HashSet<&str> = variations.iter().map(|(c, _)| c.as_str()).collect();
    let mut map: HashMap<String, String> = HashMap::new();

    for (canonical, _) in variations {
        map.insert(canonical.clone(), canonical.clone());
    }
    for (canonical, aliases) in variations {
        for alias in aliases.iter().filter(|a| *a != canonical) {
            if canonicals.contains(alias.as_str()) {
                return Err(CatalogError::AliasChain {
                    alias: alias.clone(),
                    canonical: canonical.clone(),
                });
            }
            if let Some(existing) = map.get(alias) {
                if existing != canonical {
                    return Err(CatalogError::ConflictingAlias {
                        alias: alias.clone(),
                        first: existing.clone(),
                        second: canonical.clone(),
                    });
                }
            }
            map.insert(alias.clone(), canonical.clone());
        }
    }
    Ok(map)
}

fn ensure_canonical(
    aliases: &HashMap<String, String>,
    tag: &str,
    owner: &str,
) -> Result<(), CatalogError> {
    match aliases.get(tag) {
        Some(canonical) if canonical != tag => Err(CatalogError::NonCanonicalMember {
            member: tag.to_string(),
            canonical: canonical.clone(),
            owner: owner.to_string(),
        }),
        _ => Ok(()),
    }
}
