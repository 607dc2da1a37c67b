use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use itertools::Itertools;
use serde::Serialize;

use super::catalog::{KeywordCatalog, TagCategory, TagGroup};

const CANONICAL_PREFIX: f32 = 1.0;
const VARIATION_PREFIX: f32 = 0.9;
const CANONICAL_SUBSTRING: f32 = 0.8;
const VARIATION_SUBSTRING: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Canonical,
    Variation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSuggestion {
    pub tag: String,
    #[serde(rename = "type")]
    pub match_type: MatchType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_variation: Option<String>,
    /// Only meaningful for ordering.
    pub relevance: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupBucket {
    pub name: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedSuggestion {
    pub suggested: String,
    pub based_on: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagAnalysis {
    pub original: Vec<String>,
    pub normalized: Vec<String>,
    pub duplicates_removed: usize,
    pub categories: BTreeMap<TagCategory, Vec<String>>,
    pub groups: BTreeMap<String, GroupBucket>,
    pub related_suggestions: Vec<RelatedSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagStats {
    pub total: usize,
    pub unique: usize,
    pub by_category: BTreeMap<TagCategory, usize>,
    pub by_group: BTreeMap<String, usize>,
    pub most_common: Vec<TagCount>,
}

/// Normalization and classification over the catalog: alias folding,
/// categories, groups, suggestions and per-list reports. Pure and shareable.
#[derive(Debug, Clone)]
pub struct TagSystem {
    catalog: Arc<KeywordCatalog>,
}

impl TagSystem {
    pub fn new(catalog: Arc<KeywordCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &KeywordCatalog {
        &self.catalog
    }

    /// Lowercase, trim, fold aliases. `None` for blank input.
    pub fn normalize_tag(&self, tag: &str) -> Option<String> {
        if tag.trim().is_empty() {
            return None;
        }
        Some(self.catalog.resolve(tag))
    }

    /// Normalizes each tag and drops repeats, keeping first-occurrence order.
    pub fn normalize_tags<I, S>(&self, tags: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .filter_map(|t| self.normalize_tag(t.as_ref()))
            .unique()
            .collect()
    }

    /// Lowercase, trim, drop anything shorter than two chars, dedup.
    /// No alias folding.
    pub fn validate_and_clean<I, S>(&self, tags: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| t.chars().count() >= 2)
            .unique()
            .collect()
    }

    pub fn tag_category(&self, tag: &str) -> TagCategory {
        self.normalize_tag(tag)
            .and_then(|t| self.catalog.category_of(&t))
            .unwrap_or(TagCategory::Other)
    }

    pub fn tag_group(&self, tag: &str) -> Option<&TagGroup> {
        let normalized = self.normalize_tag(tag)?;
        self.catalog.group_of(&normalized)
    }

    /// Other members of the tag's group; empty when it has none.
    pub fn related_tags(&self, tag: &str) -> Vec<String> {
        let Some(normalized) = self.normalize_tag(tag) else {
            return Vec::new();
        };
        match self.catalog.group_of(&normalized) {
            Some(group) => group
                .tags
                .iter()
                .filter(|t| **t != normalized)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn tags_by_category(&self, category: TagCategory) -> Vec<&str> {
        self.catalog
            .category_members(category)
            .iter()
            .map(String::as_str)
            .collect()
    }

    /// Buckets normalized tags by category, first-seen order inside a bucket.
    pub fn categorize<I, S>(&self, tags: I) -> BTreeMap<TagCategory, Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: BTreeMap<TagCategory, Vec<String>> = BTreeMap::new();
        for tag in self.normalize_tags(tags) {
            out.entry(self.tag_category(&tag)).or_default().push(tag);
        }
        out
    }

    /// Ranked completions for a partial tag. Canonical prefix hits rank
    /// first, then alias prefix hits, then substring hits. One entry per
    /// canonical tag.
    pub fn suggest_tags(&self, partial: &str, limit: usize) -> Vec<TagSuggestion> {
        let query = partial.trim().to_lowercase();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut suggestions = Vec::new();

        for term in self.catalog.canonical_terms() {
            if let Some(pos) = term.find(&query) {
                seen.insert(term);
                suggestions.push(TagSuggestion {
                    tag: term.clone(),
                    match_type: MatchType::Canonical,
                    matched_variation: None,
                    relevance: if pos == 0 {
                        CANONICAL_PREFIX
                    } else {
                        CANONICAL_SUBSTRING
                    },
                });
            }
        }

        for (canonical, aliases) in self.catalog.variations() {
            if seen.contains(canonical.as_str()) {
                continue;
            }
            let best = aliases
                .iter()
                .filter_map(|alias| {
                    alias.find(&query).map(|pos| {
                        let relevance = if pos == 0 {
                            VARIATION_PREFIX
                        } else {
                            VARIATION_SUBSTRING
                        };
                        (alias, relevance)
                    })
                })
                .reduce(|best, next| if next.1 > best.1 { next } else { best });

            if let Some((alias, relevance)) = best {
                seen.insert(canonical);
                suggestions.push(TagSuggestion {
                    tag: canonical.clone(),
                    match_type: MatchType::Variation,
                    matched_variation: Some(alias.clone()),
                    relevance,
                });
            }
        }

        // stable: ties keep catalog order
        suggestions.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
        suggestions.truncate(limit);
        suggestions
    }

    pub fn analyze_tags<I, S>(&self, tags: I) -> TagAnalysis
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let original: Vec<String> = tags.into_iter().map(|t| t.as_ref().to_string()).collect();
        let normalized = self.normalize_tags(&original);
        let categories = self.categorize(&normalized);

        let mut groups: BTreeMap<String, GroupBucket> = BTreeMap::new();
        for tag in &normalized {
            if let Some(group) = self.catalog.group_of(tag) {
                groups
                    .entry(group.key.clone())
                    .or_insert_with(|| GroupBucket {
                        name: group.name.clone(),
                        tags: Vec::new(),
                    })
                    .tags
                    .push(tag.clone());
            }
        }

        let present: HashSet<&str> = normalized.iter().map(String::as_str).collect();
        let mut suggested: HashSet<String> = HashSet::new();
        let mut related_suggestions = Vec::new();
        for tag in &normalized {
            for related in self.related_tags(tag) {
                if present.contains(related.as_str()) || !suggested.insert(related.clone()) {
                    continue;
                }
                related_suggestions.push(RelatedSuggestion {
                    reason: format!("Related to {tag}"),
                    suggested: related,
                    based_on: tag.clone(),
                });
            }
        }

        TagAnalysis {
            duplicates_removed: original.len().saturating_sub(normalized.len()),
            original,
            normalized,
            categories,
            groups,
            related_suggestions,
        }
    }

    /// Counts over a raw tag list. `unique` is measured after normalization;
    /// `most_common` ranks the raw strings, ties in first-seen order.
    pub fn tag_stats<I, S>(&self, tags: I, top_n: usize) -> TagStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags: Vec<String> = tags.into_iter().map(|t| t.as_ref().to_string()).collect();

        let mut by_category: BTreeMap<TagCategory, usize> = BTreeMap::new();
        let mut by_group: BTreeMap<String, usize> = BTreeMap::new();
        for tag in &tags {
            *by_category.entry(self.tag_category(tag)).or_default() += 1;
            if let Some(group) = self.tag_group(tag) {
                *by_group.entry(group.key.clone()).or_default() += 1;
            }
        }

        TagStats {
            total: tags.len(),
            unique: self.normalize_tags(&tags).len(),
            by_category,
            by_group,
            most_common: most_frequent(tags.iter().map(String::as_str), top_n),
        }
    }
}

/// Top `limit` values by count. Ties keep first-seen order.
pub(crate) fn most_frequent<'a, I>(values: I, limit: usize) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<TagCount> = Vec::new();
    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value, counts.len());
                counts.push(TagCount {
                    tag: value.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts
        .into_iter()
        .sorted_by(|a, b| b.count.cmp(&a.count))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> TagSystem {
        TagSystem::new(Arc::new(KeywordCatalog::standard().unwrap()))
    }

    #[test]
    fn normalize_tag_basics() {
        let ts = system();
        assert_eq!(ts.normalize_tag(" JS ").as_deref(), Some("javascript"));
        assert_eq!(ts.normalize_tag("javascript").as_deref(), Some("javascript"));
        assert_eq!(ts.normalize_tag("Cobol").as_deref(), Some("cobol"));
        assert_eq!(ts.normalize_tag(""), None);
        assert_eq!(ts.normalize_tag("   "), None);
    }

    #[test]
    fn aliases_converge() {
        let ts = system();
        for (canonical, aliases) in ts.catalog().variations() {
            assert_eq!(ts.normalize_tag(canonical).as_ref(), Some(canonical));
            for alias in aliases {
                assert_eq!(ts.normalize_tag(alias).as_ref(), Some(canonical));
            }
        }
    }

    #[test]
    fn normalize_tags_is_idempotent() {
        let ts = system();
        let input = ["JS", "node", "K8s", "", "Docker", "javascript", "GCP", "cobol"];
        let once = ts.normalize_tags(input);
        let twice = ts.normalize_tags(&once);
        assert_eq!(once, twice);
        assert_eq!(
            once,
            vec!["javascript", "nodejs", "kubernetes", "docker", "google cloud", "cobol"]
        );
    }

    #[test]
    fn validate_and_clean_drops_short_and_dupes() {
        let ts = system();
        let cleaned = ts.validate_and_clean(["Python", " python ", "r", "", "JS"]);
        assert_eq!(cleaned, vec!["python", "js"]);
    }

    #[test]
    fn category_fallback() {
        let ts = system();
        assert_eq!(ts.tag_category("Rust"), TagCategory::Languages);
        assert_eq!(ts.tag_category("k8s"), TagCategory::Cloud);
        assert_eq!(ts.tag_category("ml"), TagCategory::Concepts);
        assert_eq!(ts.tag_category("cobol"), TagCategory::Other);
        assert_eq!(ts.tag_category(""), TagCategory::Other);
    }

    #[test]
    fn group_and_related() {
        let ts = system();
        let group = ts.tag_group("k8s").unwrap();
        assert_eq!(group.key, "containerization");
        let related = ts.related_tags("K8S");
        assert_eq!(related, vec!["docker", "openshift", "helm"]);
        assert!(ts.tag_group("cobol").is_none());
        assert!(ts.related_tags("cobol").is_empty());
    }

    #[test]
    fn tags_by_category_lists_members() {
        let ts = system();
        assert!(ts.tags_by_category(TagCategory::Databases).contains(&"postgresql"));
        assert!(ts.tags_by_category(TagCategory::Other).is_empty());
    }

    #[test]
    fn categorize_buckets() {
        let ts = system();
        let buckets = ts.categorize(["python", "react", "mongo", "gcp", "figma", "scrum"]);
        assert_eq!(buckets[&TagCategory::Languages], vec!["python"]);
        assert_eq!(buckets[&TagCategory::Frameworks], vec!["react"]);
        assert_eq!(buckets[&TagCategory::Databases], vec!["mongodb"]);
        assert_eq!(buckets[&TagCategory::Cloud], vec!["google cloud"]);
        assert_eq!(buckets[&TagCategory::Tools], vec!["figma"]);
        assert_eq!(buckets[&TagCategory::Other], vec!["scrum"]);
    }

    #[test]
    fn suggest_ranks_canonical_prefix_first() {
        let ts = system();
        let suggestions = ts.suggest_tags("java", 10);
        assert_eq!(suggestions[0].tag, "java");
        assert_eq!(suggestions[0].match_type, MatchType::Canonical);
        assert!(suggestions.iter().any(|s| s.tag == "javascript"));
        let relevances: Vec<f32> = suggestions.iter().map(|s| s.relevance).collect();
        assert!(relevances.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn suggest_alias_prefix_beats_substring() {
        let ts = system();
        let suggestions = ts.suggest_tags("k8", 10);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].tag, "kubernetes");
        assert_eq!(suggestions[0].match_type, MatchType::Variation);
        assert_eq!(suggestions[0].matched_variation.as_deref(), Some("k8s"));
        assert_eq!(suggestions[0].relevance, VARIATION_PREFIX);

        let suggestions = ts.suggest_tags("gres", 10);
        let pg = suggestions.iter().find(|s| s.tag == "postgresql").unwrap();
        assert_eq!(pg.match_type, MatchType::Canonical);
        assert_eq!(pg.relevance, CANONICAL_SUBSTRING);
    }

    #[test]
    fn suggest_respects_limit_and_blank_query() {
        let ts = system();
        assert!(ts.suggest_tags("a", 3).len() <= 3);
        assert!(ts.suggest_tags("", 10).is_empty());
        assert!(ts.suggest_tags("python", 0).is_empty());
    }

    #[test]
    fn suggest_one_entry_per_tag() {
        let ts = system();
        let suggestions = ts.suggest_tags("react", 50);
        let react = suggestions.iter().filter(|s| s.tag == "react").count();
        assert_eq!(react, 1);
    }

    #[test]
    fn analyze_reports_duplicates_groups_and_related() {
        let ts = system();
        let analysis = ts.analyze_tags(["React", "reactjs", "Docker", "k8s", "cobol"]);
        assert_eq!(analysis.original.len(), 5);
        assert_eq!(analysis.normalized, vec!["react", "docker", "kubernetes", "cobol"]);
        assert_eq!(analysis.duplicates_removed, 1);
        assert_eq!(analysis.categories[&TagCategory::Other], vec!["cobol"]);
        assert_eq!(
            analysis.groups["containerization"].tags,
            vec!["docker", "kubernetes"]
        );

        let suggested: Vec<&str> = analysis
            .related_suggestions
            .iter()
            .map(|s| s.suggested.as_str())
            .collect();
        assert!(suggested.contains(&"angular"));
        assert!(suggested.contains(&"helm"));
        assert!(!suggested.contains(&"docker"));
        assert!(!suggested.contains(&"kubernetes"));
        let helm = analysis
            .related_suggestions
            .iter()
            .find(|s| s.suggested == "helm")
            .unwrap();
        assert_eq!(helm.based_on, "docker");
    }

    #[test]
    fn tag_stats_collapse_aliases() {
        let ts = system();
        let stats = ts.tag_stats(["js", "javascript", "JavaScript", "python"], 10);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.unique, 2);
        assert_eq!(stats.by_category[&TagCategory::Languages], 4);
        assert_eq!(stats.by_group["data-science"], 1);
        assert_eq!(stats.most_common[0].tag, "js");
    }

    #[test]
    fn most_frequent_ties_keep_first_seen() {
        let ranked = most_frequent(["b", "a", "c", "a", "b", "d"], 3);
        let tags: Vec<&str> = ranked.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["b", "a", "c"]);
        assert_eq!(ranked[0].count, 2);
    }
}
