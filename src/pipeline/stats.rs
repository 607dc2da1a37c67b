use std::collections::{BTreeMap, HashSet};

use itertools::Itertools;
use serde::Serialize;

use crate::job::Job;
use crate::tags::system::most_frequent;
use crate::tags::{TagCategory, TagCount, TagSystem};

pub const DEFAULT_TOP_TAGS: usize = 20;
const UNSPECIFIED: &str = "unspecified";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCounts {
    pub total: usize,
    pub by_company: BTreeMap<String, usize>,
    pub by_location: BTreeMap<String, usize>,
    pub by_department: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagBreakdown {
    /// Tag occurrences summed over all jobs.
    pub total: usize,
    pub top_tags: Vec<TagCount>,
    pub by_category: BTreeMap<TagCategory, Vec<String>>,
    pub by_group: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    pub jobs: JobCounts,
    pub tags: TagBreakdown,
    pub unique_companies: usize,
    pub unique_tags: usize,
}

fn bucket(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        value.to_string()
    }
}

pub fn compute_stats(jobs: &[Job], system: &TagSystem, top_n: usize) -> JobStats {
    let mut counts = JobCounts {
        total: jobs.len(),
        ..Default::default()
    };
    for job in jobs {
        *counts.by_company.entry(bucket(&job.company)).or_default() += 1;
        *counts.by_location.entry(bucket(&job.location)).or_default() += 1;
        *counts.by_department.entry(bucket(&job.department)).or_default() += 1;
    }

    let all_tags: Vec<&str> = jobs
        .iter()
        .flat_map(|job| job.tags.iter().map(String::as_str))
        .collect();
    let distinct: Vec<&str> = all_tags.iter().copied().unique().collect();

    let mut by_category: BTreeMap<TagCategory, Vec<String>> = TagCategory::ALL
        .iter()
        .map(|c| (*c, Vec::new()))
        .collect();
    let mut by_group: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for tag in &distinct {
        by_category
            .entry(system.tag_category(tag))
            .or_default()
            .push(tag.to_string());
        if let Some(group) = system.tag_group(tag) {
            by_group
                .entry(group.key.clone())
                .or_default()
                .push(tag.to_string());
        }
    }

    let unique_companies = jobs
        .iter()
        .map(|job| job.company.trim())
        .filter(|c| !c.is_empty())
        .collect::<HashSet<_>>()
        .len();

    JobStats {
        jobs: counts,
        tags: TagBreakdown {
            total: all_tags.len(),
            top_tags: most_frequent(all_tags.iter().copied(), top_n),
            by_category,
            by_group,
        },
        unique_companies,
        unique_tags: distinct.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::job;
    use crate::tags::KeywordCatalog;
    use std::sync::Arc;

    fn system() -> TagSystem {
        TagSystem::new(Arc::new(KeywordCatalog::standard().unwrap()))
    }

    fn with_tags(id: &str, company: &str, tags: &[&str]) -> Job {
        let mut j = job(id, id, company, "Santiago");
        j.tags = tags.iter().map(|t| t.to_string()).collect();
        j
    }

    #[test]
    fn empty_input() {
        let stats = compute_stats(&[], &system(), DEFAULT_TOP_TAGS);
        assert_eq!(stats.jobs.total, 0);
        assert_eq!(stats.unique_tags, 0);
        assert!(stats.tags.top_tags.is_empty());
        assert_eq!(stats.tags.by_category.len(), TagCategory::ALL.len());
    }

    #[test]
    fn counts_and_buckets() {
        let mut hr = with_tags("3", "Beta", &["python"]);
        hr.department = "People".into();
        let jobs = vec![
            with_tags("1", "Acme", &["python", "docker"]),
            with_tags("2", "Acme", &["react", "python"]),
            hr,
        ];
        let stats = compute_stats(&jobs, &system(), 2);

        assert_eq!(stats.jobs.total, 3);
        assert_eq!(stats.jobs.by_company["Acme"], 2);
        assert_eq!(stats.jobs.by_department[UNSPECIFIED], 2);
        assert_eq!(stats.jobs.by_department["People"], 1);
        assert_eq!(stats.unique_companies, 2);
        assert_eq!(stats.unique_tags, 3);
        assert_eq!(stats.tags.total, 5);

        let top: Vec<_> = stats.tags.top_tags.iter().map(|t| (t.tag.as_str(), t.count)).collect();
        assert_eq!(top, vec![("python", 3), ("docker", 1)]);

        assert_eq!(stats.tags.by_category[&TagCategory::Languages], vec!["python"]);
        assert_eq!(stats.tags.by_category[&TagCategory::Frameworks], vec!["react"]);
        assert_eq!(stats.tags.by_category[&TagCategory::Cloud], vec!["docker"]);
    }

    #[test]
    fn groups_collect_members() {
        let jobs = vec![
            with_tags("1", "Acme", &["terraform"]),
            with_tags("2", "Acme", &["ansible", "terraform"]),
        ];
        let stats = compute_stats(&jobs, &system(), DEFAULT_TOP_TAGS);
        assert_eq!(
            stats.tags.by_group["infrastructure-as-code"],
            vec!["terraform", "ansible"]
        );
    }

    #[test]
    fn serializes_camel_case() {
        let stats = compute_stats(&[with_tags("1", "Acme", &["rust"])], &system(), 5);
        let value = serde_json::to_value(&stats).unwrap();
        assert!(value["jobs"]["byCompany"].is_object());
        assert!(value["tags"]["topTags"].is_array());
        assert_eq!(value["uniqueTags"], 1);
        assert_eq!(value["tags"]["byCategory"]["languages"][0], "rust");
    }
}
