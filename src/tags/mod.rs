pub mod catalog;
pub mod data;
pub mod extract;
pub mod system;

pub use catalog::{CatalogBuilder, KeywordCatalog, TagCategory, TagGroup};
pub use extract::{ExtractOptions, TagExtractor};
pub use system::{
    GroupBucket, MatchType, RelatedSuggestion, TagAnalysis, TagCount, TagStats, TagSuggestion,
    TagSystem,
};
