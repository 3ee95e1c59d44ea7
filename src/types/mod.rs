pub mod evaluation;
pub mod identifiers;
pub mod query;

pub use evaluation::{FilterOutcome, GroupExplanation, MatchExplanation, ScanResult, ScanSummary};
pub use identifiers::{DocumentPath, DocumentPathError, FolderPath};
pub use query::{
    DateField, DateRangeFilter, DateRangeType, FileNameFilter, Filter, FilterGroup, FilterKind,
    FilterQuery, FolderFilter, FrontmatterFilter, FrontmatterOperator, LogicalOperator,
    SearchMode, TagFilter, TextContentFilter,
};
