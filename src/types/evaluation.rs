use serde::Serialize;

use crate::document::Document;
use crate::types::query::LogicalOperator;

/// Outcome of a single filter, after negation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub kind: &'static str,
    pub negated: bool,
    pub matched: bool,
}

/// Explanation for one group of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupExplanation {
    pub operator: LogicalOperator,
    pub matched: bool,
    pub filters: Vec<FilterOutcome>,
}

/// Why a document did or did not match a query.
/// Every filter is evaluated, so this is the full picture, not the
/// short-circuited path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchExplanation {
    pub path: String,
    pub global_operator: LogicalOperator,
    pub matched: bool,
    pub groups: Vec<GroupExplanation>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub documents_considered: usize,
    pub documents_matched: usize,
}

/// Result of a corpus-wide scan, in corpus order.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub documents: Vec<Document>,
    pub summary: ScanSummary,
}
