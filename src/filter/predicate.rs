//! Per-kind predicate semantics.
//!
//! Every failure resolves to `false` before negation: a broken filter
//! excludes documents, it never aborts an evaluation or matches everything.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use regex::Regex;

use super::pattern::{compile_pattern, PatternSet};
use crate::config::{EvaluatorConfig, FolderMatch};
use crate::corpus::ContentSource;
use crate::document::{normalize_tag, Document};
use crate::types::identifiers::FolderPath;
use crate::types::query::{
    DateField, DateRangeFilter, DateRangeType, FileNameFilter, Filter, FilterKind, FolderFilter,
    FrontmatterFilter, FrontmatterOperator, SearchMode, TagFilter, TextContentFilter,
};

pub const MS_PER_DAY: i64 = 86_400_000;

/// Evaluates one filter against one document snapshot.
///
/// Stateless apart from its settings; share it freely across tasks.
#[derive(Debug, Clone)]
pub struct PredicateEvaluator {
    folder_match: FolderMatch,
    regex_size_limit: usize,
}

impl Default for PredicateEvaluator {
    fn default() -> Self {
        Self::new(&EvaluatorConfig::default())
    }
}

impl PredicateEvaluator {
    pub fn new(config: &EvaluatorConfig) -> Self {
        Self {
            folder_match: config.folder_match,
            regex_size_limit: config.regex_size_limit,
        }
    }

    /// Evaluate `filter` for `document` at time `now`, negation applied.
    /// Patterns are compiled on demand.
    pub async fn evaluate(
        &self,
        document: &Document,
        filter: &Filter,
        content: &dyn ContentSource,
        now: DateTime<Utc>,
    ) -> bool {
        self.evaluate_with(document, filter, content, now, &PatternSet::default())
            .await
    }

    /// As [`evaluate`](Self::evaluate), taking compiled patterns from
    /// `patterns` and compiling only those it lacks.
    pub async fn evaluate_with(
        &self,
        document: &Document,
        filter: &Filter,
        content: &dyn ContentSource,
        now: DateTime<Utc>,
        patterns: &PatternSet,
    ) -> bool {
        let raw = match &filter.kind {
            FilterKind::TextContent(text) => {
                self.matches_text(document, text, content, patterns).await
            }
            kind => self.matches_metadata(document, kind, now, patterns),
        };
        raw != filter.negate
    }

    /// Raw result for every kind that needs no content read.
    fn matches_metadata(
        &self,
        document: &Document,
        kind: &FilterKind,
        now: DateTime<Utc>,
        patterns: &PatternSet,
    ) -> bool {
        match kind {
            FilterKind::Tag(f) => matches_tag(document, f),
            FilterKind::Frontmatter(f) => matches_frontmatter(document, f),
            FilterKind::Folder(f) => self.matches_folder(document, f),
            FilterKind::DateRange(f) => matches_date_range(document, f, now),
            FilterKind::FileName(f) => self.matches_file_name(document, f, patterns),
            FilterKind::TextContent(_) => false,
        }
    }

    fn pattern(&self, patterns: &PatternSet, pattern: &str, case_insensitive: bool) -> Option<Regex> {
        match patterns.lookup(pattern, case_insensitive) {
            Some(compiled) => compiled.cloned(),
            None => compile_pattern(pattern, case_insensitive, self.regex_size_limit),
        }
    }

    fn matches_folder(&self, document: &Document, filter: &FolderFilter) -> bool {
        let folder = FolderPath::new(&filter.path);

        if !filter.include_subfolders {
            return document.parent_folder() == folder;
        }
        if folder.is_root() {
            return true;
        }

        let path = document.path.as_str();
        match self.folder_match {
            FolderMatch::Prefix => path.starts_with(&FolderPath::subtree_prefix(&filter.path)),
            FolderMatch::Segment => path
                .strip_prefix(folder.as_str())
                .is_some_and(|rest| rest.starts_with('/')),
        }
    }

    fn matches_file_name(
        &self,
        document: &Document,
        filter: &FileNameFilter,
        patterns: &PatternSet,
    ) -> bool {
        let name = document.name();
        if filter.is_regex {
            return self
                .pattern(patterns, &filter.pattern, false)
                .is_some_and(|re| re.is_match(name));
        }
        name.to_lowercase().contains(&filter.pattern.to_lowercase())
    }

    async fn matches_text(
        &self,
        document: &Document,
        filter: &TextContentFilter,
        source: &dyn ContentSource,
        patterns: &PatternSet,
    ) -> bool {
        // A malformed pattern fails before any read.
        let pattern = match filter.search_mode {
            SearchMode::Regex => {
                match self.pattern(patterns, &filter.query, !filter.case_sensitive) {
                    Some(re) => Some(re),
                    None => return false,
                }
            }
            _ => None,
        };

        let content = match source.read_content(&document.path).await {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!(path = %document.path, error = %err, "content unreadable, filter fails closed");
                return false;
            }
        };

        match (filter.search_mode, pattern) {
            (SearchMode::Regex, Some(re)) => re.is_match(&content),
            (SearchMode::Regex, None) => false,
            (SearchMode::Contains, _) if filter.case_sensitive => content.contains(&filter.query),
            (SearchMode::Contains, _) => content
                .to_lowercase()
                .contains(&filter.query.to_lowercase()),
            (SearchMode::Exact, _) if filter.case_sensitive => content == filter.query,
            (SearchMode::Exact, _) => content.to_lowercase() == filter.query.to_lowercase(),
        }
    }
}

fn matches_tag(document: &Document, filter: &TagFilter) -> bool {
    document.has_tag(&normalize_tag(&filter.tag))
}

fn matches_frontmatter(document: &Document, filter: &FrontmatterFilter) -> bool {
    let Some(frontmatter) = &document.frontmatter else {
        return filter.operator == FrontmatterOperator::NotExists;
    };

    match filter.operator {
        FrontmatterOperator::Exists => frontmatter.contains_key(&filter.property),
        FrontmatterOperator::NotExists => !frontmatter.contains_key(&filter.property),
        FrontmatterOperator::Equals => {
            let Some(expected) = non_empty(filter.value.as_deref()) else {
                return false;
            };
            frontmatter
                .get(&filter.property)
                .is_some_and(|v| v.to_filter_string() == expected)
        }
        FrontmatterOperator::Contains => {
            let Some(needle) = non_empty(filter.value.as_deref()) else {
                return false;
            };
            frontmatter.get(&filter.property).is_some_and(|v| {
                v.to_filter_string()
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn matches_date_range(document: &Document, filter: &DateRangeFilter, now: DateTime<Utc>) -> bool {
    let stamp = match filter.date_type {
        DateField::Modified => document.modified_at,
        DateField::Created => document.created_at,
    };
    let Some(stamp) = stamp else {
        tracing::debug!(path = %document.path, "no timestamp, date filter fails closed");
        return false;
    };
    let ts = stamp.timestamp_millis();

    match filter.range_type {
        DateRangeType::LastNDays => {
            let Some(days) = filter.days else {
                return false;
            };
            days.checked_mul(MS_PER_DAY)
                .and_then(|window| now.timestamp_millis().checked_sub(window))
                .is_some_and(|cutoff| ts >= cutoff)
        }
        DateRangeType::Before => {
            date_millis(filter.date.as_deref()).is_some_and(|bound| ts < bound)
        }
        DateRangeType::After => {
            date_millis(filter.date.as_deref()).is_some_and(|bound| ts > bound)
        }
        DateRangeType::Custom => {
            match (
                date_millis(filter.start_date.as_deref()),
                date_millis(filter.end_date.as_deref()),
            ) {
                (Some(start), Some(end)) => start <= ts && ts <= end,
                _ => false,
            }
        }
    }
}

fn date_millis(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = parse_filter_date(raw);
    if parsed.is_none() {
        tracing::debug!(date = raw, "unparseable filter date");
    }
    parsed.map(|d| d.timestamp_millis())
}

/// Parse a configured date: RFC 3339, a naive date-time (UTC) or a bare
/// date (UTC midnight).
pub fn parse_filter_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
