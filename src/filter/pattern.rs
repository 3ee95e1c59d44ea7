use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::types::query::{FilterKind, FilterQuery, SearchMode};

/// Compile a user-supplied pattern. Invalid or oversized patterns yield
/// `None`; callers treat that as a non-match.
pub fn compile_pattern(pattern: &str, case_insensitive: bool, size_limit: usize) -> Option<Regex> {
    match RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .size_limit(size_limit)
        .build()
    {
        Ok(regex) => Some(regex),
        Err(err) => {
            tracing::debug!(pattern, error = %err, "rejecting filter pattern");
            None
        }
    }
}

/// The patterns of one query, compiled once and shared by every document
/// evaluation of a scan. Keyed by pattern text and case-insensitivity; a
/// pattern that failed to compile is kept as `None`.
#[derive(Debug, Default)]
pub struct PatternSet {
    compiled: HashMap<(String, bool), Option<Regex>>,
}

impl PatternSet {
    pub fn for_query(query: &FilterQuery, size_limit: usize) -> Self {
        let mut compiled = HashMap::new();
        let filters = query.groups.iter().flat_map(|group| group.filters.iter());
        for filter in filters {
            let key = match &filter.kind {
                FilterKind::TextContent(text) if text.search_mode == SearchMode::Regex => {
                    (text.query.clone(), !text.case_sensitive)
                }
                FilterKind::FileName(name) if name.is_regex => (name.pattern.clone(), false),
                _ => continue,
            };
            compiled
                .entry(key)
                .or_insert_with_key(|(pattern, ci)| compile_pattern(pattern, *ci, size_limit));
        }
        Self { compiled }
    }

    /// `None` when the pattern is not part of the set; `Some(None)` when it
    /// is but failed to compile.
    pub fn lookup(&self, pattern: &str, case_insensitive: bool) -> Option<Option<&Regex>> {
        self.compiled
            .get(&(pattern.to_string(), case_insensitive))
            .map(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
