pub mod combine;
pub mod pattern;
pub mod predicate;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use futures::stream::{self, StreamExt};

use crate::config::EvaluatorConfig;
use crate::corpus::Corpus;
use crate::document::Document;
use crate::types::evaluation::{
    FilterOutcome, GroupExplanation, MatchExplanation, ScanResult, ScanSummary,
};
use crate::types::query::{FilterGroup, FilterQuery};
pub use combine::{combine, combine_lazy};
pub use pattern::PatternSet;
pub use predicate::{parse_filter_date, PredicateEvaluator};

/// Evaluates filter queries against documents of a corpus.
///
/// Holds no mutable state: one evaluator can serve any number of concurrent
/// evaluations.
pub struct QueryEvaluator<C> {
    corpus: C,
    config: EvaluatorConfig,
    predicates: PredicateEvaluator,
}

impl<C: Corpus> QueryEvaluator<C> {
    pub fn new(corpus: C, config: EvaluatorConfig) -> Self {
        let predicates = PredicateEvaluator::new(&config);
        Self {
            corpus,
            config,
            predicates,
        }
    }

    pub fn with_defaults(corpus: C) -> Self {
        Self::new(corpus, EvaluatorConfig::default())
    }

    /// Whether `document` matches `query` at time `now`.
    pub async fn evaluate_query(
        &self,
        document: &Document,
        query: &FilterQuery,
        now: DateTime<Utc>,
    ) -> bool {
        let patterns = PatternSet::for_query(query, self.config.regex_size_limit);
        self.matches(document, query, now, &patterns).await
    }

    async fn matches(
        &self,
        document: &Document,
        query: &FilterQuery,
        now: DateTime<Utc>,
        patterns: &PatternSet,
    ) -> bool {
        if query.is_empty() {
            return true;
        }

        let groups = query
            .groups
            .iter()
            .map(|group| self.evaluate_group(document, group, now, patterns));

        if self.config.short_circuit {
            combine_lazy(query.global_operator, groups).await
        } else {
            combine(query.global_operator, join_all(groups).await)
        }
    }

    async fn evaluate_group(
        &self,
        document: &Document,
        group: &FilterGroup,
        now: DateTime<Utc>,
        patterns: &PatternSet,
    ) -> bool {
        if group.filters.is_empty() {
            return true;
        }

        let outcomes = group.filters.iter().map(|filter| {
            self.predicates
                .evaluate_with(document, filter, &self.corpus, now, patterns)
        });

        if self.config.short_circuit {
            combine_lazy(group.operator, outcomes).await
        } else {
            combine(group.operator, join_all(outcomes).await)
        }
    }

    /// Evaluate every filter and report each outcome.
    pub async fn explain(
        &self,
        document: &Document,
        query: &FilterQuery,
        now: DateTime<Utc>,
    ) -> MatchExplanation {
        let patterns = PatternSet::for_query(query, self.config.regex_size_limit);
        let mut groups = Vec::with_capacity(query.groups.len());
        for group in &query.groups {
            let results = join_all(group.filters.iter().map(|filter| {
                self.predicates
                    .evaluate_with(document, filter, &self.corpus, now, &patterns)
            }))
            .await;

            let matched = group.filters.is_empty() || combine(group.operator, results.iter().copied());
            let filters = group
                .filters
                .iter()
                .zip(results)
                .map(|(filter, matched)| FilterOutcome {
                    kind: filter.kind.label(),
                    negated: filter.negate,
                    matched,
                })
                .collect();

            groups.push(GroupExplanation {
                operator: group.operator,
                matched,
                filters,
            });
        }

        let matched = groups.is_empty() || combine(query.global_operator, groups.iter().map(|g| g.matched));

        MatchExplanation {
            path: document.path.to_string(),
            global_operator: query.global_operator,
            matched,
            groups,
        }
    }

    /// Documents matching `query`, in corpus order.
    pub async fn get_matching_files(&self, query: &FilterQuery, now: DateTime<Utc>) -> Vec<Document> {
        self.scan(query, now).await.documents
    }

    /// Evaluate every document of the corpus, at most
    /// `max_concurrent_evaluations` documents at a time, keeping corpus
    /// order. Patterns are compiled once per scan.
    pub async fn scan(&self, query: &FilterQuery, now: DateTime<Utc>) -> ScanResult {
        let documents = self.corpus.list_documents();
        let documents_considered = documents.len();
        let limit = self.config.max_concurrent_evaluations.max(1);
        let patterns = PatternSet::for_query(query, self.config.regex_size_limit);
        let patterns = &patterns;

        let documents: Vec<Document> = stream::iter(documents)
            .map(|document| async move {
                let matched = self.matches(&document, query, now, patterns).await;
                (document, matched)
            })
            .buffered(limit)
            .filter_map(|(document, matched)| async move { matched.then_some(document) })
            .collect()
            .await;

        let summary = ScanSummary {
            documents_considered,
            documents_matched: documents.len(),
        };
        tracing::debug!(
            considered = summary.documents_considered,
            matched = summary.documents_matched,
            patterns = patterns.len(),
            "filter scan complete"
        );

        ScanResult { documents, summary }
    }
}
