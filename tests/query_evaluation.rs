mod common;

use common::{corpus, days_ago, now, DocSpec};
use filter_core::config::EvaluatorConfig;
use filter_core::corpus::MemoryCorpus;
use filter_core::document::Document;
use filter_core::filter::QueryEvaluator;
use filter_core::types::{
    DateField, DateRangeFilter, Filter, FilterGroup, FilterQuery, FrontmatterFilter,
    FrontmatterOperator, LogicalOperator, SearchMode,
};

fn setup(spec: DocSpec) -> (Document, QueryEvaluator<MemoryCorpus>) {
    let doc = spec.document();
    (doc, QueryEvaluator::with_defaults(corpus(vec![spec])))
}

fn never() -> Filter {
    Filter::tag("never-present")
}

fn always() -> Filter {
    Filter::tag("never-present").negated()
}

#[tokio::test]
async fn scenario_a_tag_and_folder() {
    let (doc, evaluator) = setup(DocSpec::new("/Notes/2024/plan.md").tags(&["#project"]));
    assert_eq!(doc.parent_folder_path(), "Notes/2024");

    let query = FilterQuery::new(
        LogicalOperator::And,
        vec![FilterGroup::all(vec![
            Filter::tag("project"),
            Filter::folder("/Notes", true),
        ])],
    );
    assert!(evaluator.evaluate_query(&doc, &query, now()).await);
}

#[tokio::test]
async fn scenario_b_missing_frontmatter() {
    let (doc, evaluator) = setup(DocSpec::new("a.md"));
    let query = FilterQuery::new(
        LogicalOperator::And,
        vec![FilterGroup::all(vec![Filter::new(FrontmatterFilter {
            property: "archived".into(),
            operator: FrontmatterOperator::NotExists,
            value: None,
        })])],
    );
    assert!(evaluator.evaluate_query(&doc, &query, now()).await);
}

#[tokio::test]
async fn scenario_c_invalid_regex_is_false() {
    let (doc, evaluator) = setup(DocSpec::new("a.md").content("foo( bar"));
    let query = FilterQuery::new(
        LogicalOperator::And,
        vec![FilterGroup::all(vec![Filter::text("foo(", SearchMode::Regex, false)])],
    );
    assert!(!evaluator.evaluate_query(&doc, &query, now()).await);
}

#[tokio::test]
async fn scenario_d_last_n_days() {
    let (doc, evaluator) = setup(DocSpec::new("a.md").modified(days_ago(3)));
    let query = |days| {
        FilterQuery::new(
            LogicalOperator::And,
            vec![FilterGroup::all(vec![Filter::new(DateRangeFilter::last_n_days(
                DateField::Modified,
                days,
            ))])],
        )
    };
    assert!(evaluator.evaluate_query(&doc, &query(7), now()).await);
    assert!(!evaluator.evaluate_query(&doc, &query(1), now()).await);
}

#[tokio::test]
async fn scenario_e_empty_group_dominates_or() {
    let (doc, evaluator) = setup(DocSpec::new("a.md"));
    let query = FilterQuery::new(
        LogicalOperator::Or,
        vec![FilterGroup::all(vec![never()]), FilterGroup::default()],
    );
    assert!(evaluator.evaluate_query(&doc, &query, now()).await);

    // An empty group is vacuously true whatever its own operator.
    let query = FilterQuery::new(
        LogicalOperator::And,
        vec![FilterGroup::any(vec![])],
    );
    assert!(evaluator.evaluate_query(&doc, &query, now()).await);
}

#[tokio::test]
async fn scenario_f_file_name_substring() {
    let (doc, evaluator) = setup(DocSpec::new("Drafts/Draft-Notes.md"));
    let query = FilterQuery::new(
        LogicalOperator::And,
        vec![FilterGroup::all(vec![Filter::file_name("draft", false)])],
    );
    assert!(evaluator.evaluate_query(&doc, &query, now()).await);
}

#[tokio::test]
async fn empty_query_matches_everything() {
    let (doc, evaluator) = setup(DocSpec::new("a.md").no_metadata().no_stat().unreadable());
    for op in [LogicalOperator::And, LogicalOperator::Or] {
        assert!(evaluator.evaluate_query(&doc, &FilterQuery::new(op, vec![]), now()).await);
    }
}

#[tokio::test]
async fn group_and_global_operators() {
    let (doc, evaluator) = setup(DocSpec::new("a.md"));

    let cases = [
        (LogicalOperator::And, vec![always(), always()], true),
        (LogicalOperator::And, vec![always(), never()], false),
        (LogicalOperator::Or, vec![never(), always()], true),
        (LogicalOperator::Or, vec![never(), never()], false),
    ];
    for (op, filters, expected) in cases {
        let query = FilterQuery::new(LogicalOperator::And, vec![FilterGroup::new(op, filters)]);
        assert_eq!(evaluator.evaluate_query(&doc, &query, now()).await, expected, "{op:?}");
    }

    let matching = FilterGroup::all(vec![always()]);
    let failing = FilterGroup::all(vec![never()]);

    let and = FilterQuery::new(LogicalOperator::And, vec![matching.clone(), failing.clone()]);
    assert!(!evaluator.evaluate_query(&doc, &and, now()).await);

    let or = FilterQuery::new(LogicalOperator::Or, vec![failing.clone(), matching]);
    assert!(evaluator.evaluate_query(&doc, &or, now()).await);

    let or_none = FilterQuery::new(LogicalOperator::Or, vec![failing.clone(), failing]);
    assert!(!evaluator.evaluate_query(&doc, &or_none, now()).await);
}

#[tokio::test]
async fn explain_reports_every_filter() {
    let (doc, evaluator) = setup(DocSpec::new("Notes/a.md").tags(&["#x"]).content("hello"));
    let query = FilterQuery::new(
        LogicalOperator::Or,
        vec![
            FilterGroup::all(vec![never(), Filter::text("hello", SearchMode::Contains, false)]),
            FilterGroup::any(vec![Filter::tag("x"), Filter::folder("Other", false)]),
        ],
    );

    let explanation = evaluator.explain(&doc, &query, now()).await;
    assert!(explanation.matched);
    assert_eq!(explanation.path, "Notes/a.md");
    assert_eq!(explanation.groups.len(), 2);

    let first = &explanation.groups[0];
    assert!(!first.matched);
    assert_eq!(
        first.filters.iter().map(|f| (f.kind, f.matched)).collect::<Vec<_>>(),
        vec![("tag", false), ("textContent", true)],
    );

    let second = &explanation.groups[1];
    assert!(second.matched);
    assert_eq!(
        second.filters.iter().map(|f| f.matched).collect::<Vec<_>>(),
        vec![true, false],
    );

    assert_eq!(
        explanation.matched,
        evaluator.evaluate_query(&doc, &query, now()).await
    );
}

#[tokio::test]
async fn eager_evaluation_agrees_with_short_circuit() {
    let specs = || {
        vec![
            DocSpec::new("Notes/a.md").tags(&["#x"]).content("alpha"),
            DocSpec::new("Notes/b.md").content("beta").modified(days_ago(20)),
            DocSpec::new("c.md").unreadable(),
        ]
    };
    let query = FilterQuery::new(
        LogicalOperator::Or,
        vec![
            FilterGroup::all(vec![
                Filter::folder("Notes", true),
                Filter::text("ALPHA", SearchMode::Contains, false),
            ]),
            FilterGroup::any(vec![
                Filter::new(DateRangeFilter::last_n_days(DateField::Modified, 7)).negated(),
                Filter::text("beta", SearchMode::Exact, true),
            ]),
        ],
    );

    let lazy = QueryEvaluator::with_defaults(corpus(specs()));
    let eager = QueryEvaluator::new(
        corpus(specs()),
        EvaluatorConfig {
            short_circuit: false,
            ..EvaluatorConfig::default()
        },
    );

    for spec in specs() {
        let doc = spec.document();
        assert_eq!(
            lazy.evaluate_query(&doc, &query, now()).await,
            eager.evaluate_query(&doc, &query, now()).await,
            "{}",
            doc.path
        );
    }
}
