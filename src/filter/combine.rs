use std::future::Future;

use crate::types::query::LogicalOperator;

impl LogicalOperator {
    /// The outcome that settles the combination on its own:
    /// `false` for AND, `true` for OR.
    pub fn decisive(self) -> bool {
        matches!(self, LogicalOperator::Or)
    }
}

/// AND: all true (true when empty). OR: any true (false when empty).
pub fn combine<I>(operator: LogicalOperator, outcomes: I) -> bool
where
    I: IntoIterator<Item = bool>,
{
    let decisive = operator.decisive();
    let mut result = !decisive;
    for outcome in outcomes {
        if outcome == decisive {
            result = decisive;
        }
    }
    result
}

/// Same rule as [`combine`], awaiting outcomes in order and stopping at the
/// first decisive one.
pub async fn combine_lazy<I, F>(operator: LogicalOperator, outcomes: I) -> bool
where
    I: IntoIterator<Item = F>,
    F: Future<Output = bool>,
{
    let decisive = operator.decisive();
    for outcome in outcomes {
        if outcome.await == decisive {
            return decisive;
        }
    }
    !decisive
}
