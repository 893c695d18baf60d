use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::types::{FeatureTable, MatchResult, Statement, StatementKind};

/// Evaluate `statement` against `table`.
///
/// `And`/`Or` visit children in declared order; with `short_circuit` set they
/// stop at the first child that decides the outcome, and only the visited
/// prefix is captured. `Some` always visits every child. The success verdict
/// never depends on `short_circuit`.
pub(crate) fn evaluate<'a>(
    statement: &'a Statement,
    table: &FeatureTable,
    short_circuit: bool,
) -> MatchResult<'a> {
    match statement.kind() {
        StatementKind::Leaf(feature) => {
            let locations = table.locations(feature).clone();
            MatchResult::new(!locations.is_empty(), statement, locations, Vec::new())
        }
        StatementKind::Range { feature, min, max } => {
            let locations = table.locations(feature).clone();
            let count = locations.len() as u64;
            let success = *min <= count && max.is_none_or(|max| count <= max);
            MatchResult::new(success, statement, locations, Vec::new())
        }
        StatementKind::And(children) => {
            let (success, results) = eval_until(children, table, short_circuit, false);
            composite(statement, success, children.len(), results)
        }
        StatementKind::Or(children) => {
            let (success, results) = eval_until(children, table, short_circuit, true);
            composite(statement, success, children.len(), results)
        }
        StatementKind::Not(child) => {
            let result = evaluate(child, table, short_circuit);
            composite(statement, !result.success(), 1, vec![result])
        }
        StatementKind::Some {
            threshold,
            children,
        } => {
            let results: Vec<MatchResult<'a>> = children
                .iter()
                .map(|child| evaluate(child, table, short_circuit))
                .collect();
            let satisfied = results.iter().filter(|r| r.success()).count();
            composite(statement, satisfied >= *threshold, children.len(), results)
        }
    }
}

/// Evaluate `children` in order looking for one whose success equals `stop_on`,
/// returning the node verdict alongside the captured results.
///
/// `And` passes `stop_on = false` and is satisfied when no child failed.
/// `Or` passes `stop_on = true` and is satisfied when some child succeeded.
fn eval_until<'a>(
    children: &'a [Statement],
    table: &FeatureTable,
    short_circuit: bool,
    stop_on: bool,
) -> (bool, Vec<MatchResult<'a>>) {
    let mut results = Vec::with_capacity(children.len());
    let mut found = false;

    for child in children {
        let result = evaluate(child, table, short_circuit);
        let hit = result.success() == stop_on;
        results.push(result);
        if hit {
            found = true;
            if short_circuit {
                debug!(
                    visited = results.len(),
                    declared = children.len(),
                    "short-circuit stopped evaluation"
                );
                break;
            }
        }
    }

    (found == stop_on, results)
}

fn composite<'a>(
    statement: &'a Statement,
    success: bool,
    declared: usize,
    children: Vec<MatchResult<'a>>,
) -> MatchResult<'a> {
    trace!(
        kind = statement.kind().name(),
        success,
        evaluated = children.len(),
        declared,
        "evaluated statement"
    );
    MatchResult::new(success, statement, BTreeSet::new(), children)
}
