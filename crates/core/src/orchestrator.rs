// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Top-Level Rewrite Orchestrator
//!
//! The single entry point planners call (spec §6): [`rewrite`] takes a base
//! query, a view's extracted [`ViewInfo`], and the target table the view's
//! contents are physically queryable under, and returns either a rewritten
//! query or the original query unchanged.
//!
//! This function **never fails**. Every precondition below is a gate: the
//! first one that doesn't hold short-circuits the whole attempt back to
//! the original `query`, cloned as-is (spec §7: "the orchestrator *never*
//! raises ... causes it to return the original `Q` unchanged"). Only
//! `trace!`/`debug!` are emitted on a failed gate — a fallback is the
//! rewriter working as designed, not a warning-worthy event.

use mv_rewrite_ast::{FromClause, Query};
use mv_rewrite_catalog::{MetadataOracle, SessionContext};

use crate::containment::check_containment;
use crate::rewriter::{rewrite_expr, rewrite_group_by, rewrite_order_by, rewrite_select_list};
use crate::view_info::ViewInfo;

/// Attempts to rewrite `query` to read from `target` instead of
/// `view.base_table()`, consulting `oracle` for column types.
///
/// `session` is threaded through to the metadata oracle and domain
/// translator but never itself inspected (spec §6); it exists purely as a
/// collaborator seam for callers that need to scope catalog lookups to a
/// transaction or request.
pub fn rewrite(
    query: &Query,
    view: &ViewInfo,
    target: &mv_rewrite_ast::TableRef,
    oracle: &dyn MetadataOracle,
    _session: &SessionContext,
) -> Query {
    match try_rewrite(query, view, target, oracle) {
        Some(rewritten) => {
            tracing::debug!("query rewritten against materialized view");
            rewritten
        }
        None => {
            tracing::trace!("rewrite aborted; returning original query unchanged");
            query.clone()
        }
    }
}

fn try_rewrite(
    query: &Query,
    view: &ViewInfo,
    target: &mv_rewrite_ast::TableRef,
    oracle: &dyn MetadataOracle,
) -> Option<Query> {
    // Gate 1: single query specification, no set operations.
    if query.is_set_operation {
        tracing::trace!("gate 1 failed: query is a set operation");
        return None;
    }

    // Gates 2 & 3: FROM is a single bare table equal to the view's base
    // table, with no alias, no JOIN, no subquery.
    let from_table = match &query.from {
        FromClause::Table {
            table,
            alias: None,
        } => table,
        FromClause::Table { alias: Some(_), .. } => {
            tracing::trace!("gate 3 failed: query FROM table has an alias");
            return None;
        }
        FromClause::Join => {
            tracing::trace!("gate 3 failed: query FROM is a JOIN");
            return None;
        }
        FromClause::Subquery => {
            tracing::trace!("gate 3 failed: query FROM is a subquery");
            return None;
        }
    };
    if from_table != view.base_table() {
        tracing::trace!("gate 2 failed: query does not reference the view's base table");
        return None;
    }

    // Gate 4: no SELECT *.
    if query.has_star_projection() {
        tracing::trace!("gate 4 failed: query projects SELECT *");
        return None;
    }

    // Gate 5: DISTINCT compatibility.
    if view.is_distinct() && !query.distinct {
        tracing::trace!("gate 5 failed: view is DISTINCT but query is not");
        return None;
    }

    // Gate 6: GROUP BY compatibility.
    if !view.group_by().is_empty() && !query.aggregates() {
        tracing::trace!("gate 6 failed: view has GROUP BY but query does not aggregate");
        return None;
    }
    let rewritten_group_by = if query.group_by.is_empty() {
        Vec::new()
    } else {
        rewrite_group_by(&query.group_by, view).or_else(|| {
            tracing::trace!("gate 6 failed: a GROUP BY key is not expressible from the view");
            None
        })?
    };

    // Gate 7: SELECT list, WHERE, ORDER BY must all be rewritable; there is
    // no rule for rewriting HAVING, so a query that has one is refused the
    // same way an unsupported shape would be. LIMIT passes through
    // unrewritten — it applies post-scan of the view (spec §4.4 gate 7).
    if query.having.is_some() {
        tracing::trace!("gate 7 failed: query has a HAVING clause");
        return None;
    }
    let rewritten_select = rewrite_select_list(&query.projection, view).or_else(|| {
        tracing::trace!("gate 7 failed: a SELECT item is not expressible from the view");
        None
    })?;
    let rewritten_where = match &query.where_clause {
        Some(expr) => Some(rewrite_expr(expr, view).or_else(|| {
            tracing::trace!("gate 7 failed: WHERE clause is not expressible from the view");
            None
        })?),
        None => None,
    };
    let rewritten_order_by = rewrite_order_by(&query.order_by, view).or_else(|| {
        tracing::trace!("gate 7 failed: an ORDER BY item is not expressible from the view");
        None
    })?;

    // Gate 8: filter containment.
    if !check_containment(
        query.where_clause.as_ref(),
        view.where_clause(),
        oracle,
        view.base_table(),
    ) {
        tracing::trace!("gate 8 failed: query's WHERE is not contained in the view's WHERE");
        return None;
    }

    let mut rewritten = Query::new(
        rewritten_select,
        FromClause::Table {
            table: target.clone(),
            alias: None,
        },
    );
    rewritten.distinct = query.distinct;
    rewritten.where_clause = rewritten_where;
    rewritten.group_by = rewritten_group_by;
    rewritten.order_by = rewritten_order_by;
    rewritten.limit = query.limit.clone();
    Some(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_info::extract_view_info;
    use mv_rewrite_ast::{CompOp, Expr, SelectItem, TableRef};
    use mv_rewrite_catalog::SqlType;

    struct IntOracle;

    impl MetadataOracle for IntOracle {
        fn type_of(&self, _table: &str, _column: &str) -> Option<SqlType> {
            Some(SqlType::Integer)
        }
    }

    fn base_table() -> FromClause {
        FromClause::Table {
            table: TableRef::new("t1"),
            alias: None,
        }
    }

    #[test]
    fn identical_projection_rewrites_to_the_view() {
        let view_query = Query::new(
            vec![SelectItem::new(Expr::column("a")), SelectItem::new(Expr::column("b"))],
            base_table(),
        );
        let info = extract_view_info(&view_query).unwrap();
        let query = Query::new(
            vec![SelectItem::new(Expr::column("a")), SelectItem::new(Expr::column("b"))],
            base_table(),
        );
        let target = TableRef::new("view");
        let out = rewrite(&query, &info, &target, &IntOracle, &SessionContext);
        assert_eq!(out.from, FromClause::Table { table: target, alias: None });
        assert_eq!(out.projection.len(), 2);
    }

    #[test]
    fn join_in_base_query_falls_back_unchanged() {
        let view_query = Query::new(vec![SelectItem::new(Expr::column("a"))], base_table());
        let info = extract_view_info(&view_query).unwrap();
        let query = Query::new(vec![SelectItem::new(Expr::column("a"))], FromClause::Join);
        let target = TableRef::new("view");
        let out = rewrite(&query, &info, &target, &IntOracle, &SessionContext);
        assert_eq!(out, query);
    }

    #[test]
    fn view_distinct_query_not_distinct_falls_back() {
        let view_query =
            Query::new(vec![SelectItem::new(Expr::column("a"))], base_table()).with_distinct(true);
        let info = extract_view_info(&view_query).unwrap();
        let query = Query::new(vec![SelectItem::new(Expr::column("a"))], base_table());
        let target = TableRef::new("view");
        let out = rewrite(&query, &info, &target, &IntOracle, &SessionContext);
        assert_eq!(out, query);
    }

    #[test]
    fn unresolvable_column_falls_back() {
        let view_query = Query::new(vec![SelectItem::new(Expr::column("a"))], base_table());
        let info = extract_view_info(&view_query).unwrap();
        let query = Query::new(vec![SelectItem::new(Expr::column("missing"))], base_table());
        let target = TableRef::new("view");
        let out = rewrite(&query, &info, &target, &IntOracle, &SessionContext);
        assert_eq!(out, query);
    }

    #[test]
    fn failed_containment_falls_back() {
        let view_query = Query::new(vec![SelectItem::new(Expr::column("a"))], base_table())
            .with_where(Expr::cmp(CompOp::Eq, Expr::column("a"), Expr::int(5)));
        let info = extract_view_info(&view_query).unwrap();
        let query = Query::new(vec![SelectItem::new(Expr::column("a"))], base_table())
            .with_where(Expr::cmp(CompOp::Eq, Expr::column("a"), Expr::int(4)));
        let target = TableRef::new("view");
        let out = rewrite(&query, &info, &target, &IntOracle, &SessionContext);
        assert_eq!(out, query);
    }
}
