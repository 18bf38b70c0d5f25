// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expression Rewriter
//!
//! Recursively substitutes base-table references for their view-exposed
//! equivalents (spec §4.2). Every public function here returns `Option`
//! rather than a `Result`: `None` means "not expressible from this view",
//! which is never an error — it is the signal the orchestrator uses to
//! abort the whole rewrite and fall back to the original query (spec §7).

use mv_rewrite_ast::{Expr, SelectItem, SortItem};

use crate::view_info::ViewInfo;

/// Rewrites a single expression against a view, or returns `None` if any
/// part of it cannot be expressed from the view's projections.
///
/// Substitution policy (spec §4.2):
/// 1. If `e` as a whole is a key of `v.baseToView`, emit the mapped view
///    column — this is the structural match that lets `SUM(a*b+c)` rewrite
///    to `mv_sum` as a unit rather than failing because `a`, `b`, `c` are
///    not individually exposed.
/// 2. Otherwise recurse into composite nodes; any child returning `None`
///    aborts the whole subtree.
/// 3. A bare column not covered by rule 1 passes through unchanged if it
///    already names a view-exposed column (rule 3); otherwise `None`.
/// 4. Literals always pass through unchanged.
pub fn rewrite_expr(e: &Expr, view: &ViewInfo) -> Option<Expr> {
    if let Some(name) = view.base_to_view().get(e) {
        return Some(Expr::column(name.clone()));
    }

    match e {
        Expr::Column(c) => {
            if view.exposes_column(c.name()) {
                Some(e.clone())
            } else {
                None
            }
        }
        Expr::Literal(_) => Some(e.clone()),
        Expr::Arithmetic { op, left, right } => Some(Expr::Arithmetic {
            op: *op,
            left: Box::new(rewrite_expr(left, view)?),
            right: Box::new(rewrite_expr(right, view)?),
        }),
        Expr::Comparison { op, left, right } => Some(Expr::Comparison {
            op: *op,
            left: Box::new(rewrite_expr(left, view)?),
            right: Box::new(rewrite_expr(right, view)?),
        }),
        Expr::Logical { op, left, right } => Some(Expr::Logical {
            op: *op,
            left: Box::new(rewrite_expr(left, view)?),
            right: Box::new(rewrite_expr(right, view)?),
        }),
        Expr::Not(inner) => Some(Expr::Not(Box::new(rewrite_expr(inner, view)?))),
        Expr::Aggregate { name, args } => {
            let rewritten = args
                .iter()
                .map(|a| rewrite_expr(a, view))
                .collect::<Option<Vec<_>>>()?;
            Some(Expr::Aggregate {
                name: name.clone(),
                args: rewritten,
            })
        }
        Expr::InList {
            expr,
            list,
            negated,
        } => {
            let expr = rewrite_expr(expr, view)?;
            let list = list
                .iter()
                .map(|i| rewrite_expr(i, view))
                .collect::<Option<Vec<_>>>()?;
            Some(Expr::InList {
                expr: Box::new(expr),
                list,
                negated: *negated,
            })
        }
    }
}

/// Rewrites a SELECT list, preserving each item's alias (spec §4.2 "SELECT
/// list rewrite").
pub fn rewrite_select_list(items: &[SelectItem], view: &ViewInfo) -> Option<Vec<SelectItem>> {
    items
        .iter()
        .map(|item| {
            Some(SelectItem {
                expr: rewrite_expr(&item.expr, view)?,
                alias: item.alias.clone(),
            })
        })
        .collect()
}

/// Rewrites GROUP BY keys. Each key must either be a key of `baseToView` or
/// already name a view-exposed column (spec §4.2 "GROUP BY rewrite");
/// [`rewrite_expr`] already implements exactly this rule for bare columns,
/// so no separate logic is needed here.
pub fn rewrite_group_by(keys: &[Expr], view: &ViewInfo) -> Option<Vec<Expr>> {
    keys.iter().map(|k| rewrite_expr(k, view)).collect()
}

/// Rewrites ORDER BY items, preserving sort direction (spec §4.2 "ORDER BY
/// rewrite").
pub fn rewrite_order_by(items: &[SortItem], view: &ViewInfo) -> Option<Vec<SortItem>> {
    items
        .iter()
        .map(|item| {
            Some(SortItem {
                expr: rewrite_expr(&item.expr, view)?,
                direction: item.direction,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_info::extract_view_info;
    use mv_rewrite_ast::{ArithOp, FromClause, Query, SortDirection, TableRef};

    fn view_with_sum() -> ViewInfo {
        let view = Query::new(
            vec![
                SelectItem::aliased(
                    Expr::aggregate(
                        "SUM",
                        vec![Expr::Arithmetic {
                            op: ArithOp::Mul,
                            left: Box::new(Expr::column("a")),
                            right: Box::new(Expr::column("b")),
                        }],
                    ),
                    "mv_sum",
                ),
                SelectItem::new(Expr::column("d")),
            ],
            FromClause::Table {
                table: TableRef::new("t1"),
                alias: None,
            },
        );
        extract_view_info(&view).unwrap()
    }

    #[test]
    fn whole_expression_match_rewrites_to_view_column() {
        let view = view_with_sum();
        let query_expr = Expr::aggregate(
            "SUM",
            vec![Expr::Arithmetic {
                op: ArithOp::Mul,
                left: Box::new(Expr::column("a")),
                right: Box::new(Expr::column("b")),
            }],
        );
        let rewritten = rewrite_expr(&query_expr, &view).unwrap();
        assert_eq!(rewritten, Expr::column("mv_sum"));
    }

    #[test]
    fn bare_column_not_in_view_fails() {
        let view = view_with_sum();
        assert!(rewrite_expr(&Expr::column("a"), &view).is_none());
    }

    #[test]
    fn bare_column_already_exposed_passes_through() {
        let view = view_with_sum();
        assert_eq!(
            rewrite_expr(&Expr::column("d"), &view),
            Some(Expr::column("d"))
        );
    }

    #[test]
    fn composite_fails_if_any_child_fails() {
        let view = view_with_sum();
        let expr = Expr::and(
            Expr::column("d"),
            Expr::column("not_in_view"),
        );
        assert!(rewrite_expr(&expr, &view).is_none());
    }

    #[test]
    fn order_by_rewrite_preserves_direction() {
        let view = view_with_sum();
        let items = vec![SortItem::new(Expr::column("d"), SortDirection::Desc)];
        let rewritten = rewrite_order_by(&items, &view).unwrap();
        assert_eq!(rewritten[0].direction, SortDirection::Desc);
        assert_eq!(rewritten[0].expr, Expr::column("d"));
    }
}
