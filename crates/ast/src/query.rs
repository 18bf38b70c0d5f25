// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Query Representation
//!
//! This module represents the SQL query shapes the rewriter reasons about:
//! a materialized view's defining query `V`, and an incoming base query `Q`.
//!
//! ## Design
//!
//! Only a single SELECT specification over a single FROM item is modeled —
//! set operations (UNION/INTERSECT/EXCEPT), multi-table FROM clauses, and
//! subqueries have no representation here because the rewriter rejects them
//! before ever descending into them (the orchestrator's pre-flight gates
//! check [`Query::is_set_operation`] and the shape of [`FromClause`] up
//! front, not the structure of a would-be JOIN tree). There is deliberately
//! no `SetOp` enum: the rewriter only needs one bit of information about
//! what a query body *is* — "a bare SELECT, or something else" — never the
//! internal shape of the "something else".
//!
//! A [`Query`] is built directly from parsed values, not incrementally —
//! the crate offers no mutation API; a parser or test fixture constructs
//! one up front and the rewriter only ever reads it.

use crate::expr::{Expr, SortItem};
use serde::{Deserialize, Serialize};

/// A single qualified table name, e.g. `orders` or `sales.orders`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef(pub String);

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TableRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A single projected item in a SELECT list.
///
/// `alias` is `None` when the item carries no explicit `AS name`; the View
/// Info Extractor then falls back to [`Expr::canonical_text`] for the
/// view-exposed column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectItem {
    pub expr: Expr,
    pub alias: Option<String>,
}

impl SelectItem {
    pub fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    pub fn aliased(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }

    /// The name this item is exposed under: the alias if present, else the
    /// canonical rendering of the expression (spec §4.1).
    pub fn output_name(&self) -> String {
        match &self.alias {
            Some(alias) => alias.clone(),
            None => self.expr.canonical_text(),
        }
    }
}

/// The shape of a query's FROM clause.
///
/// Only [`FromClause::Table`] without an alias is ever accepted past the
/// orchestrator's pre-flight gates; [`FromClause::Join`] and
/// [`FromClause::Subquery`] carry no payload because the core never needs
/// to inspect what's inside an unsupported shape — recognizing it is
/// enough to bail out (spec §4.4 gate 3, Non-goal 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FromClause {
    /// A single bare table reference, with an optional alias.
    Table {
        table: TableRef,
        alias: Option<String>,
    },
    /// Any JOIN of two or more relations.
    Join,
    /// A derived table / subquery in FROM position.
    Subquery,
}

/// A SQL query, at the granularity the rewriter needs.
///
/// `is_set_operation` stands in for a full `SetOp` tree: the rewriter only
/// ever asks "is this a single query specification, yes or no" (spec §4.4
/// gate 1), so a boolean carries exactly as much information as the core
/// consumes and nothing the core would otherwise have to ignore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub distinct: bool,
    pub projection: Vec<SelectItem>,
    pub from: FromClause,
    pub where_clause: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    pub order_by: Vec<SortItem>,
    pub limit: Option<Expr>,
    pub is_set_operation: bool,
}

impl Query {
    /// A minimal `SELECT ... FROM table` with no other clauses.
    pub fn new(projection: Vec<SelectItem>, from: FromClause) -> Self {
        Self {
            distinct: false,
            projection,
            from,
            where_clause: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
            is_set_operation: false,
        }
    }

    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn with_where(mut self, expr: Expr) -> Self {
        self.where_clause = Some(expr);
        self
    }

    pub fn with_group_by(mut self, keys: Vec<Expr>) -> Self {
        self.group_by = keys;
        self
    }

    pub fn with_having(mut self, expr: Expr) -> Self {
        self.having = Some(expr);
        self
    }

    pub fn with_order_by(mut self, items: Vec<SortItem>) -> Self {
        self.order_by = items;
        self
    }

    pub fn with_limit(mut self, expr: Expr) -> Self {
        self.limit = Some(expr);
        self
    }

    /// True if any projection item is an unqualified `SELECT *`.
    ///
    /// There is no dedicated `Expr` variant for a star projection — a
    /// parser producing one would have nothing to hand the rewriter, since
    /// "every column" cannot be expressed via `baseToView` substitution.
    /// Modeled instead as an empty projection list, which the extractor and
    /// orchestrator both treat as the `SELECT *` rejection case.
    pub fn has_star_projection(&self) -> bool {
        self.projection.is_empty()
    }

    /// True if this query specification contains an aggregate anywhere in
    /// its SELECT list (spec §4.4 gate 6: "if `v` has a GROUP BY and `Q`
    /// does not aggregate, the rewrite is refused").
    pub fn aggregates(&self) -> bool {
        self.projection
            .iter()
            .any(|item| item.expr.is_or_contains_aggregate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{CompOp, SortDirection};

    fn simple_from() -> FromClause {
        FromClause::Table {
            table: TableRef::new("t1"),
            alias: None,
        }
    }

    #[test]
    fn new_query_has_no_optional_clauses() {
        let q = Query::new(vec![SelectItem::new(Expr::column("a"))], simple_from());
        assert!(!q.distinct);
        assert!(q.where_clause.is_none());
        assert!(q.group_by.is_empty());
        assert!(q.having.is_none());
        assert!(q.order_by.is_empty());
        assert!(q.limit.is_none());
        assert!(!q.is_set_operation);
    }

    #[test]
    fn select_item_output_name_prefers_alias() {
        let aliased = SelectItem::aliased(Expr::column("a"), "mv_a");
        assert_eq!(aliased.output_name(), "mv_a");

        let bare = SelectItem::new(Expr::column("a"));
        assert_eq!(bare.output_name(), "a");
    }

    #[test]
    fn builder_methods_compose() {
        let q = Query::new(vec![SelectItem::new(Expr::column("a"))], simple_from())
            .with_distinct(true)
            .with_where(Expr::cmp(CompOp::Lt, Expr::column("a"), Expr::int(10)))
            .with_group_by(vec![Expr::column("a")])
            .with_order_by(vec![SortItem::new(Expr::column("a"), SortDirection::Asc)])
            .with_limit(Expr::int(5));

        assert!(q.distinct);
        assert!(q.where_clause.is_some());
        assert_eq!(q.group_by.len(), 1);
        assert_eq!(q.order_by.len(), 1);
        assert!(q.limit.is_some());
    }

    #[test]
    fn has_star_projection_detects_empty_list() {
        let star = Query::new(vec![], simple_from());
        assert!(star.has_star_projection());

        let concrete = Query::new(vec![SelectItem::new(Expr::column("a"))], simple_from());
        assert!(!concrete.has_star_projection());
    }

    #[test]
    fn aggregates_detects_any_aggregate_projection() {
        let with_agg = Query::new(
            vec![SelectItem::aliased(
                Expr::aggregate("SUM", vec![Expr::column("a")]),
                "mv_sum",
            )],
            simple_from(),
        );
        assert!(with_agg.aggregates());

        let without_agg = Query::new(vec![SelectItem::new(Expr::column("a"))], simple_from());
        assert!(!without_agg.aggregates());
    }
}
