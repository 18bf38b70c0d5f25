// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # View Info Extractor
//!
//! A single-pass descent over a materialized view's defining query,
//! producing a [`ViewInfo`] that the rewriter consults read-only for every
//! incoming base query (spec §4.1).
//!
//! Extraction either succeeds completely or fails completely: a view that
//! cannot be extracted cannot be used for rewrite of *any* query, so every
//! rejection below returns [`NotSupportedError`] rather than a partial
//! `ViewInfo`.

use std::collections::{HashMap, HashSet};

use mv_rewrite_ast::{Expr, FromClause, Query, TableRef};

use crate::error::{NotSupportedError, SemanticResult};

/// Normalized, immutable summary of a materialized view sufficient to
/// drive rewrite of base queries over the same tables (spec §3).
///
/// Built once per view and never mutated afterward — every method on
/// [`crate::rewriter`] and [`crate::orchestrator`] takes `&ViewInfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewInfo {
    base_table: TableRef,
    base_to_view: HashMap<Expr, String>,
    view_to_base: HashMap<String, Expr>,
    where_clause: Option<Expr>,
    /// Grouping keys. Stored as an unordered set, per the design note that
    /// `{a, b}` and `{b, a}` are equivalent GROUP BY clauses — callers that
    /// care about output ordering must not depend on this structure (spec
    /// §9 Open Question 5).
    group_by: HashSet<Expr>,
    is_distinct: bool,
}

impl ViewInfo {
    pub fn base_table(&self) -> &TableRef {
        &self.base_table
    }

    pub fn base_to_view(&self) -> &HashMap<Expr, String> {
        &self.base_to_view
    }

    pub fn view_to_base(&self) -> &HashMap<String, Expr> {
        &self.view_to_base
    }

    pub fn where_clause(&self) -> Option<&Expr> {
        self.where_clause.as_ref()
    }

    pub fn group_by(&self) -> &HashSet<Expr> {
        &self.group_by
    }

    pub fn is_distinct(&self) -> bool {
        self.is_distinct
    }

    /// True if `name` already names a view-exposed column (spec §4.2 rule 3:
    /// a bare column reference that is itself a view column name passes
    /// through unchanged).
    pub fn exposes_column(&self, name: &str) -> bool {
        self.view_to_base.contains_key(name)
    }
}

/// Extracts a [`ViewInfo`] from a view's defining query.
///
/// Rejects every shape spec §4.1 names: `LIMIT`, `HAVING`, `SELECT *`, a
/// `FROM` that is not a single bare table, a table alias (reserved, see
/// spec §9 Open Question 1), or a set operation.
pub fn extract_view_info(view: &Query) -> SemanticResult<ViewInfo> {
    if view.is_set_operation {
        return Err(NotSupportedError::new(
            "<set operation>",
            "materialized view must be a single query specification",
        ));
    }
    if view.limit.is_some() {
        return Err(NotSupportedError::new(
            "LIMIT",
            "materialized view must not have a LIMIT clause",
        ));
    }
    if view.having.is_some() {
        return Err(NotSupportedError::new(
            "HAVING",
            "materialized view must not have a HAVING clause",
        ));
    }
    if view.has_star_projection() {
        return Err(NotSupportedError::new(
            "SELECT *",
            "materialized view must not project SELECT *",
        ));
    }

    let base_table = match &view.from {
        FromClause::Table { table, alias: None } => table.clone(),
        FromClause::Table {
            alias: Some(alias), ..
        } => {
            return Err(NotSupportedError::new(
                alias.clone(),
                "materialized view's FROM table must not have an alias",
            ));
        }
        FromClause::Join => {
            return Err(NotSupportedError::new(
                "<join>",
                "materialized view must be over a single base table, not a JOIN",
            ));
        }
        FromClause::Subquery => {
            return Err(NotSupportedError::new(
                "<subquery>",
                "materialized view must be over a single base table, not a subquery",
            ));
        }
    };

    let mut base_to_view = HashMap::new();
    let mut view_to_base = HashMap::new();
    for item in &view.projection {
        let name = item.output_name();
        // Duplicates overwrite (last-wins): semantic analysis upstream is
        // assumed to reject duplicate aliases, so this is unreachable in
        // well-formed input rather than a case this extractor must guard.
        base_to_view.insert(item.expr.clone(), name.clone());
        view_to_base.insert(name, item.expr.clone());
    }

    let group_by = view.group_by.iter().cloned().collect();

    Ok(ViewInfo {
        base_table,
        base_to_view,
        view_to_base,
        where_clause: view.where_clause.clone(),
        group_by,
        is_distinct: view.distinct,
    })
}
