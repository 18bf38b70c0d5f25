// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Shorthand constructors for building [`Query`]/[`Expr`] trees in tests
//! without spelling out every field by hand.

use mv_rewrite_ast::{Expr, FromClause, Query, SelectItem, TableRef};

/// A bare `FROM <table>` clause with no alias.
pub fn from_table(table: &str) -> FromClause {
    FromClause::Table {
        table: TableRef::new(table),
        alias: None,
    }
}

/// A `SELECT <columns> FROM <table>` query with unqualified column
/// projections and no other clauses.
pub fn select_columns(columns: &[&str], table: &str) -> Query {
    let projection = columns
        .iter()
        .map(|c| SelectItem::new(Expr::column(*c)))
        .collect();
    Query::new(projection, from_table(table))
}

/// A single projection item aliasing `expr` as `alias`.
pub fn aliased(expr: Expr, alias: &str) -> SelectItem {
    SelectItem::aliased(expr, alias)
}
