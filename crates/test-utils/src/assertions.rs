// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Custom assertion helpers for expression and query testing

use mv_rewrite_ast::{Expr, FromClause, Literal, Query};

/// Custom assertion helpers for [`Expr`] trees.
pub struct ExprAssertions;

impl ExprAssertions {
    /// Assert that an expression is a column reference with the given name.
    pub fn assert_column_ref(expr: &Expr, name: &str) {
        match expr {
            Expr::Column(col) => {
                assert_eq!(col.name(), name, "expected column '{}', found '{}'", name, col.name());
            }
            other => panic!("expected Column expression, found {:?}", other),
        }
    }

    /// Assert that an expression is an integer literal with the given value.
    pub fn assert_literal_int(expr: &Expr, value: i64) {
        match expr {
            Expr::Literal(Literal::Integer(v)) => {
                assert_eq!(*v, value, "expected integer {}, found {}", value, v);
            }
            other => panic!("expected Integer literal, found {:?}", other),
        }
    }

    /// Assert that an expression is a string literal with the given value.
    pub fn assert_literal_string(expr: &Expr, value: &str) {
        match expr {
            Expr::Literal(Literal::String(v)) => {
                assert_eq!(v, value, "expected string '{}', found '{}'", value, v);
            }
            other => panic!("expected String literal, found {:?}", other),
        }
    }

    /// Assert that `query`'s FROM clause is the bare table `table`, with no
    /// alias.
    pub fn assert_from_table(query: &Query, table: &str) {
        match &query.from {
            FromClause::Table { table: t, alias: None } => {
                assert_eq!(t.name(), table, "expected FROM '{}', found '{}'", table, t.name());
            }
            other => panic!("expected a bare FROM table, found {:?}", other),
        }
    }
}
