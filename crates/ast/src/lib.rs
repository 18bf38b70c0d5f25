// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Materialized View Rewrite — Abstract Syntax Tree
//!
//! This crate provides the expression and query tree the rewriter operates
//! on. It is dialect-agnostic and deliberately thin: no SQL parsing lives
//! here, only the data model a parser would hand the rewriter.
//!
//! The variant set in [`expr::Expr`] is closed to exactly the shapes the
//! rewriter needs to reason about (spec'd in the materialized-view rewrite
//! core): column references, literals, arithmetic, comparisons, logical
//! connectives, aggregate calls, and `IN`/`NOT IN` lists.

pub mod expr;
pub mod query;

pub use expr::{ArithOp, ColumnRef, CompOp, Expr, Literal, LogicalOp, SortDirection, SortItem};
pub use query::{FromClause, Query, SelectItem, TableRef};
