// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Materialized View Rewrite — Core
//!
//! This crate is the rewrite decision and transformation engine: given a
//! materialized view's extracted [`ViewInfo`] and an incoming base query,
//! it decides whether the query can be equivalently answered from the
//! view's target table, and if so produces the rewritten query.
//!
//! ## Pipeline
//!
//! - [`view_info`]: the View Info Extractor — builds a [`ViewInfo`] once
//!   per view.
//! - [`rewriter`]: the Expression Rewriter — substitutes base-column
//!   references for view-exposed columns.
//! - [`translator`]: the Domain Translator façade — converts predicate
//!   expressions to and from [`mv_rewrite_domain::TupleDomain`] form.
//! - [`containment`]: the Filter Containment Checker — decides whether a
//!   query's filter is subsumed by the view's filter.
//! - [`orchestrator`]: the Top-Level Rewrite Orchestrator — the single
//!   entry point, [`orchestrator::rewrite`], that runs the pre-flight
//!   gates and ties the above together.
//!
//! ## Example
//!
//! ```
//! use mv_rewrite_ast::{Expr, FromClause, Query, SelectItem, TableRef};
//! use mv_rewrite_catalog::{MetadataOracle, SessionContext, SqlType};
//! use mv_rewrite_core::{orchestrator, view_info::extract_view_info};
//!
//! struct IntOracle;
//! impl MetadataOracle for IntOracle {
//!     fn type_of(&self, _table: &str, _column: &str) -> Option<SqlType> {
//!         Some(SqlType::Integer)
//!     }
//! }
//!
//! let from_t1 = FromClause::Table { table: TableRef::new("t1"), alias: None };
//! let view = Query::new(
//!     vec![SelectItem::new(Expr::column("a")), SelectItem::new(Expr::column("b"))],
//!     from_t1.clone(),
//! );
//! let info = extract_view_info(&view).unwrap();
//!
//! let query = Query::new(
//!     vec![SelectItem::new(Expr::column("a")), SelectItem::new(Expr::column("b"))],
//!     from_t1,
//! );
//! let target = TableRef::new("view");
//! let rewritten = orchestrator::rewrite(&query, &info, &target, &IntOracle, &SessionContext);
//! assert_eq!(rewritten.from, FromClause::Table { table: target, alias: None });
//! ```

pub mod containment;
pub mod error;
pub mod orchestrator;
pub mod rewriter;
pub mod translator;
pub mod view_info;

pub use error::{NotSupportedError, SemanticResult};
pub use orchestrator::rewrite;
pub use view_info::{extract_view_info, ViewInfo};
