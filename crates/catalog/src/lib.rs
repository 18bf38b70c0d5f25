// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Materialized View Rewrite — Catalog Seam
//!
//! This crate defines the metadata oracle interface the rewriter core
//! consults to resolve a column's SQL type (spec §6), plus the error type
//! an oracle implementation may use internally.
//!
//! ## Architecture
//!
//! - [`MetadataOracle`]: synchronous `typeOf(table, column) -> Option<SqlType>`.
//! - [`SessionContext`]: opaque, passed through but never inspected.
//! - [`SqlType`]: the three scalar families the domain algebra understands.
//!
//! No catalog implementation (live database, static schema file) lives in
//! this crate — that is an application concern outside this workspace's
//! scope. `mv-rewrite-test-utils` provides a `MockOracle` for tests.

pub mod error;
pub mod metadata;
pub mod r#trait;

pub use error::{CatalogError, CatalogResult};
pub use metadata::SqlType;
pub use r#trait::{MetadataOracle, SessionContext};
