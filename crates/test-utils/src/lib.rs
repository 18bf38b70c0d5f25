// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities shared across this workspace's crates
//!
//! This crate provides common testing components including:
//! - A mock, in-memory [`MetadataOracle`](mv_rewrite_catalog::MetadataOracle) implementation
//! - Query/expression assertion helpers
//! - Shorthand AST builders for constructing test fixtures

pub mod assertions;
pub mod builders;
pub mod mock_catalog;

pub use assertions::ExprAssertions;
pub use mock_catalog::{MockOracle, MockOracleBuilder};
