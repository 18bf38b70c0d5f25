// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock metadata oracle for testing
//!
//! Provides an in-memory, synchronous [`MetadataOracle`] with a builder
//! pattern for easy test setup — the synchronous analog of a fixture a
//! caller would otherwise need a live catalog connection for.

use std::collections::HashMap;

use mv_rewrite_catalog::{MetadataOracle, SqlType};

/// In-memory mock metadata oracle for testing.
#[derive(Debug, Clone, Default)]
pub struct MockOracle {
    columns: HashMap<(String, String), SqlType>,
}

impl MockOracle {
    /// Create a new empty mock oracle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a column's type.
    pub fn add_column(mut self, table: impl Into<String>, column: impl Into<String>, sql_type: SqlType) -> Self {
        self.columns.insert((table.into(), column.into()), sql_type);
        self
    }
}

impl MetadataOracle for MockOracle {
    fn type_of(&self, table: &str, column: &str) -> Option<SqlType> {
        self.columns
            .get(&(table.to_string(), column.to_string()))
            .cloned()
    }
}

/// Builder for creating mock oracles with a fluent API.
#[derive(Default)]
pub struct MockOracleBuilder {
    oracle: MockOracle,
}

impl MockOracleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard test schema used throughout this workspace's
    /// integration tests: a single `t1` table with integer columns `a`,
    /// `c`, `d`, `e`, a decimal column `b`, and a varchar column `f`.
    pub fn with_standard_schema(mut self) -> Self {
        self.oracle = self
            .oracle
            .add_column("t1", "a", SqlType::Integer)
            .add_column("t1", "b", SqlType::Decimal)
            .add_column("t1", "c", SqlType::Integer)
            .add_column("t1", "d", SqlType::Varchar { length: 32 })
            .add_column("t1", "e", SqlType::Integer)
            .add_column("t1", "f", SqlType::Varchar { length: 64 });
        self
    }

    pub fn with_column(mut self, table: impl Into<String>, column: impl Into<String>, sql_type: SqlType) -> Self {
        self.oracle = self.oracle.add_column(table, column, sql_type);
        self
    }

    pub fn build(self) -> MockOracle {
        self.oracle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_column() {
        let oracle = MockOracleBuilder::new().with_standard_schema().build();
        assert_eq!(oracle.type_of("t1", "a"), Some(SqlType::Integer));
        assert_eq!(oracle.type_of("t1", "b"), Some(SqlType::Decimal));
    }

    #[test]
    fn unknown_column_resolves_to_none() {
        let oracle = MockOracleBuilder::new().with_standard_schema().build();
        assert_eq!(oracle.type_of("t1", "missing"), None);
    }
}
