// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata oracle
//!
//! The rewriter core is a pure function of its inputs plus two injected
//! collaborators: a [`MetadataOracle`] and a [`SessionContext`] (spec §6).
//! Unlike most of the collaborators this workspace's sibling crates model,
//! the oracle here is **synchronous** — the core's concurrency model (spec
//! §5) is a pure, referentially transparent transformation with no
//! suspension points, so an `async fn` in this trait would force every
//! caller of the core through an executor for no benefit the core itself
//! needs. Implementations backed by a real connection pool are expected to
//! resolve metadata eagerly (a warm cache, a snapshot taken at view
//! registration time) rather than going to the network per call.
//!
//! ## Examples
//!
//! ```
//! use mv_rewrite_catalog::{MetadataOracle, SqlType, SessionContext};
//!
//! struct FixedOracle;
//!
//! impl MetadataOracle for FixedOracle {
//!     fn type_of(&self, table: &str, column: &str) -> Option<SqlType> {
//!         match (table, column) {
//!             ("orders", "amount") => Some(SqlType::Decimal),
//!             ("orders", "status") => Some(SqlType::Varchar { length: 16 }),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let oracle = FixedOracle;
//! let _session = SessionContext::default();
//! assert_eq!(oracle.type_of("orders", "amount"), Some(SqlType::Decimal));
//! assert_eq!(oracle.type_of("orders", "missing"), None);
//! ```

use crate::metadata::SqlType;

/// Resolves a column's SQL type, used by the Domain Translator façade to
/// choose numeric vs. string domain handling (spec §6).
///
/// Returning `None` signals "unknown column"; the Filter Containment
/// Checker treats this the same as any other untranslatable predicate —
/// containment becomes *unknown*, and the orchestrator falls back to the
/// original query rather than erroring.
pub trait MetadataOracle {
    /// Look up the declared type of `table.column`.
    ///
    /// # Arguments
    /// * `table` - the qualified table name as it appears in the FROM clause.
    /// * `column` - the column name.
    ///
    /// # Returns
    /// `Some(SqlType)` if the column is known, `None` otherwise.
    fn type_of(&self, table: &str, column: &str) -> Option<SqlType>;
}

/// Opaque session/transaction context, threaded through to the oracle and
/// the domain translator but never inspected by the core itself (spec §6:
/// "opaque; passed through"). Carries nothing by default; embedding
/// applications are free to wrap their own request-scoped state behind
/// this marker via a newtype in their own crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionContext;

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyOracle;

    impl MetadataOracle for EmptyOracle {
        fn type_of(&self, _table: &str, _column: &str) -> Option<SqlType> {
            None
        }
    }

    #[test]
    fn unknown_column_resolves_to_none() {
        let oracle = EmptyOracle;
        assert_eq!(oracle.type_of("t1", "a"), None);
    }

    #[test]
    fn session_context_is_a_zero_sized_marker() {
        assert_eq!(std::mem::size_of::<SessionContext>(), 0);
    }
}
