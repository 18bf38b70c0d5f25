// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for the metadata oracle seam
//!
//! The rewriter core never constructs these itself — they exist for
//! implementations of [`crate::r#trait::MetadataOracle`] that back onto a
//! real catalog (a live database connection, a static schema file) and need
//! a place to report failure. The core only ever sees `Option<SqlType>` at
//! the oracle boundary (spec §6: "may signal 'unknown column'; the
//! containment checker treats this as unknown") — a full `CatalogError`
//! is for the oracle implementation's own internal use and logging.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for metadata oracle operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while an oracle implementation resolves metadata.
#[derive(Debug, Error, Clone, Serialize)]
pub enum CatalogError {
    /// Failed to connect to the backing catalog store.
    #[error("failed to connect to catalog: {0}")]
    ConnectionFailed(String),

    /// A metadata lookup failed for a reason other than "not found".
    #[error("metadata lookup failed: {0}")]
    LookupFailed(String),

    /// Requested table was not found in the catalog.
    #[error("table '{0}' not found")]
    TableNotFound(String),

    /// Requested column was not found on an otherwise-known table.
    #[error("column '{1}' not found on table '{0}'")]
    ColumnNotFound(String, String),

    /// The catalog's schema data could not be deserialized.
    #[error("failed to deserialize catalog schema: {0}")]
    SerializationError(String),

    /// Invalid catalog configuration.
    #[error("invalid catalog configuration: {0}")]
    ConfigurationError(String),
}
