// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Error types for the rewrite engine
//!
//! Only the view-side extraction path can fail hard (spec §7: "Hard
//! semantic failures (view-side only)"). The base-query rewrite path is
//! opportunistic and never returns an error — any inability to rewrite a
//! query falls back to the original, see [`crate::orchestrator::rewrite`].

use thiserror::Error;

/// Result type alias for View Info extraction.
pub type SemanticResult<T> = Result<T, NotSupportedError>;

/// The view cannot be represented as a [`crate::view_info::ViewInfo`].
///
/// Carries a rendering of the offending fragment rather than a borrow of
/// the AST node itself, since the caller retains ownership of the view
/// query and this error may outlive the borrow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("materialized view is not supported: {reason} (at {fragment})")]
pub struct NotSupportedError {
    /// Canonical rendering of the offending expression or clause.
    pub fragment: String,
    /// Human-readable explanation of why the shape is rejected.
    pub reason: String,
}

impl NotSupportedError {
    pub fn new(fragment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            reason: reason.into(),
        }
    }
}
