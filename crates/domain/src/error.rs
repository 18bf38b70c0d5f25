// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Domain translation errors
//!
//! A single in-family error, raised only by the Domain Translator façade
//! when a predicate cannot be modeled as a [`crate::tuple::TupleDomain`]
//! exactly (spec §4.3/§7: "when either side cannot be modeled exactly, the
//! checker returns *unknown*"). It never reaches a caller of `mv-rewrite-core`
//! — the containment checker and orchestrator catch it internally and fold
//! it into a no-rewrite fallback.

use thiserror::Error;

/// Result type alias for domain translation.
pub type DomainResult<T> = Result<T, DomainError>;

/// Why a predicate could not be translated into `TupleDomain` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The predicate references a column with no resolvable type.
    #[error("unknown type for column '{0}'")]
    UnknownColumnType(String),

    /// A disjunction spans more than one column and would require
    /// cross-column DNF to represent exactly (spec §4.3, §9 Open Question 2).
    #[error("disjunction across multiple columns is not representable")]
    CrossColumnDisjunction,

    /// Two string literals over the same column declare different fixed
    /// lengths (spec §9 Open Question 3).
    #[error("string length mismatch: column '{0}' compared at lengths {1} and {2}")]
    StringLengthMismatch(String, usize, usize),

    /// The predicate shape itself has no domain-translation rule (e.g. a
    /// bare aggregate or arithmetic expression used where a boolean
    /// predicate atom is expected).
    #[error("expression is not a recognized predicate atom")]
    UnsupportedPredicateShape,
}
