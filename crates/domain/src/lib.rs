// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Materialized View Rewrite — Value Domain Algebra
//!
//! This crate implements the per-column value domain and tuple-domain
//! algebra the Filter Containment Checker is built on: a `TupleDomain` is a
//! conjunctive, per-column description of which rows a predicate admits,
//! and containment between two predicates reduces to a per-column subset
//! test over their domains (spec §3, §4.3).
//!
//! Nothing here understands SQL expressions — translating a predicate
//! `Expr` into a `TupleDomain` is `mv-rewrite-core`'s job (the Domain
//! Translator façade). This crate is the standalone, independently
//! testable algebra underneath that translation, as called for by the
//! design notes ("Domain algebra should be implemented as a standalone,
//! testable module").

pub mod domain;
pub mod error;
pub mod tuple;
pub mod value;

pub use domain::Domain;
pub use error::{DomainError, DomainResult};
pub use tuple::TupleDomain;
pub use value::ScalarValue;
