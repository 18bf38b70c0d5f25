// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL type information
//!
//! This module defines the type vocabulary the domain translator needs to
//! pick numeric vs. string domain handling for a column (spec §6: the
//! metadata oracle's `typeOf` "selects numeric vs string domain handling").
//! It is intentionally narrower than a general-purpose catalog's data type
//! enum: only the three scalar families the Value Domain algebra models
//! (signed 64-bit integers, doubles standing in for fixed-precision
//! decimals, and fixed-length strings) are represented.

use serde::{Deserialize, Serialize};

/// A SQL scalar type, restricted to the families the domain algebra
/// understands.
///
/// `#[non_exhaustive]` leaves room for a caller's catalog to carry richer
/// type information elsewhere while the rewriter only ever asks for one of
/// these three buckets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SqlType {
    /// A signed 64-bit integer column.
    Integer,
    /// A fixed-precision decimal column, modeled as `f64` for domain
    /// purposes (spec §9 Design Note: "lossy ... matches source behavior").
    Decimal,
    /// A fixed-length string column. `length` is the declared width used to
    /// detect the string-length mismatch case (spec §9 Open Question 3).
    Varchar { length: usize },
}
