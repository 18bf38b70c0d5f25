// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Scalar values
//!
//! [`ScalarValue`] is the value space the domain algebra reasons over:
//! signed 64-bit integers, doubles standing in for fixed-precision
//! decimals, and fixed-length strings (spec §3: "Types supported: signed
//! integers (64-bit), fixed-precision decimals as doubles, and
//! lexicographically-ordered Unicode strings of a fixed declared length").
//!
//! A single enum rather than a type parameter on [`crate::domain::Domain`]
//! is a deliberate simplification: the spec's own design note calls for a
//! domain module "parameterized by the scalar type", which a generic would
//! satisfy more idiomatically, but every column in a `TupleDomain` is
//! single-typed in practice and the translator already knows the type from
//! the metadata oracle before it ever constructs a domain — a closed enum
//! checked at construction time costs nothing a generic would have bought
//! here. See DESIGN.md for the full rationale.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A single scalar value in one of the three supported families.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScalarValue {
    Integer(i64),
    Decimal(f64),
    /// A fixed-length string; `declared_length` is the width used to detect
    /// cross-length comparisons (spec §9 Open Question 3).
    Str {
        value: String,
        declared_length: usize,
    },
}

impl ScalarValue {
    pub fn integer(v: i64) -> Self {
        ScalarValue::Integer(v)
    }

    pub fn decimal(v: f64) -> Self {
        ScalarValue::Decimal(v)
    }

    pub fn string(value: impl Into<String>, declared_length: usize) -> Self {
        ScalarValue::Str {
            value: value.into(),
            declared_length,
        }
    }

    /// The declared string length, if this is a string value.
    pub fn declared_length(&self) -> Option<usize> {
        match self {
            ScalarValue::Str { declared_length, .. } => Some(*declared_length),
            _ => None,
        }
    }

    fn variant_rank(&self) -> u8 {
        match self {
            ScalarValue::Integer(_) => 0,
            ScalarValue::Decimal(_) => 1,
            ScalarValue::Str { .. } => 2,
        }
    }
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ScalarValue::Integer(a), ScalarValue::Integer(b)) => a == b,
            (ScalarValue::Decimal(a), ScalarValue::Decimal(b)) => a.to_bits() == b.to_bits(),
            (
                ScalarValue::Str {
                    value: a,
                    declared_length: la,
                },
                ScalarValue::Str {
                    value: b,
                    declared_length: lb,
                },
            ) => a == b && la == lb,
            _ => false,
        }
    }
}

impl Eq for ScalarValue {}

/// Total order across the whole enum, ordering first by variant (integers
/// before decimals before strings) and then by value within a variant.
/// Comparisons never actually cross variants in practice — a column's
/// domain holds one `ScalarValue` kind throughout its lifetime — so this
/// exists purely to give `Ord` a lawful total order rather than to assign
/// any meaning to, say, `Integer(1) < Str { .. }`.
impl PartialOrd for ScalarValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScalarValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ScalarValue::Integer(a), ScalarValue::Integer(b)) => a.cmp(b),
            (ScalarValue::Decimal(a), ScalarValue::Decimal(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (
                ScalarValue::Str { value: a, .. },
                ScalarValue::Str { value: b, .. },
            ) => a.cmp(b),
            _ => self.variant_rank().cmp(&other.variant_rank()),
        }
    }
}

impl Hash for ScalarValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            ScalarValue::Integer(v) => {
                0u8.hash(state);
                v.hash(state);
            }
            ScalarValue::Decimal(v) => {
                1u8.hash(state);
                v.to_bits().hash(state);
            }
            ScalarValue::Str {
                value,
                declared_length,
            } => {
                2u8.hash(state);
                value.hash(state);
                declared_length.hash(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_ordering_is_numeric() {
        assert!(ScalarValue::integer(1) < ScalarValue::integer(2));
    }

    #[test]
    fn decimal_equality_uses_bit_pattern() {
        assert_eq!(ScalarValue::decimal(1.5), ScalarValue::decimal(1.5));
        assert_ne!(ScalarValue::decimal(1.5), ScalarValue::decimal(1.50001));
    }

    #[test]
    fn string_equality_accounts_for_declared_length() {
        assert_eq!(
            ScalarValue::string("apple", 5),
            ScalarValue::string("apple", 5)
        );
        assert_ne!(
            ScalarValue::string("apple", 5),
            ScalarValue::string("apple", 6)
        );
    }
}
