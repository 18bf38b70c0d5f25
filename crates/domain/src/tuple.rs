// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Tuple domains
//!
//! A [`TupleDomain`] is the per-column generalization of [`Domain`]: a row
//! is admitted iff every column's value lies in its mapped domain (spec
//! §3). A column absent from the map is unconstrained ("all values"); the
//! special [`TupleDomain::Never`] variant is the always-false tuple domain
//! (spec: "the special value *None* denotes the always-false tuple
//! domain" — named `Never` here to avoid colliding with [`std::option::Option`]).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::error::{DomainError, DomainResult};

/// A conjunctive per-column constraint set, or the always-false domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TupleDomain {
    /// No row satisfies this tuple domain.
    Never,
    /// Per-column domains; a column with no entry is unconstrained.
    Constrained(HashMap<String, Domain>),
}

impl TupleDomain {
    /// The unconstrained tuple domain — every row is admitted.
    pub fn all() -> Self {
        TupleDomain::Constrained(HashMap::new())
    }

    /// A tuple domain constraining a single column.
    pub fn single(column: impl Into<String>, domain: Domain) -> Self {
        if domain.is_empty() {
            return TupleDomain::Never;
        }
        let mut map = HashMap::new();
        map.insert(column.into(), domain);
        TupleDomain::Constrained(map)
    }

    fn domain_of(&self, column: &str) -> Domain {
        match self {
            TupleDomain::Never => Domain::empty(),
            TupleDomain::Constrained(map) => map.get(column).cloned().unwrap_or_else(Domain::all),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TupleDomain::Never => true,
            TupleDomain::Constrained(map) => map.values().any(Domain::is_empty),
        }
    }

    /// AND: every per-column constraint from both sides must hold.
    pub fn intersect(&self, other: &TupleDomain) -> TupleDomain {
        if self.is_empty() || other.is_empty() {
            return TupleDomain::Never;
        }
        let (TupleDomain::Constrained(a), TupleDomain::Constrained(b)) = (self, other) else {
            unreachable!("is_empty() above handles the Never case");
        };
        let mut columns: Vec<&String> = a.keys().chain(b.keys()).collect();
        columns.sort();
        columns.dedup();

        let mut merged = HashMap::new();
        for column in columns {
            let domain = self.domain_of(column).intersect(&other.domain_of(column));
            if domain.is_empty() {
                return TupleDomain::Never;
            }
            merged.insert(column.clone(), domain);
        }
        TupleDomain::Constrained(merged)
    }

    /// OR, restricted to the cases the spec requires exactly: either side
    /// is `Never` (identity for union), or both sides constrain the same
    /// single column. Anything that would need cross-column DNF returns
    /// [`DomainError::CrossColumnDisjunction`] (spec §4.3, §9 Open Question 2).
    pub fn union(&self, other: &TupleDomain) -> DomainResult<TupleDomain> {
        match (self, other) {
            (TupleDomain::Never, x) | (x, TupleDomain::Never) => Ok(x.clone()),
            (TupleDomain::Constrained(a), TupleDomain::Constrained(b)) => {
                let mut columns: Vec<&String> = a.keys().chain(b.keys()).collect();
                columns.sort();
                columns.dedup();
                if columns.len() > 1 {
                    return Err(DomainError::CrossColumnDisjunction);
                }
                match columns.first() {
                    None => Ok(TupleDomain::all()),
                    Some(column) => {
                        let domain = self.domain_of(column).union(&other.domain_of(column));
                        Ok(TupleDomain::single((*column).clone(), domain))
                    }
                }
            }
        }
    }

    /// Containment test: does every row admitted by `self` also satisfy
    /// `other`? Unconstrained columns on `other`'s side count as "all
    /// values" (spec §4.3).
    pub fn is_subset_of(&self, other: &TupleDomain) -> bool {
        if self.is_empty() {
            return true;
        }
        match other {
            TupleDomain::Never => false,
            TupleDomain::Constrained(other_map) => {
                let TupleDomain::Constrained(self_map) = self else {
                    unreachable!("is_empty() above handles the Never case");
                };
                self_map
                    .keys()
                    .chain(other_map.keys())
                    .all(|column| self.domain_of(column).is_subset_of(&other.domain_of(column)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ScalarValue;

    #[test]
    fn all_is_subset_of_all() {
        assert!(TupleDomain::all().is_subset_of(&TupleDomain::all()));
    }

    #[test]
    fn never_is_subset_of_anything() {
        let constrained = TupleDomain::single("a", Domain::point(ScalarValue::integer(5)));
        assert!(TupleDomain::Never.is_subset_of(&constrained));
    }

    #[test]
    fn single_column_eq_five_is_subset_of_gt_zero() {
        use std::ops::Bound;
        let eq5 = TupleDomain::single("a", Domain::point(ScalarValue::integer(5)));
        let gt0 = TupleDomain::single(
            "a",
            Domain::range(Bound::Excluded(ScalarValue::integer(0)), Bound::Unbounded),
        );
        assert!(eq5.is_subset_of(&gt0));
    }

    #[test]
    fn disjoint_single_column_domains_are_not_contained() {
        let eq5 = TupleDomain::single("a", Domain::point(ScalarValue::integer(5)));
        let eq4 = TupleDomain::single("a", Domain::point(ScalarValue::integer(4)));
        assert!(!eq5.is_subset_of(&eq4));
    }

    #[test]
    fn intersect_of_empty_domain_collapses_to_never() {
        let eq5 = TupleDomain::single("a", Domain::point(ScalarValue::integer(5)));
        let eq4 = TupleDomain::single("a", Domain::point(ScalarValue::integer(4)));
        assert!(eq5.intersect(&eq4).is_empty());
    }

    #[test]
    fn union_across_two_columns_is_unrepresentable() {
        let a = TupleDomain::single("a", Domain::point(ScalarValue::integer(5)));
        let c = TupleDomain::single("c", Domain::point(ScalarValue::integer(10)));
        assert!(matches!(
            a.union(&c),
            Err(DomainError::CrossColumnDisjunction)
        ));
    }

    #[test]
    fn union_on_same_column_merges_domains() {
        let in_3 = TupleDomain::single("a", Domain::point(ScalarValue::integer(3)));
        let in_5 = TupleDomain::single("a", Domain::point(ScalarValue::integer(5)));
        let merged = in_3.union(&in_5).unwrap();
        let probe = TupleDomain::single("a", Domain::point(ScalarValue::integer(3)));
        assert!(probe.is_subset_of(&merged));
    }
}
