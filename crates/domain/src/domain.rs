// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Per-column value domains
//!
//! A [`Domain`] is the value-set a single column's value is constrained to:
//! a finite union of intervals over [`ScalarValue`], plus a "null allowed"
//! bit (spec §3). Equality/inequality and `IN`/`NOT IN` lists are all
//! represented as intervals — a point is a one-element closed interval, and
//! `a ≠ 5` is the two open intervals `(-inf, 5)` and `(5, +inf)` — rather
//! than tracking excluded points separately; this keeps every operation
//! (intersect, union, complement) a single pass over a sorted interval
//! list instead of two parallel representations that would otherwise need
//! to be kept in sync.

use std::cmp::Ordering;
use std::ops::Bound;

use serde::{Deserialize, Serialize};

use crate::value::ScalarValue;

/// A half-open/closed/unbounded interval over [`ScalarValue`].
pub type Interval = (Bound<ScalarValue>, Bound<ScalarValue>);

/// The value-set a column may take: a finite union of intervals, plus
/// whether `NULL` is an admissible value.
///
/// `ranges` is always kept normalized: sorted by lower bound, with no two
/// ranges overlapping or touching (adjacent touching ranges are merged).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    ranges: Vec<Interval>,
    allow_null: bool,
}

fn bound_value(b: &Bound<ScalarValue>) -> Option<&ScalarValue> {
    match b {
        Bound::Included(v) | Bound::Excluded(v) => Some(v),
        Bound::Unbounded => None,
    }
}

/// Orders two lower bounds: `Unbounded` sorts before everything, and at
/// equal values `Included` sorts before `Excluded` (it starts earlier).
fn cmp_lower(a: &Bound<ScalarValue>, b: &Bound<ScalarValue>) -> Ordering {
    match (bound_value(a), bound_value(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(av), Some(bv)) => match av.cmp(bv) {
            Ordering::Equal => {
                let a_incl = matches!(a, Bound::Included(_));
                let b_incl = matches!(b, Bound::Included(_));
                match (a_incl, b_incl) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => Ordering::Equal,
                }
            }
            other => other,
        },
    }
}

/// Orders two upper bounds: `Unbounded` sorts after everything, and at
/// equal values `Excluded` sorts before `Included` (it ends earlier).
fn cmp_upper(a: &Bound<ScalarValue>, b: &Bound<ScalarValue>) -> Ordering {
    match (bound_value(a), bound_value(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(av), Some(bv)) => match av.cmp(bv) {
            Ordering::Equal => {
                let a_incl = matches!(a, Bound::Included(_));
                let b_incl = matches!(b, Bound::Included(_));
                match (a_incl, b_incl) {
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    _ => Ordering::Equal,
                }
            }
            other => other,
        },
    }
}

/// True if an interval with upper bound `upper` overlaps or touches one
/// starting at lower bound `lower` (so the two should merge into one run).
fn adjoins(upper: &Bound<ScalarValue>, lower: &Bound<ScalarValue>) -> bool {
    match (bound_value(upper), bound_value(lower)) {
        (None, _) | (_, None) => true,
        (Some(u), Some(l)) => match u.cmp(l) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => {
                matches!(upper, Bound::Included(_)) || matches!(lower, Bound::Included(_))
            }
        },
    }
}

fn contains_value(range: &Interval, v: &ScalarValue) -> bool {
    let lower_ok = match &range.0 {
        Bound::Unbounded => true,
        Bound::Included(b) => v >= b,
        Bound::Excluded(b) => v > b,
    };
    let upper_ok = match &range.1 {
        Bound::Unbounded => true,
        Bound::Included(b) => v <= b,
        Bound::Excluded(b) => v < b,
    };
    lower_ok && upper_ok
}

fn normalize(mut ranges: Vec<Interval>) -> Vec<Interval> {
    ranges.sort_by(|a, b| cmp_lower(&a.0, &b.0));
    let mut merged: Vec<Interval> = Vec::with_capacity(ranges.len());
    for range in ranges {
        if let Some(last) = merged.last_mut() {
            if adjoins(&last.1, &range.0) {
                if cmp_upper(&range.1, &last.1) == Ordering::Greater {
                    last.1 = range.1;
                }
                continue;
            }
        }
        merged.push(range);
    }
    merged
}

impl Domain {
    /// The empty domain: no value (including `NULL`) satisfies it.
    pub fn empty() -> Self {
        Self {
            ranges: Vec::new(),
            allow_null: false,
        }
    }

    /// The universe: every value, including `NULL`, satisfies it.
    pub fn all() -> Self {
        Self {
            ranges: vec![(Bound::Unbounded, Bound::Unbounded)],
            allow_null: true,
        }
    }

    /// A domain admitting exactly one value.
    pub fn point(value: ScalarValue) -> Self {
        Self {
            ranges: vec![(Bound::Included(value.clone()), Bound::Included(value))],
            allow_null: false,
        }
    }

    /// A domain admitting exactly the given finite set of values (used to
    /// translate `col IN (lit, ...)`).
    pub fn points(values: impl IntoIterator<Item = ScalarValue>) -> Self {
        values
            .into_iter()
            .map(Domain::point)
            .fold(Domain::empty(), |acc, d| acc.union(&d))
    }

    /// A domain admitting a single interval.
    pub fn range(lo: Bound<ScalarValue>, hi: Bound<ScalarValue>) -> Self {
        match (bound_value(&lo), bound_value(&hi)) {
            (Some(l), Some(h)) if l > h => Domain::empty(),
            _ => Self {
                ranges: vec![(lo, hi)],
                allow_null: false,
            },
        }
    }

    pub fn with_null_allowed(mut self, allow_null: bool) -> Self {
        self.allow_null = allow_null;
        self
    }

    pub fn allows_null(&self) -> bool {
        self.allow_null
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty() && !self.allow_null
    }

    pub fn is_all(&self) -> bool {
        self.allow_null
            && self.ranges.len() == 1
            && matches!(self.ranges[0].0, Bound::Unbounded)
            && matches!(self.ranges[0].1, Bound::Unbounded)
    }

    pub fn contains(&self, value: &ScalarValue) -> bool {
        self.ranges.iter().any(|r| contains_value(r, value))
    }

    pub fn ranges(&self) -> &[Interval] {
        &self.ranges
    }

    pub fn intersect(&self, other: &Domain) -> Domain {
        let mut result = Vec::new();
        for a in &self.ranges {
            for b in &other.ranges {
                let lower = if cmp_lower(&a.0, &b.0) == Ordering::Greater {
                    a.0.clone()
                } else {
                    b.0.clone()
                };
                let upper = if cmp_upper(&a.1, &b.1) == Ordering::Less {
                    a.1.clone()
                } else {
                    b.1.clone()
                };
                match (bound_value(&lower), bound_value(&upper)) {
                    (Some(l), Some(u)) if l > u => continue,
                    _ => result.push((lower, upper)),
                }
            }
        }
        Domain {
            ranges: normalize(result),
            allow_null: self.allow_null && other.allow_null,
        }
    }

    pub fn union(&self, other: &Domain) -> Domain {
        let mut combined = self.ranges.clone();
        combined.extend(other.ranges.iter().cloned());
        Domain {
            ranges: normalize(combined),
            allow_null: self.allow_null || other.allow_null,
        }
    }

    /// The complement of this domain within the scalar type's value space.
    pub fn complement(&self) -> Domain {
        if self.ranges.is_empty() {
            return Domain {
                ranges: vec![(Bound::Unbounded, Bound::Unbounded)],
                allow_null: !self.allow_null,
            };
        }
        let mut gaps = Vec::new();
        let sorted = normalize(self.ranges.clone());
        let mut cursor: Bound<ScalarValue> = Bound::Unbounded;
        for (lo, hi) in &sorted {
            if !matches!((&cursor, lo), (Bound::Unbounded, Bound::Unbounded)) {
                let gap_upper = flip_lower_to_upper(lo);
                if bound_pair_nonempty(&cursor, &gap_upper) {
                    gaps.push((cursor.clone(), gap_upper));
                }
            }
            cursor = flip_upper_to_lower(hi);
        }
        if !matches!(cursor, Bound::Unbounded) || sorted.last().map(|r| r.1.clone()) != Some(Bound::Unbounded) {
            gaps.push((cursor, Bound::Unbounded));
        }
        Domain {
            ranges: gaps,
            allow_null: !self.allow_null,
        }
    }

    /// True if every value (and, if applicable, `NULL`) admitted by `self`
    /// is also admitted by `other` — the core operation the Filter
    /// Containment Checker relies on.
    pub fn is_subset_of(&self, other: &Domain) -> bool {
        if self.is_empty() {
            return true;
        }
        if self.allow_null && !other.allow_null {
            return false;
        }
        self.intersect(&other.complement_values_only()).ranges.is_empty()
    }

    /// Complement of the value ranges only, ignoring the null bit — used
    /// internally by [`Domain::is_subset_of`] so that a mismatched null bit
    /// is checked independently of the value-range subset test.
    fn complement_values_only(&self) -> Domain {
        let mut c = self.complement();
        c.allow_null = false;
        c
    }
}

fn flip_lower_to_upper(lo: &Bound<ScalarValue>) -> Bound<ScalarValue> {
    match lo {
        Bound::Included(v) => Bound::Excluded(v.clone()),
        Bound::Excluded(v) => Bound::Included(v.clone()),
        Bound::Unbounded => Bound::Unbounded,
    }
}

fn flip_upper_to_lower(hi: &Bound<ScalarValue>) -> Bound<ScalarValue> {
    match hi {
        Bound::Included(v) => Bound::Excluded(v.clone()),
        Bound::Excluded(v) => Bound::Included(v.clone()),
        Bound::Unbounded => Bound::Unbounded,
    }
}

fn bound_pair_nonempty(lo: &Bound<ScalarValue>, hi: &Bound<ScalarValue>) -> bool {
    match (bound_value(lo), bound_value(hi)) {
        (Some(l), Some(u)) => l <= u,
        _ => true,
    }
}
