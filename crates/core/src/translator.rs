// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Domain Translator façade
//!
//! Translates between predicate expressions and [`TupleDomain`] form (spec
//! §6). [`from_predicate`] is required by the Filter Containment Checker;
//! [`to_predicate`] is optional per the spec but implemented here since it
//! costs little and is useful for debugging and for rendering a domain
//! back into a readable form in tests and logs.
//!
//! ## Coverage
//!
//! `col op literal` for every comparison operator over integers, decimals,
//! and strings; `col IN (...)`/`NOT IN (...)`; `AND`/`OR`/`NOT` composition,
//! with `NOT` distributed into the leaves via De Morgan (spec §4.3).
//!
//! ## String length tracking
//!
//! A literal's *declared length* is taken to be its own spelled length
//! (`'apple'` is length 5), not a length looked up from the catalog — this
//! matches the documented, intentionally-lossy source behavior (spec §9
//! Open Question 3: "Source returns no-rewrite; preserve that behavior").
//! Two literals for the same column with different lengths anywhere within
//! one call to [`from_predicate`] make the predicate untranslatable.

use std::collections::HashMap;
use std::ops::Bound;

use mv_rewrite_ast::{CompOp, Expr, Literal, LogicalOp, TableRef};
use mv_rewrite_catalog::{MetadataOracle, SqlType};
use mv_rewrite_domain::{Domain, DomainError, DomainResult, ScalarValue, TupleDomain};

fn resolve_type(
    oracle: &dyn MetadataOracle,
    table: &TableRef,
    column: &str,
) -> DomainResult<SqlType> {
    oracle
        .type_of(table.name(), column)
        .ok_or_else(|| DomainError::UnknownColumnType(column.to_string()))
}

fn record_string_length(
    column: &str,
    length: usize,
    seen: &mut HashMap<String, usize>,
) -> DomainResult<()> {
    match seen.get(column) {
        Some(existing) if *existing != length => Err(DomainError::StringLengthMismatch(
            column.to_string(),
            *existing,
            length,
        )),
        Some(_) => Ok(()),
        None => {
            seen.insert(column.to_string(), length);
            Ok(())
        }
    }
}

fn literal_to_scalar(
    literal: &Literal,
    sql_type: &SqlType,
    column: &str,
    seen: &mut HashMap<String, usize>,
) -> DomainResult<ScalarValue> {
    match (literal, sql_type) {
        (Literal::Integer(v), SqlType::Integer) => Ok(ScalarValue::integer(*v)),
        (Literal::Integer(v), SqlType::Decimal) => Ok(ScalarValue::decimal(*v as f64)),
        (Literal::Decimal(v), SqlType::Decimal) => Ok(ScalarValue::decimal(*v)),
        (Literal::String(s), SqlType::Varchar { .. }) => {
            let length = s.chars().count();
            record_string_length(column, length, seen)?;
            Ok(ScalarValue::string(s.clone(), length))
        }
        _ => Err(DomainError::UnsupportedPredicateShape),
    }
}

/// A column reference paired with a literal on the other side of a
/// comparison, and whether the comparison was written `literal op column`
/// (in which case the operator must be flipped to read `column op literal`).
fn column_literal_pair<'e>(left: &'e Expr, right: &'e Expr) -> Option<(&'e str, &'e Literal, bool)> {
    match (left, right) {
        (Expr::Column(c), Expr::Literal(l)) => Some((c.name(), l, false)),
        (Expr::Literal(l), Expr::Column(c)) => Some((c.name(), l, true)),
        _ => None,
    }
}

fn translate_comparison(
    op: CompOp,
    left: &Expr,
    right: &Expr,
    oracle: &dyn MetadataOracle,
    table: &TableRef,
    seen: &mut HashMap<String, usize>,
) -> DomainResult<TupleDomain> {
    let (column, literal, flipped) =
        column_literal_pair(left, right).ok_or(DomainError::UnsupportedPredicateShape)?;
    let op = if flipped { op.flip() } else { op };
    let sql_type = resolve_type(oracle, table, column)?;
    let value = literal_to_scalar(literal, &sql_type, column, seen)?;

    let domain = match op {
        CompOp::Eq => Domain::point(value),
        CompOp::NotEq => Domain::point(value).complement(),
        CompOp::Lt => Domain::range(Bound::Unbounded, Bound::Excluded(value)),
        CompOp::LtEq => Domain::range(Bound::Unbounded, Bound::Included(value)),
        CompOp::Gt => Domain::range(Bound::Excluded(value), Bound::Unbounded),
        CompOp::GtEq => Domain::range(Bound::Included(value), Bound::Unbounded),
    };
    Ok(TupleDomain::single(column, domain))
}

fn translate_in_list(
    expr: &Expr,
    list: &[Expr],
    negated: bool,
    oracle: &dyn MetadataOracle,
    table: &TableRef,
    seen: &mut HashMap<String, usize>,
) -> DomainResult<TupleDomain> {
    let Expr::Column(column) = expr else {
        return Err(DomainError::UnsupportedPredicateShape);
    };
    let sql_type = resolve_type(oracle, table, column.name())?;
    let values = list
        .iter()
        .map(|item| match item {
            Expr::Literal(l) => literal_to_scalar(l, &sql_type, column.name(), seen),
            _ => Err(DomainError::UnsupportedPredicateShape),
        })
        .collect::<DomainResult<Vec<_>>>()?;
    let domain = Domain::points(values);
    let domain = if negated { domain.complement() } else { domain };
    Ok(TupleDomain::single(column.name(), domain))
}

fn translate(
    expr: &Expr,
    oracle: &dyn MetadataOracle,
    table: &TableRef,
    seen: &mut HashMap<String, usize>,
) -> DomainResult<TupleDomain> {
    match expr {
        Expr::Logical {
            op: LogicalOp::And,
            left,
            right,
        } => {
            let l = translate(left, oracle, table, seen)?;
            let r = translate(right, oracle, table, seen)?;
            Ok(l.intersect(&r))
        }
        Expr::Logical {
            op: LogicalOp::Or,
            left,
            right,
        } => {
            let l = translate(left, oracle, table, seen)?;
            let r = translate(right, oracle, table, seen)?;
            l.union(&r)
        }
        Expr::Not(inner) => translate_negated(inner, oracle, table, seen),
        Expr::Comparison { op, left, right } => {
            translate_comparison(*op, left, right, oracle, table, seen)
        }
        Expr::InList {
            expr,
            list,
            negated,
        } => translate_in_list(expr, list, *negated, oracle, table, seen),
        _ => Err(DomainError::UnsupportedPredicateShape),
    }
}

/// Distributes a `NOT` into its operand via De Morgan's laws (spec §4.3:
/// "Negation (NOT) distributed via De Morgan into the leaves").
fn translate_negated(
    inner: &Expr,
    oracle: &dyn MetadataOracle,
    table: &TableRef,
    seen: &mut HashMap<String, usize>,
) -> DomainResult<TupleDomain> {
    match inner {
        Expr::Logical {
            op: LogicalOp::And,
            left,
            right,
        } => {
            let l = translate_negated(left, oracle, table, seen)?;
            let r = translate_negated(right, oracle, table, seen)?;
            l.union(&r)
        }
        Expr::Logical {
            op: LogicalOp::Or,
            left,
            right,
        } => {
            let l = translate_negated(left, oracle, table, seen)?;
            let r = translate_negated(right, oracle, table, seen)?;
            Ok(l.intersect(&r))
        }
        Expr::Not(doubly_negated) => translate(doubly_negated, oracle, table, seen),
        Expr::Comparison { op, left, right } => {
            translate_comparison(op.negate(), left, right, oracle, table, seen)
        }
        Expr::InList {
            expr,
            list,
            negated,
        } => translate_in_list(expr, list, !negated, oracle, table, seen),
        _ => Err(DomainError::UnsupportedPredicateShape),
    }
}

/// Translates a predicate expression into `TupleDomain` form.
///
/// Required by the Filter Containment Checker (spec §6). Returns
/// [`DomainError`] for anything the predicate grammar doesn't cover
/// (arithmetic atoms, aggregates, cross-column disjunctions, unknown
/// columns, or mismatched string lengths) — the caller folds this into
/// *unknown*/no-rewrite rather than propagating it further.
pub fn from_predicate(
    expr: &Expr,
    oracle: &dyn MetadataOracle,
    table: &TableRef,
) -> DomainResult<TupleDomain> {
    let mut seen_lengths = HashMap::new();
    translate(expr, oracle, table, &mut seen_lengths)
}

fn scalar_to_literal(value: &ScalarValue) -> Expr {
    match value {
        ScalarValue::Integer(v) => Expr::int(*v),
        ScalarValue::Decimal(v) => Expr::decimal(*v),
        ScalarValue::Str { value, .. } => Expr::string(value.clone()),
    }
}

fn tautology() -> Expr {
    Expr::cmp(CompOp::Eq, Expr::int(1), Expr::int(1))
}

fn contradiction() -> Expr {
    Expr::cmp(CompOp::Eq, Expr::int(1), Expr::int(0))
}

fn range_to_expr(column: &str, range: &(Bound<ScalarValue>, Bound<ScalarValue>)) -> Expr {
    if let (Bound::Included(a), Bound::Included(b)) = range {
        if a == b {
            return Expr::cmp(CompOp::Eq, Expr::column(column), scalar_to_literal(a));
        }
    }
    let lower = match &range.0 {
        Bound::Included(v) => Some(Expr::cmp(CompOp::GtEq, Expr::column(column), scalar_to_literal(v))),
        Bound::Excluded(v) => Some(Expr::cmp(CompOp::Gt, Expr::column(column), scalar_to_literal(v))),
        Bound::Unbounded => None,
    };
    let upper = match &range.1 {
        Bound::Included(v) => Some(Expr::cmp(CompOp::LtEq, Expr::column(column), scalar_to_literal(v))),
        Bound::Excluded(v) => Some(Expr::cmp(CompOp::Lt, Expr::column(column), scalar_to_literal(v))),
        Bound::Unbounded => None,
    };
    match (lower, upper) {
        (Some(l), Some(u)) => Expr::and(l, u),
        (Some(l), None) => l,
        (None, Some(u)) => u,
        (None, None) => tautology(),
    }
}

fn domain_to_expr(column: &str, domain: &Domain) -> Expr {
    if domain.is_all() {
        return tautology();
    }
    if domain.ranges().is_empty() {
        return contradiction();
    }
    domain
        .ranges()
        .iter()
        .map(|r| range_to_expr(column, r))
        .reduce(Expr::or)
        .unwrap_or_else(contradiction)
}

/// Renders a `TupleDomain` back into a predicate expression. Optional per
/// spec §6; provided for debugging and for round-tripping tests of the
/// domain algebra above its own unit tests.
pub fn to_predicate(domain: &TupleDomain) -> Expr {
    match domain {
        TupleDomain::Never => contradiction(),
        TupleDomain::Constrained(map) if map.is_empty() => tautology(),
        TupleDomain::Constrained(map) => {
            let mut columns: Vec<&String> = map.keys().collect();
            columns.sort();
            columns
                .into_iter()
                .map(|c| domain_to_expr(c, &map[c]))
                .reduce(Expr::and)
                .unwrap_or_else(tautology)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mv_rewrite_ast::ColumnRef;
    use mv_rewrite_catalog::SqlType;

    struct FixedOracle;

    impl MetadataOracle for FixedOracle {
        fn type_of(&self, _table: &str, column: &str) -> Option<SqlType> {
            match column {
                "a" | "c" => Some(SqlType::Integer),
                "b" => Some(SqlType::Varchar { length: 32 }),
                _ => None,
            }
        }
    }

    fn table() -> TableRef {
        TableRef::new("t1")
    }

    #[test]
    fn translates_simple_equality() {
        let expr = Expr::cmp(CompOp::Eq, Expr::column("a"), Expr::int(5));
        let domain = from_predicate(&expr, &FixedOracle, &table()).unwrap();
        let TupleDomain::Constrained(map) = domain else {
            panic!("expected constrained domain");
        };
        assert!(map["a"].contains(&ScalarValue::integer(5)));
        assert!(!map["a"].contains(&ScalarValue::integer(4)));
    }

    #[test]
    fn flipped_comparison_is_normalized() {
        let expr = Expr::cmp(CompOp::Lt, Expr::int(10), Expr::column("a"));
        let domain = from_predicate(&expr, &FixedOracle, &table()).unwrap();
        let TupleDomain::Constrained(map) = domain else {
            panic!("expected constrained domain");
        };
        assert!(map["a"].contains(&ScalarValue::integer(11)));
        assert!(!map["a"].contains(&ScalarValue::integer(9)));
    }

    #[test]
    fn translates_in_list() {
        let expr = Expr::InList {
            expr: Box::new(Expr::column("a")),
            list: vec![Expr::int(4), Expr::int(5)],
            negated: false,
        };
        let domain = from_predicate(&expr, &FixedOracle, &table()).unwrap();
        let TupleDomain::Constrained(map) = domain else {
            panic!("expected constrained domain");
        };
        assert!(map["a"].contains(&ScalarValue::integer(4)));
        assert!(!map["a"].contains(&ScalarValue::integer(6)));
    }

    #[test]
    fn conjunction_intersects_domains() {
        let expr = Expr::and(
            Expr::cmp(CompOp::Eq, Expr::column("a"), Expr::int(5)),
            Expr::cmp(CompOp::Gt, Expr::column("a"), Expr::int(0)),
        );
        let domain = from_predicate(&expr, &FixedOracle, &table()).unwrap();
        let TupleDomain::Constrained(map) = domain else {
            panic!("expected constrained domain");
        };
        assert!(map["a"].contains(&ScalarValue::integer(5)));
    }

    #[test]
    fn disjunction_across_columns_is_unknown() {
        let expr = Expr::or(
            Expr::cmp(CompOp::Lt, Expr::column("a"), Expr::int(10)),
            Expr::cmp(CompOp::Gt, Expr::column("c"), Expr::int(10)),
        );
        assert!(from_predicate(&expr, &FixedOracle, &table()).is_err());
    }

    #[test]
    fn negated_conjunction_distributes_via_de_morgan() {
        let expr = Expr::Not(Box::new(Expr::and(
            Expr::cmp(CompOp::Eq, Expr::column("a"), Expr::int(5)),
            Expr::cmp(CompOp::Eq, Expr::column("a"), Expr::int(6)),
        )));
        let domain = from_predicate(&expr, &FixedOracle, &table()).unwrap();
        let TupleDomain::Constrained(map) = domain else {
            panic!("expected constrained domain");
        };
        assert!(map["a"].contains(&ScalarValue::integer(5)));
        assert!(map["a"].contains(&ScalarValue::integer(6)));
    }

    #[test]
    fn mismatched_string_lengths_are_rejected() {
        let expr = Expr::and(
            Expr::cmp(CompOp::Eq, Expr::column("b"), Expr::string("apple")),
            Expr::cmp(CompOp::NotEq, Expr::column("b"), Expr::string("banana")),
        );
        assert!(matches!(
            from_predicate(&expr, &FixedOracle, &table()),
            Err(DomainError::StringLengthMismatch(_, 5, 6))
        ));
    }

    #[test]
    fn unknown_column_is_unknown() {
        let expr = Expr::cmp(CompOp::Eq, Expr::column("z"), Expr::int(1));
        assert!(from_predicate(&expr, &FixedOracle, &table()).is_err());
    }

    #[test]
    fn to_predicate_round_trips_a_point_domain() {
        let domain = TupleDomain::single("a", Domain::point(ScalarValue::integer(5)));
        let expr = to_predicate(&domain);
        assert_eq!(
            expr,
            Expr::cmp(CompOp::Eq, Expr::column("a"), Expr::int(5))
        );
        let _ = ColumnRef::new("a");
    }
}
