// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expressions
//!
//! This module represents the SQL expressions the rewriter operates on.
//!
//! The variant set is closed and deliberately small: the rewriter never
//! parses SQL itself, so every variant here is something a base table
//! expression, a view projection, or a WHERE/GROUP BY/ORDER BY clause can
//! be built from. Anything a parser could produce but this rewriter has no
//! opinion on (scalar functions, CASE, subqueries, window functions) simply
//! has no representation — a collaborator upstream of this crate is
//! responsible for resolving those away or for not handing them to us.
//!
//! ## Column references
//!
//! [`ColumnRef`] is an opaque, case-sensitive name. Because only single,
//! unaliased base tables are in scope (views or queries over joins or
//! aliased tables are rejected before an `Expr` tree is ever rewritten),
//! a column reference never needs a table qualifier here.
//!
//! ## Structural equality
//!
//! The Expression Rewriter matches whole subexpressions against a view's
//! projection list (`SUM(a*b+c)` matched as a unit, not just `a`), so
//! [`Expr`] equality must be structural/deep equality, not alias-aware or
//! type-aware. `Literal::Decimal` carries an `f64`, which has no `Eq`/`Hash`
//! impl in std; we derive `PartialEq`/`Hash` manually via bit-pattern
//! comparison, giving the canonical-hash fast path the design notes call
//! out without colliding across variants.

use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An opaque, case-sensitive column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef(pub String);

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A literal value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Literal {
    Integer(i64),
    Decimal(f64),
    String(String),
    Date(NaiveDate),
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Integer(a), Literal::Integer(b)) => a == b,
            (Literal::Decimal(a), Literal::Decimal(b)) => a.to_bits() == b.to_bits(),
            (Literal::String(a), Literal::String(b)) => a == b,
            (Literal::Date(a), Literal::Date(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Literal::Integer(v) => {
                0u8.hash(state);
                v.hash(state);
            }
            Literal::Decimal(v) => {
                1u8.hash(state);
                v.to_bits().hash(state);
            }
            Literal::String(v) => {
                2u8.hash(state);
                v.hash(state);
            }
            Literal::Date(v) => {
                3u8.hash(state);
                v.hash(state);
            }
        }
    }
}

/// Arithmetic operators (`+`, `-`, `*`, `/`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Comparison operators (`=`, `<>`, `<`, `<=`, `>`, `>=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CompOp {
    /// The operator obtained by flipping the operands (`a op b` == `b flip(op) a`).
    pub fn flip(self) -> CompOp {
        match self {
            CompOp::Eq => CompOp::Eq,
            CompOp::NotEq => CompOp::NotEq,
            CompOp::Lt => CompOp::Gt,
            CompOp::LtEq => CompOp::GtEq,
            CompOp::Gt => CompOp::Lt,
            CompOp::GtEq => CompOp::LtEq,
        }
    }

    /// The operator that is true exactly when `self` is false (De Morgan leaf negation).
    pub fn negate(self) -> CompOp {
        match self {
            CompOp::Eq => CompOp::NotEq,
            CompOp::NotEq => CompOp::Eq,
            CompOp::Lt => CompOp::GtEq,
            CompOp::LtEq => CompOp::Gt,
            CompOp::Gt => CompOp::LtEq,
            CompOp::GtEq => CompOp::Lt,
        }
    }
}

/// Logical binary operators (`AND`, `OR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

/// A SQL expression.
///
/// Closed, exhaustively-matched sum type — adding a variant is a compile
/// error at every `match` in the rewriter until it is handled, by design.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    /// A bare column reference.
    Column(ColumnRef),

    /// A literal value.
    Literal(Literal),

    /// Arithmetic binary operation, e.g. `a * b + c`.
    Arithmetic {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Comparison, e.g. `a < 10`.
    Comparison {
        op: CompOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Logical AND/OR.
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Logical NOT.
    Not(Box<Expr>),

    /// An aggregate function call, e.g. `SUM(a * b + c)`.
    Aggregate { name: String, args: Vec<Expr> },

    /// `expr IN (list...)` / `expr NOT IN (list...)`.
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column(ColumnRef::new(name))
    }

    pub fn int(v: i64) -> Self {
        Expr::Literal(Literal::Integer(v))
    }

    pub fn decimal(v: f64) -> Self {
        Expr::Literal(Literal::Decimal(v))
    }

    pub fn string(v: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(v.into()))
    }

    pub fn cmp(op: CompOp, left: Expr, right: Expr) -> Self {
        Expr::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::Logical {
            op: LogicalOp::And,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Logical {
            op: LogicalOp::Or,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn aggregate(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Aggregate {
            name: name.into(),
            args,
        }
    }

    /// Canonical textual rendering, used by the View Info Extractor as the
    /// implicit output name for a projection item with no explicit alias
    /// (spec §4.1: "otherwise it is the canonical textual rendering of `e`").
    pub fn canonical_text(&self) -> String {
        match self {
            Expr::Column(c) => c.name().to_string(),
            Expr::Literal(Literal::Integer(v)) => v.to_string(),
            Expr::Literal(Literal::Decimal(v)) => v.to_string(),
            Expr::Literal(Literal::String(v)) => format!("'{v}'"),
            Expr::Literal(Literal::Date(v)) => format!("'{v}'"),
            Expr::Arithmetic { op, left, right } => {
                let sym = match op {
                    ArithOp::Add => "+",
                    ArithOp::Sub => "-",
                    ArithOp::Mul => "*",
                    ArithOp::Div => "/",
                };
                format!("{}{}{}", left.canonical_text(), sym, right.canonical_text())
            }
            Expr::Comparison { op, left, right } => {
                let sym = match op {
                    CompOp::Eq => "=",
                    CompOp::NotEq => "<>",
                    CompOp::Lt => "<",
                    CompOp::LtEq => "<=",
                    CompOp::Gt => ">",
                    CompOp::GtEq => ">=",
                };
                format!("{}{}{}", left.canonical_text(), sym, right.canonical_text())
            }
            Expr::Logical { op, left, right } => {
                let sym = match op {
                    LogicalOp::And => "AND",
                    LogicalOp::Or => "OR",
                };
                format!(
                    "{} {} {}",
                    left.canonical_text(),
                    sym,
                    right.canonical_text()
                )
            }
            Expr::Not(inner) => format!("NOT {}", inner.canonical_text()),
            Expr::Aggregate { name, args } => {
                let rendered: Vec<String> = args.iter().map(Expr::canonical_text).collect();
                format!("{}({})", name.to_uppercase(), rendered.join(","))
            }
            Expr::InList {
                expr,
                list,
                negated,
            } => {
                let rendered: Vec<String> = list.iter().map(Expr::canonical_text).collect();
                format!(
                    "{}{} IN ({})",
                    expr.canonical_text(),
                    if *negated { " NOT" } else { "" },
                    rendered.join(",")
                )
            }
        }
    }

    /// True if this expression is a single aggregate call, or contains one
    /// as an immediate child. Used by the orchestrator's GROUP BY
    /// compatibility gate (spec §4.4 gate 6) to decide whether `Q` aggregates.
    pub fn is_or_contains_aggregate(&self) -> bool {
        match self {
            Expr::Aggregate { .. } => true,
            Expr::Arithmetic { left, right, .. }
            | Expr::Comparison { left, right, .. }
            | Expr::Logical { left, right, .. } => {
                left.is_or_contains_aggregate() || right.is_or_contains_aggregate()
            }
            Expr::Not(inner) => inner.is_or_contains_aggregate(),
            Expr::InList { expr, list, .. } => {
                expr.is_or_contains_aggregate() || list.iter().any(Expr::is_or_contains_aggregate)
            }
            Expr::Column(_) | Expr::Literal(_) => false,
        }
    }
}

/// Sort direction for an ORDER BY item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A single ORDER BY item: an inner expression plus its direction.
///
/// Kept as its own struct rather than an `Expr` variant (the spec's prose
/// lists "sort item" among the expression kinds) since a sort item only
/// ever occurs in ORDER BY position and never nests inside another
/// expression; modeling it as a sibling struct avoids a variant that the
/// rewriter's recursive match would otherwise have to special-case out of
/// every other position. See DESIGN.md for the full rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortItem {
    pub expr: Expr,
    pub direction: SortDirection,
}

impl SortItem {
    pub fn new(expr: Expr, direction: SortDirection) -> Self {
        Self { expr, direction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_ref_equality_is_structural() {
        assert_eq!(ColumnRef::new("a"), ColumnRef::new("a"));
        assert_ne!(ColumnRef::new("a"), ColumnRef::new("b"));
    }

    #[test]
    fn decimal_literal_equality_uses_bit_pattern() {
        assert_eq!(Literal::Decimal(1.5), Literal::Decimal(1.5));
        assert_ne!(Literal::Decimal(1.5), Literal::Decimal(1.50001));
    }

    #[test]
    fn structural_equality_matches_whole_subexpressions() {
        let sum_ab_c = Expr::aggregate(
            "SUM",
            vec![Expr::Arithmetic {
                op: ArithOp::Add,
                left: Box::new(Expr::Arithmetic {
                    op: ArithOp::Mul,
                    left: Box::new(Expr::column("a")),
                    right: Box::new(Expr::column("b")),
                }),
                right: Box::new(Expr::column("c")),
            }],
        );
        let same_shape = Expr::aggregate(
            "SUM",
            vec![Expr::Arithmetic {
                op: ArithOp::Add,
                left: Box::new(Expr::Arithmetic {
                    op: ArithOp::Mul,
                    left: Box::new(Expr::column("a")),
                    right: Box::new(Expr::column("b")),
                }),
                right: Box::new(Expr::column("c")),
            }],
        );
        assert_eq!(sum_ab_c, same_shape);
    }

    #[test]
    fn canonical_text_renders_deterministically() {
        let expr = Expr::aggregate(
            "sum",
            vec![Expr::Arithmetic {
                op: ArithOp::Add,
                left: Box::new(Expr::Arithmetic {
                    op: ArithOp::Mul,
                    left: Box::new(Expr::column("a")),
                    right: Box::new(Expr::column("b")),
                }),
                right: Box::new(Expr::column("c")),
            }],
        );
        assert_eq!(expr.canonical_text(), "SUM(a*b+c)");
    }

    #[test]
    fn comp_op_flip_and_negate() {
        assert_eq!(CompOp::Lt.flip(), CompOp::Gt);
        assert_eq!(CompOp::LtEq.negate(), CompOp::Gt);
        assert_eq!(CompOp::Eq.negate(), CompOp::NotEq);
    }

    #[test]
    fn is_or_contains_aggregate_detects_nested_aggregate() {
        let rollup = Expr::aggregate(
            "SUM",
            vec![Expr::aggregate("SUM", vec![Expr::column("x")])],
        );
        assert!(rollup.is_or_contains_aggregate());
        assert!(!Expr::column("x").is_or_contains_aggregate());
    }
}
