// Copyright (c) 2025 Materialized View Rewrite Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Filter Containment Checker
//!
//! Decides whether `Q.where ⇒ V.where` — every row satisfying the base
//! query's filter also satisfies the view's filter (spec §4.3) — by
//! translating both sides into [`TupleDomain`] form via
//! [`crate::translator::from_predicate`] and testing subset containment.

use mv_rewrite_ast::{Expr, TableRef};
use mv_rewrite_catalog::MetadataOracle;
use mv_rewrite_domain::TupleDomain;

use crate::translator::from_predicate;

/// True if `query_where` is contained in `view_where` (spec §4.3).
///
/// When `view_where` is absent the view domain is the universe and
/// containment holds trivially — this check happens first, before either
/// side is translated, so a base query whose own `WHERE` cannot be
/// modeled exactly still rewrites cleanly against a view with no filter.
///
/// When translation of either side fails, containment is *unknown* and
/// this returns `false` (spec §4.3, §7): the orchestrator folds that into
/// a silent fallback to the original query, never an error.
pub fn check_containment(
    query_where: Option<&Expr>,
    view_where: Option<&Expr>,
    oracle: &dyn MetadataOracle,
    table: &TableRef,
) -> bool {
    let Some(view_predicate) = view_where else {
        tracing::trace!("view has no WHERE clause; containment holds trivially");
        return true;
    };

    let view_domain = match from_predicate(view_predicate, oracle, table) {
        Ok(domain) => domain,
        Err(err) => {
            tracing::debug!(%err, "view predicate could not be modeled exactly; containment unknown");
            return false;
        }
    };

    let query_domain = match query_where {
        None => TupleDomain::all(),
        Some(predicate) => match from_predicate(predicate, oracle, table) {
            Ok(domain) => domain,
            Err(err) => {
                tracing::debug!(%err, "query predicate could not be modeled exactly; containment unknown");
                return false;
            }
        },
    };

    let contained = query_domain.is_subset_of(&view_domain);
    tracing::trace!(contained, "filter containment check result");
    contained
}
