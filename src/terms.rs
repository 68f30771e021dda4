use tracing::debug;

use crate::types::{TermSet, TermSpec};

/// Reconcile an inclusion directive with an exclusion directive.
///
/// Exclusion is prefix-transitive: excluding `author` also drops `author.posts`
/// and anything deeper. Inclusion is not: including `author.posts` does not
/// protect `author`. Returns `None` when nothing survives, so "nothing
/// requested" and "everything excluded" look the same to the caller.
pub fn resolve_terms(include: &TermSpec, exclude: &TermSpec) -> Option<TermSet> {
    let included = include.to_term_set();
    let excluded = exclude.to_term_set();
    let resolved = included.without_excluded(&excluded);

    debug!(
        event = "Selection",
        phase = "ResolveTerms",
        include = included.to_string(),
        exclude = excluded.to_string(),
        resolved = resolved.to_string()
    );

    if resolved.is_empty() {
        None
    } else {
        Some(resolved)
    }
}
