//! Fuzzy name resolution shared by friend and location lookups.
//!
//! # Invariants
//! - Matching is case-insensitive substring containment.
//! - Among several matches, exactly one case-sensitive exact match wins.
//! - Results depend only on `query` and the candidate slice.

use crate::error::{JournalError, JournalResult};
use crate::model::{name_sort_key, EntityKind, Named};

/// Resolves `query` to the index of exactly one candidate.
///
/// # Errors
/// - `NotFound` when no candidate name contains `query`.
/// - `AmbiguousMatch` when several do and none equals `query` exactly.
pub fn resolve_index<T: Named>(
    kind: EntityKind,
    query: &str,
    candidates: &[T],
) -> JournalResult<usize> {
    let needle = query.to_lowercase();
    let matches: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| candidate.name().to_lowercase().contains(&needle))
        .map(|(index, _)| index)
        .collect();

    match matches.as_slice() {
        [] => Err(JournalError::NotFound {
            kind,
            query: query.to_string(),
        }),
        [only] => Ok(*only),
        several => {
            let exact: Vec<usize> = several
                .iter()
                .copied()
                .filter(|&index| candidates[index].name() == query)
                .collect();
            if let [winner] = exact.as_slice() {
                return Ok(*winner);
            }

            let mut names: Vec<String> = several
                .iter()
                .map(|&index| candidates[index].name().to_string())
                .collect();
            names.sort_by(|a, b| name_sort_key(a).cmp(&name_sort_key(b)).then_with(|| a.cmp(b)));
            Err(JournalError::AmbiguousMatch {
                kind,
                query: query.to_string(),
                candidates: names,
            })
        }
    }
}

/// Resolves `query` to exactly one candidate.
pub fn resolve<'a, T: Named>(
    kind: EntityKind,
    query: &str,
    candidates: &'a [T],
) -> JournalResult<&'a T> {
    resolve_index(kind, query, candidates).map(|index| &candidates[index])
}
