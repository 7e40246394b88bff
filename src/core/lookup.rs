//! Case-insensitive keyword lookup with prefix disambiguation.
//!
//! Resolves a partial keyword against a candidate list in two phases: an
//! exact (case-insensitive) match short-circuits, otherwise every candidate
//! the query prefixes is collected and classified as unique, ambiguous, or
//! not found. Used for resolving abbreviated subcommand names and similar
//! keyword sets.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Default fail-fast message templates. `%s` is replaced with the query.
pub const DEFAULT_NOT_FOUND: &str = "%s not found";
pub const DEFAULT_AMBIGUOUS: &str = "%s is ambiguous";

/// Result of resolving a query against a candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Exactly one candidate resolves.
    Found(String),
    /// Two or more candidates match, in candidate-set order.
    Ambiguous(Vec<String>),
    /// No candidate matches.
    NotFound,
}

impl LookupOutcome {
    /// The unique match, if there is one.
    pub fn found(&self) -> Option<&str> {
        match self {
            LookupOutcome::Found(hit) => Some(hit),
            _ => None,
        }
    }
}

/// Resolve `query` against `candidates`, case-insensitively.
///
/// A candidate equal to the query (ignoring case) wins outright, even when
/// other candidates continue past it (`"show"` resolves against
/// `["show", "showtime"]`). Without a unique exact match, every candidate
/// starting with the query is collected; zero, one, or many matches map to
/// `NotFound`, `Found`, and `Ambiguous`. The empty query prefixes every
/// candidate.
///
/// Never fails and never mutates its inputs; ambiguity and absence are
/// ordinary outcomes, not errors. Case-fold duplicates in the candidate set
/// fall through to the prefix phase and surface as `Ambiguous` (see
/// [`ensure_unique`] for the construction-time contract).
pub fn resolve<S: AsRef<str>>(candidates: &[S], query: &str) -> LookupOutcome {
    let folded = query.to_lowercase();

    let mut exact = candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| candidate.to_lowercase() == folded);
    if let Some(hit) = exact.next() {
        if exact.next().is_none() {
            return LookupOutcome::Found(hit.to_string());
        }
        // Duplicate exact matches: let the prefix phase classify them.
    }

    let mut matches: Vec<String> = candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| candidate.to_lowercase().starts_with(&folded))
        .map(str::to_string)
        .collect();

    match matches.len() {
        0 => LookupOutcome::NotFound,
        1 => LookupOutcome::Found(matches.remove(0)),
        _ => LookupOutcome::Ambiguous(matches),
    }
}

/// Fail-fast wrapper around [`resolve`].
///
/// Each template converts its outcome into an error carrying the formatted
/// message (`%s` replaced with the query). Passing `None` suppresses the
/// error for that outcome and returns it raw instead: `NotFound` for a
/// missing keyword, `Ambiguous` with the full match list for a tie. A unique
/// match always comes back as `Found`.
pub fn resolve_or_fail<S: AsRef<str>>(
    candidates: &[S],
    query: &str,
    not_found: Option<&str>,
    ambiguous: Option<&str>,
) -> Result<LookupOutcome> {
    match resolve(candidates, query) {
        outcome @ LookupOutcome::Found(_) => Ok(outcome),
        LookupOutcome::NotFound => match not_found {
            Some(template) => Err(Error::lookup_not_found(query, fill(template, query))),
            None => Ok(LookupOutcome::NotFound),
        },
        LookupOutcome::Ambiguous(matches) => match ambiguous {
            Some(template) => Err(Error::lookup_ambiguous(query, matches, fill(template, query))),
            None => Ok(LookupOutcome::Ambiguous(matches)),
        },
    }
}

/// Resolve `query` to its unique match or fail with the default messages.
pub fn require<S: AsRef<str>>(candidates: &[S], query: &str) -> Result<String> {
    match resolve(candidates, query) {
        LookupOutcome::Found(hit) => Ok(hit),
        LookupOutcome::NotFound => Err(Error::lookup_not_found(
            query,
            fill(DEFAULT_NOT_FOUND, query),
        )),
        LookupOutcome::Ambiguous(matches) => Err(Error::lookup_ambiguous(
            query,
            matches,
            fill(DEFAULT_AMBIGUOUS, query),
        )),
    }
}

/// Validate the candidate-set uniqueness contract at construction time.
///
/// Candidate sets are expected to contain unique keys after case folding;
/// a duplicate is reported as an invalid-argument error naming both entries.
pub fn ensure_unique<S: AsRef<str>>(candidates: &[S]) -> Result<()> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for candidate in candidates {
        let candidate = candidate.as_ref();
        if let Some(first) = seen.insert(candidate.to_lowercase(), candidate) {
            return Err(Error::validation_invalid_argument(
                "candidates",
                format!("duplicate keyword '{}' collides with '{}'", candidate, first),
                Some(vec![first.to_string(), candidate.to_string()]),
            ));
        }
    }
    Ok(())
}

fn fill(template: &str, query: &str) -> String {
    template.replacen("%s", query, 1)
}

/// Lookup directly on keyword collections.
pub trait Lookup {
    fn lookup(&self, query: &str) -> LookupOutcome;
}

impl<S: AsRef<str>> Lookup for [S] {
    fn lookup(&self, query: &str) -> LookupOutcome {
        resolve(self, query)
    }
}

/// Maps resolve against their key set, in key order.
impl<S: AsRef<str> + Ord, V> Lookup for BTreeMap<S, V> {
    fn lookup(&self, query: &str) -> LookupOutcome {
        let keys: Vec<&str> = self.keys().map(AsRef::as_ref).collect();
        resolve(&keys, query)
    }
}
