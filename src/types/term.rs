//! Inclusion terms: dotted relationship paths such as `author.posts`.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One dotted relationship path, e.g. `author.posts.tags`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Term(String);

impl Term {
    pub fn new(path: impl Into<String>) -> Self {
        Term(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The relationship names along the path.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Every leading sub-path, shortest first: `a`, `a.b`, `a.b.c`.
    pub fn prefixes(&self) -> Vec<Term> {
        let segments: Vec<&str> = self.segments().collect();
        (1..=segments.len())
            .map(|len| Term(segments[..len].join(".")))
            .collect()
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::new(value)
    }
}

/// A raw inclusion or exclusion directive as it arrives from a caller or a
/// query string: either `"a,b.c"` or `["a", "b.c"]`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum TermSpec {
    Delimited(String),
    List(Vec<String>),
}

impl TermSpec {
    /// True when the directive names no terms at all.
    pub fn is_empty(&self) -> bool {
        self.to_term_set().is_empty()
    }

    /// Normalize into a set. Surrounding whitespace and empty entries are dropped.
    pub fn to_term_set(&self) -> TermSet {
        let raw: Vec<&str> = match self {
            TermSpec::Delimited(s) => s.split(',').collect(),
            TermSpec::List(items) => items.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Term::new)
            .collect()
    }
}

impl From<&str> for TermSpec {
    fn from(value: &str) -> Self {
        TermSpec::Delimited(value.to_string())
    }
}

impl From<Vec<String>> for TermSpec {
    fn from(value: Vec<String>) -> Self {
        TermSpec::List(value)
    }
}

impl From<Vec<&str>> for TermSpec {
    fn from(value: Vec<&str>) -> Self {
        TermSpec::List(value.into_iter().map(str::to_string).collect())
    }
}

/// An ordered set of terms. Ordering keeps rendered output deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TermSet(BTreeSet<Term>);

impl TermSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: Term) -> bool {
        self.0.insert(term)
    }

    pub fn contains(&self, term: &Term) -> bool {
        self.0.contains(term)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.0.iter()
    }

    /// Drop every term for which `exclude` holds the term itself or any of its prefixes.
    pub fn without_excluded(&self, exclude: &TermSet) -> TermSet {
        self.0
            .iter()
            .filter(|term| !term.prefixes().iter().any(|prefix| exclude.contains(prefix)))
            .cloned()
            .collect()
    }
}

impl Display for TermSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0.iter().join(","))
    }
}

impl FromIterator<Term> for TermSet {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        TermSet(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TermSet {
    type Item = &'a Term;
    type IntoIter = std::collections::btree_set::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
