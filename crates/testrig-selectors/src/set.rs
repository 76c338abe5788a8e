use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_EXCLUDE_PATTERNS;

/// Ordered, deduplicated collection of glob patterns.
///
/// Duplicates are dropped on insertion, keeping the first occurrence, so
/// iteration order follows the order the patterns were written in. Equality
/// is set equality: two sets holding the same patterns in a different order
/// compare equal, because order has no effect on matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternSet(IndexSet<String>);

impl PatternSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in denylist ([`DEFAULT_EXCLUDE_PATTERNS`]).
    #[must_use]
    pub fn defaults() -> Self {
        Self::from_static(DEFAULT_EXCLUDE_PATTERNS)
    }

    #[must_use]
    pub fn from_static(patterns: &[&str]) -> Self {
        patterns.iter().copied().collect()
    }

    /// Insert a pattern, returning `false` if it was already present.
    pub fn insert(&mut self, pattern: impl Into<String>) -> bool {
        self.0.insert(pattern.into())
    }

    #[must_use]
    pub fn contains(&self, pattern: &str) -> bool {
        self.0.contains(pattern)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&str> {
        self.0.get_index(index).map(String::as_str)
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PatternSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
