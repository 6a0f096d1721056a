//! Category filter with explicit wildcard semantics
//!
//! Replaces the magic "any" string sentinel: a filter either matches
//! everything, one value, or a set of values. An empty set normalizes to
//! `Any` at construction, so "no locations given" is a universal match
//! rather than a match set that silently hides every result.

use std::collections::HashSet;
use std::hash::Hash;

/// A match criterion over one categorical axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter<T: Eq + Hash> {
    /// Matches every candidate (vacuous match)
    Any,
    /// Matches exactly one value
    Exactly(T),
    /// Matches any value in the set
    OneOf(HashSet<T>),
}

impl<T: Eq + Hash> Filter<T> {
    /// Build a filter from a collection of acceptable values
    ///
    /// An empty collection yields `Any`; a singleton yields `Exactly`.
    pub fn one_of(values: impl IntoIterator<Item = T>) -> Self {
        let mut set: HashSet<T> = values.into_iter().collect();
        match set.len() {
            0 => Self::Any,
            1 => {
                let value = set.drain().next().expect("singleton set");
                Self::Exactly(value)
            }
            _ => Self::OneOf(set),
        }
    }

    /// Check whether a candidate satisfies the filter
    pub fn matches(&self, candidate: &T) -> bool {
        match self {
            Self::Any => true,
            Self::Exactly(value) => value == candidate,
            Self::OneOf(values) => values.contains(candidate),
        }
    }

    /// Check whether this filter matches everything
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}
