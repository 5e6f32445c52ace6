//! Candidate-value sets for node attributes.
//!
//! A template attribute lists the values it accepts; an empty list is the
//! wildcard. A concrete node stores its one observed value in the same type,
//! which keeps matching uniform: there is no null/sentinel anywhere.

use std::fmt;

/// Marker accepted in candidate lists and printed for empty sets.
pub const WILDCARD: &str = "*";

/// An ordered, duplicate-free set of acceptable attribute values.
///
/// Template values are upper-cased on construction; observed values from a
/// concrete tree are kept verbatim and compared case-insensitively.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateSet {
    values: Vec<String>,
}

impl CandidateSet {
    /// The wildcard: accepts any value, including no value.
    #[must_use]
    pub fn wildcard() -> Self {
        Self::default()
    }

    /// A concrete observed value, stored verbatim.
    #[must_use]
    pub fn observed(value: impl Into<String>) -> Self {
        Self {
            values: vec![value.into()],
        }
    }

    /// Builds a template set from individual values (normalized).
    #[must_use]
    pub fn of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for value in values {
            set.insert(value.as_ref());
        }
        set
    }

    /// Parses a comma-separated candidate list.
    ///
    /// Entries are trimmed and upper-cased; empty entries and the `*` marker
    /// are dropped, so `""`, `"*"` and `" , "` all yield the wildcard.
    #[must_use]
    pub fn parse_list(raw: &str) -> Self {
        Self::of(raw.split(','))
    }

    fn insert(&mut self, raw: &str) {
        let value = raw.trim();
        if value.is_empty() || value == WILDCARD {
            return;
        }
        let value = value.to_uppercase();
        if !self.values.contains(&value) {
            self.values.push(value);
        }
    }

    /// Returns true if this is the wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no candidates (same as [`Self::is_wildcard`]).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the first value, which for a concrete node is its only value.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Iterates the candidates in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Returns true if `value` satisfies this set.
    ///
    /// The wildcard accepts everything, including `None`. A non-empty set
    /// requires a value equal (ignoring case) to one of its candidates.
    #[must_use]
    pub fn accepts(&self, value: Option<&str>) -> bool {
        if self.is_wildcard() {
            return true;
        }
        let Some(value) = value else {
            return false;
        };
        let upper = value.trim().to_uppercase();
        self.values
            .iter()
            .any(|candidate| candidate.to_uppercase() == upper)
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wildcard() {
            return f.write_str(WILDCARD);
        }
        f.write_str(&self.values.join("|"))
    }
}
