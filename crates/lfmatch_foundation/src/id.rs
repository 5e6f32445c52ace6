//! Node identifiers.
//!
//! Author-supplied ids are either non-negative numbers or opaque names (TRIPS
//! uses names like `V38472`). Ids the template parser invents for anonymous
//! components are negative numbers from a process-wide counter, so they can
//! never collide with an explicit id.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::error::{Error, ErrorKind};

/// Global counter for generated ids. Counts down from -1.
static GENERATED_COUNTER: AtomicI64 = AtomicI64::new(-1);

/// Identifier of a node, unique within the tree or library that declared it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeId {
    /// A numeric id. Negative values are reserved for generated ids.
    Number(i64),
    /// A non-numeric id, kept verbatim.
    Name(String),
}

impl NodeId {
    /// Issues a fresh generated id.
    #[must_use]
    pub fn generate() -> Self {
        Self::Number(GENERATED_COUNTER.fetch_sub(1, Ordering::SeqCst))
    }

    /// Returns true if this id was produced by [`NodeId::generate`].
    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Number(n) if *n < 0)
    }

    /// Parses an author-supplied id.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidId`] for negative numbers, which are
    /// reserved for generated ids.
    pub fn parse_explicit(raw: &str) -> Result<Self, Error> {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(n) if n < 0 => Err(Error::new(ErrorKind::InvalidId(raw.to_string()))),
            Ok(n) => Ok(Self::Number(n)),
            Err(_) if raw.is_empty() => Err(Error::new(ErrorKind::InvalidId(raw.to_string()))),
            Err(_) => Ok(Self::Name(raw.to_string())),
        }
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_explicit(s)
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for NodeId {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(s) => f.write_str(s),
        }
    }
}
