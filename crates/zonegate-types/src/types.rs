//! Identity types.
//!
//! All three ids are newtype wrappers around `String`. Zone and token ids
//! are opaque strings on disk, but the registries hand out small positive
//! integers ("1", "2", ...) so they double as short, typeable admin
//! handles. Player ids are whatever stable identity the host uses
//! (usually a UUID string).

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PlayerId
// ---------------------------------------------------------------------------

/// Stable identity of a player, as reported by the host.
///
/// `#[serde(transparent)]` keeps the on-disk form a plain string:
/// `PlayerId("8f1c...")` is stored as `"8f1c..."`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ZoneId
// ---------------------------------------------------------------------------

/// Stable identity of a zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the id the registry allocates for counter value `n`.
    pub fn from_number(n: u64) -> Self {
        Self(n.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value of this id, if it is a plain positive integer.
    ///
    /// Hand-written records may use any string; those never take part
    /// in id allocation.
    pub fn number(&self) -> Option<u64> {
        self.0.parse().ok().filter(|n| *n > 0)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// Stable identity of a token template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub String);

impl TokenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_number(n: u64) -> Self {
        Self(n.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn number(&self) -> Option<u64> {
        self.0.parse().ok().filter(|n| *n > 0)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T-{}", self.0)
    }
}
