// Copyright (c) 2025 - Cowboy AI, Inc.
//! Spoke Identity and Deterministic Resource Keys
//!
//! Every operation the planner emits carries a [`ResourceKey`]. The external
//! emitter uses it as the resource identifier, so the key must be a pure
//! function of who the spoke is and what the operation is for: planning the
//! same inputs twice yields the same keys and the emitter sees no change.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use super::{IdentifierError, NetworkTier, Region};

/// Spoke account name value object
///
/// Invariants (a single DNS label, lowercase):
/// - Non-empty, at most 63 characters
/// - Lowercase ASCII letters, digits and hyphens only
/// - Cannot start or end with a hyphen
///
/// # Examples
///
/// ```rust
/// use transit_hub_planner::domain::SpokeName;
///
/// assert!(SpokeName::new("payments").is_ok());
/// assert!(SpokeName::new("Payments").is_err());
/// assert!(SpokeName::new("-payments").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpokeName(String);

impl SpokeName {
    /// Maximum length of a spoke name
    pub const MAX_LENGTH: usize = 63;

    /// Create a spoke name with validation
    pub fn new(name: impl Into<String>) -> Result<Self, IdentifierError> {
        let name = name.into();

        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name.len() > Self::MAX_LENGTH {
            Some("name exceeds 63 characters")
        } else if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            Some("only lowercase letters, digits and hyphens are allowed")
        } else if name.starts_with('-') || name.ends_with('-') {
            Some("name cannot start or end with a hyphen")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(IdentifierError::InvalidSpokeName {
                value: name,
                reason,
            }),
            None => Ok(Self(name)),
        }
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpokeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for SpokeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SpokeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SpokeName {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SpokeName {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SpokeName> for String {
    fn from(name: SpokeName) -> Self {
        name.0
    }
}

/// Stable identifier of one emitted operation
///
/// Keys are `/`-separated segments. Neither spoke names nor opaque ids may
/// contain `/`, so distinct segment lists always give distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Join segments into a key
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = segments
            .into_iter()
            .map(|segment| segment.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("/");
        Self(joined)
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Individual segments of the key
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who is being attached, where, and to which tier
///
/// The prefix of every key the attachment planner derives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpokeIdentity {
    pub name: SpokeName,
    pub region: Region,
    pub tier: NetworkTier,
}

impl SpokeIdentity {
    pub fn new(name: SpokeName, region: Region, tier: NetworkTier) -> Self {
        Self { name, region, tier }
    }

    /// Key for an operation identified by `purpose` segments
    pub fn key(&self, purpose: &[&str]) -> ResourceKey {
        let prefix = [self.name.as_str(), self.region.as_str(), self.tier.as_str()];
        ResourceKey::from_segments(prefix.iter().chain(purpose.iter()))
    }
}

impl fmt::Display for SpokeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}/{}", self.name, self.region, self.tier)
    }
}
