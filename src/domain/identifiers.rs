// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cloud Resource Identifiers
//!
//! Opaque ids handed to the planner by the hub state lookup or the spoke's
//! own stack. The planner never interprets them beyond non-emptiness; they
//! are newtypes so a route table id cannot be passed where a transit gateway
//! id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{kind} contains invalid characters: {value:?}")]
    InvalidCharacters { kind: &'static str, value: String },

    #[error("Account ID must be exactly 12 digits: {0:?}")]
    InvalidAccountId(String),

    #[error("Invalid spoke name {value:?}: {reason}")]
    InvalidSpokeName { value: String, reason: &'static str },

    #[error("Unknown {kind}: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Resource keys use `/` as a separator, so ids must never contain one.
fn validate_opaque(kind: &'static str, id: &str) -> Result<(), IdentifierError> {
    if id.is_empty() {
        return Err(IdentifierError::Empty(kind));
    }
    if id.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(IdentifierError::InvalidCharacters {
            kind,
            value: id.to_string(),
        });
    }
    Ok(())
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Result<Self, IdentifierError> {
                let id = id.into();
                validate_opaque($kind, &id)?;
                Ok(Self(id))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

opaque_id!(
    /// Transit gateway id (`tgw-...`)
    TransitGatewayId,
    "Transit gateway ID"
);

opaque_id!(
    /// VPC or transit gateway route table id
    RouteTableId,
    "Route table ID"
);

opaque_id!(
    /// Cross-region transit gateway peering attachment id
    ConnectorId,
    "Peering connector ID"
);

opaque_id!(
    /// VPC id
    VpcId,
    "VPC ID"
);

opaque_id!(
    /// Subnet id
    SubnetId,
    "Subnet ID"
);

opaque_id!(
    /// Route 53 private hosted zone id
    HostedZoneId,
    "Hosted zone ID"
);

/// AWS account number
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Create an account id
    ///
    /// # Invariants
    /// - Exactly 12 ASCII digits
    pub fn new(id: impl Into<String>) -> Result<Self, IdentifierError> {
        let id = id.into();
        if id.len() != 12 || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(IdentifierError::InvalidAccountId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AccountId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_ids() {
        let tgw = TransitGatewayId::new("tgw-0abc").unwrap();
        assert_eq!(tgw.as_str(), "tgw-0abc");
        assert_eq!(tgw.to_string(), "tgw-0abc");

        assert_eq!(
            RouteTableId::new(""),
            Err(IdentifierError::Empty("Route table ID"))
        );
        assert!(VpcId::new("vpc 123").is_err());
        assert!(SubnetId::new("subnet/1").is_err());
    }

    #[test]
    fn test_account_id() {
        assert!(AccountId::new("123456789012").is_ok());
        assert!(AccountId::new("12345678901").is_err());
        assert!(AccountId::new("12345678901a").is_err());
    }

    #[test]
    fn test_ids_deserialize_with_validation() {
        let id: ConnectorId = serde_json::from_str("\"tgw-attach-1\"").unwrap();
        assert_eq!(id.as_str(), "tgw-attach-1");
        assert!(serde_json::from_str::<ConnectorId>("\"\"").is_err());
    }
}
