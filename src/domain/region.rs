// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hub Topology Vocabulary
//!
//! Regions of the hub triangle, the network tiers each region hosts, and the
//! roles an account can play when it is wired into a hub.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::IdentifierError;

/// One corner of the hub triangle
///
/// Ordering is for display only. Every pair of regions is connected by
/// peering, so the topology is a complete graph on three nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Region hosting the original estate
    Legacy,
    /// Main region for current workloads
    Primary,
    /// Disaster recovery region
    Recovery,
}

impl Region {
    /// All regions of the triangle in display order
    pub const ALL: [Region; 3] = [Region::Legacy, Region::Primary, Region::Recovery];

    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Primary => "primary",
            Self::Recovery => "recovery",
        }
    }

    /// The two regions that are not `self`, in display order
    pub fn others(&self) -> [Region; 2] {
        match self {
            Self::Legacy => [Self::Primary, Self::Recovery],
            Self::Primary => [Self::Legacy, Self::Recovery],
            Self::Recovery => [Self::Legacy, Self::Primary],
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Region {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(Self::Legacy),
            "primary" => Ok(Self::Primary),
            "recovery" => Ok(Self::Recovery),
            _ => Err(IdentifierError::UnknownVariant {
                kind: "region",
                value: s.to_string(),
            }),
        }
    }
}

/// Hub network tier
///
/// Each region runs one hub per tier, each with its own transit gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkTier {
    /// Production hub
    Prod,
    /// Non-production hub
    NonProd,
}

impl NetworkTier {
    /// Both tiers, production first
    pub const ALL: [NetworkTier; 2] = [NetworkTier::Prod, NetworkTier::NonProd];

    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prod => "prod",
            Self::NonProd => "nonprod",
        }
    }
}

impl fmt::Display for NetworkTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NetworkTier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prod" => Ok(Self::Prod),
            "nonprod" => Ok(Self::NonProd),
            _ => Err(IdentifierError::UnknownVariant {
                kind: "network tier",
                value: s.to_string(),
            }),
        }
    }
}

/// Role an account plays in the hub topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Owns the transit gateways and inspection path
    Hub,
    /// Shared CI/build account that must reach every tier
    ToolsSpoke,
    /// Tenant workload account
    OrdinarySpoke,
}

impl AccountRole {
    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hub => "hub",
            Self::ToolsSpoke => "tools_spoke",
            Self::OrdinarySpoke => "ordinary_spoke",
        }
    }

    /// Whether accounts with this role attach to a hub as a spoke
    pub fn is_spoke(&self) -> bool {
        !matches!(self, Self::Hub)
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
