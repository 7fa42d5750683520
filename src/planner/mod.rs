// Copyright (c) 2025 - Cowboy AI, Inc.
//! Spoke Attachment Planning
//!
//! Pure planning functions: immutable inputs in, a plan out. There is no
//! I/O, shared state or retry here; every error propagates to the caller.
//!
//! ```text
//! SpokeAttachmentRequest ─┐
//! NetworkInstanceHandle ──┼─> AttachmentPlanner ──> AttachmentPlan
//! HubSet / ConnectorTable ┘         │
//!                                   └─> CrossRegionRouteResolver
//!
//! (vpc, zone, hub account) ──> plan_zone_attachment ──> ZoneAttachmentPlan
//! ```

pub mod attachment;
pub mod cross_region;
pub mod request;
pub mod zone;

#[cfg(test)]
pub(crate) mod test_support;

pub use attachment::AttachmentPlanner;
pub use cross_region::CrossRegionRouteResolver;
pub use request::{SpokeAttachmentRequest, SpokeAttachmentRequestBuilder, SpokeRouting};
pub use zone::plan_zone_attachment;

use thiserror::Error;

use crate::domain::{AccountRole, NetworkTier, Region};
use crate::topology::TopologyError;

/// Planning errors
///
/// Configuration errors and topology inconsistencies. Nothing is
/// recovered locally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// Request builder was not given a required field
    #[error("Spoke attachment request is missing {field}")]
    MissingField { field: &'static str },

    /// Tools spoke without its tier transit route tables
    #[error("Tools spokes require {field}")]
    MissingToolsRouteTable { field: &'static str },

    /// Tools-only configuration on another role
    #[error("{field} is only valid for tools spokes, not {role}")]
    UnexpectedToolsRouteTable {
        role: AccountRole,
        field: &'static str,
    },

    #[error("Hub account {spoke} cannot be attached as a spoke")]
    HubAsSpoke { spoke: String },

    #[error("Spoke {spoke} has no subnets to attach")]
    NoSubnets { spoke: String },

    #[error("Spoke {spoke} is not a tools spoke and attaches to a single tier")]
    NotAToolsSpoke { spoke: String },

    #[error("No peering connector mapped for spokes in {spoke_region} routed from {route_region}")]
    UnmappedConnector {
        spoke_region: Region,
        route_region: Region,
    },

    #[error("Connector table is missing directed pairs: {missing:?}")]
    IncompleteConnectorTable { missing: Vec<String> },

    #[error("Connector table maps {region} to itself")]
    ReflexiveConnector { region: Region },

    #[error("Connector {connector} is used in both directions between {first} and {second}")]
    UndirectedConnector {
        first: Region,
        second: Region,
        connector: String,
    },

    /// A region is absent from the hub triangle
    #[error("Hub network for {region} ({tier}) is not part of the hub triangle")]
    MissingHub { region: Region, tier: NetworkTier },

    #[error("Hub network for {region} ({tier}) was supplied more than once")]
    DuplicateHub { region: Region, tier: NetworkTier },

    #[error("Hub in {region} belongs to {actual}, expected {expected}")]
    TierMismatch {
        region: Region,
        expected: NetworkTier,
        actual: NetworkTier,
    },

    #[error("Request targets the {expected_tier} hub in {expected_region} but was given the {actual_tier} hub in {actual_region}")]
    HubMismatch {
        expected_region: Region,
        expected_tier: NetworkTier,
        actual_region: Region,
        actual_tier: NetworkTier,
    },

    #[error("Invalid hub state: {0}")]
    InvalidHubState(String),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Result type for planning operations
pub type PlanningResult<T> = Result<T, PlanningError>;
