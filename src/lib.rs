// Copyright (c) 2025 - Cowboy AI, Inc.
//! Spoke attachment planning for a three-region inspected transit hub
//!
//! Given a spoke account, its region and the tier it joins, this crate
//! computes the attachment, association, propagation and route operations
//! that make the spoke reachable through centralized inspection from every
//! region of the hub triangle. Plans are pure data keyed by deterministic
//! resource keys; applying them is left to an external emitter.

pub mod connectors;
pub mod domain;
pub mod errors;
pub mod hub;
pub mod plan;
pub mod planner;
pub mod service;
pub mod topology;

// Re-export commonly used types
pub use connectors::{ConnectorEntry, ConnectorTable};
pub use errors::{PlannerError, PlannerResult};
pub use hub::{
    resolve_hub_set, HubSet, NetworkInstanceHandle, NetworkInstanceResolver,
    StaticNetworkInstanceResolver,
};
pub use plan::{AttachmentPlan, DualTierPlan, RouteOp, RoutePurpose, RouteTarget, ZoneAttachmentPlan};
pub use planner::{
    plan_zone_attachment, AttachmentPlanner, CrossRegionRouteResolver, PlanningError,
    PlanningResult, SpokeAttachmentRequest, SpokeRouting,
};
pub use service::{HubPlanningService, SpokePlanningService};
pub use topology::{TopologyError, TopologyModel};
