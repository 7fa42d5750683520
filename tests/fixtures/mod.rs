// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for transit-hub-planner
//!
//! Provides a deterministic hub estate: a topology snapshot and the six
//! resolved hub handles, both loaded from the JSON files next to this
//! module so the same data exercises the loaders.
//!
//! # Design Principles
//! - All ids are fixed strings derived from (tier, region)
//! - Fixtures are the ONLY place that builds topology and hub state
//! - Requests are built from the registry, not by hand
#![allow(dead_code)]

use transit_hub_planner::domain::{NetworkTier, Region, RouteTableId, SubnetId, VpcId};
use transit_hub_planner::{
    ConnectorTable, HubPlanningService, HubSet, SpokeAttachmentRequest,
    StaticNetworkInstanceResolver, TopologyModel,
};

pub const TOPOLOGY_JSON: &str = include_str!("topology.json");
pub const HUBS_JSON: &str = include_str!("hubs.json");

pub const TOOLS_NON_PROD_TRANSIT_RTB: &str = "rtb-tools-transit-nonprod";
pub const TOOLS_PROD_TRANSIT_RTB: &str = "rtb-tools-transit-prod";

pub fn topology() -> TopologyModel {
    TopologyModel::from_json(TOPOLOGY_JSON).expect("Invalid topology fixture")
}

pub fn resolver() -> StaticNetworkInstanceResolver {
    StaticNetworkInstanceResolver::from_json(HUBS_JSON).expect("Invalid hub fixture")
}

pub fn hub_set(tier: NetworkTier) -> HubSet {
    transit_hub_planner::resolve_hub_set(&resolver(), tier).expect("Incomplete hub fixture")
}

pub fn connector_table(tier: NetworkTier) -> ConnectorTable {
    ConnectorTable::from_hubs(&hub_set(tier)).expect("Invalid connector fixture")
}

pub fn service() -> HubPlanningService<StaticNetworkInstanceResolver> {
    HubPlanningService::new(topology(), resolver())
}

pub fn vpc_id(name: &str, region: Region) -> VpcId {
    VpcId::new(format!("vpc-{name}-{region}")).expect("Invalid VPC id")
}

/// Request for a registered account, with ids derived from its name
pub fn request(name: &str, region: Region, tier: NetworkTier) -> SpokeAttachmentRequest {
    let topology = topology();
    let account = topology.account(name).expect("Unknown fixture account");

    let mut builder = SpokeAttachmentRequest::builder()
        .from_account(account, region)
        .expect("Account has no VPC in region")
        .tier(tier)
        .vpc_id(vpc_id(name, region))
        .subnet_id(SubnetId::new(format!("subnet-{name}-{region}-a")).expect("Invalid subnet id"))
        .subnet_id(SubnetId::new(format!("subnet-{name}-{region}-b")).expect("Invalid subnet id"))
        .private_route_table_id(
            RouteTableId::new(format!("rtb-{name}-{region}-private-{tier}"))
                .expect("Invalid route table id"),
        );

    if name == "tools" {
        builder = builder
            .tools_non_prod_transit_route_table_id(
                RouteTableId::new(TOOLS_NON_PROD_TRANSIT_RTB).expect("Invalid route table id"),
            )
            .tools_prod_transit_route_table_id(
                RouteTableId::new(TOOLS_PROD_TRANSIT_RTB).expect("Invalid route table id"),
            );
    }

    builder.build().expect("Invalid fixture request")
}
