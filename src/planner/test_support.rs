// Copyright (c) 2025 - Cowboy AI, Inc.
//! Shared deterministic inputs for planner unit tests

use serde_json::json;
use std::collections::BTreeMap;

use crate::connectors::ConnectorTable;
use crate::domain::{
    ConnectorId, Ipv4Cidr, NetworkTier, Region, RouteTableId, SpokeName, SubnetId,
    TransitGatewayId, VpcId,
};
use crate::hub::{HubSet, NetworkInstanceHandle};
use crate::planner::{SpokeAttachmentRequest, SpokeAttachmentRequestBuilder};
use crate::topology::TopologyModel;

pub(crate) fn hub(region: Region, tier: NetworkTier) -> NetworkInstanceHandle {
    let id = format!("{tier}-{region}");
    let peering_connectors: BTreeMap<Region, ConnectorId> = region
        .others()
        .into_iter()
        .map(|other| {
            let connector = ConnectorId::new(format!("tgw-attach-{id}-to-{other}")).unwrap();
            (other, connector)
        })
        .collect();

    NetworkInstanceHandle {
        region,
        tier,
        transit_gateway_id: TransitGatewayId::new(format!("tgw-{id}")).unwrap(),
        spoke_traffic_route_table_id: RouteTableId::new(format!("tgw-rtb-{id}-spoke")).unwrap(),
        post_inspection_route_table_id: RouteTableId::new(format!("tgw-rtb-{id}-post")).unwrap(),
        peering_connectors,
    }
}

pub(crate) fn hub_set(tier: NetworkTier) -> HubSet {
    HubSet::new(tier, Region::ALL.map(|region| hub(region, tier))).unwrap()
}

pub(crate) fn connector_table(hubs: &HubSet) -> ConnectorTable {
    ConnectorTable::from_hubs(hubs).unwrap()
}

pub(crate) fn topology() -> TopologyModel {
    let ingress = |octet: u8| {
        json!({
            "legacy": { "gateway": format!("172.{octet}.0.0/24"), "inspection": format!("172.{octet}.1.0/24") },
            "primary": { "gateway": format!("172.{octet}.2.0/24"), "inspection": format!("172.{octet}.3.0/24") },
            "recovery": { "gateway": format!("172.{octet}.4.0/24"), "inspection": format!("172.{octet}.5.0/24") },
        })
    };
    let snapshot = json!({
        "region_names": { "legacy": "eu-west-1", "primary": "eu-west-2", "recovery": "eu-central-1" },
        "accounts": [
            { "name": "network-hub", "account_id": "000000000001", "role": "hub" },
            { "name": "tools", "account_id": "000000000002", "role": "tools_spoke",
              "cidrs": { "legacy": "10.0.0.0/16", "primary": "10.10.0.0/16", "recovery": "10.20.0.0/16" } },
            { "name": "payments", "account_id": "000000000003", "role": "ordinary_spoke",
              "cidrs": { "primary": "10.40.0.0/16", "recovery": "10.41.0.0/16" } },
            { "name": "platform-sandbox", "account_id": "000000000004", "role": "ordinary_spoke",
              "cidrs": { "primary": "10.90.0.0/16" } }
        ],
        "hub_ingress": { "prod": ingress(16), "nonprod": ingress(17) },
        "tools_return_route_tables": {
            "legacy": "rtb-tools-legacy", "primary": "rtb-tools-primary", "recovery": "rtb-tools-recovery"
        },
        "policy": { "return_route_exempt_spokes": ["platform-sandbox"] }
    });
    TopologyModel::from_json(&snapshot.to_string()).unwrap()
}

fn common(name: &str, region: Region, tier: NetworkTier) -> SpokeAttachmentRequestBuilder {
    let topology = topology();
    let account = topology.account(name).unwrap();
    SpokeAttachmentRequest::builder()
        .from_account(account, region)
        .unwrap()
        .tier(tier)
        .vpc_id(VpcId::new(format!("vpc-{name}-{region}")).unwrap())
        .subnet_ids([
            SubnetId::new(format!("subnet-{name}-a")).unwrap(),
            SubnetId::new(format!("subnet-{name}-b")).unwrap(),
        ])
        .private_route_table_id(RouteTableId::new(format!("rtb-{name}-private")).unwrap())
}

pub(crate) fn ordinary_request(name: &str, region: Region, tier: NetworkTier) -> SpokeAttachmentRequest {
    common(name, region, tier).build().unwrap()
}

pub(crate) fn tools_request(region: Region, tier: NetworkTier) -> SpokeAttachmentRequest {
    common("tools", region, tier)
        .tools_non_prod_transit_route_table_id(RouteTableId::new("rtb-tools-transit-nonprod").unwrap())
        .tools_prod_transit_route_table_id(RouteTableId::new("rtb-tools-transit-prod").unwrap())
        .build()
        .unwrap()
}

pub(crate) fn cidr(value: &str) -> Ipv4Cidr {
    Ipv4Cidr::new(value).unwrap()
}

pub(crate) fn spoke_name(value: &str) -> SpokeName {
    SpokeName::new(value).unwrap()
}
