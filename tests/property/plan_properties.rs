// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Attachment Planning
//!
//! Spokes are drawn from the fixture registry; CIDRs and identifiers for
//! the pure resolvers are generated.

use proptest::prelude::*;
use std::collections::HashSet;
use std::net::Ipv4Addr;

use crate::fixtures::*;
use transit_hub_planner::domain::invariants::{expected_default_routes, validate_zone_plan};
use transit_hub_planner::domain::{
    AccountRole, HostedZoneId, Ipv4Cidr, NetworkTier, Region, SpokeIdentity, SpokeName, VpcId,
};
use transit_hub_planner::plan::{AccountRef, ZoneOperation};
use transit_hub_planner::{
    plan_zone_attachment, CrossRegionRouteResolver, RoutePurpose, RouteTarget,
    SpokePlanningService,
};

// ============================================================================
// Strategies
// ============================================================================

fn region() -> impl Strategy<Value = Region> {
    prop::sample::select(Region::ALL.to_vec())
}

fn tier() -> impl Strategy<Value = NetworkTier> {
    prop::sample::select(NetworkTier::ALL.to_vec())
}

/// A registered spoke together with a region it has a VPC in
fn placed_spoke() -> impl Strategy<Value = (String, Region)> {
    let topology = topology();
    let placements: Vec<(String, Region)> = topology
        .accounts()
        .filter(|account| account.role.is_spoke())
        .flat_map(|account| {
            account
                .cidrs
                .keys()
                .map(|region| (account.name.to_string(), *region))
                .collect::<Vec<_>>()
        })
        .collect();
    prop::sample::select(placements)
}

fn cidr() -> impl Strategy<Value = Ipv4Cidr> {
    (any::<u32>(), 8u8..=28).prop_map(|(address, prefix)| {
        Ipv4Cidr::from_parts(Ipv4Addr::from(address), prefix).expect("prefix in range")
    })
}

// ============================================================================
// Attachment Plans
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: planning the same request twice yields identical keys
    #[test]
    fn prop_planning_is_deterministic((name, region) in placed_spoke(), tier in tier()) {
        let service = service();
        let request = request(&name, region, tier);

        let first = service.plan_attachment(&request).expect("plan");
        let second = service.plan_attachment(&request).expect("plan");

        prop_assert_eq!(first.resource_keys(), second.resource_keys());
        prop_assert_eq!(first, second);
    }

    /// Property: keys never collide within a plan
    #[test]
    fn prop_resource_keys_unique((name, region) in placed_spoke(), tier in tier()) {
        let plan = service().plan_attachment(&request(&name, region, tier)).expect("plan");

        let keys = plan.resource_keys();
        let unique: HashSet<_> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len());
    }

    /// Property: one default route, two for a tools spoke on prod
    #[test]
    fn prop_default_route_exclusivity((name, region) in placed_spoke(), tier in tier()) {
        let plan = service().plan_attachment(&request(&name, region, tier)).expect("plan");

        let expected = expected_default_routes(plan.account_role, tier);
        prop_assert_eq!(plan.default_routes().count(), expected);
        prop_assert!(plan.default_routes().all(|route| route.purpose == RoutePurpose::Default));
    }

    /// Property: cross-region routes cover both foreign regions and never the local one
    #[test]
    fn prop_cross_region_routes_foreign_only((name, region) in placed_spoke(), tier in tier()) {
        let plan = service().plan_attachment(&request(&name, region, tier)).expect("plan");

        let regions: Vec<Region> = plan.cross_region_route_ops.iter().map(|route| route.region).collect();
        prop_assert_eq!(regions, region.others().to_vec());
    }

    /// Property: exempt spokes get no Tools return routes, other tenants get one per region
    #[test]
    fn prop_tools_return_linkage((name, region) in placed_spoke(), tier in tier()) {
        let topology = topology();
        let plan = service().plan_attachment(&request(&name, region, tier)).expect("plan");
        let returns: Vec<Region> = plan
            .routes_with_purpose(RoutePurpose::ToolsReturn)
            .map(|route| route.region)
            .collect();

        let spoke = SpokeName::new(name.as_str()).expect("spoke name");
        let tenant = plan.account_role == AccountRole::OrdinarySpoke;
        if tenant && !topology.policy().is_return_route_exempt(&spoke) {
            prop_assert_eq!(returns, Region::ALL.to_vec());
        } else {
            prop_assert!(returns.is_empty());
        }
    }
}

// ============================================================================
// Cross-Region Resolution
// ============================================================================

proptest! {
    /// Property: exactly two routes, into foreign post-inspection tables
    #[test]
    fn prop_resolver_completeness(local in region(), tier in tier(), spoke_cidr in cidr()) {
        let hubs = hub_set(tier);
        let connectors = connector_table(tier);
        let spoke = SpokeIdentity::new(SpokeName::new("generated").expect("spoke name"), local, tier);

        let routes = CrossRegionRouteResolver::new(&connectors)
            .resolve(&spoke, spoke_cidr, hubs.as_map())
            .expect("routes");

        prop_assert_eq!(routes.len(), 2);
        for route in &routes {
            prop_assert_ne!(route.region, local);
            prop_assert_eq!(route.destination_cidr, spoke_cidr);
            prop_assert_eq!(
                &route.route_table_id,
                &hubs.get(route.region).expect("hub").post_inspection_route_table_id
            );
            let expected = RouteTarget::PeeringConnector(
                connectors.get(local, route.region).expect("connector").clone(),
            );
            prop_assert_eq!(&route.target, &expected);
        }
    }

    /// Property: the two directions of an edge use different connectors
    #[test]
    fn prop_connector_directionality(a in region(), b in region(), tier in tier()) {
        prop_assume!(a != b);
        let connectors = connector_table(tier);

        prop_assert_ne!(
            connectors.get(a, b).expect("connector"),
            connectors.get(b, a).expect("connector")
        );
    }
}

// ============================================================================
// Zone Attachment
// ============================================================================

proptest! {
    /// Property: authorization always precedes a dependent association
    #[test]
    fn prop_zone_authorization_first(zone in "Z[A-Z0-9]{6,20}", vpc in "vpc-[0-9a-f]{8,17}") {
        let zone_id = HostedZoneId::new(zone).expect("zone id");
        let vpc_id = VpcId::new(vpc).expect("vpc id");
        let owner: AccountRef = topology().hub_account().expect("hub").as_account_ref();

        let plan = plan_zone_attachment(&vpc_id, &zone_id, &owner);

        match plan.operations() {
            [ZoneOperation::Authorize(authorization), ZoneOperation::Associate(association)] => {
                prop_assert_eq!(&association.depends_on, &authorization.resource_key);
            }
            other => prop_assert!(false, "unexpected order: {:?}", other),
        }
        prop_assert!(validate_zone_plan(&plan).is_ok());
    }
}
