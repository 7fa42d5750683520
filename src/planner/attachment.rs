// Copyright (c) 2025 - Cowboy AI, Inc.
//! Spoke Attachment Planner
//!
//! Turns a [`SpokeAttachmentRequest`] into the full set of operations that
//! give a spoke bidirectional reachability through one tier's inspected hub:
//!
//! 1. VPC attachment of the spoke's subnets to the local transit gateway
//! 2. Default route(s), chosen by the role/tier decision table
//! 3. Hub ingress return routes (tools spokes only)
//! 4. Association with the hub's spoke-traffic table (spoke -> inspection)
//! 5. Propagation into the hub's post-inspection table (inspection -> spoke)
//! 6. Return routes from the Tools account in every region (tenant spokes,
//!    minus policy exemptions)
//! 7. Forward routes in the two foreign regions
//!
//! # Default Route Decision Table
//!
//! | Role          | Tier    | Route tables                          |
//! |---------------|---------|---------------------------------------|
//! | ToolsSpoke    | NonProd | tools non-prod transit                |
//! | ToolsSpoke    | Prod    | tools prod transit **and** private    |
//! | OrdinarySpoke | any     | private                               |
//!
//! Keys always carry the tier, so attaching the same spoke to both tiers
//! never collides.

use std::collections::BTreeMap;
use tracing::{debug, info};

use super::{CrossRegionRouteResolver, PlanningError, PlanningResult, SpokeAttachmentRequest, SpokeRouting};
use crate::connectors::ConnectorTable;
use crate::domain::{Ipv4Cidr, NetworkTier, Region, RouteTableId, SpokeIdentity};
use crate::hub::{HubSet, NetworkInstanceHandle};
use crate::plan::{
    AttachmentPlan, RouteOp, RoutePurpose, RouteTarget, TgwAssociation, TgwPropagation,
    VpcAttachment,
};
use crate::topology::TopologyModel;

/// Plans spoke attachments against an injected topology and connector table
#[derive(Debug, Clone, Copy)]
pub struct AttachmentPlanner<'a> {
    topology: &'a TopologyModel,
    connectors: &'a ConnectorTable,
}

impl<'a> AttachmentPlanner<'a> {
    pub fn new(topology: &'a TopologyModel, connectors: &'a ConnectorTable) -> Self {
        Self {
            topology,
            connectors,
        }
    }

    /// Plan the attachment of one spoke to one tier's hub
    ///
    /// `hub` is the local hub of the request's region and tier.
    /// `cross_region_hubs` must hold the other two regions' hubs of the same
    /// tier; a local entry is allowed and ignored in favour of `hub`.
    pub fn plan(
        &self,
        request: &SpokeAttachmentRequest,
        hub: &NetworkInstanceHandle,
        cross_region_hubs: &BTreeMap<Region, NetworkInstanceHandle>,
    ) -> PlanningResult<AttachmentPlan> {
        if hub.region != request.region() || hub.tier != request.tier() {
            return Err(PlanningError::HubMismatch {
                expected_region: request.region(),
                expected_tier: request.tier(),
                actual_region: hub.region,
                actual_tier: hub.tier,
            });
        }

        let spoke = request.identity();
        debug!("Planning attachment for {} ({})", spoke, request.account_role());

        let attachment_key = spoke.key(&["tgw-attachment"]);
        let vpc_attachment = VpcAttachment {
            resource_key: attachment_key.clone(),
            region: spoke.region,
            transit_gateway_id: hub.transit_gateway_id.clone(),
            vpc_id: request.vpc_id().clone(),
            subnet_ids: request.subnet_ids().to_vec(),
        };

        let mut route_ops = default_routes(request, &spoke, hub);

        if matches!(request.routing(), SpokeRouting::Tools { .. }) {
            route_ops.extend(self.hub_ingress_routes(request, &spoke, hub)?);
        }

        let tgw_association = TgwAssociation {
            resource_key: spoke.key(&["tgw-association"]),
            region: spoke.region,
            attachment: attachment_key.clone(),
            route_table_id: hub.spoke_traffic_route_table_id.clone(),
        };

        let tgw_propagation = TgwPropagation {
            resource_key: spoke.key(&["tgw-propagation"]),
            region: spoke.region,
            attachment: attachment_key,
            route_table_id: hub.post_inspection_route_table_id.clone(),
        };

        if self.needs_tools_return_routes(request) {
            route_ops.extend(self.tools_return_routes(request, &spoke, hub, cross_region_hubs)?);
        }

        let cross_region_route_ops = CrossRegionRouteResolver::new(self.connectors).resolve(
            &spoke,
            request.cidr(),
            cross_region_hubs,
        )?;

        let plan = AttachmentPlan {
            spoke,
            account_role: request.account_role(),
            vpc_attachment,
            tgw_association,
            tgw_propagation,
            route_ops,
            cross_region_route_ops,
        };

        debug!("Planned {}", plan.summary());
        Ok(plan)
    }

    /// Plan against a resolved hub triangle
    pub fn plan_with_hubs(
        &self,
        request: &SpokeAttachmentRequest,
        hubs: &HubSet,
    ) -> PlanningResult<AttachmentPlan> {
        if hubs.tier() != request.tier() {
            return Err(PlanningError::TierMismatch {
                region: request.region(),
                expected: request.tier(),
                actual: hubs.tier(),
            });
        }
        self.plan(request, hubs.get(request.region())?, hubs.as_map())
    }

    /// Six return routes: gateway and inspection ranges of every region
    fn hub_ingress_routes(
        &self,
        request: &SpokeAttachmentRequest,
        spoke: &SpokeIdentity,
        hub: &NetworkInstanceHandle,
    ) -> PlanningResult<Vec<RouteOp>> {
        let mut routes = Vec::with_capacity(6);
        for region in Region::ALL {
            let ingress = self.topology.hub_ingress(spoke.tier, region)?;
            let ranges: [(&str, Ipv4Cidr); 2] =
                [("gateway", ingress.gateway), ("inspection", ingress.inspection)];

            for (label, cidr) in ranges {
                routes.push(RouteOp {
                    resource_key: spoke.key(&["hub-ingress", region.as_str(), label]),
                    purpose: RoutePurpose::HubIngress,
                    region: spoke.region,
                    destination_cidr: cidr,
                    route_table_id: request.private_route_table_id().clone(),
                    target: RouteTarget::TransitGateway(hub.transit_gateway_id.clone()),
                });
            }
        }
        Ok(routes)
    }

    fn needs_tools_return_routes(&self, request: &SpokeAttachmentRequest) -> bool {
        match request.routing() {
            SpokeRouting::Tools { .. } => false,
            SpokeRouting::Ordinary => {
                if self.topology.policy().is_return_route_exempt(request.spoke()) {
                    info!(
                        "Spoke {} is exempt from Tools return routes by policy",
                        request.spoke()
                    );
                    false
                } else {
                    true
                }
            }
        }
    }

    /// One route per region in the Tools account back to the spoke
    fn tools_return_routes(
        &self,
        request: &SpokeAttachmentRequest,
        spoke: &SpokeIdentity,
        hub: &NetworkInstanceHandle,
        cross_region_hubs: &BTreeMap<Region, NetworkInstanceHandle>,
    ) -> PlanningResult<Vec<RouteOp>> {
        Region::ALL
            .into_iter()
            .map(|region| {
                let route_hub = if region == spoke.region {
                    hub
                } else {
                    regional_hub(cross_region_hubs, region, spoke.tier)?
                };

                Ok(RouteOp {
                    resource_key: spoke.key(&["tools-return", region.as_str()]),
                    purpose: RoutePurpose::ToolsReturn,
                    region,
                    destination_cidr: request.cidr(),
                    route_table_id: self.topology.tools_return_route_table(region)?.clone(),
                    target: RouteTarget::TransitGateway(route_hub.transit_gateway_id.clone()),
                })
            })
            .collect()
    }
}

fn regional_hub(
    hubs: &BTreeMap<Region, NetworkInstanceHandle>,
    region: Region,
    tier: NetworkTier,
) -> PlanningResult<&NetworkInstanceHandle> {
    let hub = hubs
        .get(&region)
        .ok_or(PlanningError::MissingHub { region, tier })?;
    if hub.tier != tier {
        return Err(PlanningError::TierMismatch {
            region,
            expected: tier,
            actual: hub.tier,
        });
    }
    Ok(hub)
}

/// Route tables receiving a default route, with the key slot of each
fn default_route_tables(request: &SpokeAttachmentRequest) -> Vec<(&'static str, &RouteTableId)> {
    let private = ("private", request.private_route_table_id());

    match (request.routing(), request.tier()) {
        (
            SpokeRouting::Tools {
                non_prod_transit_route_table_id,
                ..
            },
            NetworkTier::NonProd,
        ) => vec![("tools-transit", non_prod_transit_route_table_id)],
        (
            SpokeRouting::Tools {
                prod_transit_route_table_id,
                ..
            },
            NetworkTier::Prod,
        ) => vec![("tools-transit", prod_transit_route_table_id), private],
        (SpokeRouting::Ordinary, _) => vec![private],
    }
}

fn default_routes(
    request: &SpokeAttachmentRequest,
    spoke: &SpokeIdentity,
    hub: &NetworkInstanceHandle,
) -> Vec<RouteOp> {
    default_route_tables(request)
        .into_iter()
        .map(|(slot, route_table_id)| RouteOp {
            resource_key: spoke.key(&["default-route", slot]),
            purpose: RoutePurpose::Default,
            region: spoke.region,
            destination_cidr: Ipv4Cidr::DEFAULT_ROUTE,
            route_table_id: route_table_id.clone(),
            target: RouteTarget::TransitGateway(hub.transit_gateway_id.clone()),
        })
        .collect()
}
