// Copyright (c) 2025 - Cowboy AI, Inc.
//! Plans Handed to the Resource Emitter
//!
//! Plans are plain data: the planner computes them, the external emitter
//! turns them into resources. Nothing here performs I/O.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{
    AccountId, AccountRole, ConnectorId, HostedZoneId, Ipv4Cidr, NetworkTier, Region,
    ResourceKey, RouteTableId, SpokeIdentity, SubnetId, TransitGatewayId, VpcId,
};

/// Why a route exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePurpose {
    /// `0.0.0.0/0` from the spoke into the hub
    Default,
    /// Return path from a hub gateway or inspection range to a tools spoke
    HubIngress,
    /// Route in the Tools account back to a tenant spoke
    ToolsReturn,
    /// Route in a foreign region's post-inspection table back to the spoke
    CrossRegion,
}

/// Next hop of a route
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RouteTarget {
    TransitGateway(TransitGatewayId),
    PeeringConnector(ConnectorId),
}

impl RouteTarget {
    /// The raw id of the next hop
    pub fn id(&self) -> &str {
        match self {
            Self::TransitGateway(id) => id.as_str(),
            Self::PeeringConnector(id) => id.as_str(),
        }
    }
}

/// A single route entry to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOp {
    pub resource_key: ResourceKey,
    pub purpose: RoutePurpose,
    /// Region the route table lives in
    pub region: Region,
    pub destination_cidr: Ipv4Cidr,
    pub route_table_id: RouteTableId,
    pub target: RouteTarget,
}

impl RouteOp {
    pub fn is_default_route(&self) -> bool {
        self.destination_cidr.is_default_route()
    }
}

/// Transit gateway VPC attachment for the spoke's subnets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcAttachment {
    pub resource_key: ResourceKey,
    pub region: Region,
    pub transit_gateway_id: TransitGatewayId,
    pub vpc_id: VpcId,
    pub subnet_ids: Vec<SubnetId>,
}

/// Association of the attachment with a transit gateway route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TgwAssociation {
    pub resource_key: ResourceKey,
    pub region: Region,
    /// Key of the [`VpcAttachment`] being associated
    pub attachment: ResourceKey,
    pub route_table_id: RouteTableId,
}

/// Propagation of the attachment's CIDR into a transit gateway route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TgwPropagation {
    pub resource_key: ResourceKey,
    pub region: Region,
    /// Key of the [`VpcAttachment`] being propagated
    pub attachment: ResourceKey,
    pub route_table_id: RouteTableId,
}

/// Everything needed to wire one spoke into one tier's hub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPlan {
    pub spoke: SpokeIdentity,
    pub account_role: AccountRole,
    pub vpc_attachment: VpcAttachment,
    pub tgw_association: TgwAssociation,
    pub tgw_propagation: TgwPropagation,
    /// Default, hub ingress and tools return routes
    pub route_ops: Vec<RouteOp>,
    /// Forward routes installed in the two foreign regions
    pub cross_region_route_ops: Vec<RouteOp>,
}

impl AttachmentPlan {
    /// All route operations, local first then cross-region
    pub fn all_routes(&self) -> impl Iterator<Item = &RouteOp> {
        self.route_ops.iter().chain(self.cross_region_route_ops.iter())
    }

    /// Every resource key in emission order
    pub fn resource_keys(&self) -> Vec<&ResourceKey> {
        let mut keys = vec![
            &self.vpc_attachment.resource_key,
            &self.tgw_association.resource_key,
            &self.tgw_propagation.resource_key,
        ];
        keys.extend(self.all_routes().map(|route| &route.resource_key));
        keys
    }

    pub fn default_routes(&self) -> impl Iterator<Item = &RouteOp> {
        self.all_routes().filter(|route| route.is_default_route())
    }

    pub fn routes_with_purpose(&self, purpose: RoutePurpose) -> impl Iterator<Item = &RouteOp> {
        self.all_routes().filter(move |route| route.purpose == purpose)
    }

    /// Counts for logging
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            spoke: self.spoke.clone(),
            account_role: self.account_role,
            route_ops: self.route_ops.len(),
            cross_region_route_ops: self.cross_region_route_ops.len(),
            default_routes: self.default_routes().count(),
        }
    }
}

/// Compact description of an [`AttachmentPlan`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub spoke: SpokeIdentity,
    pub account_role: AccountRole,
    pub route_ops: usize,
    pub cross_region_route_ops: usize,
    pub default_routes: usize,
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} local routes ({} default), {} cross-region routes",
            self.spoke,
            self.account_role,
            self.route_ops,
            self.default_routes,
            self.cross_region_route_ops
        )
    }
}

/// A tools spoke planned against both hub tiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualTierPlan {
    pub prod: AttachmentPlan,
    pub non_prod: AttachmentPlan,
}

impl DualTierPlan {
    pub fn plan_for(&self, tier: NetworkTier) -> &AttachmentPlan {
        match tier {
            NetworkTier::Prod => &self.prod,
            NetworkTier::NonProd => &self.non_prod,
        }
    }

    /// Union of both plans' keys, prod first
    pub fn resource_keys(&self) -> Vec<&ResourceKey> {
        let mut keys = self.prod.resource_keys();
        keys.extend(self.non_prod.resource_keys());
        keys
    }
}

/// Account that owns a shared resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountRef {
    pub name: String,
    pub account_id: AccountId,
}

impl AccountRef {
    pub fn new(name: impl Into<String>, account_id: AccountId) -> Self {
        Self {
            name: name.into(),
            account_id,
        }
    }
}

/// Grant from the zone-owning account allowing a VPC to associate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAuthorization {
    pub resource_key: ResourceKey,
    /// Account the authorization must be created in
    pub owner: AccountRef,
    pub zone_id: HostedZoneId,
    pub vpc_id: VpcId,
}

/// Association of a spoke VPC with a private hosted zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAssociation {
    pub resource_key: ResourceKey,
    pub zone_id: HostedZoneId,
    pub vpc_id: VpcId,
    /// Must be applied after this resource
    pub depends_on: ResourceKey,
}

/// One step of a [`ZoneAttachmentPlan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneOperation<'a> {
    Authorize(&'a ZoneAuthorization),
    Associate(&'a ZoneAssociation),
}

impl<'a> ZoneOperation<'a> {
    pub fn resource_key(&self) -> &'a ResourceKey {
        match self {
            Self::Authorize(authorization) => &authorization.resource_key,
            Self::Associate(association) => &association.resource_key,
        }
    }
}

/// Authorize-then-associate sequence for a private hosted zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAttachmentPlan {
    pub authorization: ZoneAuthorization,
    pub association: ZoneAssociation,
}

impl ZoneAttachmentPlan {
    /// Operations in the order they must be applied
    pub fn operations(&self) -> [ZoneOperation<'_>; 2] {
        [
            ZoneOperation::Authorize(&self.authorization),
            ZoneOperation::Associate(&self.association),
        ]
    }
}
