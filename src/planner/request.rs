// Copyright (c) 2025 - Cowboy AI, Inc.
//! Spoke Attachment Requests
//!
//! The request carries role-specific routing as a tagged union, so a tools
//! spoke without its transit route tables (or an ordinary spoke with them)
//! cannot be represented. The builder is where misconfiguration is caught.

use serde::{Deserialize, Serialize};

use super::{PlanningError, PlanningResult};
use crate::domain::{
    AccountRole, Ipv4Cidr, NetworkTier, Region, RouteTableId, SpokeIdentity, SpokeName, SubnetId,
    VpcId,
};
use crate::topology::{Account, TopologyError};

/// Role-specific routing configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpokeRouting {
    /// Tools account with a dedicated transit route table per tier
    Tools {
        non_prod_transit_route_table_id: RouteTableId,
        prod_transit_route_table_id: RouteTableId,
    },
    /// Tenant spoke routed only through its private route table
    Ordinary,
}

impl SpokeRouting {
    pub fn account_role(&self) -> AccountRole {
        match self {
            Self::Tools { .. } => AccountRole::ToolsSpoke,
            Self::Ordinary => AccountRole::OrdinarySpoke,
        }
    }
}

/// A spoke to be wired into one tier's hub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "RawSpokeAttachmentRequest",
    into = "RawSpokeAttachmentRequest"
)]
pub struct SpokeAttachmentRequest {
    spoke: SpokeName,
    region: Region,
    tier: NetworkTier,
    cidr: Ipv4Cidr,
    vpc_id: VpcId,
    subnet_ids: Vec<SubnetId>,
    private_route_table_id: RouteTableId,
    routing: SpokeRouting,
}

impl SpokeAttachmentRequest {
    pub fn builder() -> SpokeAttachmentRequestBuilder {
        SpokeAttachmentRequestBuilder::default()
    }

    pub fn spoke(&self) -> &SpokeName {
        &self.spoke
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn tier(&self) -> NetworkTier {
        self.tier
    }

    pub fn cidr(&self) -> Ipv4Cidr {
        self.cidr
    }

    pub fn vpc_id(&self) -> &VpcId {
        &self.vpc_id
    }

    pub fn subnet_ids(&self) -> &[SubnetId] {
        &self.subnet_ids
    }

    pub fn private_route_table_id(&self) -> &RouteTableId {
        &self.private_route_table_id
    }

    pub fn routing(&self) -> &SpokeRouting {
        &self.routing
    }

    pub fn account_role(&self) -> AccountRole {
        self.routing.account_role()
    }

    /// Key prefix shared by every operation of this request
    pub fn identity(&self) -> SpokeIdentity {
        SpokeIdentity::new(self.spoke.clone(), self.region, self.tier)
    }

    /// The same spoke aimed at another tier's hub
    pub fn with_tier(&self, tier: NetworkTier) -> Self {
        Self {
            tier,
            ..self.clone()
        }
    }
}

/// Builder for [`SpokeAttachmentRequest`]
#[derive(Debug, Clone, Default)]
pub struct SpokeAttachmentRequestBuilder {
    spoke: Option<SpokeName>,
    account_role: Option<AccountRole>,
    region: Option<Region>,
    tier: Option<NetworkTier>,
    cidr: Option<Ipv4Cidr>,
    vpc_id: Option<VpcId>,
    subnet_ids: Vec<SubnetId>,
    private_route_table_id: Option<RouteTableId>,
    tools_non_prod_transit_route_table_id: Option<RouteTableId>,
    tools_prod_transit_route_table_id: Option<RouteTableId>,
}

impl SpokeAttachmentRequestBuilder {
    pub fn spoke(mut self, spoke: SpokeName) -> Self {
        self.spoke = Some(spoke);
        self
    }

    pub fn account_role(mut self, role: AccountRole) -> Self {
        self.account_role = Some(role);
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    pub fn tier(mut self, tier: NetworkTier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn cidr(mut self, cidr: Ipv4Cidr) -> Self {
        self.cidr = Some(cidr);
        self
    }

    pub fn vpc_id(mut self, vpc_id: VpcId) -> Self {
        self.vpc_id = Some(vpc_id);
        self
    }

    pub fn subnet_id(mut self, subnet_id: SubnetId) -> Self {
        self.subnet_ids.push(subnet_id);
        self
    }

    pub fn subnet_ids(mut self, subnet_ids: impl IntoIterator<Item = SubnetId>) -> Self {
        self.subnet_ids.extend(subnet_ids);
        self
    }

    pub fn private_route_table_id(mut self, id: RouteTableId) -> Self {
        self.private_route_table_id = Some(id);
        self
    }

    pub fn tools_non_prod_transit_route_table_id(mut self, id: RouteTableId) -> Self {
        self.tools_non_prod_transit_route_table_id = Some(id);
        self
    }

    pub fn tools_prod_transit_route_table_id(mut self, id: RouteTableId) -> Self {
        self.tools_prod_transit_route_table_id = Some(id);
        self
    }

    /// Take name, role and the regional CIDR from the account registry
    pub fn from_account(self, account: &Account, region: Region) -> PlanningResult<Self> {
        let cidr = account
            .cidr(region)
            .ok_or_else(|| TopologyError::NoRegionalPresence {
                account: account.name.to_string(),
                region,
            })?;

        Ok(self
            .spoke(account.name.clone())
            .account_role(account.role)
            .region(region)
            .cidr(cidr))
    }

    /// Validate and build the request
    ///
    /// # Failures
    /// - Any required field missing
    /// - Hub role
    /// - No subnets
    /// - Tools spoke without both transit route tables
    /// - Ordinary spoke with either transit route table
    pub fn build(self) -> PlanningResult<SpokeAttachmentRequest> {
        let spoke = self.spoke.ok_or(PlanningError::MissingField { field: "spoke" })?;
        let role = self
            .account_role
            .ok_or(PlanningError::MissingField { field: "account_role" })?;
        let region = self.region.ok_or(PlanningError::MissingField { field: "region" })?;
        let tier = self.tier.ok_or(PlanningError::MissingField { field: "tier" })?;
        let cidr = self.cidr.ok_or(PlanningError::MissingField { field: "cidr" })?;
        let vpc_id = self.vpc_id.ok_or(PlanningError::MissingField { field: "vpc_id" })?;
        let private_route_table_id = self.private_route_table_id.ok_or(
            PlanningError::MissingField {
                field: "private_route_table_id",
            },
        )?;

        if self.subnet_ids.is_empty() {
            return Err(PlanningError::NoSubnets {
                spoke: spoke.to_string(),
            });
        }

        let routing = match role {
            AccountRole::Hub => {
                return Err(PlanningError::HubAsSpoke {
                    spoke: spoke.to_string(),
                })
            }
            AccountRole::ToolsSpoke => SpokeRouting::Tools {
                non_prod_transit_route_table_id: self
                    .tools_non_prod_transit_route_table_id
                    .ok_or(PlanningError::MissingToolsRouteTable {
                        field: "tools_non_prod_transit_route_table_id",
                    })?,
                prod_transit_route_table_id: self.tools_prod_transit_route_table_id.ok_or(
                    PlanningError::MissingToolsRouteTable {
                        field: "tools_prod_transit_route_table_id",
                    },
                )?,
            },
            AccountRole::OrdinarySpoke => {
                if self.tools_non_prod_transit_route_table_id.is_some() {
                    return Err(PlanningError::UnexpectedToolsRouteTable {
                        role,
                        field: "tools_non_prod_transit_route_table_id",
                    });
                }
                if self.tools_prod_transit_route_table_id.is_some() {
                    return Err(PlanningError::UnexpectedToolsRouteTable {
                        role,
                        field: "tools_prod_transit_route_table_id",
                    });
                }
                SpokeRouting::Ordinary
            }
        };

        Ok(SpokeAttachmentRequest {
            spoke,
            region,
            tier,
            cidr,
            vpc_id,
            subnet_ids: self.subnet_ids,
            private_route_table_id,
            routing,
        })
    }
}

/// Flat wire shape of a request, as written by stack configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSpokeAttachmentRequest {
    pub spoke: SpokeName,
    pub account_role: AccountRole,
    pub region: Region,
    pub tier: NetworkTier,
    pub cidr: Ipv4Cidr,
    pub vpc_id: VpcId,
    pub subnet_ids: Vec<SubnetId>,
    pub private_route_table_id: RouteTableId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools_non_prod_transit_route_table_id: Option<RouteTableId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools_prod_transit_route_table_id: Option<RouteTableId>,
}

impl TryFrom<RawSpokeAttachmentRequest> for SpokeAttachmentRequest {
    type Error = PlanningError;

    fn try_from(raw: RawSpokeAttachmentRequest) -> Result<Self, Self::Error> {
        let mut builder = SpokeAttachmentRequest::builder()
            .spoke(raw.spoke)
            .account_role(raw.account_role)
            .region(raw.region)
            .tier(raw.tier)
            .cidr(raw.cidr)
            .vpc_id(raw.vpc_id)
            .subnet_ids(raw.subnet_ids)
            .private_route_table_id(raw.private_route_table_id);

        if let Some(id) = raw.tools_non_prod_transit_route_table_id {
            builder = builder.tools_non_prod_transit_route_table_id(id);
        }
        if let Some(id) = raw.tools_prod_transit_route_table_id {
            builder = builder.tools_prod_transit_route_table_id(id);
        }
        builder.build()
    }
}

impl From<SpokeAttachmentRequest> for RawSpokeAttachmentRequest {
    fn from(request: SpokeAttachmentRequest) -> Self {
        let account_role = request.account_role();
        let (tools_non_prod, tools_prod) = match request.routing {
            SpokeRouting::Tools {
                non_prod_transit_route_table_id,
                prod_transit_route_table_id,
            } => (
                Some(non_prod_transit_route_table_id),
                Some(prod_transit_route_table_id),
            ),
            SpokeRouting::Ordinary => (None, None),
        };

        Self {
            spoke: request.spoke,
            account_role,
            region: request.region,
            tier: request.tier,
            cidr: request.cidr,
            vpc_id: request.vpc_id,
            subnet_ids: request.subnet_ids,
            private_route_table_id: request.private_route_table_id,
            tools_non_prod_transit_route_table_id: tools_non_prod,
            tools_prod_transit_route_table_id: tools_prod,
        }
    }
}
