// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hub Planning Service
//!
//! Each service method is one planning pass:
//! 1. Resolve the hub triangle of the request's tier
//! 2. Derive the directed connector table from the hubs
//! 3. Plan (pure function)
//! 4. Check plan invariants
//!
//! If any step fails, nothing is returned.

use tracing::{debug, info};

use crate::connectors::ConnectorTable;
use crate::domain::invariants::{validate_attachment_plan, validate_unique_keys, validate_zone_plan};
use crate::domain::{HostedZoneId, NetworkTier, VpcId};
use crate::errors::PlannerResult;
use crate::hub::{resolve_hub_set, NetworkInstanceResolver};
use crate::plan::{AttachmentPlan, DualTierPlan, ZoneAttachmentPlan};
use crate::planner::{self, AttachmentPlanner, PlanningError, SpokeAttachmentRequest, SpokeRouting};
use crate::topology::TopologyModel;

/// Planning operations offered to callers
pub trait SpokePlanningService {
    /// Plan one spoke against its tier's hub
    fn plan_attachment(&self, request: &SpokeAttachmentRequest) -> PlannerResult<AttachmentPlan>;

    /// Plan a tools spoke against both tiers
    ///
    /// # Errors
    /// - `NotAToolsSpoke` for any other role
    fn plan_tools_dual_tier(&self, request: &SpokeAttachmentRequest) -> PlannerResult<DualTierPlan>;

    /// Share a hub-owned private hosted zone with a spoke VPC
    fn plan_zone_attachment(
        &self,
        spoke_vpc_id: &VpcId,
        zone_id: &HostedZoneId,
    ) -> PlannerResult<ZoneAttachmentPlan>;
}

/// Planning service over a topology and a hub resolver
#[derive(Debug, Clone)]
pub struct HubPlanningService<R> {
    topology: TopologyModel,
    resolver: R,
}

impl<R: NetworkInstanceResolver> HubPlanningService<R> {
    pub fn new(topology: TopologyModel, resolver: R) -> Self {
        Self { topology, resolver }
    }

    pub fn topology(&self) -> &TopologyModel {
        &self.topology
    }

    fn plan_for_tier(
        &self,
        request: &SpokeAttachmentRequest,
        tier: NetworkTier,
    ) -> PlannerResult<AttachmentPlan> {
        let request = request.with_tier(tier);
        let hubs = resolve_hub_set(&self.resolver, tier)?;
        let connectors = ConnectorTable::from_hubs(&hubs)?;

        let plan = AttachmentPlanner::new(&self.topology, &connectors).plan_with_hubs(&request, &hubs)?;
        validate_attachment_plan(&plan)?;
        Ok(plan)
    }
}

impl<R: NetworkInstanceResolver> SpokePlanningService for HubPlanningService<R> {
    fn plan_attachment(&self, request: &SpokeAttachmentRequest) -> PlannerResult<AttachmentPlan> {
        let plan = self.plan_for_tier(request, request.tier())?;
        info!("Planned attachment {}", plan.summary());
        Ok(plan)
    }

    fn plan_tools_dual_tier(&self, request: &SpokeAttachmentRequest) -> PlannerResult<DualTierPlan> {
        if !matches!(request.routing(), SpokeRouting::Tools { .. }) {
            return Err(PlanningError::NotAToolsSpoke {
                spoke: request.spoke().to_string(),
            }
            .into());
        }

        let plan = DualTierPlan {
            prod: self.plan_for_tier(request, NetworkTier::Prod)?,
            non_prod: self.plan_for_tier(request, NetworkTier::NonProd)?,
        };
        validate_unique_keys(plan.resource_keys())?;

        info!(
            "Planned dual-tier attachment for {}: {} / {}",
            request.spoke(),
            plan.prod.summary(),
            plan.non_prod.summary()
        );
        Ok(plan)
    }

    fn plan_zone_attachment(
        &self,
        spoke_vpc_id: &VpcId,
        zone_id: &HostedZoneId,
    ) -> PlannerResult<ZoneAttachmentPlan> {
        let owner = self.topology.hub_account()?.as_account_ref();
        let plan = planner::plan_zone_attachment(spoke_vpc_id, zone_id, &owner);
        validate_zone_plan(&plan)?;

        debug!("Planned zone attachment {}", plan.association.resource_key);
        Ok(plan)
    }
}
