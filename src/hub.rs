// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hub Network Instances
//!
//! A [`NetworkInstanceHandle`] is the already-resolved state of one tier's
//! hub in one region. Resolving it (remote state, parameter store, ...) is
//! the job of a [`NetworkInstanceResolver`]; planners receive handles and
//! never reach for them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::{ConnectorId, NetworkTier, Region, RouteTableId, TransitGatewayId};
use crate::planner::PlanningError;

/// Resolved hub network state for one (region, tier)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInstanceHandle {
    pub region: Region,
    pub tier: NetworkTier,
    pub transit_gateway_id: TransitGatewayId,
    /// Route table consulted for traffic leaving a spoke towards inspection
    pub spoke_traffic_route_table_id: RouteTableId,
    /// Route table consulted after inspection, used to reach spokes
    pub post_inspection_route_table_id: RouteTableId,
    /// Peering attachment this hub uses to reach each other region
    #[serde(default)]
    pub peering_connectors: BTreeMap<Region, ConnectorId>,
}

impl NetworkInstanceHandle {
    /// Connector this hub's transit gateway uses to reach `region`
    pub fn peering_connector(&self, region: Region) -> Option<&ConnectorId> {
        self.peering_connectors.get(&region)
    }
}

/// Lookup of hub network state keyed by (region, tier)
pub trait NetworkInstanceResolver {
    /// Resolve the hub of `tier` in `region`
    fn resolve(
        &self,
        region: Region,
        tier: NetworkTier,
    ) -> Result<NetworkInstanceHandle, PlanningError>;
}

/// In-memory resolver over a fixed set of handles
#[derive(Debug, Clone, Default)]
pub struct StaticNetworkInstanceResolver {
    handles: BTreeMap<(Region, NetworkTier), NetworkInstanceHandle>,
}

impl StaticNetworkInstanceResolver {
    /// Build from handles, rejecting two handles for the same hub
    pub fn from_handles(
        handles: impl IntoIterator<Item = NetworkInstanceHandle>,
    ) -> Result<Self, PlanningError> {
        let mut by_key = BTreeMap::new();
        for handle in handles {
            let key = (handle.region, handle.tier);
            if by_key.insert(key, handle).is_some() {
                return Err(PlanningError::DuplicateHub {
                    region: key.0,
                    tier: key.1,
                });
            }
        }
        Ok(Self { handles: by_key })
    }

    /// Parse a JSON array of handles
    pub fn from_json(json: &str) -> Result<Self, PlanningError> {
        let handles: Vec<NetworkInstanceHandle> = serde_json::from_str(json)
            .map_err(|e| PlanningError::InvalidHubState(e.to_string()))?;
        Self::from_handles(handles)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl NetworkInstanceResolver for StaticNetworkInstanceResolver {
    fn resolve(
        &self,
        region: Region,
        tier: NetworkTier,
    ) -> Result<NetworkInstanceHandle, PlanningError> {
        self.handles
            .get(&(region, tier))
            .cloned()
            .ok_or(PlanningError::MissingHub { region, tier })
    }
}

/// The three hubs of one tier
///
/// # Invariants
/// - One handle per region, keyed by its own region
/// - Every handle belongs to the same tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubSet {
    tier: NetworkTier,
    hubs: BTreeMap<Region, NetworkInstanceHandle>,
}

impl HubSet {
    pub fn new(
        tier: NetworkTier,
        handles: impl IntoIterator<Item = NetworkInstanceHandle>,
    ) -> Result<Self, PlanningError> {
        let mut hubs = BTreeMap::new();
        for handle in handles {
            if handle.tier != tier {
                return Err(PlanningError::TierMismatch {
                    region: handle.region,
                    expected: tier,
                    actual: handle.tier,
                });
            }
            let region = handle.region;
            if hubs.insert(region, handle).is_some() {
                return Err(PlanningError::DuplicateHub { region, tier });
            }
        }

        for region in Region::ALL {
            if !hubs.contains_key(&region) {
                return Err(PlanningError::MissingHub { region, tier });
            }
        }

        Ok(Self { tier, hubs })
    }

    pub fn tier(&self) -> NetworkTier {
        self.tier
    }

    pub fn get(&self, region: Region) -> Result<&NetworkInstanceHandle, PlanningError> {
        self.hubs.get(&region).ok_or(PlanningError::MissingHub {
            region,
            tier: self.tier,
        })
    }

    pub fn as_map(&self) -> &BTreeMap<Region, NetworkInstanceHandle> {
        &self.hubs
    }
}

/// Resolve all three hubs of a tier
///
/// Fails if any corner of the triangle cannot be resolved, since
/// cross-region reachability cannot be guaranteed without it.
pub fn resolve_hub_set<R>(resolver: &R, tier: NetworkTier) -> Result<HubSet, PlanningError>
where
    R: NetworkInstanceResolver + ?Sized,
{
    let handles = Region::ALL
        .iter()
        .map(|region| resolver.resolve(*region, tier))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Resolved {} hub triangle", tier);
    HubSet::new(tier, handles)
}
