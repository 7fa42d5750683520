// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cross-Region Route Resolution
//!
//! Inspected traffic can reach a spoke from any corner of the triangle. For
//! a spoke attached in region `L`, each foreign region `F` needs one route
//! for the spoke CIDR in its post-inspection table, forwarded over the
//! connector that carries `F -> L` traffic.
//!
//! Only the forward direction is produced here. Return paths to the hub's
//! own ingress ranges are the attachment planner's concern.

use std::collections::BTreeMap;
use tracing::debug;

use super::{PlanningError, PlanningResult};
use crate::connectors::ConnectorTable;
use crate::domain::{Ipv4Cidr, Region, SpokeIdentity};
use crate::hub::NetworkInstanceHandle;
use crate::plan::{RouteOp, RoutePurpose, RouteTarget};

/// Computes the foreign-region routes for a newly attached spoke
#[derive(Debug, Clone, Copy)]
pub struct CrossRegionRouteResolver<'a> {
    connectors: &'a ConnectorTable,
}

impl<'a> CrossRegionRouteResolver<'a> {
    pub fn new(connectors: &'a ConnectorTable) -> Self {
        Self { connectors }
    }

    /// One route per foreign region, in display order
    ///
    /// `hubs` must hold the post-inspection tables of both foreign regions.
    /// The local region's entry, if present, is ignored. Spoke accounts may
    /// lack a presence in some region; the hub triangle never may.
    pub fn resolve(
        &self,
        spoke: &SpokeIdentity,
        spoke_cidr: Ipv4Cidr,
        hubs: &BTreeMap<Region, NetworkInstanceHandle>,
    ) -> PlanningResult<Vec<RouteOp>> {
        let local = spoke.region;

        local
            .others()
            .into_iter()
            .map(|foreign| {
                let hub = hubs.get(&foreign).ok_or(PlanningError::MissingHub {
                    region: foreign,
                    tier: spoke.tier,
                })?;
                if hub.tier != spoke.tier {
                    return Err(PlanningError::TierMismatch {
                        region: foreign,
                        expected: spoke.tier,
                        actual: hub.tier,
                    });
                }

                let connector = self.connectors.get(local, foreign)?;
                debug!(
                    "Cross-region route for {} in {} via {}",
                    spoke, foreign, connector
                );

                Ok(RouteOp {
                    resource_key: spoke.key(&["cross-region", foreign.as_str()]),
                    purpose: RoutePurpose::CrossRegion,
                    region: foreign,
                    destination_cidr: spoke_cidr,
                    route_table_id: hub.post_inspection_route_table_id.clone(),
                    target: RouteTarget::PeeringConnector(connector.clone()),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NetworkTier, SpokeName};
    use crate::planner::test_support::{connector_table, hub_set};

    fn identity(region: Region) -> SpokeIdentity {
        SpokeIdentity::new(SpokeName::new("payments").unwrap(), region, NetworkTier::NonProd)
    }

    fn cidr() -> Ipv4Cidr {
        Ipv4Cidr::new("10.40.0.0/16").unwrap()
    }

    #[test]
    fn test_routes_target_foreign_post_inspection_tables() {
        let hubs = hub_set(NetworkTier::NonProd);
        let table = connector_table(&hubs);
        let resolver = CrossRegionRouteResolver::new(&table);

        for local in Region::ALL {
            let routes = resolver.resolve(&identity(local), cidr(), hubs.as_map()).unwrap();
            assert_eq!(routes.len(), 2);

            for route in &routes {
                assert_ne!(route.region, local);
                assert_eq!(route.destination_cidr, cidr());
                assert_eq!(
                    &route.route_table_id,
                    &hubs.get(route.region).unwrap().post_inspection_route_table_id
                );
            }
        }
    }

    #[test]
    fn test_connector_direction() {
        let hubs = hub_set(NetworkTier::NonProd);
        let table = connector_table(&hubs);
        let resolver = CrossRegionRouteResolver::new(&table);

        let from_primary = resolver
            .resolve(&identity(Region::Primary), cidr(), hubs.as_map())
            .unwrap();
        let from_recovery = resolver
            .resolve(&identity(Region::Recovery), cidr(), hubs.as_map())
            .unwrap();

        let primary_into_recovery = from_primary
            .iter()
            .find(|route| route.region == Region::Recovery)
            .unwrap();
        let recovery_into_primary = from_recovery
            .iter()
            .find(|route| route.region == Region::Primary)
            .unwrap();

        assert_eq!(
            primary_into_recovery.target.id(),
            "tgw-attach-nonprod-recovery-to-primary"
        );
        assert_eq!(
            recovery_into_primary.target.id(),
            "tgw-attach-nonprod-primary-to-recovery"
        );
    }

    #[test]
    fn test_missing_foreign_hub_is_fatal() {
        let hubs = hub_set(NetworkTier::NonProd);
        let table = connector_table(&hubs);
        let resolver = CrossRegionRouteResolver::new(&table);

        let mut partial = hubs.as_map().clone();
        partial.remove(&Region::Legacy);

        assert_eq!(
            resolver.resolve(&identity(Region::Primary), cidr(), &partial),
            Err(PlanningError::MissingHub {
                region: Region::Legacy,
                tier: NetworkTier::NonProd,
            })
        );
    }

    #[test]
    fn test_local_hub_not_required() {
        let hubs = hub_set(NetworkTier::NonProd);
        let table = connector_table(&hubs);
        let resolver = CrossRegionRouteResolver::new(&table);

        let mut foreign_only = hubs.as_map().clone();
        foreign_only.remove(&Region::Primary);

        let routes = resolver
            .resolve(&identity(Region::Primary), cidr(), &foreign_only)
            .unwrap();
        assert_eq!(routes.len(), 2);
    }
}
