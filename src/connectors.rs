// Copyright (c) 2025 - Cowboy AI, Inc.
//! Directional Peering Connector Table
//!
//! Each edge of the hub triangle is realised by two peering connectors, one
//! per direction. The table is keyed by the ordered pair
//! `(spoke_region, route_region)`: the connector that `route_region`'s hub
//! uses to forward traffic towards spokes living in `spoke_region`.
//!
//! The table is complete by construction. All six directed pairs must be
//! present and the two directions of an edge must use different connectors,
//! so a lookup on a built table never misses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{ConnectorId, Region};
use crate::hub::HubSet;
use crate::planner::PlanningError;

/// One directed entry of a [`ConnectorTable`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorEntry {
    /// Region whose spokes are being reached
    pub spoke_region: Region,
    /// Region whose post-inspection table holds the route
    pub route_region: Region,
    pub connector_id: ConnectorId,
}

/// Complete directional connector lookup for the hub triangle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ConnectorEntry>", into = "Vec<ConnectorEntry>")]
pub struct ConnectorTable {
    connectors: BTreeMap<(Region, Region), ConnectorId>,
}

impl ConnectorTable {
    /// Build a table, enforcing completeness and directionality
    pub fn new(
        connectors: BTreeMap<(Region, Region), ConnectorId>,
    ) -> Result<Self, PlanningError> {
        if let Some(((region, _), _)) = connectors.iter().find(|((a, b), _)| a == b) {
            return Err(PlanningError::ReflexiveConnector { region: *region });
        }

        let missing: Vec<String> = directed_pairs()
            .filter(|pair| !connectors.contains_key(pair))
            .map(|(spoke_region, route_region)| format!("{spoke_region}->{route_region}"))
            .collect();
        if !missing.is_empty() {
            return Err(PlanningError::IncompleteConnectorTable { missing });
        }

        for ((spoke_region, route_region), connector) in &connectors {
            if connectors.get(&(*route_region, *spoke_region)) == Some(connector) {
                return Err(PlanningError::UndirectedConnector {
                    first: *spoke_region,
                    second: *route_region,
                    connector: connector.to_string(),
                });
            }
        }

        Ok(Self { connectors })
    }

    /// Build from a list of directed entries
    pub fn from_entries(
        entries: impl IntoIterator<Item = ConnectorEntry>,
    ) -> Result<Self, PlanningError> {
        let connectors = entries
            .into_iter()
            .map(|entry| ((entry.spoke_region, entry.route_region), entry.connector_id))
            .collect();
        Self::new(connectors)
    }

    /// Derive the table from each hub's own peering connectors
    ///
    /// The connector for `(spoke_region, route_region)` is the one
    /// `route_region`'s hub uses to reach `spoke_region`.
    pub fn from_hubs(hubs: &HubSet) -> Result<Self, PlanningError> {
        let mut connectors = BTreeMap::new();
        for (spoke_region, route_region) in directed_pairs() {
            let route_hub = hubs.get(route_region)?;
            if let Some(connector) = route_hub.peering_connector(spoke_region) {
                connectors.insert((spoke_region, route_region), connector.clone());
            }
        }
        Self::new(connectors)
    }

    /// Connector used in `route_region` to reach spokes in `spoke_region`
    pub fn get(
        &self,
        spoke_region: Region,
        route_region: Region,
    ) -> Result<&ConnectorId, PlanningError> {
        self.connectors
            .get(&(spoke_region, route_region))
            .ok_or(PlanningError::UnmappedConnector {
                spoke_region,
                route_region,
            })
    }

    pub fn entries(&self) -> impl Iterator<Item = ConnectorEntry> + '_ {
        self.connectors
            .iter()
            .map(|((spoke_region, route_region), connector_id)| ConnectorEntry {
                spoke_region: *spoke_region,
                route_region: *route_region,
                connector_id: connector_id.clone(),
            })
    }
}

impl TryFrom<Vec<ConnectorEntry>> for ConnectorTable {
    type Error = PlanningError;

    fn try_from(entries: Vec<ConnectorEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<ConnectorTable> for Vec<ConnectorEntry> {
    fn from(table: ConnectorTable) -> Self {
        table.entries().collect()
    }
}

/// The six ordered pairs of distinct regions
fn directed_pairs() -> impl Iterator<Item = (Region, Region)> {
    Region::ALL
        .into_iter()
        .flat_map(|from| from.others().into_iter().map(move |to| (from, to)))
}
