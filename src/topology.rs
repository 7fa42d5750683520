// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Model
//!
//! Static description of the estate: which AWS region backs each corner of
//! the triangle, the account registry with per-region CIDR allocations, the
//! hub ingress ranges per tier, the Tools account's return route tables and
//! routing policy exceptions.
//!
//! A [`TopologySnapshot`] is the raw, deserialisable shape. A
//! [`TopologyModel`] is a snapshot that passed validation; planners only
//! ever see the latter.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{
    AccountId, AccountRole, Ipv4Cidr, NetworkTier, Region, RouteTableId, SpokeName,
};
use crate::plan::AccountRef;

/// Topology loading and lookup errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Failed to read topology from {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse topology: {0}")]
    Parse(String),

    #[error("{what} has no entry for region {region}")]
    MissingRegion { what: &'static str, region: Region },

    #[error("Hub ingress CIDRs missing for {tier} in {region}")]
    MissingHubIngress { tier: NetworkTier, region: Region },

    #[error("Account {0} is registered more than once")]
    DuplicateAccount(String),

    #[error("CIDR allocations overlap: {first} and {second}")]
    OverlappingCidrs { first: String, second: String },

    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Account {account} has no presence in {region}")]
    NoRegionalPresence { account: String, region: Region },

    #[error("No hub account is registered")]
    NoHubAccount,

    #[error("Only one hub account may be registered, found {first} and {second}")]
    MultipleHubAccounts { first: String, second: String },

    /// A `/0` range would shadow the default route
    #[error("{what} must not be a default route: {cidr}")]
    DefaultRouteRange { what: String, cidr: Ipv4Cidr },
}

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: SpokeName,
    pub account_id: AccountId,
    pub role: AccountRole,
    /// VPC CIDR per region; regions without a VPC are absent
    #[serde(default)]
    pub cidrs: BTreeMap<Region, Ipv4Cidr>,
}

impl Account {
    pub fn cidr(&self, region: Region) -> Option<Ipv4Cidr> {
        self.cidrs.get(&region).copied()
    }

    pub fn as_account_ref(&self) -> AccountRef {
        AccountRef::new(self.name.as_str(), self.account_id.clone())
    }
}

/// Externally reachable hub ranges for one tier in one region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubIngressCidrs {
    /// Ingress/egress gateway subnets
    pub gateway: Ipv4Cidr,
    /// Inspection (firewall) subnets
    pub inspection: Ipv4Cidr,
}

/// Policy exceptions that are not derived from topology
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingPolicy {
    /// Spokes that never get a return route from the Tools account
    #[serde(default)]
    pub return_route_exempt_spokes: BTreeSet<SpokeName>,
}

impl RoutingPolicy {
    pub fn is_return_route_exempt(&self, spoke: &SpokeName) -> bool {
        self.return_route_exempt_spokes.contains(spoke)
    }
}

/// Raw topology as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySnapshot {
    /// AWS region code backing each corner (e.g. `eu-west-2`)
    pub region_names: BTreeMap<Region, String>,
    pub accounts: Vec<Account>,
    pub hub_ingress: BTreeMap<NetworkTier, BTreeMap<Region, HubIngressCidrs>>,
    /// Tools account private route table per region
    pub tools_return_route_tables: BTreeMap<Region, RouteTableId>,
    #[serde(default)]
    pub policy: RoutingPolicy,
}

/// Validated topology
///
/// # Invariants
/// - Every region has an AWS region code
/// - Every tier defines gateway and inspection CIDRs in every region
/// - The Tools account has a return route table in every region
/// - Account names are unique
/// - No two account CIDR allocations overlap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TopologySnapshot", into = "TopologySnapshot")]
pub struct TopologyModel {
    region_names: BTreeMap<Region, String>,
    accounts: BTreeMap<SpokeName, Account>,
    hub_ingress: BTreeMap<NetworkTier, BTreeMap<Region, HubIngressCidrs>>,
    tools_return_route_tables: BTreeMap<Region, RouteTableId>,
    policy: RoutingPolicy,
}

impl TopologyModel {
    /// Validate a snapshot
    pub fn new(snapshot: TopologySnapshot) -> Result<Self, TopologyError> {
        for region in Region::ALL {
            if !snapshot.region_names.contains_key(&region) {
                return Err(TopologyError::MissingRegion {
                    what: "region_names",
                    region,
                });
            }
            if !snapshot.tools_return_route_tables.contains_key(&region) {
                return Err(TopologyError::MissingRegion {
                    what: "tools_return_route_tables",
                    region,
                });
            }
        }

        for tier in NetworkTier::ALL {
            for region in Region::ALL {
                let present = snapshot
                    .hub_ingress
                    .get(&tier)
                    .is_some_and(|by_region| by_region.contains_key(&region));
                if !present {
                    return Err(TopologyError::MissingHubIngress { tier, region });
                }
            }
        }

        for (tier, by_region) in &snapshot.hub_ingress {
            for (region, ingress) in by_region {
                for (label, cidr) in [("gateway", ingress.gateway), ("inspection", ingress.inspection)] {
                    if cidr.is_default_route() {
                        return Err(TopologyError::DefaultRouteRange {
                            what: format!("{tier} {label} ingress in {region}"),
                            cidr,
                        });
                    }
                }
            }
        }

        let mut accounts = BTreeMap::new();
        for account in snapshot.accounts {
            let name = account.name.clone();
            if accounts.insert(name.clone(), account).is_some() {
                return Err(TopologyError::DuplicateAccount(name.to_string()));
            }
        }

        validate_single_hub(&accounts)?;
        validate_disjoint_allocations(&accounts)?;

        for spoke in &snapshot.policy.return_route_exempt_spokes {
            if !accounts.contains_key(spoke) {
                warn!("Return-route exemption names unregistered account {}", spoke);
            }
        }

        info!(
            "Topology loaded: {} accounts, {} return-route exemptions",
            accounts.len(),
            snapshot.policy.return_route_exempt_spokes.len()
        );

        Ok(Self {
            region_names: snapshot.region_names,
            accounts,
            hub_ingress: snapshot.hub_ingress,
            tools_return_route_tables: snapshot.tools_return_route_tables,
            policy: snapshot.policy,
        })
    }

    /// Parse and validate a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self, TopologyError> {
        let snapshot: TopologySnapshot =
            serde_json::from_str(json).map_err(|e| TopologyError::Parse(e.to_string()))?;
        Self::new(snapshot)
    }

    /// Read, parse and validate a JSON snapshot file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let path = path.as_ref();
        debug!("Loading topology from {}", path.display());

        let json = std::fs::read_to_string(path).map_err(|e| TopologyError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// AWS region code backing a corner of the triangle
    pub fn aws_region(&self, region: Region) -> Result<&str, TopologyError> {
        self.region_names
            .get(&region)
            .map(String::as_str)
            .ok_or(TopologyError::MissingRegion {
                what: "region_names",
                region,
            })
    }

    pub fn account(&self, name: &str) -> Result<&Account, TopologyError> {
        self.accounts
            .get(name)
            .ok_or_else(|| TopologyError::UnknownAccount(name.to_string()))
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// The account owning the hub (and the shared private hosted zones)
    pub fn hub_account(&self) -> Result<&Account, TopologyError> {
        self.accounts
            .values()
            .find(|account| account.role == AccountRole::Hub)
            .ok_or(TopologyError::NoHubAccount)
    }

    /// CIDR of an account's VPC in a region
    pub fn spoke_cidr(&self, name: &str, region: Region) -> Result<Ipv4Cidr, TopologyError> {
        self.account(name)?
            .cidr(region)
            .ok_or_else(|| TopologyError::NoRegionalPresence {
                account: name.to_string(),
                region,
            })
    }

    pub fn hub_ingress(
        &self,
        tier: NetworkTier,
        region: Region,
    ) -> Result<&HubIngressCidrs, TopologyError> {
        self.hub_ingress
            .get(&tier)
            .and_then(|by_region| by_region.get(&region))
            .ok_or(TopologyError::MissingHubIngress { tier, region })
    }

    pub fn tools_return_route_table(&self, region: Region) -> Result<&RouteTableId, TopologyError> {
        self.tools_return_route_tables
            .get(&region)
            .ok_or(TopologyError::MissingRegion {
                what: "tools_return_route_tables",
                region,
            })
    }

    pub fn policy(&self) -> &RoutingPolicy {
        &self.policy
    }
}

impl TryFrom<TopologySnapshot> for TopologyModel {
    type Error = TopologyError;

    fn try_from(snapshot: TopologySnapshot) -> Result<Self, Self::Error> {
        Self::new(snapshot)
    }
}

impl From<TopologyModel> for TopologySnapshot {
    fn from(model: TopologyModel) -> Self {
        Self {
            region_names: model.region_names,
            accounts: model.accounts.into_values().collect(),
            hub_ingress: model.hub_ingress,
            tools_return_route_tables: model.tools_return_route_tables,
            policy: model.policy,
        }
    }
}

fn validate_single_hub(accounts: &BTreeMap<SpokeName, Account>) -> Result<(), TopologyError> {
    let mut hubs = accounts
        .values()
        .filter(|account| account.role == AccountRole::Hub);

    if let (Some(first), Some(second)) = (hubs.next(), hubs.next()) {
        return Err(TopologyError::MultipleHubAccounts {
            first: first.name.to_string(),
            second: second.name.to_string(),
        });
    }
    Ok(())
}

fn validate_disjoint_allocations(
    accounts: &BTreeMap<SpokeName, Account>,
) -> Result<(), TopologyError> {
    for account in accounts.values() {
        for (region, cidr) in &account.cidrs {
            if cidr.is_default_route() {
                return Err(TopologyError::DefaultRouteRange {
                    what: format!("{} allocation in {}", account.name, region),
                    cidr: *cidr,
                });
            }
        }
    }

    let allocations: Vec<(String, Ipv4Cidr)> = accounts
        .values()
        .flat_map(|account| {
            account
                .cidrs
                .iter()
                .map(move |(region, cidr)| (format!("{}@{} {}", account.name, region, cidr), *cidr))
        })
        .collect();

    for (i, (first_label, first)) in allocations.iter().enumerate() {
        for (second_label, second) in &allocations[i + 1..] {
            if first.overlaps(second) {
                return Err(TopologyError::OverlappingCidrs {
                    first: first_label.clone(),
                    second: second_label.clone(),
                });
            }
        }
    }
    Ok(())
}
