// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hub Network Domain Models
//!
//! Core vocabulary for wiring spokes into the inspected hub triangle.
//!
//! # Value Objects with Invariants
//!
//! - [`Ipv4Cidr`] - network-aligned IPv4 CIDR blocks
//! - [`SpokeName`] - DNS-label account names
//! - [`ResourceKey`] - deterministic emitter identifiers
//! - [`TransitGatewayId`], [`RouteTableId`], [`ConnectorId`], [`VpcId`],
//!   [`SubnetId`], [`HostedZoneId`], [`AccountId`] - cloud identifiers
//!
//! # Topology Vocabulary
//!
//! - [`Region`] - Legacy, Primary, Recovery
//! - [`NetworkTier`] - Prod, NonProd
//! - [`AccountRole`] - Hub, ToolsSpoke, OrdinarySpoke

pub mod identifiers;
pub mod invariants;
pub mod network;
pub mod region;
pub mod spoke;

pub use identifiers::{
    AccountId, ConnectorId, HostedZoneId, IdentifierError, RouteTableId, SubnetId,
    TransitGatewayId, VpcId,
};
pub use invariants::{ValidationError, ValidationResult};
pub use network::{Ipv4Cidr, NetworkError};
pub use region::{AccountRole, NetworkTier, Region};
pub use spoke::{ResourceKey, SpokeIdentity, SpokeName};
