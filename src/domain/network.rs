// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects with Validation Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid IPv4 address format: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid prefix length: {0} (must be 0-32)")]
    InvalidPrefixLength(u8),

    #[error("CIDR {cidr} has host bits set (network address is {network})")]
    HostBitsSet { cidr: String, network: String },
}

/// IPv4 network in CIDR notation
///
/// Every route destination, spoke allocation and hub ingress range is one of
/// these. Invariants:
/// - Prefix length is always present and within 0-32
/// - The address is the network address (no host bits set)
/// - Canonical representation `a.b.c.d/n`
///
/// # Examples
///
/// ```rust
/// use transit_hub_planner::domain::Ipv4Cidr;
///
/// let cidr = Ipv4Cidr::new("10.40.0.0/16").unwrap();
/// assert_eq!(cidr.prefix_length(), 16);
/// assert!(Ipv4Cidr::new("10.40.1.0/16").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ipv4Cidr {
    network: Ipv4Addr,
    prefix_length: u8,
}

impl Ipv4Cidr {
    /// Maximum prefix length for IPv4
    pub const MAX_PREFIX: u8 = 32;

    /// The `0.0.0.0/0` destination used for default routes
    pub const DEFAULT_ROUTE: Ipv4Cidr = Ipv4Cidr {
        network: Ipv4Addr::UNSPECIFIED,
        prefix_length: 0,
    };

    /// Parse a CIDR block such as `10.40.0.0/16`
    ///
    /// # Invariants
    /// - Prefix is mandatory
    /// - Prefix length 0-32
    /// - No host bits set
    pub fn new(cidr: impl AsRef<str>) -> Result<Self, NetworkError> {
        let cidr = cidr.as_ref();

        let (addr_str, prefix_str) = cidr
            .split_once('/')
            .ok_or_else(|| NetworkError::InvalidCidr(cidr.to_string()))?;

        let address = Ipv4Addr::from_str(addr_str)
            .map_err(|_| NetworkError::InvalidIpAddress(addr_str.to_string()))?;

        let prefix_length = prefix_str
            .parse::<u8>()
            .map_err(|_| NetworkError::InvalidCidr(cidr.to_string()))?;

        Self::from_parts(address, prefix_length).and_then(|parsed| {
            if parsed.network == address {
                Ok(parsed)
            } else {
                Err(NetworkError::HostBitsSet {
                    cidr: cidr.to_string(),
                    network: parsed.to_string(),
                })
            }
        })
    }

    /// Build from an address and prefix, masking off any host bits
    pub fn from_parts(address: Ipv4Addr, prefix_length: u8) -> Result<Self, NetworkError> {
        if prefix_length > Self::MAX_PREFIX {
            return Err(NetworkError::InvalidPrefixLength(prefix_length));
        }

        let network = Ipv4Addr::from(u32::from(address) & Self::mask(prefix_length));
        Ok(Self {
            network,
            prefix_length,
        })
    }

    fn mask(prefix_length: u8) -> u32 {
        if prefix_length == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(prefix_length))
        }
    }

    /// Get the network address
    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    /// Get the prefix length
    pub fn prefix_length(&self) -> u8 {
        self.prefix_length
    }

    /// Whether this is `0.0.0.0/0`
    pub fn is_default_route(&self) -> bool {
        self.prefix_length == 0
    }

    /// Check whether an address falls inside this block
    pub fn contains(&self, address: Ipv4Addr) -> bool {
        u32::from(address) & Self::mask(self.prefix_length) == u32::from(self.network)
    }

    /// Check whether two blocks share any address
    pub fn overlaps(&self, other: &Ipv4Cidr) -> bool {
        let mask = Self::mask(self.prefix_length.min(other.prefix_length));
        u32::from(self.network) & mask == u32::from(other.network) & mask
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_length)
    }
}

impl FromStr for Ipv4Cidr {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ipv4Cidr {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ipv4Cidr> for String {
    fn from(cidr: Ipv4Cidr) -> Self {
        cidr.to_string()
    }
}
