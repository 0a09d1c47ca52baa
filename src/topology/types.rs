//! Topology type definitions.
//!
//! This file contains the density band and subnet types shared by the
//! planner, the allocator and the host synthesizer, plus the planning
//! error taxonomy.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ip::PoolError;
use crate::roles::RoleCount;
use crate::utils::ip_utils::{first_host, format_block_cidr};

/// One slice of the node population and how densely it packs into /24s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityBand {
    /// Share of all nodes that fall in this band, 1-100
    #[serde(rename = "nodes")]
    pub node_percent: u32,
    /// Share of a /24's usable addresses each subnet in this band occupies, 1-100
    #[serde(rename = "density")]
    pub density_percent: u32,
}

impl DensityBand {
    pub const fn new(node_percent: u32, density_percent: u32) -> Self {
        DensityBand {
            node_percent,
            density_percent,
        }
    }
}

impl fmt::Display for DensityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node_percent, self.density_percent)
    }
}

/// Parses the "NODES:DENSITY" form used on the command line, e.g. "30:70"
impl FromStr for DensityBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (nodes, density) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected NODES:DENSITY, got '{}'", s))?;
        let node_percent = nodes
            .trim()
            .parse()
            .map_err(|_| format!("Invalid node percentage '{}'", nodes))?;
        let density_percent = density
            .trim()
            .parse()
            .map_err(|_| format!("Invalid density percentage '{}'", density))?;
        Ok(DensityBand::new(node_percent, density_percent))
    }
}

/// Bands used for networks above the small-network threshold
pub const DEFAULT_BANDS: [DensityBand; 3] = [
    DensityBand::new(30, 70),
    DensityBand::new(45, 20),
    DensityBand::new(25, 90),
];

/// Networks at or below this many nodes fit in a single band
pub const SMALL_NETWORK_THRESHOLD: usize = 50;

/// Band used for small networks: everything in one fully dense subnet
pub const SINGLE_BAND: [DensityBand; 1] = [DensityBand::new(100, 100)];

/// Default bands for a node count
pub fn default_bands(total: usize) -> Vec<DensityBand> {
    if total > SMALL_NETWORK_THRESHOLD {
        DEFAULT_BANDS.to_vec()
    } else {
        SINGLE_BAND.to_vec()
    }
}

/// A subnet slot: one /24 block holding up to `capacity` hosts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subnet {
    /// First host address of the block (".1")
    pub start_address: Ipv4Addr,
    /// The block in CIDR notation, e.g. "10.0.3.0/24"
    pub netmask: String,
    /// Maximum hosts this slot holds
    #[serde(rename = "hosts")]
    pub capacity: usize,
    /// Capacity not yet allocated to a role
    #[serde(skip_serializing)]
    pub remaining: usize,
    #[serde(rename = "roles")]
    pub role_counts: RoleCount,
    /// rDNS domain for hosts in this subnet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl Subnet {
    /// Build an empty slot over the /24 starting at `block`
    pub fn new(block: Ipv4Addr, capacity: usize) -> Self {
        Subnet {
            start_address: first_host(block),
            netmask: format_block_cidr(block),
            capacity,
            remaining: capacity,
            role_counts: RoleCount::zeroed(),
            domain: None,
        }
    }

    /// Network address of the block
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.start_address) - 1)
    }

    /// Hosts placed so far
    pub fn placed(&self) -> usize {
        self.role_counts.total()
    }
}

/// Reasons a band set cannot be turned into subnets
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DistributionError {
    #[error("no density bands given")]
    Empty,

    #[error("band {band}: {field} {value}% out of valid range (must be 1-100)")]
    OutOfRange {
        band: usize,
        field: &'static str,
        value: u32,
    },

    #[error("node percentages exceed 100% at band {band} (cumulative {cumulative}%)")]
    ExceedsHundred { band: usize, cumulative: u32 },

    #[error("node percentages sum to {total}%, expected exactly 100%")]
    Incomplete { total: u32 },

    #[error("band {band}: density {density}% leaves no room for hosts in a /24")]
    ZeroGroup { band: usize, density: u32 },
}

/// Subnet planning errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(#[from] DistributionError),

    #[error("Address plan needs {requested} /24 blocks but the pool has only {available}")]
    AddressPoolExhausted { requested: usize, available: usize },

    #[error(transparent)]
    Pool(#[from] PoolError),
}
