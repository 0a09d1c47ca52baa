//! Subnet planning.
//!
//! Turns a node count and a set of density bands into concrete subnet
//! slots. Each band takes `floor(total * nodes% / 100)` nodes and packs them
//! into groups of `floor(254 * density% / 100)`, one /24 per group, with a
//! smaller trailing group for the remainder.

use log::{debug, info, warn};

use super::types::{DensityBand, DistributionError, PlanError, Subnet};
use crate::ip::SubnetPool;
use crate::utils::ip_utils::USABLE_HOSTS_PER_BLOCK;
use crate::utils::validation::validate_band;

/// Address plans above this many blocks get a warning in the log
const LARGE_PLAN_BLOCKS: usize = 254 * 254;

/// Node count and group size for one band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandSplit {
    pub band_nodes: usize,
    pub group_size: usize,
}

impl BandSplit {
    /// Full groups and the size of the trailing partial group (0 if none)
    pub fn groups(&self) -> (usize, usize) {
        (self.band_nodes / self.group_size, self.band_nodes % self.group_size)
    }

    /// Subnets this band needs
    pub fn subnet_count(&self) -> usize {
        self.band_nodes.div_ceil(self.group_size)
    }
}

/// Check a band set and compute the per-band split.
///
/// Percentages must lie in 1-100, node percentages must reach exactly 100
/// without overshooting at any prefix, and every density must leave a
/// non-empty group.
pub fn validate_bands(total: usize, bands: &[DensityBand]) -> Result<Vec<BandSplit>, DistributionError> {
    if bands.is_empty() {
        return Err(DistributionError::Empty);
    }

    let mut cumulative = 0u32;
    let mut splits = Vec::with_capacity(bands.len());

    for (i, band) in bands.iter().enumerate() {
        let index = i + 1;
        validate_band(index, band, 100 - cumulative)?;
        cumulative += band.node_percent;

        let group_size = USABLE_HOSTS_PER_BLOCK * band.density_percent as usize / 100;
        if group_size == 0 {
            return Err(DistributionError::ZeroGroup { band: index, density: band.density_percent });
        }

        splits.push(BandSplit {
            band_nodes: total * band.node_percent as usize / 100,
            group_size,
        });
    }

    if cumulative < 100 {
        return Err(DistributionError::Incomplete { total: cumulative });
    }

    Ok(splits)
}

/// Number of subnets the band set produces for `total` nodes
pub fn count_subnets(total: usize, bands: &[DensityBand]) -> Result<usize, PlanError> {
    let splits = validate_bands(total, bands)?;
    Ok(splits.iter().map(BandSplit::subnet_count).sum())
}

/// Hosts the band set can hold for `total` nodes.
///
/// Flooring each band can leave this below `total`.
pub fn planned_capacity(total: usize, bands: &[DensityBand]) -> Result<usize, DistributionError> {
    let splits = validate_bands(total, bands)?;
    Ok(splits.iter().map(|split| split.band_nodes).sum())
}

/// Smallest node count at or above `total` that the bands hold exactly.
///
/// Every multiple of 100 fits, so the search is short.
pub fn next_plannable_count(total: usize, bands: &[DensityBand]) -> Result<usize, DistributionError> {
    validate_bands(total, bands)?;
    let capacity = |nodes: usize| -> usize {
        bands
            .iter()
            .map(|band| nodes * band.node_percent as usize / 100)
            .sum()
    };
    Ok((total..=total.next_multiple_of(100))
        .find(|&nodes| capacity(nodes) == nodes)
        .unwrap_or(total))
}

/// Plan subnets from the default 10.0.0.0/8 pool
pub fn plan_subnets(total: usize, bands: &[DensityBand]) -> Result<Vec<Subnet>, PlanError> {
    plan_subnets_in(total, bands, &mut SubnetPool::default())
}

/// Plan subnets, drawing /24 blocks from `pool`.
///
/// The whole plan is checked against the pool before any block is taken.
pub fn plan_subnets_in(
    total: usize,
    bands: &[DensityBand],
    pool: &mut SubnetPool,
) -> Result<Vec<Subnet>, PlanError> {
    let splits = validate_bands(total, bands)?;
    let expected: usize = splits.iter().map(BandSplit::subnet_count).sum();

    if expected > pool.available() {
        return Err(PlanError::AddressPoolExhausted {
            requested: expected,
            available: pool.available(),
        });
    }
    if expected > LARGE_PLAN_BLOCKS {
        warn!("Address plan spans {} /24 blocks of {}", expected, pool.cidr());
    }

    let mut subnets = Vec::with_capacity(expected);
    for (band, split) in bands.iter().zip(&splits) {
        let (full, partial) = split.groups();
        debug!(
            "Band {}: {} nodes in {} groups of {} plus {}",
            band, split.band_nodes, full, split.group_size, partial
        );

        let sizes = std::iter::repeat(split.group_size)
            .take(full)
            .chain((partial > 0).then_some(partial));
        for capacity in sizes {
            let subnet = Subnet::new(pool.next_block()?, capacity);
            debug!(
                "Initialized subnet {} with {} hosts starting at {}",
                subnets.len() + 1,
                capacity,
                subnet.start_address
            );
            subnets.push(subnet);
        }
    }

    debug_assert_eq!(subnets.len(), expected);
    info!("Planned {} subnets for {} nodes", subnets.len(), total);
    Ok(subnets)
}
