//! Input validation utilities.
//!
//! These checks are shared by every front end (config file, command line,
//! interactive prompt). They never touch the console; callers decide how to
//! report a failure.

use std::sync::OnceLock;

use regex::Regex;

use crate::topology::{next_plannable_count, planned_capacity, DensityBand, DistributionError};

/// Largest node count the generator accepts
pub const MAX_NODES: usize = 4_000_000;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Node count {nodes} is exorbitant; use at most {max}")]
    NodeCountTooLarge { nodes: usize, max: usize },

    #[error("Invalid domain name '{0}'")]
    InvalidDomain(String),

    #[error("Invalid address pool: {0}")]
    InvalidAddressPool(String),

    #[error("Invalid density bands: {0}")]
    InvalidBands(#[from] DistributionError),

    #[error(
        "{nodes} nodes do not divide evenly over bands {bands}: only {capacity} fit after rounding each band down (try {suggested})"
    )]
    UnevenNodeCount {
        nodes: usize,
        bands: String,
        capacity: usize,
        suggested: usize,
    },

    #[error("Role '{role}': {value} exceeds the {remaining} nodes left to assign")]
    RoleCountTooLarge {
        role: String,
        value: usize,
        remaining: usize,
    },
}

fn domain_regex() -> &'static Regex {
    static DOMAIN: OnceLock<Regex> = OnceLock::new();
    DOMAIN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
            .expect("domain pattern is valid")
    })
}

/// Validate the requested node count
///
/// # Examples
/// ```
/// use gensynet::utils::validation::validate_node_count;
///
/// assert!(validate_node_count(500).is_ok());
/// assert!(validate_node_count(0).is_ok());
/// assert!(validate_node_count(4_000_001).is_err());
/// ```
pub fn validate_node_count(nodes: usize) -> Result<(), ValidationError> {
    if nodes > MAX_NODES {
        return Err(ValidationError::NodeCountTooLarge { nodes, max: MAX_NODES });
    }
    Ok(())
}

/// Validate an rDNS domain name
///
/// Labels are letters, digits and hyphens, 1-63 characters, not starting or
/// ending with a hyphen; the whole name is at most 253 characters.
///
/// # Examples
/// ```
/// use gensynet::utils::validation::validate_domain;
///
/// assert!(validate_domain("corp.local").is_ok());
/// assert!(validate_domain("-bad.local").is_err());
/// ```
pub fn validate_domain(domain: &str) -> Result<(), ValidationError> {
    if domain.is_empty() || domain.len() > 253 || !domain_regex().is_match(domain) {
        return Err(ValidationError::InvalidDomain(domain.to_string()));
    }
    Ok(())
}

/// Validate one band's percentages in isolation.
///
/// `index` is 1-based and only used for the error message. `remaining` is
/// the node percentage still unassigned by earlier bands.
pub fn validate_band(index: usize, band: &DensityBand, remaining: u32) -> Result<(), DistributionError> {
    for (field, value) in [("node percentage", band.node_percent), ("density percentage", band.density_percent)] {
        if !(1..=100).contains(&value) {
            return Err(DistributionError::OutOfRange { band: index, field, value });
        }
    }
    if band.node_percent > remaining {
        return Err(DistributionError::ExceedsHundred {
            band: index,
            cumulative: 100 - remaining + band.node_percent,
        });
    }
    Ok(())
}

/// Check that the bands hold exactly `nodes` hosts.
///
/// Each band takes `floor(nodes * percent / 100)` nodes, so some node counts
/// lose a few hosts to rounding; those are rejected with the next count that
/// fits.
pub fn validate_band_capacity(nodes: usize, bands: &[DensityBand]) -> Result<(), ValidationError> {
    let capacity = planned_capacity(nodes, bands)?;
    if capacity != nodes {
        return Err(ValidationError::UnevenNodeCount {
            nodes,
            bands: bands.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
            capacity,
            suggested: next_plannable_count(nodes, bands)?,
        });
    }
    Ok(())
}

/// Validate a manually entered role count against what is left to assign
pub fn validate_role_count(role: &str, value: usize, remaining: usize) -> Result<(), ValidationError> {
    if value > remaining {
        return Err(ValidationError::RoleCountTooLarge {
            role: role.to_string(),
            value,
            remaining,
        });
    }
    Ok(())
}
