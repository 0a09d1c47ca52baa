//! # Generation Orchestrator
//!
//! Runs a complete generation from a validated [`Config`]:
//!
//! 1. **Planning**: resolve the density bands and plan /24 subnets
//! 2. **Role distribution**: default ratios plus any overrides
//! 3. **Allocation**: spread role units over the planned subnets
//! 4. **Emission**: synthesize one record per host and write the file
//!
//! Steps 1-3 are pure and available separately through
//! [`build_allocation`]. The output file is only created once allocation
//! has succeeded, so a failed run never leaves a partial file behind.

use std::path::PathBuf;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::ip::SubnetPool;
use crate::roles::{apply_role_overrides, RoleCount};
use crate::synth::generator::generate_domain;
use crate::synth::{default_output_name, write_hosts_to_file};
use crate::topology::{allocate, count_subnets, plan_subnets_in, Allocation};

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub subnets: usize,
    pub hosts: usize,
    pub domain: String,
    pub roles: RoleCount,
}

/// RNG for a run: seeded when the config asks for it, OS entropy otherwise
pub fn make_rng(config: &Config) -> StdRng {
    match config.general.seed {
        Some(seed) => {
            debug!("Using fixed RNG seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// Domain for the run: the configured one, or a random `<label>.local`
pub fn resolve_domain<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> String {
    config
        .network
        .domain
        .clone()
        .unwrap_or_else(|| generate_domain(rng))
}

/// Plan, distribute and allocate without writing anything.
///
/// Every subnet in the result carries `domain`.
pub fn build_allocation<R: Rng + ?Sized>(
    config: &Config,
    domain: &str,
    rng: &mut R,
) -> Result<(Allocation, RoleCount)> {
    config.validate()?;

    let nodes = config.general.nodes;
    let bands = config.bands();
    let expected_subnets = count_subnets(nodes, &bands)?;
    info!(
        "Distributing {} nodes across {} subnets using bands {}",
        nodes,
        expected_subnets,
        bands.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    );

    let mut pool = SubnetPool::new(&config.network.address_pool)?;
    let mut subnets = plan_subnets_in(nodes, &bands, &mut pool)?;
    for subnet in &mut subnets {
        subnet.domain = Some(domain.to_string());
    }

    let roles = apply_role_overrides(nodes, &config.roles)?;
    for (role, count) in roles.iter() {
        debug!("  {:>30} : {}", role, count);
    }

    let allocation = allocate(subnets, &roles, rng)
        .wrap_err("Role allocation failed; no output was written")?;

    if config.general.verbose {
        for subnet in &allocation.subnets {
            debug!("{}", serde_json::to_string_pretty(subnet)?);
        }
    }

    Ok((allocation, roles))
}

/// Run a full generation and write the host file
pub fn generate_network(config: &Config) -> Result<GenerationReport> {
    let mut rng = make_rng(config);
    let domain = resolve_domain(config, &mut rng);

    let (allocation, roles) = build_allocation(config, &domain, &mut rng)?;

    let output_path = config
        .output
        .path
        .clone()
        .unwrap_or_else(default_output_name);
    let hosts = write_hosts_to_file(
        &output_path,
        &allocation,
        config.network.ip_layout,
        config.output.pretty,
        &mut rng,
    )?;

    info!("Saved network profile to {}", output_path.display());

    Ok(GenerationReport {
        output_path,
        subnets: allocation.subnets.len(),
        hosts,
        domain,
        roles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;
    use crate::topology::DensityBand;
    use crate::utils::validation::ValidationError;

    #[test]
    fn test_build_allocation_default() {
        let mut rng = StdRng::seed_from_u64(21);
        let config = Config::default();
        let (allocation, roles) = build_allocation(&config, "corp.local", &mut rng).unwrap();
        assert_eq!(allocation.subnets.len(), 7);
        assert_eq!(allocation.total_hosts(), 500);
        assert_eq!(allocation.role_totals(), roles);
        assert!(allocation
            .subnets
            .iter()
            .all(|s| s.domain.as_deref() == Some("corp.local")));
    }

    #[test]
    fn test_build_allocation_with_overrides() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut config = Config::with_nodes(200);
        config.roles.insert(Role::VoipPhone, 20);
        let (allocation, roles) = build_allocation(&config, "corp.local", &mut rng).unwrap();
        assert_eq!(roles.get(Role::VoipPhone), 20);
        assert_eq!(allocation.role_totals().get(Role::VoipPhone), 20);
        assert_eq!(allocation.total_hosts(), 200);
    }

    #[test]
    fn test_rounding_loss_is_rejected_before_planning() {
        let mut rng = StdRng::seed_from_u64(23);
        // 30/45/25% of 501 floors to 150 + 225 + 125 = 500
        let config = Config::with_nodes(501);
        let err = build_allocation(&config, "corp.local", &mut rng).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::UnevenNodeCount { nodes: 501, capacity: 500, suggested: 520, .. })
        ));
    }

    #[test]
    fn test_invalid_bands_fail_fast() {
        let mut rng = StdRng::seed_from_u64(24);
        let mut config = Config::default();
        config.network.bands = Some(vec![DensityBand::new(50, 50), DensityBand::new(60, 50)]);
        assert!(build_allocation(&config, "corp.local", &mut rng).is_err());
    }

    #[test]
    fn test_resolve_domain() {
        let mut rng = StdRng::seed_from_u64(25);
        let mut config = Config::default();
        assert!(resolve_domain(&config, &mut rng).ends_with(".local"));
        config.network.domain = Some("fixed.example".to_string());
        assert_eq!(resolve_domain(&config, &mut rng), "fixed.example");
    }
}
