//! Generator configuration.
//!
//! One `Config` value carries every knob of a generation run, including
//! verbosity, and is passed explicitly to the orchestrator. It can be read
//! from YAML:
//!
//! ```yaml
//! general:
//!   nodes: 500
//!   seed: 7
//! network:
//!   bands:
//!     - { nodes: 30, density: 70 }
//!     - { nodes: 70, density: 20 }
//!   domain: corp.local
//!   address_pool: 10.0.0.0/8
//!   ip_layout: random
//! roles:
//!   Smartphones: 100
//! output:
//!   path: network.json
//!   pretty: false
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ip::{IpLayout, SubnetPool, DEFAULT_POOL};
use crate::roles::Role;
use crate::topology::{default_bands, DensityBand};
use crate::utils::validation::{
    validate_band_capacity, validate_domain, validate_node_count, ValidationError,
};

/// Node count used when none is given
pub const DEFAULT_NODES: usize = 500;

/// Complete generator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub general: GeneralConfig,
    pub network: NetworkConfig,
    /// Per-role count overrides; unlisted roles keep their default share
    pub roles: BTreeMap<Role, usize>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub nodes: usize,
    /// Fixed RNG seed for reproducible output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Density bands; defaults depend on the node count when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bands: Option<Vec<DensityBand>>,
    /// rDNS domain; a random `<label>.local` is generated when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub address_pool: String,
    pub ip_layout: IpLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output file; a timestamp name in the working directory when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Indented records instead of one record per line
    pub pretty: bool,
}

impl Config {
    /// Default configuration for `nodes` nodes
    pub fn with_nodes(nodes: usize) -> Self {
        let mut config = Config::default();
        config.general.nodes = nodes;
        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_node_count(self.general.nodes)?;

        if let Some(domain) = &self.network.domain {
            validate_domain(domain)?;
        }

        SubnetPool::new(&self.network.address_pool)
            .map_err(|e| ValidationError::InvalidAddressPool(e.to_string()))?;

        validate_band_capacity(self.general.nodes, &self.bands())?;

        Ok(())
    }

    /// Bands in effect: the configured ones, or the defaults for this size
    pub fn bands(&self) -> Vec<DensityBand> {
        self.network
            .bands
            .clone()
            .unwrap_or_else(|| default_bands(self.general.nodes))
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODES,
            seed: None,
            verbose: false,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bands: None,
            domain: None,
            address_pool: DEFAULT_POOL.to_string(),
            ip_layout: IpLayout::Random,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            pretty: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{DistributionError, DEFAULT_BANDS, SINGLE_BAND};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.general.nodes, 500);
        assert!(config.output.pretty);
        assert_eq!(config.network.address_pool, "10.0.0.0/8");
        assert_eq!(config.bands(), DEFAULT_BANDS.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_small_network_uses_single_band() {
        let config = Config::with_nodes(40);
        assert_eq!(config.bands(), SINGLE_BAND.to_vec());
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
general:
  nodes: 1000
  seed: 42
  verbose: true
network:
  bands:
    - { nodes: 40, density: 50 }
    - { nodes: 60, density: 90 }
  domain: corp.local
  address_pool: 172.16.0.0/12
  ip_layout: sequential
roles:
  Smartphones: 100
  dns_servers: 3
output:
  path: out.json
  pretty: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.general.nodes, 1000);
        assert_eq!(config.general.seed, Some(42));
        assert!(config.general.verbose);
        assert_eq!(config.bands(), vec![DensityBand::new(40, 50), DensityBand::new(60, 90)]);
        assert_eq!(config.network.ip_layout, IpLayout::Sequential);
        assert_eq!(config.roles.get(&Role::Smartphone), Some(&100));
        assert_eq!(config.roles.get(&Role::DnsServer), Some(&3));
        assert_eq!(config.output.path, Some(PathBuf::from("out.json")));
        assert!(!config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str("general:\n  nodes: 20\n").unwrap();
        assert_eq!(config.general.nodes, 20);
        assert!(config.output.pretty);
        assert_eq!(config.network.ip_layout, IpLayout::Random);
    }

    #[test]
    fn test_unknown_fields_and_roles_rejected() {
        assert!(serde_yaml::from_str::<Config>("general:\n  node: 20\n").is_err());
        assert!(serde_yaml::from_str::<Config>("roles:\n  Toasters: 2\n").is_err());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::with_nodes(5_000_000);
        assert!(matches!(config.validate(), Err(ValidationError::NodeCountTooLarge { .. })));

        config = Config::default();
        config.network.domain = Some("bad domain".to_string());
        assert!(matches!(config.validate(), Err(ValidationError::InvalidDomain(_))));

        config = Config::default();
        config.network.address_pool = "8.8.8.0/24".to_string();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidAddressPool(_))));

        config = Config::default();
        config.network.bands = Some(vec![DensityBand::new(60, 50), DensityBand::new(50, 50)]);
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidBands(DistributionError::ExceedsHundred { band: 2, cumulative: 110 }))
        );
    }

    #[test]
    fn test_node_count_must_fit_bands() {
        // 30/45/25% of 750 floors to 225 + 337 + 187 = 749
        let config = Config::with_nodes(750);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::UnevenNodeCount { nodes: 750, capacity: 749, suggested: 760, .. })
        ));
        assert!(Config::with_nodes(760).validate().is_ok());

        // Explicit bands that divide 750 evenly are fine
        let mut config = Config::with_nodes(750);
        config.network.bands = Some(vec![DensityBand::new(50, 50), DensityBand::new(50, 80)]);
        assert!(config.validate().is_ok());

        // Small networks use the single band and always fit
        assert!(Config::with_nodes(37).validate().is_ok());
    }
}
