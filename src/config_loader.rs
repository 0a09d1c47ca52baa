use crate::config::Config;
use crate::ip::IpLayout;
use crate::topology::DensityBand;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open config file '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse config file '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// Command-line values that override the configuration file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub nodes: Option<usize>,
    pub bands: Vec<DensityBand>,
    pub domain: Option<String>,
    pub output: Option<PathBuf>,
    pub compact: bool,
    pub sequential_ips: bool,
    pub seed: Option<u64>,
    pub verbose: bool,
}

/// Apply CLI overrides to a configuration and re-validate it
pub fn apply_cli_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(nodes) = overrides.nodes {
        info!("Node count overridden from command line: {}", nodes);
        config.general.nodes = nodes;
    }
    if !overrides.bands.is_empty() {
        config.network.bands = Some(overrides.bands.clone());
    }
    if let Some(domain) = &overrides.domain {
        config.network.domain = Some(domain.clone());
    }
    if let Some(output) = &overrides.output {
        config.output.path = Some(output.clone());
    }
    if overrides.compact {
        config.output.pretty = false;
    }
    if overrides.sequential_ips {
        config.network.ip_layout = IpLayout::Sequential;
    }
    if overrides.seed.is_some() {
        config.general.seed = overrides.seed;
    }
    config.general.verbose |= overrides.verbose;

    config.validate()?;

    Ok(())
}
