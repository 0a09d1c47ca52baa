use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::io;
use std::path::PathBuf;

use gensynet::config::Config;
use gensynet::config_loader::{self, CliOverrides};
use gensynet::orchestrator::generate_network;
use gensynet::prompt::run_interactive;
use gensynet::topology::DensityBand;

/// Synthetic enterprise network generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Provide program feedback
    #[arg(short, long)]
    verbose: bool,

    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of network nodes
    #[arg(short, long)]
    nodes: Option<usize>,

    /// Density band as NODE%:DENSITY%, e.g. 30:70 (repeat for each band)
    #[arg(short, long = "band", value_name = "NODES:DENSITY")]
    bands: Vec<DensityBand>,

    /// rDNS domain for all hosts (random <label>.local when omitted)
    #[arg(short, long)]
    domain: Option<String>,

    /// Output file (timestamp-named JSON file when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write one compact JSON record per line instead of indented records
    #[arg(long)]
    compact: bool,

    /// Number hosts .1, .2, ... instead of scattering them across the /24
    #[arg(long)]
    sequential_ips: bool,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Ask for every setting interactively
    #[arg(short, long)]
    interactive: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            nodes: self.nodes,
            bands: self.bands.clone(),
            domain: self.domain.clone(),
            output: self.output.clone(),
            compact: self.compact,
            sequential_ips: self.sequential_ips,
            seed: self.seed,
            verbose: self.verbose,
        }
    }
}

/// Log filter used when `RUST_LOG` is not set
fn default_log_level(config: &Config) -> &'static str {
    if config.general.verbose {
        "debug"
    } else {
        "info"
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // The config decides verbosity, so it is loaded before logging starts
    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => Config::default(),
    };
    config_loader::apply_cli_overrides(&mut config, &args.overrides())?;

    env_logger::Builder::from_env(Env::default().default_filter_or(default_log_level(&config))).init();
    if let Some(path) = &args.config {
        info!("Loaded configuration from {}", path.display());
    }

    if args.interactive {
        let stdin = io::stdin();
        config = run_interactive(stdin.lock(), io::stdout(), config)
            .wrap_err("Interactive configuration aborted")?;
    }

    info!("Generating network with {} nodes", config.general.nodes);
    let report = generate_network(&config)?;

    info!(
        "Generated {} hosts in {} subnets for domain {}",
        report.hosts, report.subnets, report.domain
    );
    Ok(())
}
