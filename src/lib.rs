//! # Gensynet - Synthetic enterprise network generator
//!
//! This library builds fictitious enterprise network topologies and emits one
//! JSON record per host (IP, MAC, role, OS, confidence) for use as test and
//! training data for network-analysis tools.
//!
//! ## Overview
//!
//! A run takes a node count, a set of density bands and an optional set of
//! role overrides, and produces a file of host records. The heart of it is
//! the distribution allocator, which keeps exact count conservation across
//! three steps:
//!
//! 1. **Subnet planning**: each band takes a share of the nodes and packs
//!    them into /24 subnets at the band's density
//! 2. **Role distribution**: the node population is split into device roles
//!    using a fixed ratio table, with rounding leftovers going to "Unknown"
//! 3. **Allocation**: every role unit is placed in a random subnet that still
//!    has room, until all subnets are exactly full
//!
//! ## Architecture
//!
//! - `config`: Generator configuration and YAML layout
//! - `config_loader`: Config file loading and command-line overrides
//! - `ip`: /24 block pool and host address assignment
//! - `topology`: Density bands, subnet planning and role allocation
//! - `roles`: Device roles and the default role distribution
//! - `synth`: Host record synthesis and JSON emission
//! - `prompt`: Interactive question/answer front end
//! - `utils`: Validation and IP helpers
//! - `orchestrator`: End-to-end generation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gensynet::{config::Config, orchestrator};
//!
//! let mut config = Config::with_nodes(1000);
//! config.general.seed = Some(7);
//!
//! let report = orchestrator::generate_network(&config)?;
//! println!("{} hosts in {} subnets written to {}",
//!          report.hosts, report.subnets, report.output_path.display());
//! # Ok::<(), color_eyre::Report>(())
//! ```
//!
//! ## Error Handling
//!
//! Domain failures are typed (`DistributionError`, `PlanError`, `RoleError`,
//! `AllocationError`, `ValidationError`). The orchestrator and binary wrap
//! them in `color_eyre` reports with context.

pub mod config;
pub mod config_loader;
pub mod ip;
pub mod topology;
pub mod roles;
pub mod synth;
pub mod prompt;
pub mod utils;
pub mod orchestrator;
