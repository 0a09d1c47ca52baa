//! Network topology planning and role allocation.
//!
//! This module turns a node count into subnets (`planner`) and then fills
//! those subnets with role-tagged hosts (`distribution`).

pub mod types;
pub mod planner;
pub mod distribution;

pub use types::{
    default_bands, DensityBand, DistributionError, PlanError, Subnet, DEFAULT_BANDS, SINGLE_BAND,
    SMALL_NETWORK_THRESHOLD,
};
pub use planner::{
    count_subnets, next_plannable_count, plan_subnets, plan_subnets_in, planned_capacity,
    validate_bands,
};
pub use distribution::{allocate, verify_allocation, Allocation, AllocationError};
