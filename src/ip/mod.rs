//! IP address management module.
//!
//! This module hands out /24 blocks to planned subnets and picks unique
//! host addresses inside each block.

pub mod pool;
pub mod host_addresses;

// Re-export commonly used types
pub use pool::{PoolError, SubnetPool, DEFAULT_POOL};
pub use host_addresses::{assign_host_addresses, IpLayout};
