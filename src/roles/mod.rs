//! Device role definitions and distribution.

pub mod types;
pub mod distribution;

pub use types::{Role, RoleCount};
pub use distribution::{apply_role_overrides, default_role_distribution, RoleError};
