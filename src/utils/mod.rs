//! Shared utilities: input validation and IP helpers.

pub mod ip_utils;
pub mod validation;

pub use validation::{
    validate_band, validate_band_capacity, validate_domain, validate_node_count,
    validate_role_count, ValidationError, MAX_NODES,
};
