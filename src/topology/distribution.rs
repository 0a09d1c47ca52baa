//! Role distribution across planned subnets.
//!
//! Every unit of every role is placed in a subnet picked uniformly at random
//! among those that still have room. Subnets leave the candidate list the
//! moment they fill, so each placement is O(1) and the loop always ends.
//!
//! Only aggregate counts are guaranteed: each role's units are all placed,
//! and each subnet ends up holding exactly its capacity.

use log::{debug, info};
use rand::Rng;

use super::types::Subnet;
use crate::roles::{Role, RoleCount};

/// Allocation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("Subnet capacity {capacity} does not match the {requested} hosts requested by role counts")]
    CapacityMismatch { capacity: usize, requested: usize },

    #[error("Allocation invariant violated: {0}")]
    InvariantViolation(String),
}

/// Subnets with their final role assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub subnets: Vec<Subnet>,
}

impl Allocation {
    /// Hosts placed across all subnets
    pub fn total_hosts(&self) -> usize {
        self.subnets.iter().map(Subnet::placed).sum()
    }

    /// Per-role totals across all subnets
    pub fn role_totals(&self) -> RoleCount {
        self.subnets
            .iter()
            .flat_map(|subnet| subnet.role_counts.iter())
            .collect()
    }
}

/// Place every role unit in `role_counts` into `subnets`.
///
/// The remaining capacity of all subnets must equal the role total; this is
/// checked before anything is placed.
pub fn allocate<R: Rng + ?Sized>(
    mut subnets: Vec<Subnet>,
    role_counts: &RoleCount,
    rng: &mut R,
) -> Result<Allocation, AllocationError> {
    let capacity: usize = subnets.iter().map(|s| s.remaining).sum();
    let requested = role_counts.total();
    if capacity != requested {
        return Err(AllocationError::CapacityMismatch { capacity, requested });
    }

    // Indices of subnets that can still take a host
    let mut open: Vec<usize> = (0..subnets.len())
        .filter(|&i| subnets[i].remaining > 0)
        .collect();

    for (role, count) in role_counts.non_zero() {
        for _ in 0..count {
            if open.is_empty() {
                return Err(AllocationError::InvariantViolation(format!(
                    "ran out of subnet capacity while placing {}",
                    role
                )));
            }
            let slot = rng.gen_range(0..open.len());
            let subnet = &mut subnets[open[slot]];
            subnet.role_counts.add(role, 1);
            subnet.remaining -= 1;
            if subnet.remaining == 0 {
                open.swap_remove(slot);
            }
        }
        debug!("Placed {} {}", count, role);
    }

    let allocation = Allocation { subnets };
    verify_allocation(&allocation, role_counts)?;

    info!(
        "Allocated {} hosts across {} subnets",
        allocation.total_hosts(),
        allocation.subnets.len()
    );
    Ok(allocation)
}

/// Re-check an allocation against the role counts it was built from.
///
/// Every role must be fully placed and every subnet exactly full.
pub fn verify_allocation(allocation: &Allocation, role_counts: &RoleCount) -> Result<(), AllocationError> {
    let placed = allocation.role_totals();
    for role in Role::ALL {
        if placed.get(role) != role_counts.get(role) {
            return Err(AllocationError::InvariantViolation(format!(
                "{} placed {} of {} requested",
                role,
                placed.get(role),
                role_counts.get(role)
            )));
        }
    }

    for (i, subnet) in allocation.subnets.iter().enumerate() {
        let held = subnet.placed();
        if held != subnet.capacity || subnet.remaining != 0 {
            return Err(AllocationError::InvariantViolation(format!(
                "subnet {} ({}) holds {} hosts with {} remaining, capacity {}",
                i + 1,
                subnet.netmask,
                held,
                subnet.remaining,
                subnet.capacity
            )));
        }
    }

    Ok(())
}
