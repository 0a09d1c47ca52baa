//! Role distribution over the node population.
//!
//! Splits a node count into per-role counts using the default ratio table,
//! optionally replacing some counts with caller overrides. The "Unknown" role
//! absorbs whatever rounding or overrides leave unassigned, so the counts
//! always add up to the requested total.

use std::collections::BTreeMap;

use log::debug;

use super::types::{Role, RoleCount};

/// Errors raised while applying role overrides
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleError {
    #[error("Role '{role}': {requested} hosts requested but only {remaining} of the node count remain")]
    OverrideExceedsTotal {
        role: Role,
        requested: usize,
        remaining: usize,
    },
}

/// Default role breakdown for `total` nodes.
///
/// Each role gets `floor(total * percent / 100)`; the shortfall left by
/// flooring goes to Unknown.
pub fn default_role_distribution(total: usize) -> RoleCount {
    let mut counts: RoleCount = Role::ALL
        .into_iter()
        .map(|role| (role, total * role.default_percent() / 100))
        .collect();

    let assigned = counts.total();
    if total > assigned {
        counts.add(Role::Unknown, total - assigned);
    }

    debug!("Default role distribution for {} nodes: {:?}", total, counts);
    counts
}

/// Role breakdown for `total` nodes with some counts fixed by the caller.
///
/// Overridden roles are placed first and must fit within `total`. The
/// remaining roles keep their default counts, clipped to what is left, in
/// table order. Whatever is still unassigned is swept into Unknown.
pub fn apply_role_overrides(
    total: usize,
    overrides: &BTreeMap<Role, usize>,
) -> Result<RoleCount, RoleError> {
    let defaults = default_role_distribution(total);
    let mut counts = RoleCount::zeroed();
    let mut remaining = total;

    for (&role, &requested) in overrides {
        if requested > remaining {
            return Err(RoleError::OverrideExceedsTotal {
                role,
                requested,
                remaining,
            });
        }
        counts.set(role, requested);
        remaining -= requested;
    }

    for role in Role::ALL {
        if overrides.contains_key(&role) {
            continue;
        }
        let count = defaults.get(role).min(remaining);
        counts.set(role, count);
        remaining -= count;
    }

    if remaining > 0 {
        debug!("Sweeping {} unassigned nodes into {}", remaining, Role::Unknown);
        counts.add(Role::Unknown, remaining);
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_distribution_for_500() {
        let counts = default_role_distribution(500);
        assert_eq!(counts.get(Role::BusinessWorkstation), 175);
        assert_eq!(counts.get(Role::DeveloperWorkstation), 75);
        assert_eq!(counts.get(Role::Smartphone), 140);
        assert_eq!(counts.get(Role::Printer), 15);
        assert_eq!(counts.get(Role::InternalWebServer), 30);
        assert_eq!(counts.get(Role::VoipPhone), 0);
        assert_eq!(counts.get(Role::Unknown), 20);
        assert_eq!(counts.total(), 500);
    }

    #[test]
    fn test_default_distribution_always_sums_to_total() {
        for total in (0..=1000).chain([4_000_000, 1_234_567]) {
            assert_eq!(default_role_distribution(total).total(), total, "total {}", total);
        }
    }

    #[test]
    fn test_rounding_shortfall_goes_to_unknown() {
        // 7 nodes: only the three workstation and phone roles survive flooring
        let counts = default_role_distribution(7);
        assert_eq!(counts.get(Role::BusinessWorkstation), 2);
        assert_eq!(counts.get(Role::DeveloperWorkstation), 1);
        assert_eq!(counts.get(Role::Smartphone), 1);
        assert_eq!(counts.get(Role::Unknown), 3);
        assert_eq!(counts.total(), 7);
    }

    #[test]
    fn test_zero_nodes() {
        let counts = default_role_distribution(0);
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.non_zero().count(), 0);
    }

    #[test]
    fn test_override_replaces_counts_and_sweeps_remainder() {
        let mut overrides = BTreeMap::new();
        overrides.insert(Role::Smartphone, 10);
        overrides.insert(Role::VoipPhone, 25);

        let counts = apply_role_overrides(500, &overrides).unwrap();
        assert_eq!(counts.get(Role::Smartphone), 10);
        assert_eq!(counts.get(Role::VoipPhone), 25);
        assert_eq!(counts.get(Role::BusinessWorkstation), 175);
        // 140 default smartphones minus 10, minus 25 phones, plus the default 20
        assert_eq!(counts.get(Role::Unknown), 20 + 130 - 25);
        assert_eq!(counts.total(), 500);
    }

    #[test]
    fn test_override_clips_later_defaults() {
        let mut overrides = BTreeMap::new();
        overrides.insert(Role::Printer, 90);

        let counts = apply_role_overrides(100, &overrides).unwrap();
        assert_eq!(counts.get(Role::Printer), 90);
        // Business workstations default to 35 but only 10 remain
        assert_eq!(counts.get(Role::BusinessWorkstation), 10);
        assert_eq!(counts.get(Role::DeveloperWorkstation), 0);
        assert_eq!(counts.get(Role::Unknown), 0);
        assert_eq!(counts.total(), 100);
    }

    #[test]
    fn test_override_exceeding_total_fails() {
        let mut overrides = BTreeMap::new();
        overrides.insert(Role::BusinessWorkstation, 60);
        overrides.insert(Role::Smartphone, 50);

        let err = apply_role_overrides(100, &overrides).unwrap_err();
        assert_eq!(
            err,
            RoleError::OverrideExceedsTotal {
                role: Role::Smartphone,
                requested: 50,
                remaining: 40,
            }
        );
        assert!(err.to_string().contains("Smartphones"));
    }

    #[test]
    fn test_empty_override_matches_defaults() {
        let counts = apply_role_overrides(1234, &BTreeMap::new()).unwrap();
        assert_eq!(counts, default_role_distribution(1234));
    }
}
