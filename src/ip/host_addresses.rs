//! Host address assignment inside a subnet block.
//!
//! Every host in a subnet gets a distinct address from the block's usable
//! range (`.1` through `.254`).

use std::net::Ipv4Addr;

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::utils::ip_utils::{host_at, USABLE_HOSTS_PER_BLOCK};

/// How host addresses are laid out within a /24
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpLayout {
    /// Distinct addresses drawn at random from the usable range
    #[default]
    Random,
    /// Addresses `.1`, `.2`, ... in order
    Sequential,
}

/// Pick `count` unique host addresses in `block`.
///
/// Fails when more hosts are requested than a /24 can hold.
pub fn assign_host_addresses<R: Rng + ?Sized>(
    block: Ipv4Addr,
    count: usize,
    layout: IpLayout,
    rng: &mut R,
) -> Result<Vec<Ipv4Addr>, String> {
    if count > USABLE_HOSTS_PER_BLOCK {
        return Err(format!(
            "Cannot place {} hosts in {}/24 (max {})",
            count, block, USABLE_HOSTS_PER_BLOCK
        ));
    }

    let offsets: Vec<usize> = match layout {
        IpLayout::Sequential => (0..count).collect(),
        IpLayout::Random => index::sample(rng, USABLE_HOSTS_PER_BLOCK, count).into_vec(),
    };

    offsets
        .into_iter()
        .map(|offset| {
            host_at(block, offset).ok_or_else(|| format!("Offset {} outside {}/24", offset, block))
        })
        .collect()
}
