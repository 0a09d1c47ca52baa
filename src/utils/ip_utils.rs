//! IP utility functions for /24 blocks

use std::net::Ipv4Addr;

/// Number of usable host addresses in a /24 block (network and broadcast excluded)
pub const USABLE_HOSTS_PER_BLOCK: usize = 254;

/// Format a /24 block as CIDR notation, e.g. "10.0.3.0/24"
pub fn format_block_cidr(block: Ipv4Addr) -> String {
    format!("{}/24", block)
}

/// First usable host address of a /24 block (the ".1" address)
pub fn first_host(block: Ipv4Addr) -> Ipv4Addr {
    Ipv4Addr::from(u32::from(block) + 1)
}

/// Host address at a 0-based offset from the first usable address of a block.
///
/// Returns `None` when the offset would leave the usable range.
pub fn host_at(block: Ipv4Addr, offset: usize) -> Option<Ipv4Addr> {
    if offset >= USABLE_HOSTS_PER_BLOCK {
        return None;
    }
    Some(Ipv4Addr::from(u32::from(block) + 1 + offset as u32))
}
