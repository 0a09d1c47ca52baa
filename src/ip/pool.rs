//! Address pool for subnet blocks.
//!
//! Hands out /24 blocks in order from a private address range. Blocks are
//! never handed out twice within a run.

use std::net::Ipv4Addr;
use std::str::FromStr;

use cidr::Ipv4Cidr;

/// Default pool: every /24 under 10.0.0.0/8
pub const DEFAULT_POOL: &str = "10.0.0.0/8";

/// Errors raised while building or drawing from an address pool
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("Invalid address pool '{cidr}': {reason}")]
    InvalidPool { cidr: String, reason: String },

    #[error("Address pool {cidr} exhausted after {allocated} /24 blocks")]
    Exhausted { cidr: String, allocated: usize },
}

/// Sequential /24 block allocator over a private CIDR range
#[derive(Debug, Clone)]
pub struct SubnetPool {
    cidr: Ipv4Cidr,
    /// Number of /24 blocks the pool spans
    block_count: usize,
    /// Blocks handed out so far
    next_index: usize,
}

impl SubnetPool {
    /// Build a pool over the given CIDR. The range must be RFC 1918 private
    /// and at least a /24.
    pub fn new(cidr: &str) -> Result<Self, PoolError> {
        let invalid = |reason: String| PoolError::InvalidPool {
            cidr: cidr.to_string(),
            reason,
        };

        let range = Ipv4Cidr::from_str(cidr.trim()).map_err(|e| invalid(e.to_string()))?;
        let prefix = range.network_length();
        if prefix > 24 {
            return Err(invalid(format!("/{} is smaller than a /24 block", prefix)));
        }
        if !range.first_address().is_private() || !range.last_address().is_private() {
            return Err(invalid("range is not entirely RFC 1918 private space".to_string()));
        }

        Ok(Self::over(range))
    }

    fn over(cidr: Ipv4Cidr) -> Self {
        SubnetPool {
            block_count: 1usize << (24 - cidr.network_length()),
            cidr,
            next_index: 0,
        }
    }

    /// The range this pool draws from
    pub fn cidr(&self) -> &Ipv4Cidr {
        &self.cidr
    }

    /// Blocks still available
    pub fn available(&self) -> usize {
        self.block_count - self.next_index
    }

    /// Blocks handed out so far
    pub fn allocated(&self) -> usize {
        self.next_index
    }

    /// Take the next unused /24 block, returning its network address
    pub fn next_block(&mut self) -> Result<Ipv4Addr, PoolError> {
        if self.next_index >= self.block_count {
            return Err(PoolError::Exhausted {
                cidr: self.cidr.to_string(),
                allocated: self.next_index,
            });
        }
        let base = u32::from(self.cidr.first_address());
        let block = Ipv4Addr::from(base + ((self.next_index as u32) << 8));
        self.next_index += 1;
        Ok(block)
    }
}

impl Default for SubnetPool {
    fn default() -> Self {
        Self::over(Ipv4Cidr::new(Ipv4Addr::new(10, 0, 0, 0), 8).expect("10.0.0.0/8 is a valid network"))
    }
}
