//! Host synthesis.
//!
//! Expands an allocation into one host record per placed unit and streams
//! the records to a JSON file.

pub mod record;
pub mod generator;
pub mod writer;

use chrono::Local;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::ip::{assign_host_addresses, IpLayout};
use crate::roles::Role;
use crate::topology::Subnet;
use generator::{
    generate_confidence, generate_hostname, generate_mac, generate_os, generate_uid,
    pick_record_source, UNKNOWN_OS,
};

pub use record::{HostRecord, OsGuess, RecordSource, RoleGuess};
pub use writer::{default_output_name, write_hosts, write_hosts_to_file};

/// Timestamp layout used in host records
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Errors raised while synthesizing or writing hosts
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("Addressing failed for subnet {netmask}: {reason}")]
    Addressing { netmask: String, reason: String },

    #[error("Failed to serialize host record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write host records: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the host records for one fully allocated subnet
pub fn synthesize_subnet<R: Rng + ?Sized>(
    subnet: &Subnet,
    layout: IpLayout,
    rng: &mut R,
) -> Result<Vec<HostRecord>, SynthError> {
    let mut roles: Vec<Role> = subnet
        .role_counts
        .non_zero()
        .flat_map(|(role, count)| std::iter::repeat(role).take(count))
        .collect();
    roles.shuffle(rng);

    let addresses = assign_host_addresses(subnet.network(), roles.len(), layout, rng).map_err(
        |reason| SynthError::Addressing {
            netmask: subnet.netmask.clone(),
            reason,
        },
    )?;

    let hosts = roles
        .into_iter()
        .zip(addresses)
        .map(|(role, ip)| {
            let os = generate_os(role, rng);
            HostRecord {
                uid: generate_uid(rng),
                mac: generate_mac(rng),
                ip: ip.to_string(),
                netmask: subnet.netmask.clone(),
                rdns_host: generate_hostname(rng),
                rdns_domain: subnet.domain.clone(),
                record: RecordSource {
                    source: pick_record_source(rng).to_string(),
                    timestamp: Local::now().format(RECORD_TIMESTAMP_FORMAT).to_string(),
                },
                role: RoleGuess {
                    role,
                    confidence: generate_confidence(rng),
                },
                os: OsGuess {
                    os: os.to_string(),
                    confidence: (os != UNKNOWN_OS).then(|| generate_confidence(rng)),
                },
            }
        })
        .collect();

    Ok(hosts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::RoleCount;
    use crate::synth::generator::CONFIDENCE_RANGE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::net::Ipv4Addr;

    fn allocated_subnet() -> Subnet {
        let mut subnet = Subnet::new(Ipv4Addr::new(10, 0, 9, 0), 200);
        subnet.role_counts = [(Role::Smartphone, 120), (Role::Unknown, 50), (Role::DnsServer, 30)]
            .into_iter()
            .collect::<RoleCount>();
        subnet.remaining = 0;
        subnet.domain = Some("acme.local".to_string());
        subnet
    }

    #[test]
    fn test_synthesize_subnet() {
        let mut rng = StdRng::seed_from_u64(8);
        let subnet = allocated_subnet();
        let hosts = synthesize_subnet(&subnet, IpLayout::Random, &mut rng).unwrap();
        assert_eq!(hosts.len(), 200);

        let ips: HashSet<&str> = hosts.iter().map(|h| h.ip.as_str()).collect();
        assert_eq!(ips.len(), 200);

        let roles: RoleCount = hosts.iter().map(|h| (h.role.role, 1)).collect();
        assert_eq!(roles, subnet.role_counts);

        for host in &hosts {
            assert!(host.ip.starts_with("10.0.9."));
            assert_eq!(host.netmask, "10.0.9.0/24");
            assert_eq!(host.rdns_domain.as_deref(), Some("acme.local"));
            assert!(CONFIDENCE_RANGE.contains(&host.role.confidence));
            match host.os.confidence {
                Some(c) => {
                    assert_ne!(host.os.os, UNKNOWN_OS);
                    assert!(CONFIDENCE_RANGE.contains(&c));
                }
                None => assert_eq!(host.os.os, UNKNOWN_OS),
            }
        }
    }

    #[test]
    fn test_unknown_role_has_unknown_os() {
        let mut rng = StdRng::seed_from_u64(9);
        let hosts = synthesize_subnet(&allocated_subnet(), IpLayout::Sequential, &mut rng).unwrap();
        assert!(hosts
            .iter()
            .filter(|h| h.role.role == Role::Unknown)
            .all(|h| h.os.os == UNKNOWN_OS && h.os.confidence.is_none()));
    }

    #[test]
    fn test_empty_subnet_yields_no_hosts() {
        let mut rng = StdRng::seed_from_u64(10);
        let subnet = Subnet::new(Ipv4Addr::new(10, 0, 0, 0), 0);
        assert!(synthesize_subnet(&subnet, IpLayout::Random, &mut rng).unwrap().is_empty());
    }
}
