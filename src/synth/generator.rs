//! Cosmetic host field generation.
//!
//! Random identifiers, names and OS guesses for synthesized hosts. All
//! randomness comes from the caller's RNG so a seeded run is repeatable.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::roles::Role;

const LABEL_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Sources a record can claim to come from
pub const RECORD_SOURCES: [&str; 3] = ["p0f", "nmap", "BCF"];

/// Confidence values are drawn from this range
pub const CONFIDENCE_RANGE: std::ops::Range<u8> = 55..100;

/// OS label used when nothing is known
pub const UNKNOWN_OS: &str = "Unknown";

/// Lowercase alphanumeric string of the given length
pub fn random_label<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(LABEL_CHARS[rng.gen_range(0..LABEL_CHARS.len())]))
        .collect()
}

/// Random `<label>.local` domain, label 5-10 characters
pub fn generate_domain<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.gen_range(5..=10);
    format!("{}.local", random_label(rng, len))
}

/// Random rDNS host name, 4-8 characters
pub fn generate_hostname<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.gen_range(4..9);
    random_label(rng, len)
}

/// Random MAC address, lowercase hex, colon separated
pub fn generate_mac<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bytes: [u8; 6] = rng.gen();
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Random version 4 UUID drawn from the caller's RNG
pub fn generate_uid<R: Rng + ?Sized>(rng: &mut R) -> String {
    uuid::Builder::from_random_bytes(rng.gen())
        .into_uuid()
        .to_string()
}

pub fn generate_confidence<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(CONFIDENCE_RANGE)
}

pub fn pick_record_source<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    RECORD_SOURCES.choose(rng).copied().unwrap_or(RECORD_SOURCES[0])
}

/// Operating systems a host with this role may plausibly run
pub fn os_candidates(role: Role) -> &'static [&'static str] {
    match role {
        Role::BusinessWorkstation
        | Role::DeveloperWorkstation
        | Role::MailServer
        | Role::FileServer
        | Role::InternalWebServer
        | Role::DatabaseServer
        | Role::CodeRepository
        | Role::SshServer => &["Windows", "Linux", "Mac OS X", "BSD"],
        Role::Smartphone => &["iOS", "Android", "Blackberry"],
        Role::DnsServer => &["Windows", "Linux", "Mac OS X", "BSD", "Cisco IOS"],
        Role::Printer | Role::Pbx => &["Linux", UNKNOWN_OS, "Windows"],
        Role::DhcpServer => &["Linux", UNKNOWN_OS, "Windows", "BSD", "Cisco IOS"],
        Role::ActiveDirectoryController => &[UNKNOWN_OS, "Windows"],
        Role::VoipPhone => &["Linux", "Windows", UNKNOWN_OS],
        Role::Unknown => &[UNKNOWN_OS],
    }
}

/// Pick an OS for a host with this role
pub fn generate_os<R: Rng + ?Sized>(role: Role, rng: &mut R) -> &'static str {
    os_candidates(role).choose(rng).copied().unwrap_or(UNKNOWN_OS)
}
