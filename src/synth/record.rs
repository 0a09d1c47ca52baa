//! Host record data structures.
//!
//! Field names and order follow the emitted JSON layout.

use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// One synthesized host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    pub uid: String,
    pub mac: String,
    #[serde(rename = "IP")]
    pub ip: String,
    pub netmask: String,
    #[serde(rename = "rDNS_host")]
    pub rdns_host: String,
    #[serde(rename = "rDNS_domain", skip_serializing_if = "Option::is_none", default)]
    pub rdns_domain: Option<String>,
    pub record: RecordSource,
    pub role: RoleGuess,
    pub os: OsGuess,
}

/// Where the observation supposedly came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSource {
    pub source: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleGuess {
    pub role: Role,
    pub confidence: u8,
}

/// OS guess; no confidence is reported for an unknown OS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsGuess {
    pub os: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub confidence: Option<u8>,
}
