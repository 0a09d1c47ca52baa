//! Device role type definitions.
//!
//! This file contains the closed set of device roles hosts can be tagged
//! with, and the per-role count map used throughout generation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Device category assigned to a synthesized host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Business workstations", alias = "business_workstations")]
    BusinessWorkstation,
    #[serde(rename = "Developer workstations", alias = "developer_workstations")]
    DeveloperWorkstation,
    #[serde(rename = "Smartphones", alias = "smartphones")]
    Smartphone,
    #[serde(rename = "Printers", alias = "printers")]
    Printer,
    #[serde(rename = "Mail servers", alias = "mail_servers")]
    MailServer,
    #[serde(rename = "File servers", alias = "file_servers")]
    FileServer,
    #[serde(rename = "Internal web servers", alias = "internal_web_servers")]
    InternalWebServer,
    #[serde(rename = "Database servers", alias = "database_servers")]
    DatabaseServer,
    #[serde(rename = "Code repositories", alias = "code_repositories")]
    CodeRepository,
    #[serde(rename = "DNS servers", alias = "dns_servers")]
    DnsServer,
    #[serde(rename = "DHCP servers", alias = "dhcp_servers")]
    DhcpServer,
    #[serde(rename = "Active Directory controllers", alias = "active_directory_controllers")]
    ActiveDirectoryController,
    #[serde(rename = "SSH servers", alias = "ssh_servers")]
    SshServer,
    #[serde(rename = "VOIP phones", alias = "voip_phones")]
    VoipPhone,
    #[serde(rename = "PBXes", alias = "pbxes")]
    Pbx,
    /// Catch-all absorbing rounding shortfalls
    #[serde(rename = "Unknown", alias = "unknown")]
    Unknown,
}

impl Role {
    /// Every role, in default table order
    pub const ALL: [Role; 16] = [
        Role::BusinessWorkstation,
        Role::DeveloperWorkstation,
        Role::Smartphone,
        Role::Printer,
        Role::MailServer,
        Role::FileServer,
        Role::InternalWebServer,
        Role::DatabaseServer,
        Role::CodeRepository,
        Role::DnsServer,
        Role::DhcpServer,
        Role::ActiveDirectoryController,
        Role::SshServer,
        Role::VoipPhone,
        Role::Pbx,
        Role::Unknown,
    ];

    /// Display name, as written to host records
    pub fn name(&self) -> &'static str {
        match self {
            Role::BusinessWorkstation => "Business workstations",
            Role::DeveloperWorkstation => "Developer workstations",
            Role::Smartphone => "Smartphones",
            Role::Printer => "Printers",
            Role::MailServer => "Mail servers",
            Role::FileServer => "File servers",
            Role::InternalWebServer => "Internal web servers",
            Role::DatabaseServer => "Database servers",
            Role::CodeRepository => "Code repositories",
            Role::DnsServer => "DNS servers",
            Role::DhcpServer => "DHCP servers",
            Role::ActiveDirectoryController => "Active Directory controllers",
            Role::SshServer => "SSH servers",
            Role::VoipPhone => "VOIP phones",
            Role::Pbx => "PBXes",
            Role::Unknown => "Unknown",
        }
    }

    /// Default share of the node population, in percent
    pub fn default_percent(&self) -> usize {
        match self {
            Role::BusinessWorkstation => 35,
            Role::DeveloperWorkstation => 15,
            Role::Smartphone => 28,
            Role::Printer => 3,
            Role::MailServer => 1,
            Role::FileServer => 2,
            Role::InternalWebServer => 6,
            Role::DatabaseServer => 1,
            Role::CodeRepository => 1,
            Role::DnsServer => 1,
            Role::DhcpServer => 1,
            Role::ActiveDirectoryController => 1,
            Role::SshServer => 1,
            Role::VoipPhone => 0,
            Role::Pbx => 0,
            Role::Unknown => 4,
        }
    }

    /// Look up a role by display name or snake_case alias, ignoring case
    pub fn from_name(name: &str) -> Option<Role> {
        let wanted = name.trim().to_ascii_lowercase().replace('_', " ");
        Role::ALL
            .into_iter()
            .find(|role| role.name().to_ascii_lowercase() == wanted)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Count of hosts per role.
///
/// Every role is always present; roles nobody set read as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCount {
    counts: BTreeMap<Role, usize>,
}

impl RoleCount {
    /// All roles at zero
    pub fn zeroed() -> Self {
        RoleCount {
            counts: Role::ALL.into_iter().map(|role| (role, 0)).collect(),
        }
    }

    pub fn get(&self, role: Role) -> usize {
        self.counts.get(&role).copied().unwrap_or(0)
    }

    pub fn set(&mut self, role: Role, count: usize) {
        self.counts.insert(role, count);
    }

    pub fn add(&mut self, role: Role, count: usize) {
        *self.counts.entry(role).or_insert(0) += count;
    }

    /// Sum over all roles
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate roles with their counts, in role order
    pub fn iter(&self) -> impl Iterator<Item = (Role, usize)> + '_ {
        self.counts.iter().map(|(role, count)| (*role, *count))
    }

    /// Roles with a non-zero count
    pub fn non_zero(&self) -> impl Iterator<Item = (Role, usize)> + '_ {
        self.iter().filter(|(_, count)| *count > 0)
    }
}

impl Default for RoleCount {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl FromIterator<(Role, usize)> for RoleCount {
    fn from_iter<I: IntoIterator<Item = (Role, usize)>>(iter: I) -> Self {
        let mut counts = RoleCount::zeroed();
        for (role, count) in iter {
            counts.add(role, count);
        }
        counts
    }
}
