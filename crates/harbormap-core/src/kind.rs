//! Object kind definitions
//!
//! The kinds mirror the host catalog's mapping configuration. Keeping
//! them as a closed enum (instead of free-form strings) means a resync
//! dispatch over kinds is checked for exhaustiveness at compile time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One category of object this integration can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Account,
    Zone,
    DnsRecord,
    ZerotrustAccessApplication,
    ZerotrustTunnel,
    ZerotrustTunnelConfiguration,
}

impl ObjectKind {
    /// All kinds, in the order a full resync walks them
    pub const ALL: [ObjectKind; 6] = [
        ObjectKind::Account,
        ObjectKind::Zone,
        ObjectKind::DnsRecord,
        ObjectKind::ZerotrustAccessApplication,
        ObjectKind::ZerotrustTunnel,
        ObjectKind::ZerotrustTunnelConfiguration,
    ];

    /// The string key used by the host mapping configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Account => "account",
            ObjectKind::Zone => "zone",
            ObjectKind::DnsRecord => "dns_record",
            ObjectKind::ZerotrustAccessApplication => "zerotrust_access_application",
            ObjectKind::ZerotrustTunnel => "zerotrust_tunnel",
            ObjectKind::ZerotrustTunnelConfiguration => "zerotrust_tunnel_configuration",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "account" => Ok(ObjectKind::Account),
            "zone" => Ok(ObjectKind::Zone),
            "dns_record" => Ok(ObjectKind::DnsRecord),
            "zerotrust_access_application" => Ok(ObjectKind::ZerotrustAccessApplication),
            "zerotrust_tunnel" => Ok(ObjectKind::ZerotrustTunnel),
            "zerotrust_tunnel_configuration" => Ok(ObjectKind::ZerotrustTunnelConfiguration),
            other => Err(CoreError::UnknownKind(other.to_string())),
        }
    }
}
