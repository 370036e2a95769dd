//! Gateway (Teams) DNS location models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationNetwork {
    /// Source network in CIDR notation
    pub network: String,
}

impl LocationNetwork {
    #[cfg(test)]
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4Endpoint {
    #[serde(default)]
    pub enabled: bool,

    /// Read-only hint from the service
    #[serde(default, skip_serializing)]
    pub authentication_enabled: bool,
}

/// Endpoint restricted to a set of source networks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEndpoint {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<LocationNetwork>,

    #[serde(default, skip_serializing)]
    pub authentication_enabled: bool,
}

/// DoT and DoH endpoints, which may also require a user token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEndpoint {
    #[serde(flatten)]
    pub endpoint: NetworkEndpoint,

    #[serde(default)]
    pub require_token: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEndpoints {
    #[serde(default)]
    pub ipv4: Ipv4Endpoint,

    #[serde(default)]
    pub ipv6: NetworkEndpoint,

    #[serde(default)]
    pub dot: TokenEndpoint,

    #[serde(default)]
    pub doh: TokenEndpoint,
}

/// Gateway DNS location. Fields without serialization are assigned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamsLocation {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub networks: Vec<LocationNetwork>,

    #[serde(default, skip_serializing)]
    pub ip: String,

    #[serde(default, skip_serializing)]
    pub doh_subdomain: String,

    #[serde(default, skip_serializing)]
    pub anonymized_logs_enabled: bool,

    #[serde(default, skip_serializing)]
    pub ipv4_destination: String,

    #[serde(default, skip_serializing)]
    pub ipv4_destination_backup: String,

    #[serde(default)]
    pub client_default: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecs_support: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_destination_ips_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_destination_ipv6_block_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<LocationEndpoints>,
}
