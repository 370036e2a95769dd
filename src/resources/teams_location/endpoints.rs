//! Conversion of the `endpoints` block.
//!
//! The block holds exactly one entry per endpoint kind. `authentication_enabled`
//! is a hint computed by the service: it is written on flatten and never read
//! on expand.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::client::models::{
    Ipv4Endpoint, LocationEndpoints, LocationNetwork, NetworkEndpoint, TokenEndpoint,
};
use crate::error::{Result, SchemaError};
use crate::state::decode;

/// Configurable fields of one endpoint entry.
#[derive(Debug, Default, Deserialize)]
struct EndpointBlock {
    #[serde(default)]
    enabled: bool,

    #[serde(default)]
    require_token: bool,

    #[serde(default)]
    networks: Vec<LocationNetwork>,
}

impl EndpointBlock {
    fn into_network_endpoint(self) -> NetworkEndpoint {
        NetworkEndpoint {
            enabled: self.enabled,
            networks: self.networks,
            authentication_enabled: false,
        }
    }

    fn into_token_endpoint(self) -> TokenEndpoint {
        let require_token = self.require_token;
        TokenEndpoint {
            endpoint: self.into_network_endpoint(),
            require_token,
        }
    }
}

fn parse_error(kind: &str, message: &str) -> SchemaError {
    SchemaError::Parse {
        field: format!("{kind} endpoint"),
        message: message.to_string(),
    }
}

/// First entry of the `kind` list inside the endpoints block.
fn endpoint_block(item: &serde_json::Map<String, Value>, kind: &str) -> Result<EndpointBlock> {
    let entries = item
        .get(kind)
        .and_then(Value::as_array)
        .ok_or_else(|| parse_error(kind, "expected a list of blocks"))?;
    let first = entries
        .first()
        .ok_or_else(|| parse_error(kind, "expected one block"))?;
    if !first.is_object() {
        return Err(parse_error(kind, "expected a block").into());
    }
    decode(&format!("{kind} endpoint"), first)
}

/// Build the endpoints request from the attribute value.
///
/// Absent or null yields `None`; a configured but empty list is an error.
pub fn expand_endpoints(value: Option<&Value>) -> Result<Option<LocationEndpoints>> {
    let value = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };
    let items = value.as_array().ok_or_else(|| SchemaError::Parse {
        field: "endpoints".to_string(),
        message: "expected a list of blocks".to_string(),
    })?;
    let Some(first) = items.first() else {
        return Err(SchemaError::Invalid("empty endpoint".to_string()).into());
    };
    let item = first.as_object().ok_or_else(|| SchemaError::Parse {
        field: "endpoint".to_string(),
        message: "expected a block".to_string(),
    })?;

    let ipv4 = endpoint_block(item, "ipv4")?;
    Ok(Some(LocationEndpoints {
        ipv4: Ipv4Endpoint {
            enabled: ipv4.enabled,
            authentication_enabled: false,
        },
        ipv6: endpoint_block(item, "ipv6")?.into_network_endpoint(),
        dot: endpoint_block(item, "dot")?.into_token_endpoint(),
        doh: endpoint_block(item, "doh")?.into_token_endpoint(),
    }))
}

fn flatten_networks(networks: &[LocationNetwork]) -> Value {
    Value::Array(
        networks
            .iter()
            .map(|n| json!({ "network": n.network }))
            .collect(),
    )
}

fn flatten_token_endpoint(endpoint: &TokenEndpoint) -> Value {
    json!([{
        "enabled": endpoint.endpoint.enabled,
        "authentication_enabled": endpoint.endpoint.authentication_enabled,
        "require_token": endpoint.require_token,
        "networks": flatten_networks(&endpoint.endpoint.networks),
    }])
}

/// Attribute value for the endpoints the service reported, one entry per kind.
pub fn flatten_endpoints(endpoints: Option<&LocationEndpoints>) -> Value {
    let defaults = LocationEndpoints::default();
    let endpoints = endpoints.unwrap_or(&defaults);
    json!([{
        "ipv4": [{
            "enabled": endpoints.ipv4.enabled,
            "authentication_enabled": endpoints.ipv4.authentication_enabled,
        }],
        "ipv6": [{
            "enabled": endpoints.ipv6.enabled,
            "authentication_enabled": endpoints.ipv6.authentication_enabled,
            "networks": flatten_networks(&endpoints.ipv6.networks),
        }],
        "dot": flatten_token_endpoint(&endpoints.dot),
        "doh": flatten_token_endpoint(&endpoints.doh),
    }])
}
