//! `destinations` of self-hosted, SSH and VNC applications.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::client::models::{AccessDestination, DestinationType};
use crate::error::Result;
use crate::state::ResourceData;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DestinationBlock {
    #[serde(rename = "type")]
    kind: String,
    uri: String,
}

pub fn expand_destinations(d: &ResourceData) -> Result<Vec<AccessDestination>> {
    d.blocks::<DestinationBlock>("destinations")?
        .into_iter()
        .map(|block| -> Result<AccessDestination> {
            let kind = if block.kind.is_empty() {
                DestinationType::Public
            } else {
                block.kind.parse::<DestinationType>()?
            };
            Ok(AccessDestination {
                kind,
                uri: block.uri,
            })
        })
        .collect()
}

pub fn flatten_destinations(destinations: &[AccessDestination]) -> Value {
    Value::Array(
        destinations
            .iter()
            .map(|dest| json!({ "type": dest.kind.as_str(), "uri": dest.uri }))
            .collect(),
    )
}
