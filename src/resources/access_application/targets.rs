//! `target_criteria` of infrastructure applications.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::client::models::{InfrastructureProtocol, TargetContext};
use crate::error::{Result, SchemaError};
use crate::state::ResourceData;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AttributeBlock {
    name: String,
    values: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CriteriaBlock {
    port: i64,
    protocol: String,
    target_attributes: Vec<AttributeBlock>,
}

impl CriteriaBlock {
    fn into_context(self) -> Result<TargetContext> {
        let port = u16::try_from(self.port).map_err(|_| SchemaError::Parse {
            field: "target_criteria port".to_string(),
            message: format!("{} is not a valid port", self.port),
        })?;
        let protocol = self.protocol.parse::<InfrastructureProtocol>()?;

        // Repeated names add to the same entry.
        let mut target_attributes: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for attr in self.target_attributes {
            target_attributes.entry(attr.name).or_default().extend(attr.values);
        }

        Ok(TargetContext {
            port,
            protocol,
            target_attributes,
        })
    }
}

pub fn expand_target_criteria(d: &ResourceData) -> Result<Vec<TargetContext>> {
    d.blocks::<CriteriaBlock>("target_criteria")?
        .into_iter()
        .map(CriteriaBlock::into_context)
        .collect()
}

/// Names of the target attributes of criteria `index` as they appear in `d`.
fn prior_attribute_names(d: &ResourceData, index: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let attributes = d
        .get("target_criteria")
        .and_then(|v| v.get(index))
        .and_then(|c| c.get("target_attributes"))
        .and_then(Value::as_array);
    for name in attributes
        .into_iter()
        .flatten()
        .filter_map(|a| a.get("name").and_then(Value::as_str))
    {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Attribute value for the target criteria.
///
/// The service keys attributes by name, so they keep the order they have in
/// `d`; names `d` does not know follow, ordered by name.
pub fn flatten_target_criteria(d: &ResourceData, contexts: &[TargetContext]) -> Value {
    Value::Array(
        contexts
            .iter()
            .enumerate()
            .map(|(i, ctx)| {
                let mut names = prior_attribute_names(d, i);
                names.retain(|n| ctx.target_attributes.contains_key(n));
                for name in ctx.target_attributes.keys() {
                    if !names.contains(name) {
                        names.push(name.clone());
                    }
                }
                let attributes: Vec<Value> = names
                    .iter()
                    .map(|name| json!({ "name": name, "values": ctx.target_attributes[name] }))
                    .collect();
                json!({
                    "port": ctx.port,
                    "protocol": ctx.protocol.as_str(),
                    "target_attributes": attributes,
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn data(value: Value) -> ResourceData {
        match value {
            Value::Object(map) => ResourceData::new(map),
            _ => ResourceData::new(Map::new()),
        }
    }

    #[test]
    fn test_expand_accumulates_attributes() {
        let d = data(json!({
            "target_criteria": [{
                "port": 22,
                "protocol": "SSH",
                "target_attributes": [
                    { "name": "usernames", "values": ["root"] },
                    { "name": "hostname", "values": ["db-1"] },
                    { "name": "usernames", "values": ["ubuntu"] },
                ],
            }],
        }));
        let contexts = expand_target_criteria(&d).unwrap();
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].port, 22);
        assert_eq!(contexts[0].protocol, InfrastructureProtocol::Ssh);
        assert_eq!(contexts[0].target_attributes["usernames"], vec!["root", "ubuntu"]);
        assert_eq!(contexts[0].target_attributes["hostname"], vec!["db-1"]);
    }

    #[test]
    fn test_unknown_protocol_fails() {
        let d = data(json!({
            "target_criteria": [{ "port": 21, "protocol": "FTP", "target_attributes": [] }],
        }));
        let err = expand_target_criteria(&d).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse protocol: value must be one of SSH or RDP"
        );
    }

    #[test]
    fn test_out_of_range_port_fails() {
        let d = data(json!({ "target_criteria": [{ "port": 70000, "protocol": "RDP" }] }));
        let err = expand_target_criteria(&d).unwrap_err();
        assert!(err.to_string().contains("70000 is not a valid port"), "{err}");
    }

    fn rdp_context() -> TargetContext {
        TargetContext {
            port: 3389,
            protocol: InfrastructureProtocol::Rdp,
            target_attributes: BTreeMap::from([
                ("usernames".to_string(), vec!["admin".to_string()]),
                ("hostname".to_string(), vec!["win-1".to_string()]),
            ]),
        }
    }

    #[test]
    fn test_flatten_orders_unknown_attributes_by_name() {
        let d = data(json!({}));
        assert_eq!(
            flatten_target_criteria(&d, &[rdp_context()]),
            json!([{
                "port": 3389,
                "protocol": "RDP",
                "target_attributes": [
                    { "name": "hostname", "values": ["win-1"] },
                    { "name": "usernames", "values": ["admin"] },
                ],
            }])
        );
        assert_eq!(flatten_target_criteria(&d, &[]), json!([]));
    }

    #[test]
    fn test_flatten_keeps_configured_attribute_order() {
        let d = data(json!({
            "target_criteria": [{
                "port": 3389,
                "protocol": "RDP",
                "target_attributes": [
                    { "name": "usernames", "values": ["admin"] },
                    { "name": "region", "values": ["eu"] },
                ],
            }],
        }));
        let flattened = flatten_target_criteria(&d, &[rdp_context()]);
        assert_eq!(
            flattened[0]["target_attributes"],
            json!([
                { "name": "usernames", "values": ["admin"] },
                { "name": "hostname", "values": ["win-1"] },
            ])
        );
    }
}
