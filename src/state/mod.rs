//! Resource data: the attribute tree of one resource plus its identifier.
//!
//! The tree is plain `serde_json` data. Blocks declared with at most one
//! element are lists holding a single map, so `cors_headers` reads as
//! `[{"allow_all_origins": true, ...}]`. Nested blocks are decoded into typed
//! structs through serde after null entries are pruned, so that absent and
//! null both mean "not set".

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};

/// Mutable attribute store handed to the resource handlers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    /// Remote identifier; empty when the resource does not exist
    #[serde(default, skip_serializing_if = "String::is_empty")]
    id: String,

    /// Top-level attributes
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl ResourceData {
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self {
            id: String::new(),
            attributes,
        }
    }

    /// Seed an empty store with an identifier, as an import does.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Mark the resource as absent.
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    pub fn is_gone(&self) -> bool {
        self.id.is_empty()
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.attributes
    }

    /// Raw value at `key`, null included.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Value at `key` when it is explicitly set.
    ///
    /// Null, empty strings and empty collections count as unset. `false` and
    /// `0` count as set.
    pub fn get_ok(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|value| is_set(value))
    }

    /// Non-empty string at `key`.
    pub fn string(&self, key: &str) -> Option<String> {
        self.get_ok(key).and_then(Value::as_str).map(str::to_string)
    }

    /// Boolean at `key`, `false` when absent.
    pub fn flag(&self, key: &str) -> bool {
        self.opt_flag(key).unwrap_or(false)
    }

    /// Boolean at `key` only when present.
    pub fn opt_flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// List or set of strings at `key`; empty when absent.
    pub fn strings(&self, key: &str) -> Result<Vec<String>> {
        match self.get_ok(key) {
            None => Ok(Vec::new()),
            Some(value) => decode(key, value),
        }
    }

    /// First element of a single-item block list, decoded into `T`.
    pub fn block<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(value) = self.get_ok(key) else {
            return Ok(None);
        };
        let items = value.as_array().ok_or_else(|| SchemaError::Parse {
            field: key.to_string(),
            message: "expected a list of blocks".to_string(),
        })?;
        match items.first() {
            None => Ok(None),
            Some(first) => decode(&format!("{key}.0"), first).map(Some),
        }
    }

    /// Every element of a block list or set, decoded into `T`.
    pub fn blocks<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.get_ok(key) {
            None => Ok(Vec::new()),
            Some(value) => decode(key, value),
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.attributes.insert(key.to_string(), value.into());
    }
}

/// Whether a value counts as explicitly configured.
pub fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Drop null map entries recursively so optional struct fields fall back to defaults.
pub fn prune_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), prune_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(prune_nulls).collect()),
        other => other.clone(),
    }
}

/// Decode a sub-tree into `T`, reporting shape mismatches against `field`.
pub fn decode<T: DeserializeOwned>(field: &str, value: &Value) -> Result<T> {
    serde_json::from_value(prune_nulls(value)).map_err(|e| {
        SchemaError::Parse {
            field: field.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Persisted state of a single resource instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    /// Resource type name, e.g. `cloudflare_zero_trust_dns_location`
    pub resource: String,

    #[serde(flatten)]
    pub data: ResourceData,
}

impl StateFile {
    pub fn new(resource: impl Into<String>, data: ResourceData) -> Self {
        Self {
            resource: resource.into(),
            data,
        }
    }

    /// Load state from `path`; `None` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }
}
