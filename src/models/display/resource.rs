//! Resource type display model

use serde::Serialize;
use tabled::Tabled;

use super::common::truncate_string;
use crate::resources::ResourceDefinition;

/// Registered resource type for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ResourceDisplay {
    #[tabled(rename = "RESOURCE")]
    pub name: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<&ResourceDefinition> for ResourceDisplay {
    fn from(def: &ResourceDefinition) -> Self {
        let status = if def.deprecation_message.is_some() {
            "deprecated"
        } else {
            "active"
        };
        Self {
            name: def.name.to_string(),
            status: status.to_string(),
            description: truncate_string(def.description, 80),
        }
    }
}
