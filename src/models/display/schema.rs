//! Schema attribute display model

use serde::Serialize;
use tabled::Tabled;

use super::common::render_value;
use crate::schema::{Field, Schema};

/// One attribute of a resource schema; nested block attributes use dotted paths.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FieldDisplay {
    #[tabled(rename = "ATTRIBUTE")]
    pub path: String,

    #[tabled(rename = "TYPE")]
    #[serde(rename = "type")]
    pub kind: String,

    #[tabled(rename = "PRESENCE")]
    pub presence: String,

    #[tabled(rename = "DEFAULT")]
    pub default: String,

    #[tabled(rename = "NOTES")]
    pub notes: String,
}

fn notes(field: &Field) -> String {
    let mut notes = Vec::new();
    if field.force_new {
        notes.push("forces replacement".to_string());
    }
    if field.sensitive || field.conceal_in_state {
        notes.push("sensitive".to_string());
    }
    if let Some(max) = field.max_items {
        notes.push(format!("max {max}"));
    }
    if !field.conflicts_with.is_empty() {
        notes.push(format!("conflicts with {}", field.conflicts_with.join(", ")));
    }
    if field.deprecated.is_some() {
        notes.push("deprecated".to_string());
    }
    notes.join("; ")
}

fn collect(prefix: &str, schema: &Schema, rows: &mut Vec<FieldDisplay>) {
    for (name, field) in schema.iter() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };
        rows.push(FieldDisplay {
            path: path.clone(),
            kind: field.kind.label(),
            presence: field.presence.label().to_string(),
            default: field.default.as_ref().map(render_value).unwrap_or_default(),
            notes: notes(field),
        });
        if let Some(block) = field.kind.block() {
            collect(&path, block, rows);
        }
    }
}

impl FieldDisplay {
    /// Every attribute of `schema`, depth first in declaration order.
    pub fn rows(schema: &Schema) -> Vec<FieldDisplay> {
        let mut rows = Vec::new();
        collect("", schema, &mut rows);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::access_application::schema::access_application_schema;
    use crate::resources::teams_location::schema::teams_location_schema;

    #[test]
    fn test_nested_blocks_use_dotted_paths() {
        let rows = FieldDisplay::rows(&access_application_schema());
        let secret = rows
            .iter()
            .find(|r| r.path == "saas_app.client_secret")
            .unwrap();
        assert_eq!(secret.presence, "computed");
        assert!(secret.notes.contains("sensitive"));

        assert!(rows.iter().any(|r| r.path == "scim_config.mappings.operations.create"));
    }

    #[test]
    fn test_defaults_and_notes() {
        let rows = FieldDisplay::rows(&access_application_schema());
        let kind = rows.iter().find(|r| r.path == "type").unwrap();
        assert_eq!(kind.default, "self_hosted");

        let account = rows.iter().find(|r| r.path == "account_id").unwrap();
        assert!(account.notes.contains("forces replacement"));
        assert!(account.notes.contains("conflicts with zone_id"));
    }

    #[test]
    fn test_location_schema_rows() {
        let rows = FieldDisplay::rows(&teams_location_schema());
        let name = rows.iter().find(|r| r.path == "name").unwrap();
        assert_eq!(name.presence, "required");
        assert_eq!(name.kind, "string");
    }
}
