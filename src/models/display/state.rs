//! Resource state display model

use serde::Serialize;
use tabled::Tabled;

use super::common::render_value;
use crate::state::{ResourceData, is_set};

/// A stored attribute and its rendered value.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AttributeDisplay {
    #[tabled(rename = "ATTRIBUTE")]
    pub name: String,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

impl AttributeDisplay {
    /// The id followed by every set attribute, in key order.
    pub fn rows(d: &ResourceData) -> Vec<AttributeDisplay> {
        let id = AttributeDisplay {
            name: "id".to_string(),
            value: d.id().to_string(),
        };
        std::iter::once(id)
            .chain(
                d.attributes()
                    .iter()
                    .filter(|(_, v)| is_set(v))
                    .map(|(name, value)| AttributeDisplay {
                        name: name.clone(),
                        value: render_value(value),
                    }),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_skip_unset_attributes() {
        let mut d = ResourceData::with_id("loc-1");
        d.set("name", "office");
        d.set("ip", "");
        d.set("client_default", false);
        d.set("networks", json!([{ "network": "192.0.2.0/24" }]));

        let rows = AttributeDisplay::rows(&d);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["id", "client_default", "name", "networks"]);
        assert_eq!(rows[0].value, "loc-1");
        assert_eq!(rows[3].value, r#"[{"network":"192.0.2.0/24"}]"#);
    }
}
