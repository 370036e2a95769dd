//! Plan display model

use std::fmt;

use serde::Serialize;
use tabled::Tabled;

/// What an apply would do with an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanAction {
    Create,
    Update,
    Replace,
}

impl fmt::Display for PlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlanAction::Create => "create",
            PlanAction::Update => "update in-place",
            PlanAction::Replace => "forces replacement",
        };
        f.write_str(label)
    }
}

/// One planned attribute change.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PlanDisplay {
    #[tabled(rename = "ATTRIBUTE")]
    pub attribute: String,

    #[tabled(rename = "ACTION")]
    pub action: PlanAction,
}

impl PlanDisplay {
    pub fn new(attribute: impl Into<String>, action: PlanAction) -> Self {
        Self {
            attribute: attribute.into(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_labels() {
        assert_eq!(PlanAction::Replace.to_string(), "forces replacement");
        assert_eq!(
            serde_json::to_value(PlanDisplay::new("zone_id", PlanAction::Replace)).unwrap(),
            serde_json::json!({ "attribute": "zone_id", "action": "replace" })
        );
    }
}
