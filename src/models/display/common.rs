//! Common display utilities and helpers

use serde_json::Value;

use crate::secret::is_concealed;

/// Shown in place of a concealed value
pub const SENSITIVE: &str = "(sensitive)";

/// Truncate string to max length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn mask(value: &Value) -> Value {
    match value {
        v if is_concealed(v) => Value::String(SENSITIVE.to_string()),
        Value::Array(items) => Value::Array(items.iter().map(mask).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), mask(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// One-line rendering of an attribute value; nested values print as compact JSON.
pub fn render_value(value: &Value) -> String {
    match mask(value) {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a rather long description", 10), "a rathe...");
    }

    #[test]
    fn test_render_scalars() {
        assert_eq!(render_value(&json!("office")), "office");
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!(null)), "");
    }

    #[test]
    fn test_render_masks_concealed_values() {
        let marker = crate::secret::conceal("hunter2");
        assert_eq!(render_value(&marker), SENSITIVE);

        let nested = json!([{ "client_id": "abc", "client_secret": marker }]);
        let rendered = render_value(&nested);
        assert!(rendered.contains("\"client_secret\":\"(sensitive)\""));
        assert!(!rendered.contains("redacted"));
    }
}
