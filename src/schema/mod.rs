//! Declarative resource schemas.
//!
//! A [`Schema`] lists the attributes a resource accepts, with their types,
//! presence rules, defaults, validators, conflicts, deprecations and diff
//! suppression. The same declaration drives configuration validation, default
//! filling, state concealment of sensitive values and plan diffs.

use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};
use crate::secret;
use crate::state::is_set;

pub mod validation;

pub use validation::Validator;

/// Primitive attribute type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Bool,
    Int,
}

impl ValueType {
    fn matches(self, value: &Value) -> bool {
        match self {
            ValueType::String => value.is_string(),
            ValueType::Bool => value.is_boolean(),
            ValueType::Int => value.is_i64() || value.is_u64(),
        }
    }

    fn zero(self) -> Value {
        match self {
            ValueType::String => Value::String(String::new()),
            ValueType::Bool => Value::Bool(false),
            ValueType::Int => Value::from(0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Bool => "bool",
            ValueType::Int => "number",
        }
    }
}

/// Element of a list or set attribute.
#[derive(Debug)]
pub enum Elem {
    Value(ValueType),
    Block(Schema),
}

/// Shape of an attribute.
#[derive(Debug)]
pub enum FieldType {
    Scalar(ValueType),
    List(Elem),
    Set(Elem),
    Map(ValueType),
}

impl FieldType {
    /// Short type label used in schema listings.
    pub fn label(&self) -> String {
        let elem = |e: &Elem| match e {
            Elem::Value(t) => t.name().to_string(),
            Elem::Block(_) => "block".to_string(),
        };
        match self {
            FieldType::Scalar(t) => t.name().to_string(),
            FieldType::List(e) => format!("list({})", elem(e)),
            FieldType::Set(e) => format!("set({})", elem(e)),
            FieldType::Map(t) => format!("map({})", t.name()),
        }
    }

    /// Nested schema of a block list or block set.
    pub fn block(&self) -> Option<&Schema> {
        match self {
            FieldType::List(Elem::Block(s)) | FieldType::Set(Elem::Block(s)) => Some(s),
            _ => None,
        }
    }
}

/// Who supplies an attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// Set by the remote service only
    Computed,
    /// Configurable, otherwise filled by the remote service
    OptionalComputed,
}

impl Presence {
    pub fn label(self) -> &'static str {
        match self {
            Presence::Required => "required",
            Presence::Optional => "optional",
            Presence::Computed => "computed",
            Presence::OptionalComputed => "optional, computed",
        }
    }
}

/// Predicate that hides a diff the remote service would ignore anyway.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffSuppress {
    /// Suppress while the sibling `field` holds one of `values`
    WhenFieldIn {
        field: &'static str,
        values: &'static [&'static str],
    },
}

impl DiffSuppress {
    fn suppresses(&self, config: &Map<String, Value>) -> bool {
        match self {
            DiffSuppress::WhenFieldIn { field, values } => config
                .get(*field)
                .and_then(Value::as_str)
                .is_some_and(|v| values.contains(&v)),
        }
    }
}

/// A single attribute declaration.
#[derive(Debug)]
pub struct Field {
    pub kind: FieldType,
    pub presence: Presence,
    pub default: Option<Value>,
    pub description: &'static str,
    pub validators: Vec<Validator>,
    pub conflicts_with: Vec<&'static str>,
    pub deprecated: Option<&'static str>,
    pub sensitive: bool,
    pub conceal_in_state: bool,
    pub force_new: bool,
    pub max_items: Option<usize>,
    pub diff_suppress: Option<DiffSuppress>,
}

impl Field {
    fn of(kind: FieldType) -> Self {
        Self {
            kind,
            presence: Presence::Optional,
            default: None,
            description: "",
            validators: Vec::new(),
            conflicts_with: Vec::new(),
            deprecated: None,
            sensitive: false,
            conceal_in_state: false,
            force_new: false,
            max_items: None,
            diff_suppress: None,
        }
    }

    pub fn string() -> Self {
        Self::of(FieldType::Scalar(ValueType::String))
    }

    pub fn bool() -> Self {
        Self::of(FieldType::Scalar(ValueType::Bool))
    }

    pub fn int() -> Self {
        Self::of(FieldType::Scalar(ValueType::Int))
    }

    pub fn list_of(elem: ValueType) -> Self {
        Self::of(FieldType::List(Elem::Value(elem)))
    }

    pub fn set_of(elem: ValueType) -> Self {
        Self::of(FieldType::Set(Elem::Value(elem)))
    }

    pub fn map_of(elem: ValueType) -> Self {
        Self::of(FieldType::Map(elem))
    }

    /// Ordered list of nested blocks.
    pub fn block_list(schema: Schema) -> Self {
        Self::of(FieldType::List(Elem::Block(schema)))
    }

    /// Unordered set of nested blocks.
    pub fn block_set(schema: Schema) -> Self {
        Self::of(FieldType::Set(Elem::Block(schema)))
    }

    pub fn required(mut self) -> Self {
        self.presence = Presence::Required;
        self
    }

    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    pub fn computed(mut self) -> Self {
        self.presence = Presence::Computed;
        self
    }

    pub fn optional_computed(mut self) -> Self {
        self.presence = Presence::OptionalComputed;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn conflicts_with(mut self, fields: &[&'static str]) -> Self {
        self.conflicts_with.extend_from_slice(fields);
        self
    }

    pub fn deprecated(mut self, message: &'static str) -> Self {
        self.deprecated = Some(message);
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Store a redaction marker in state instead of the value.
    pub fn conceal_in_state(mut self) -> Self {
        self.conceal_in_state = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn diff_suppress(mut self, suppress: DiffSuppress) -> Self {
        self.diff_suppress = Some(suppress);
        self
    }

    fn zero(&self) -> Value {
        match &self.kind {
            FieldType::Scalar(t) => t.zero(),
            FieldType::List(_) | FieldType::Set(_) => Value::Array(Vec::new()),
            FieldType::Map(_) => Value::Object(Map::new()),
        }
    }

    fn check_value(&self, at: &str, value: &Value, diags: &mut Diagnostics) {
        match &self.kind {
            FieldType::Scalar(t) => {
                if !t.matches(value) {
                    diags.error(format!("{at}: expected {}, got {value}", t.name()));
                    return;
                }
                for validator in &self.validators {
                    if let Err(msg) = validator.check(at, value) {
                        diags.error(msg);
                    }
                }
            }
            FieldType::List(elem) | FieldType::Set(elem) => {
                let Some(items) = value.as_array() else {
                    diags.error(format!("{at}: expected a list, got {value}"));
                    return;
                };
                if let Some(max) = self.max_items {
                    if items.len() > max {
                        diags.error(format!(
                            "{at}: at most {max} item(s) allowed, got {}",
                            items.len()
                        ));
                    }
                }
                for (i, item) in items.iter().enumerate() {
                    let item_at = format!("{at}.{i}");
                    match elem {
                        Elem::Value(t) if t.matches(item) => {
                            for validator in &self.validators {
                                if let Err(msg) = validator.check(&item_at, item) {
                                    diags.error(msg);
                                }
                            }
                        }
                        Elem::Value(t) => {
                            diags.error(format!("{item_at}: expected {}, got {item}", t.name()))
                        }
                        Elem::Block(schema) => match item.as_object() {
                            Some(map) => schema.validate_map(&item_at, map, diags),
                            None => diags.error(format!("{item_at}: expected a block, got {item}")),
                        },
                    }
                }
            }
            FieldType::Map(t) => {
                let Some(map) = value.as_object() else {
                    diags.error(format!("{at}: expected a map, got {value}"));
                    return;
                };
                for (key, item) in map {
                    if !t.matches(item) {
                        diags.error(format!("{at}.{key}: expected {}, got {item}", t.name()));
                    }
                }
            }
        }
    }

    /// Normalized form used for comparisons: zero values filled in, computed
    /// attributes dropped, set members in a stable order.
    fn canonical(&self, value: Option<&Value>) -> Value {
        let value = match value {
            Some(v) if !v.is_null() => v,
            _ => return self.zero(),
        };
        match &self.kind {
            FieldType::List(Elem::Block(schema)) => match value.as_array() {
                Some(items) => Value::Array(items.iter().map(|i| schema.canonical_item(i)).collect()),
                None => value.clone(),
            },
            FieldType::Set(elem) => match value.as_array() {
                Some(items) => {
                    let mut items: Vec<Value> = match elem {
                        Elem::Block(schema) => items.iter().map(|i| schema.canonical_item(i)).collect(),
                        Elem::Value(_) => items.clone(),
                    };
                    items.sort_by_key(|i| i.to_string());
                    Value::Array(items)
                }
                None => value.clone(),
            },
            _ => value.clone(),
        }
    }
}

/// Validation outcome: errors block the operation, warnings are reported.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Diagnostics {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Diagnostics {
    fn error(&mut self, message: String) {
        self.errors.push(message);
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    #[cfg(test)]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Fail on any error, otherwise hand back the warnings.
    pub fn into_result(self) -> Result<Vec<String>> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(SchemaError::Diagnostics(self.errors).into())
        }
    }
}

/// Ordered attribute declarations of a resource or nested block.
#[derive(Debug, Default)]
pub struct Schema {
    fields: Vec<(&'static str, Field)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, field: Field) -> Self {
        self.fields.push((name, field));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Field)> {
        self.fields.iter().map(|(n, f)| (*n, f))
    }

    /// Check a configuration tree against the declaration.
    pub fn validate(&self, config: &Map<String, Value>) -> Diagnostics {
        let mut diags = Diagnostics::default();
        self.validate_map("", config, &mut diags);
        diags
    }

    fn validate_map(&self, path: &str, map: &Map<String, Value>, diags: &mut Diagnostics) {
        for key in map.keys() {
            if self.get(key).is_none() {
                diags.error(format!("{}: unsupported argument", join(path, key)));
            }
        }

        for (name, field) in &self.fields {
            let at = join(path, name);
            let value = map.get(*name).filter(|v| !v.is_null());

            match (value, field.presence) {
                (None, Presence::Required) => {
                    diags.error(format!("{at}: required field is not set"));
                    continue;
                }
                (Some(_), Presence::Computed) => {
                    diags.error(format!("{at}: value is computed and cannot be set"));
                    continue;
                }
                (None, _) => continue,
                _ => {}
            }

            let Some(value) = value else { continue };
            if let Some(message) = field.deprecated {
                diags.warn(format!("{at}: {message}"));
            }
            if is_set(value) {
                for other in &field.conflicts_with {
                    if map.get(*other).is_some_and(is_set) {
                        diags.error(format!("{at}: conflicts with {}", join(path, other)));
                    }
                }
            }
            field.check_value(&at, value, diags);
        }
    }

    /// Fill declared defaults for absent attributes, recursing into blocks.
    pub fn apply_defaults(&self, config: &mut Map<String, Value>) {
        for (name, field) in &self.fields {
            let missing = config.get(*name).is_none_or(Value::is_null);
            if missing {
                if let Some(default) = &field.default {
                    config.insert(name.to_string(), default.clone());
                }
                continue;
            }
            if let (Some(schema), Some(Value::Array(items))) =
                (field.kind.block(), config.get_mut(*name))
            {
                for item in items.iter_mut() {
                    if let Value::Object(map) = item {
                        schema.apply_defaults(map);
                    }
                }
            }
        }
    }

    /// Replace concealed attribute values with redaction markers, recursing into blocks.
    pub fn conceal(&self, attributes: &mut Map<String, Value>) {
        self.conceal_against(attributes, None);
    }

    /// Conceal like [`Schema::conceal`], reusing the salt of the marker at the
    /// same position in `prior` so equal values produce equal markers.
    fn conceal_against(
        &self,
        attributes: &mut Map<String, Value>,
        prior: Option<&Map<String, Value>>,
    ) {
        for (name, field) in &self.fields {
            let Some(value) = attributes.get_mut(*name) else {
                continue;
            };
            let old = prior.and_then(|p| p.get(*name));
            if field.conceal_in_state {
                if let Some(raw) = value.as_str().filter(|s| !s.is_empty()) {
                    *value = match old.and_then(secret::marker_salt) {
                        Some(salt) => secret::conceal_with_salt(raw, salt),
                        None => secret::conceal(raw),
                    };
                }
                continue;
            }
            if let (Some(schema), Value::Array(items)) = (field.kind.block(), value) {
                let old_items = old.and_then(Value::as_array);
                for (i, item) in items.iter_mut().enumerate() {
                    if let Value::Object(map) = item {
                        let old_item = old_items.and_then(|o| o.get(i)).and_then(Value::as_object);
                        schema.conceal_against(map, old_item);
                    }
                }
            }
        }
    }

    /// Copy computed attributes the configuration leaves unset from prior state.
    ///
    /// Blocks are merged element by element so nested computed values such as
    /// a SAAS client secret survive.
    pub fn merge_computed(&self, config: &mut Map<String, Value>, prior: &Map<String, Value>) {
        for (name, field) in &self.fields {
            let Some(old) = prior.get(*name).filter(|v| !v.is_null()) else {
                continue;
            };
            let current = config.get(*name).filter(|v| !v.is_null());
            match (current, field.presence) {
                (None, Presence::Computed | Presence::OptionalComputed) => {
                    config.insert(name.to_string(), old.clone());
                }
                (Some(_), _) => {
                    let Some(schema) = field.kind.block() else {
                        continue;
                    };
                    let (Some(Value::Array(items)), Some(old_items)) =
                        (config.get_mut(*name), old.as_array())
                    else {
                        continue;
                    };
                    for (item, old_item) in items.iter_mut().zip(old_items) {
                        if let (Value::Object(map), Some(old_map)) = (item, old_item.as_object()) {
                            schema.merge_computed(map, old_map);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn canonical_item(&self, item: &Value) -> Value {
        match item.as_object() {
            Some(map) => Value::Object(self.canonical_map(map)),
            None => item.clone(),
        }
    }

    fn canonical_map(&self, map: &Map<String, Value>) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|(_, f)| f.presence != Presence::Computed)
            .map(|(name, f)| (name.to_string(), f.canonical(map.get(*name))))
            .collect()
    }

    /// Top-level attributes whose configured value differs from prior state.
    ///
    /// Computed attributes the configuration leaves unset and suppressed
    /// diffs are not reported.
    pub fn changed_fields(
        &self,
        prior: &Map<String, Value>,
        config: &Map<String, Value>,
    ) -> Vec<&'static str> {
        let mut config = config.clone();
        self.apply_defaults(&mut config);
        self.conceal_against(&mut config, Some(prior));

        let mut changed = Vec::new();
        for (name, field) in &self.fields {
            if field.presence == Presence::Computed {
                continue;
            }
            let configured = config.get(*name).filter(|v| !v.is_null());
            if configured.is_none() && field.presence == Presence::OptionalComputed {
                continue;
            }
            if field.canonical(prior.get(*name)) == field.canonical(configured) {
                continue;
            }
            if field
                .diff_suppress
                .as_ref()
                .is_some_and(|s| s.suppresses(&config))
            {
                continue;
            }
            changed.push(*name);
        }
        changed
    }

    /// Paths of force-new attributes whose value changes, at any depth.
    pub fn replacement_paths(
        &self,
        prior: &Map<String, Value>,
        config: &Map<String, Value>,
    ) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_replacements("", prior, config, &mut paths);
        paths
    }

    fn collect_replacements(
        &self,
        path: &str,
        prior: &Map<String, Value>,
        config: &Map<String, Value>,
        paths: &mut Vec<String>,
    ) {
        for (name, field) in &self.fields {
            let at = join(path, name);
            let old = prior.get(*name).filter(|v| is_set(v));
            let new = config.get(*name).filter(|v| is_set(v));
            if field.force_new {
                if old.is_some() && old != new {
                    paths.push(at);
                }
                continue;
            }
            let Some(schema) = field.kind.block() else {
                continue;
            };
            let (Some(old_items), Some(new_items)) =
                (old.and_then(Value::as_array), new.and_then(Value::as_array))
            else {
                continue;
            };
            for (i, (o, n)) in old_items.iter().zip(new_items).enumerate() {
                if let (Some(o), Some(n)) = (o.as_object(), n.as_object()) {
                    schema.collect_replacements(&format!("{at}.{i}"), o, n, paths);
                }
            }
        }
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn sample() -> Schema {
        Schema::new()
            .field("name", Field::string().required())
            .field("aud", Field::string().computed())
            .field("type", Field::string().default("self_hosted"))
            .field(
                "session_duration",
                Field::string()
                    .default("24h")
                    .validate(Validator::Duration)
                    .diff_suppress(DiffSuppress::WhenFieldIn {
                        field: "type",
                        values: &["bookmark"],
                    }),
            )
            .field("destinations", Field::list_of(ValueType::String).conflicts_with(&["legacy"]))
            .field(
                "legacy",
                Field::set_of(ValueType::String)
                    .conflicts_with(&["destinations"])
                    .deprecated("Use `destinations` instead"),
            )
            .field(
                "auth",
                Field::block_list(
                    Schema::new()
                        .field("scheme", Field::string().required())
                        .field("token", Field::string().conceal_in_state())
                        .field("secret", Field::string().computed().sensitive())
                        .field("mode", Field::string().force_new()),
                )
                .max_items(1),
            )
    }

    #[test]
    fn test_validate_reports_required_and_unknown() {
        let diags = sample().validate(&map(json!({ "bogus": 1 })));
        assert!(diags.errors.contains(&"bogus: unsupported argument".to_string()));
        assert!(diags.errors.contains(&"name: required field is not set".to_string()));
    }

    #[test]
    fn test_validate_rejects_computed_input() {
        let diags = sample().validate(&map(json!({ "name": "a", "aud": "x" })));
        assert_eq!(diags.errors, vec!["aud: value is computed and cannot be set"]);
    }

    #[test]
    fn test_validate_conflicts_and_deprecation() {
        let diags = sample().validate(&map(json!({
            "name": "a",
            "destinations": ["https://a"],
            "legacy": ["a.example.com"],
        })));
        assert!(diags.errors.contains(&"destinations: conflicts with legacy".to_string()));
        assert_eq!(diags.warnings, vec!["legacy: Use `destinations` instead"]);
    }

    #[test]
    fn test_validate_nested_blocks_and_max_items() {
        let diags = sample().validate(&map(json!({
            "name": "a",
            "auth": [{ "token": "t" }, { "scheme": "x" }],
        })));
        assert!(diags.errors.contains(&"auth: at most 1 item(s) allowed, got 2".to_string()));
        assert!(diags.errors.contains(&"auth.0.scheme: required field is not set".to_string()));
    }

    #[test]
    fn test_validate_runs_validators_and_type_checks() {
        let diags = sample().validate(&map(json!({
            "name": 5,
            "session_duration": "1d",
        })));
        assert!(diags.errors.iter().any(|e| e.starts_with("name: expected string")));
        assert!(diags.errors.iter().any(|e| e.contains("valid units")));
    }

    #[test]
    fn test_apply_defaults() {
        let mut config = map(json!({ "name": "a", "type": null }));
        sample().apply_defaults(&mut config);
        assert_eq!(config["type"], json!("self_hosted"));
        assert_eq!(config["session_duration"], json!("24h"));
    }

    #[test]
    fn test_conceal_replaces_nested_values() {
        let mut attrs = map(json!({ "auth": [{ "scheme": "x", "token": "hunter2" }] }));
        sample().conceal(&mut attrs);
        let token = &attrs["auth"][0]["token"];
        assert!(secret::is_concealed(token));
        assert_eq!(attrs["auth"][0]["scheme"], json!("x"));
    }

    #[test]
    fn test_merge_computed_keeps_nested_secret() {
        let mut config = map(json!({ "name": "a", "auth": [{ "scheme": "x" }] }));
        let prior = map(json!({
            "name": "a",
            "aud": "aud-1",
            "auth": [{ "scheme": "x", "secret": "s3cret" }],
        }));
        sample().merge_computed(&mut config, &prior);
        assert_eq!(config["aud"], json!("aud-1"));
        assert_eq!(config["auth"][0]["secret"], json!("s3cret"));
    }

    #[test]
    fn test_changed_fields_ignores_computed_and_defaults() {
        let prior = map(json!({
            "name": "a",
            "aud": "aud-1",
            "type": "self_hosted",
            "session_duration": "24h",
            "legacy": ["b", "a"],
        }));
        let config = map(json!({ "name": "a", "legacy": ["a", "b"] }));
        assert!(sample().changed_fields(&prior, &config).is_empty());

        let config = map(json!({ "name": "b", "legacy": ["a", "b"] }));
        assert_eq!(sample().changed_fields(&prior, &config), vec!["name"]);
    }

    #[test]
    fn test_changed_fields_honours_diff_suppression() {
        let prior = map(json!({ "name": "a", "type": "bookmark", "session_duration": "24h" }));
        let config = map(json!({ "name": "a", "type": "bookmark", "session_duration": "1h" }));
        assert!(sample().changed_fields(&prior, &config).is_empty());

        let config = map(json!({ "name": "a", "session_duration": "1h" }));
        let changed = sample().changed_fields(&prior, &config);
        assert!(changed.contains(&"session_duration"));
    }

    #[test]
    fn test_changed_fields_compares_concealed_values() {
        let mut prior = map(json!({
            "name": "a",
            "type": "self_hosted",
            "session_duration": "24h",
            "auth": [{ "scheme": "x", "token": "hunter2" }],
        }));
        sample().conceal(&mut prior);
        assert!(secret::marker_salt(&prior["auth"][0]["token"]).is_some());

        let same = map(json!({ "name": "a", "auth": [{ "scheme": "x", "token": "hunter2" }] }));
        assert!(sample().changed_fields(&prior, &same).is_empty());

        let rotated = map(json!({ "name": "a", "auth": [{ "scheme": "x", "token": "other" }] }));
        assert_eq!(sample().changed_fields(&prior, &rotated), vec!["auth"]);
    }

    #[test]
    fn test_replacement_paths_for_nested_force_new() {
        let prior = map(json!({ "auth": [{ "scheme": "x", "mode": "oidc" }] }));
        let config = map(json!({ "auth": [{ "scheme": "x", "mode": "saml" }] }));
        assert_eq!(sample().replacement_paths(&prior, &config), vec!["auth.0.mode"]);

        let config = map(json!({ "auth": [{ "scheme": "x", "mode": "oidc" }] }));
        assert!(sample().replacement_paths(&prior, &config).is_empty());
    }

    #[test]
    fn test_into_result() {
        let diags = Diagnostics {
            errors: vec![],
            warnings: vec!["w".to_string()],
        };
        assert_eq!(diags.into_result().unwrap(), vec!["w"]);

        let diags = Diagnostics {
            errors: vec!["e".to_string()],
            warnings: vec![],
        };
        assert!(diags.into_result().is_err());
    }
}
