//! The `scim_config` block.

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::client::models::{
    ScimAuthentication, ScimAuthenticationSet, ScimConfig, ScimMapping, ScimMappingOperations,
};
use crate::error::{Result, SchemaError};
use crate::secret::SecretString;
use crate::state::{ResourceData, is_set};

/// One `authentication` entry. Every scheme's fields share the block and
/// `scheme` decides which of them are sent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AuthenticationBlock {
    scheme: String,
    user: String,
    password: Option<SecretString>,
    token: Option<SecretString>,
    client_id: String,
    client_secret: Option<SecretString>,
    authorization_url: String,
    token_url: String,
    scopes: Vec<String>,
}

impl AuthenticationBlock {
    fn into_authentication(self) -> Result<ScimAuthentication> {
        let auth = match self.scheme.as_str() {
            "httpbasic" => ScimAuthentication::HttpBasic {
                user: self.user,
                password: self.password,
            },
            "oauthbearertoken" => ScimAuthentication::OauthBearerToken { token: self.token },
            "oauth2" => ScimAuthentication::Oauth2 {
                client_id: self.client_id,
                client_secret: self.client_secret,
                authorization_url: self.authorization_url,
                token_url: self.token_url,
                scopes: self.scopes,
            },
            "access_service_token" => ScimAuthentication::AccessServiceToken {
                client_id: self.client_id,
                client_secret: self.client_secret,
            },
            other => {
                return Err(SchemaError::UnknownVariant {
                    field: "SCIM authentication scheme".to_string(),
                    value: other.to_string(),
                    expected: ScimAuthentication::SCHEMES.join(", "),
                }
                .into());
            }
        };
        Ok(auth)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OperationsBlock {
    create: bool,
    update: bool,
    delete: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MappingBlock {
    schema: String,
    enabled: bool,
    filter: String,
    transform_jsonata: String,
    operations: Vec<OperationsBlock>,
    strictness: String,
}

impl From<MappingBlock> for ScimMapping {
    fn from(block: MappingBlock) -> Self {
        let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };
        ScimMapping {
            schema: block.schema,
            enabled: Some(block.enabled),
            filter: non_empty(block.filter),
            transform_jsonata: non_empty(block.transform_jsonata),
            operations: block.operations.into_iter().next().map(|ops| ScimMappingOperations {
                create: Some(ops.create),
                update: Some(ops.update),
                delete: Some(ops.delete),
            }),
            strictness: non_empty(block.strictness),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScimBlock {
    enabled: bool,
    remote_uri: String,
    idp_uid: String,
    deactivate_on_delete: bool,
    authentication: Vec<AuthenticationBlock>,
    mappings: Vec<MappingBlock>,
}

/// SCIM settings from configuration; `None` when the block is absent.
///
/// Authentication entries and mappings keep their configured order. An
/// unrecognised scheme fails the whole expansion.
pub fn expand_scim_config(d: &ResourceData) -> Result<Option<ScimConfig>> {
    let Some(block) = d.block::<ScimBlock>("scim_config")? else {
        return Ok(None);
    };

    let authentication = block
        .authentication
        .into_iter()
        .map(AuthenticationBlock::into_authentication)
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(ScimConfig {
        enabled: Some(block.enabled),
        remote_uri: block.remote_uri,
        idp_uid: block.idp_uid,
        deactivate_on_delete: Some(block.deactivate_on_delete),
        authentication: if authentication.is_empty() {
            None
        } else {
            Some(ScimAuthenticationSet::Multiple(authentication))
        },
        mappings: block.mappings.into_iter().map(ScimMapping::from).collect(),
    }))
}

/// `scim_config.0.authentication.<index>.<key>` as currently held by `d`.
fn prior_secret(d: &ResourceData, index: usize, key: &str) -> Option<Value> {
    d.get("scim_config")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("authentication"))
        .and_then(|v| v.get(index))
        .and_then(|v| v.get(key))
        .filter(|v| is_set(v))
        .cloned()
}

fn flatten_authentication(d: &ResourceData, index: usize, auth: &ScimAuthentication) -> Value {
    let secret = |key: &str, value: &Option<SecretString>| match value {
        Some(s) if !s.is_empty() => json!(s.expose()),
        _ => prior_secret(d, index, key).unwrap_or_else(|| json!("")),
    };

    let mut m = Map::new();
    m.insert("scheme".to_string(), json!(auth.scheme()));
    match auth {
        ScimAuthentication::HttpBasic { user, password } => {
            m.insert("user".to_string(), json!(user));
            m.insert("password".to_string(), secret("password", password));
        }
        ScimAuthentication::OauthBearerToken { token } => {
            m.insert("token".to_string(), secret("token", token));
        }
        ScimAuthentication::Oauth2 {
            client_id,
            client_secret,
            authorization_url,
            token_url,
            scopes,
        } => {
            m.insert("client_id".to_string(), json!(client_id));
            m.insert("client_secret".to_string(), secret("client_secret", client_secret));
            m.insert("authorization_url".to_string(), json!(authorization_url));
            m.insert("token_url".to_string(), json!(token_url));
            m.insert("scopes".to_string(), json!(scopes));
        }
        ScimAuthentication::AccessServiceToken {
            client_id,
            client_secret,
        } => {
            m.insert("client_id".to_string(), json!(client_id));
            m.insert("client_secret".to_string(), secret("client_secret", client_secret));
        }
    }
    Value::Object(m)
}

fn flatten_mapping(mapping: &ScimMapping) -> Value {
    let mut m = Map::new();
    m.insert("schema".to_string(), json!(mapping.schema));
    m.insert("enabled".to_string(), json!(mapping.enabled.unwrap_or(false)));
    m.insert("filter".to_string(), json!(mapping.filter.clone().unwrap_or_default()));
    m.insert(
        "transform_jsonata".to_string(),
        json!(mapping.transform_jsonata.clone().unwrap_or_default()),
    );
    m.insert(
        "strictness".to_string(),
        json!(mapping.strictness.clone().unwrap_or_default()),
    );
    if let Some(ops) = &mapping.operations {
        m.insert(
            "operations".to_string(),
            json!([{
                "create": ops.create.unwrap_or(false),
                "update": ops.update.unwrap_or(false),
                "delete": ops.delete.unwrap_or(false),
            }]),
        );
    }
    Value::Object(m)
}

/// Attribute value for the SCIM settings the service returned.
///
/// Secrets the service withholds are carried over from `d` by position.
pub fn flatten_scim_config(d: &ResourceData, scim: Option<&ScimConfig>) -> Value {
    let Some(scim) = scim else {
        return json!([]);
    };
    let authentication: Vec<Value> = scim
        .authentication
        .as_ref()
        .map(ScimAuthenticationSet::as_slice)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, auth)| flatten_authentication(d, i, auth))
        .collect();
    let mappings: Vec<Value> = scim.mappings.iter().map(flatten_mapping).collect();

    json!([{
        "enabled": scim.enabled.unwrap_or(false),
        "remote_uri": scim.remote_uri,
        "idp_uid": scim.idp_uid,
        "deactivate_on_delete": scim.deactivate_on_delete.unwrap_or(false),
        "authentication": authentication,
        "mappings": mappings,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(value: Value) -> ResourceData {
        match value {
            Value::Object(map) => ResourceData::new(map),
            _ => ResourceData::new(Map::new()),
        }
    }

    fn oauth2_config() -> ResourceData {
        data(json!({
            "scim_config": [{
                "enabled": true,
                "remote_uri": "https://scim.example.com/v2",
                "idp_uid": "idp-1",
                "authentication": [{
                    "scheme": "oauth2",
                    "client_id": "cid",
                    "client_secret": "shh",
                    "authorization_url": "https://idp.example.com/authorize",
                    "token_url": "https://idp.example.com/token",
                    "scopes": ["read", "write"],
                }],
                "mappings": [
                    {
                        "schema": "urn:ietf:params:scim:schemas:core:2.0:User",
                        "enabled": true,
                        "filter": "title pr",
                        "operations": [{ "create": true, "update": true }],
                    },
                    { "schema": "urn:ietf:params:scim:schemas:core:2.0:Group" },
                ],
            }],
        }))
    }

    #[test]
    fn test_oauth2_round_trip() {
        let d = oauth2_config();
        let scim = expand_scim_config(&d).unwrap().unwrap();
        let tree = flatten_scim_config(&ResourceData::default(), Some(&scim));
        let auth = tree[0]["authentication"][0].as_object().unwrap();

        assert_eq!(auth["scheme"], json!("oauth2"));
        assert_eq!(auth["client_id"], json!("cid"));
        assert_eq!(auth["client_secret"], json!("shh"));
        assert_eq!(auth["authorization_url"], json!("https://idp.example.com/authorize"));
        assert_eq!(auth["token_url"], json!("https://idp.example.com/token"));
        assert_eq!(auth["scopes"], json!(["read", "write"]));
        for key in ["user", "password", "token"] {
            assert!(auth.get(key).is_none(), "{key} should not be set");
        }

        let again = expand_scim_config(&data(json!({ "scim_config": tree }))).unwrap().unwrap();
        assert_eq!(again, scim);
    }

    #[test]
    fn test_mappings_keep_order_and_operations() {
        let scim = expand_scim_config(&oauth2_config()).unwrap().unwrap();
        assert_eq!(scim.mappings.len(), 2);
        assert!(scim.mappings[0].schema.ends_with("User"));
        assert_eq!(
            scim.mappings[0].operations,
            Some(ScimMappingOperations {
                create: Some(true),
                update: Some(true),
                delete: Some(false),
            })
        );
        assert_eq!(scim.mappings[0].filter.as_deref(), Some("title pr"));
        assert!(scim.mappings[1].operations.is_none());
        assert!(scim.mappings[1].filter.is_none());
    }

    #[test]
    fn test_unknown_scheme_is_reported() {
        let d = data(json!({
            "scim_config": [{
                "remote_uri": "https://scim.example.com",
                "idp_uid": "idp-1",
                "authentication": [
                    { "scheme": "httpbasic", "user": "u", "password": "p" },
                    { "scheme": "kerberos" },
                ],
            }],
        }));
        let err = expand_scim_config(&d).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse SCIM authentication scheme: value must be one of httpbasic, oauthbearertoken, oauth2, access_service_token"
        );
    }

    #[test]
    fn test_withheld_secret_is_kept_from_prior_data() {
        let prior = data(json!({
            "scim_config": [{
                "authentication": [
                    { "scheme": "httpbasic", "user": "u", "password": "p" },
                    { "scheme": "oauthbearertoken", "token": { "redacted": "abc" } },
                ],
            }],
        }));
        let scim = ScimConfig {
            remote_uri: "https://scim.example.com".to_string(),
            idp_uid: "idp-1".to_string(),
            authentication: Some(ScimAuthenticationSet::Multiple(vec![
                ScimAuthentication::HttpBasic {
                    user: "u".to_string(),
                    password: None,
                },
                ScimAuthentication::OauthBearerToken {
                    token: Some("fresh".into()),
                },
            ])),
            ..Default::default()
        };

        let tree = flatten_scim_config(&prior, Some(&scim));
        let auth = &tree[0]["authentication"];
        assert_eq!(auth[0]["password"], json!("p"));
        assert_eq!(auth[1]["token"], json!("fresh"));
        assert!(auth[0].get("token").is_none());
    }

    #[test]
    fn test_single_authentication_object_flattens_to_list() {
        let scim = ScimConfig {
            authentication: Some(ScimAuthenticationSet::Single(
                ScimAuthentication::AccessServiceToken {
                    client_id: "cid".to_string(),
                    client_secret: Some("s".into()),
                },
            )),
            ..Default::default()
        };
        let tree = flatten_scim_config(&ResourceData::default(), Some(&scim));
        assert_eq!(
            tree[0]["authentication"],
            json!([{ "scheme": "access_service_token", "client_id": "cid", "client_secret": "s" }])
        );
        assert_eq!(tree[0]["enabled"], json!(false));
    }

    #[test]
    fn test_absent_block() {
        assert!(expand_scim_config(&ResourceData::default()).unwrap().is_none());
        assert_eq!(flatten_scim_config(&ResourceData::default(), None), json!([]));
    }
}
