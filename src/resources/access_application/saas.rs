//! The `saas_app` block: OIDC relying-party or SAML service-provider settings.
//!
//! Configuration keeps both shapes in one block and lets `auth_type` pick
//! the variant; anything other than `oidc` is treated as SAML, matching how
//! the service handles applications created before `auth_type` existed.
//! Flattening writes only the fields of the variant the service returned.

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::client::models::{
    ClaimSource, HybridAndImplicitOptions, OidcClaim, OidcSaasApp, RefreshTokenOptions,
    SaasApplication, SamlAttribute, SamlSaasApp,
};
use crate::error::Result;
use crate::state::ResourceData;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClaimBlock {
    name: String,
    scope: String,
    required: bool,
    source: Vec<ClaimSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AttributeBlock {
    name: String,
    name_format: String,
    friendly_name: String,
    required: bool,
    source: Vec<ClaimSource>,
}

/// Configurable fields of both variants. Computed secrets are never read back.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SaasBlock {
    auth_type: String,
    public_key: String,

    client_id: String,
    redirect_uris: Vec<String>,
    grant_types: Vec<String>,
    scopes: Vec<String>,
    app_launcher_url: String,
    group_filter_regex: String,
    access_token_lifetime: String,
    allow_pkce_without_client_secret: bool,
    refresh_token_options: Vec<RefreshTokenOptions>,
    custom_claim: Vec<ClaimBlock>,
    hybrid_and_implicit_options: Vec<HybridAndImplicitOptions>,

    sp_entity_id: String,
    consumer_service_url: String,
    name_id_format: String,
    default_relay_state: String,
    name_id_transform_jsonata: String,
    saml_attribute_transform_jsonata: String,
    custom_attribute: Vec<AttributeBlock>,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn first_source(sources: Vec<ClaimSource>) -> ClaimSource {
    sources.into_iter().next().unwrap_or_default()
}

impl SaasBlock {
    fn into_oidc(self) -> OidcSaasApp {
        OidcSaasApp {
            client_id: non_empty(self.client_id),
            client_secret: None,
            redirect_uris: self.redirect_uris,
            grant_types: self.grant_types,
            scopes: self.scopes,
            public_key: non_empty(self.public_key),
            app_launcher_url: non_empty(self.app_launcher_url),
            group_filter_regex: non_empty(self.group_filter_regex),
            access_token_lifetime: non_empty(self.access_token_lifetime),
            allow_pkce_without_client_secret: Some(self.allow_pkce_without_client_secret),
            refresh_token_options: self.refresh_token_options.into_iter().next(),
            custom_claims: self
                .custom_claim
                .into_iter()
                .map(|claim| OidcClaim {
                    name: claim.name,
                    scope: claim.scope,
                    required: Some(claim.required),
                    source: first_source(claim.source),
                })
                .collect(),
            hybrid_and_implicit_options: self.hybrid_and_implicit_options.into_iter().next().map(
                |opts| HybridAndImplicitOptions {
                    return_access_token_from_authorization_endpoint: Some(
                        opts.return_access_token_from_authorization_endpoint
                            .unwrap_or(false),
                    ),
                    return_id_token_from_authorization_endpoint: Some(
                        opts.return_id_token_from_authorization_endpoint.unwrap_or(false),
                    ),
                },
            ),
        }
    }

    fn into_saml(self) -> SamlSaasApp {
        SamlSaasApp {
            sp_entity_id: non_empty(self.sp_entity_id),
            consumer_service_url: non_empty(self.consumer_service_url),
            name_id_format: non_empty(self.name_id_format),
            public_key: non_empty(self.public_key),
            default_relay_state: non_empty(self.default_relay_state),
            name_id_transform_jsonata: non_empty(self.name_id_transform_jsonata),
            saml_attribute_transform_jsonata: non_empty(self.saml_attribute_transform_jsonata),
            custom_attributes: self
                .custom_attribute
                .into_iter()
                .map(|attr| SamlAttribute {
                    name: attr.name,
                    name_format: attr.name_format,
                    friendly_name: attr.friendly_name,
                    required: attr.required,
                    source: first_source(attr.source),
                })
                .collect(),
            ..Default::default()
        }
    }
}

/// SAAS settings from configuration; `None` when the block is absent.
pub fn expand_saas_app(d: &ResourceData) -> Result<Option<SaasApplication>> {
    let Some(block) = d.block::<SaasBlock>("saas_app")? else {
        return Ok(None);
    };
    let app = if block.auth_type == "oidc" {
        SaasApplication::Oidc(block.into_oidc())
    } else {
        SaasApplication::Saml(block.into_saml())
    };
    Ok(Some(app))
}

fn flatten_source(source: &ClaimSource) -> Value {
    json!([{ "name": source.name, "name_by_idp": source.name_by_idp }])
}

fn flatten_claim(claim: &OidcClaim) -> Value {
    let mut m = Map::new();
    if !claim.name.is_empty() {
        m.insert("name".to_string(), json!(claim.name));
    }
    if !claim.scope.is_empty() {
        m.insert("scope".to_string(), json!(claim.scope));
    }
    if claim.required == Some(true) {
        m.insert("required".to_string(), json!(true));
    }
    if !claim.source.name.is_empty() {
        m.insert("source".to_string(), flatten_source(&claim.source));
    }
    Value::Object(m)
}

fn flatten_attribute(attr: &SamlAttribute) -> Value {
    let mut m = Map::new();
    if !attr.name.is_empty() {
        m.insert("name".to_string(), json!(attr.name));
    }
    if !attr.name_format.is_empty() {
        m.insert("name_format".to_string(), json!(attr.name_format));
    }
    if attr.required {
        m.insert("required".to_string(), json!(true));
    }
    if !attr.friendly_name.is_empty() {
        m.insert("friendly_name".to_string(), json!(attr.friendly_name));
    }
    if !attr.source.name.is_empty() {
        m.insert("source".to_string(), flatten_source(&attr.source));
    }
    Value::Object(m)
}

/// Value of `key` inside the first `saas_app` element currently held by `d`.
fn prior_value<'a>(d: &'a ResourceData, key: &str) -> Option<&'a Value> {
    d.get("saas_app")
        .and_then(|v| v.get(0))
        .and_then(|block| block.get(key))
        .filter(|v| crate::state::is_set(v))
}

fn flatten_oidc(d: &ResourceData, oidc: &OidcSaasApp) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert("auth_type".to_string(), json!("oidc"));
    m.insert("client_id".to_string(), json!(oidc.client_id.clone().unwrap_or_default()));
    m.insert("redirect_uris".to_string(), json!(oidc.redirect_uris));
    m.insert("grant_types".to_string(), json!(oidc.grant_types));
    m.insert("scopes".to_string(), json!(oidc.scopes));
    m.insert("public_key".to_string(), json!(oidc.public_key.clone().unwrap_or_default()));
    m.insert(
        "group_filter_regex".to_string(),
        json!(oidc.group_filter_regex.clone().unwrap_or_default()),
    );
    m.insert(
        "access_token_lifetime".to_string(),
        json!(oidc.access_token_lifetime.clone().unwrap_or_default()),
    );
    m.insert(
        "app_launcher_url".to_string(),
        json!(oidc.app_launcher_url.clone().unwrap_or_default()),
    );
    m.insert(
        "allow_pkce_without_client_secret".to_string(),
        json!(oidc.allow_pkce_without_client_secret.unwrap_or(false)),
    );

    if let Some(options) = &oidc.refresh_token_options {
        m.insert(
            "refresh_token_options".to_string(),
            json!([{ "lifetime": options.lifetime.clone().unwrap_or_default() }]),
        );
    }
    if !oidc.custom_claims.is_empty() {
        let claims: Vec<Value> = oidc.custom_claims.iter().map(flatten_claim).collect();
        m.insert("custom_claim".to_string(), Value::Array(claims));
    }
    if let Some(options) = &oidc.hybrid_and_implicit_options {
        m.insert(
            "hybrid_and_implicit_options".to_string(),
            json!([{
                "return_access_token_from_authorization_endpoint":
                    options.return_access_token_from_authorization_endpoint.unwrap_or(false),
                "return_id_token_from_authorization_endpoint":
                    options.return_id_token_from_authorization_endpoint.unwrap_or(false),
            }]),
        );
    }

    // The service returns the secret on create only.
    let secret = prior_value(d, "client_secret").cloned().or_else(|| {
        oidc.client_secret
            .as_ref()
            .map(|s| Value::String(s.expose().to_string()))
    });
    if let Some(secret) = secret {
        m.insert("client_secret".to_string(), secret);
    }
    m
}

fn flatten_saml(d: &ResourceData, saml: &SamlSaasApp) -> Map<String, Value> {
    let text = |v: &Option<String>| json!(v.clone().unwrap_or_default());
    let mut m = Map::new();
    if prior_value(d, "auth_type").is_some() {
        m.insert("auth_type".to_string(), json!("saml"));
    }
    m.insert("sp_entity_id".to_string(), text(&saml.sp_entity_id));
    m.insert("consumer_service_url".to_string(), text(&saml.consumer_service_url));
    m.insert("name_id_format".to_string(), text(&saml.name_id_format));
    m.insert("idp_entity_id".to_string(), text(&saml.idp_entity_id));
    m.insert("public_key".to_string(), text(&saml.public_key));
    m.insert("sso_endpoint".to_string(), text(&saml.sso_endpoint));
    m.insert("default_relay_state".to_string(), text(&saml.default_relay_state));
    m.insert(
        "name_id_transform_jsonata".to_string(),
        text(&saml.name_id_transform_jsonata),
    );
    m.insert(
        "saml_attribute_transform_jsonata".to_string(),
        text(&saml.saml_attribute_transform_jsonata),
    );
    if !saml.custom_attributes.is_empty() {
        let attrs: Vec<Value> = saml.custom_attributes.iter().map(flatten_attribute).collect();
        m.insert("custom_attribute".to_string(), Value::Array(attrs));
    }
    m
}

/// Attribute value for the SAAS settings the service returned.
pub fn flatten_saas_app(d: &ResourceData, app: Option<&SaasApplication>) -> Value {
    let block = match app {
        None => return json!([]),
        Some(SaasApplication::Oidc(oidc)) => flatten_oidc(d, oidc),
        Some(SaasApplication::Saml(saml)) => flatten_saml(d, saml),
    };
    Value::Array(vec![Value::Object(block)])
}
