//! SAAS integration settings of an Access application.
//!
//! The API discriminates the two integration shapes by `auth_type`. Legacy
//! SAML applications carry no `auth_type` at all, so an untagged payload
//! decodes as SAML.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::secret::SecretString;

/// SAAS integration, one variant per `auth_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "auth_type", rename_all = "lowercase")]
pub enum SaasApplication {
    Oidc(OidcSaasApp),
    Saml(SamlSaasApp),
}

impl<'de> Deserialize<'de> for SaasApplication {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = Value::deserialize(deserializer)?;
        let auth_type = value
            .as_object_mut()
            .and_then(|map| map.remove("auth_type"))
            .and_then(|v| v.as_str().map(str::to_string));

        match auth_type.as_deref() {
            Some("oidc") => serde_json::from_value(value)
                .map(SaasApplication::Oidc)
                .map_err(serde::de::Error::custom),
            Some("saml") | None => serde_json::from_value(value)
                .map(SaasApplication::Saml)
                .map_err(serde::de::Error::custom),
            Some(other) => Err(serde::de::Error::custom(format!(
                "unknown SAAS auth_type {other:?}"
            ))),
        }
    }
}

/// Where a claim or attribute value comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSource {
    #[serde(default)]
    pub name: String,

    /// Per identity provider override of the source name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub name_by_idp: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OidcClaim {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default)]
    pub source: ClaimSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamlAttribute {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name_format: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub friendly_name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub source: ClaimSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridAndImplicitOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_access_token_from_authorization_endpoint: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_id_token_from_authorization_endpoint: Option<bool>,
}

/// OpenID Connect relying-party settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OidcSaasApp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Only returned by the service when the application is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<SecretString>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redirect_uris: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_types: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,

    #[serde(default, skip_serializing)]
    pub public_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_launcher_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_filter_regex: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token_lifetime: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_pkce_without_client_secret: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_options: Option<RefreshTokenOptions>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_claims: Vec<OidcClaim>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hybrid_and_implicit_options: Option<HybridAndImplicitOptions>,
}

/// SAML service-provider settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamlSaasApp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp_entity_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_service_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_id_format: Option<String>,

    #[serde(default, skip_serializing)]
    pub idp_entity_id: Option<String>,

    #[serde(default, skip_serializing)]
    pub public_key: Option<String>,

    #[serde(default, skip_serializing)]
    pub sso_endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_relay_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_id_transform_jsonata: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saml_attribute_transform_jsonata: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<SamlAttribute>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_oidc_is_tagged_on_the_wire() {
        let app = SaasApplication::Oidc(OidcSaasApp {
            redirect_uris: vec!["https://app.example.com/callback".to_string()],
            public_key: Some("pk".to_string()),
            ..Default::default()
        });
        let body = serde_json::to_value(&app).unwrap();
        assert_eq!(body["auth_type"], json!("oidc"));
        assert!(body.get("public_key").is_none());
    }

    #[test]
    fn test_untagged_payload_decodes_as_saml() {
        let app: SaasApplication = serde_json::from_value(json!({
            "sp_entity_id": "sp",
            "sso_endpoint": "https://sso.example.com",
        }))
        .unwrap();
        match app {
            SaasApplication::Saml(saml) => {
                assert_eq!(saml.sp_entity_id.as_deref(), Some("sp"));
                assert_eq!(saml.sso_endpoint.as_deref(), Some("https://sso.example.com"));
            }
            other => panic!("expected SAML, got {other:?}"),
        }
    }

    #[test]
    fn test_oidc_payload_decodes_claims() {
        let app: SaasApplication = serde_json::from_value(json!({
            "auth_type": "oidc",
            "client_id": "cid",
            "client_secret": "shh",
            "custom_claims": [{
                "name": "groups",
                "scope": "groups",
                "source": { "name": "groups", "name_by_idp": { "idp-1": "memberOf" } },
            }],
        }))
        .unwrap();
        let SaasApplication::Oidc(oidc) = app else {
            panic!("expected OIDC");
        };
        assert_eq!(oidc.client_secret.unwrap().expose(), "shh");
        assert_eq!(oidc.custom_claims[0].source.name_by_idp["idp-1"], "memberOf");
    }

    #[test]
    fn test_unknown_auth_type_is_rejected() {
        let err = serde_json::from_value::<SaasApplication>(json!({ "auth_type": "ldap" }))
            .unwrap_err();
        assert!(err.to_string().contains("ldap"));
    }
}
