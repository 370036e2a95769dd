//! SCIM provisioning settings of an Access application

use serde::{Deserialize, Serialize};

use crate::secret::SecretString;

/// Credentials the service uses against the remote SCIM endpoint, one variant per scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme")]
pub enum ScimAuthentication {
    #[serde(rename = "httpbasic")]
    HttpBasic {
        #[serde(default)]
        user: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<SecretString>,
    },

    #[serde(rename = "oauthbearertoken")]
    OauthBearerToken {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<SecretString>,
    },

    #[serde(rename = "oauth2")]
    Oauth2 {
        #[serde(default)]
        client_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_secret: Option<SecretString>,
        #[serde(default)]
        authorization_url: String,
        #[serde(default)]
        token_url: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        scopes: Vec<String>,
    },

    #[serde(rename = "access_service_token")]
    AccessServiceToken {
        #[serde(default)]
        client_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_secret: Option<SecretString>,
    },
}

impl ScimAuthentication {
    pub const SCHEMES: [&'static str; 4] =
        ["httpbasic", "oauthbearertoken", "oauth2", "access_service_token"];

    pub fn scheme(&self) -> &'static str {
        match self {
            ScimAuthentication::HttpBasic { .. } => "httpbasic",
            ScimAuthentication::OauthBearerToken { .. } => "oauthbearertoken",
            ScimAuthentication::Oauth2 { .. } => "oauth2",
            ScimAuthentication::AccessServiceToken { .. } => "access_service_token",
        }
    }
}

/// The API accepts one authentication object or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScimAuthenticationSet {
    Multiple(Vec<ScimAuthentication>),
    Single(ScimAuthentication),
}

impl ScimAuthenticationSet {
    pub fn as_slice(&self) -> &[ScimAuthentication] {
        match self {
            ScimAuthenticationSet::Multiple(items) => items,
            ScimAuthenticationSet::Single(item) => std::slice::from_ref(item),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScimMappingOperations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

/// How one SCIM resource schema is provisioned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScimMapping {
    /// Schema URN, e.g. `urn:ietf:params:scim:schemas:core:2.0:User`
    pub schema: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_jsonata: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<ScimMappingOperations>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strictness: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default)]
    pub remote_uri: String,

    #[serde(default)]
    pub idp_uid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivate_on_delete: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<ScimAuthenticationSet>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mappings: Vec<ScimMapping>,
}
