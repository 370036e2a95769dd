//! Access application models

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::saas::SaasApplication;
use super::scim::ScimConfig;
use crate::error::SchemaError;

/// Account or zone an Access application belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessScope {
    Account(String),
    Zone(String),
}

impl AccessScope {
    /// API path prefix, e.g. `/accounts/abc`.
    pub fn path_prefix(&self) -> String {
        match self {
            AccessScope::Account(id) => format!("/accounts/{id}"),
            AccessScope::Zone(id) => format!("/zones/{id}"),
        }
    }
}

impl fmt::Display for AccessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessScope::Account(id) => write!(f, "account {id:?}"),
            AccessScope::Zone(id) => write!(f, "zone {id:?}"),
        }
    }
}

/// Kind of protected resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationType {
    AppLauncher,
    Bookmark,
    Biso,
    DashSso,
    Saas,
    #[default]
    SelfHosted,
    Ssh,
    Vnc,
    Warp,
    Infrastructure,
}

impl ApplicationType {
    pub const ALL: [ApplicationType; 10] = [
        ApplicationType::AppLauncher,
        ApplicationType::Bookmark,
        ApplicationType::Biso,
        ApplicationType::DashSso,
        ApplicationType::Saas,
        ApplicationType::SelfHosted,
        ApplicationType::Ssh,
        ApplicationType::Vnc,
        ApplicationType::Warp,
        ApplicationType::Infrastructure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationType::AppLauncher => "app_launcher",
            ApplicationType::Bookmark => "bookmark",
            ApplicationType::Biso => "biso",
            ApplicationType::DashSso => "dash_sso",
            ApplicationType::Saas => "saas",
            ApplicationType::SelfHosted => "self_hosted",
            ApplicationType::Ssh => "ssh",
            ApplicationType::Vnc => "vnc",
            ApplicationType::Warp => "warp",
            ApplicationType::Infrastructure => "infrastructure",
        }
    }
}

impl FromStr for ApplicationType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownVariant {
                field: "type".to_string(),
                value: s.to_string(),
                expected: Self::ALL.map(Self::as_str).join(", "),
            })
    }
}

/// Whether a destination is reachable publicly or only through the private network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    #[default]
    Public,
    Private,
}

impl DestinationType {
    pub fn as_str(self) -> &'static str {
        match self {
            DestinationType::Public => "public",
            DestinationType::Private => "private",
        }
    }
}

impl FromStr for DestinationType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(DestinationType::Public),
            "private" => Ok(DestinationType::Private),
            other => Err(SchemaError::UnknownVariant {
                field: "destination type".to_string(),
                value: other.to_string(),
                expected: "public or private".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDestination {
    #[serde(rename = "type", default)]
    pub kind: DestinationType,

    #[serde(default)]
    pub uri: String,
}

/// Protocol of an infrastructure target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfrastructureProtocol {
    #[serde(rename = "SSH")]
    Ssh,
    #[serde(rename = "RDP")]
    Rdp,
}

impl InfrastructureProtocol {
    pub fn as_str(self) -> &'static str {
        match self {
            InfrastructureProtocol::Ssh => "SSH",
            InfrastructureProtocol::Rdp => "RDP",
        }
    }
}

impl FromStr for InfrastructureProtocol {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SSH" => Ok(InfrastructureProtocol::Ssh),
            "RDP" => Ok(InfrastructureProtocol::Rdp),
            other => Err(SchemaError::UnknownVariant {
                field: "protocol".to_string(),
                value: other.to_string(),
                expected: "SSH or RDP".to_string(),
            }),
        }
    }
}

/// Target criteria of an infrastructure application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetContext {
    pub port: u16,

    pub protocol: InfrastructureProtocol,

    /// Attribute name to allowed values, e.g. `usernames`
    #[serde(default)]
    pub target_attributes: BTreeMap<String, Vec<String>>,
}

/// CORS settings. The attribute tree and the wire format share this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsHeaders {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_methods: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_origins: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_headers: Vec<String>,

    #[serde(default)]
    pub allow_all_methods: bool,

    #[serde(default)]
    pub allow_all_origins: bool,

    #[serde(default)]
    pub allow_all_headers: bool,

    #[serde(default)]
    pub allow_credentials: bool,

    #[serde(default)]
    pub max_age: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub url: String,
}

/// App launcher landing page branding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingPageDesign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Access application as exchanged with the API.
///
/// Requests are full replacements; every field the configuration sets is sent
/// on both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessApplication {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Audience tag, assigned by the service
    #[serde(default, skip_serializing)]
    pub aud: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<String>,

    #[serde(rename = "type", default)]
    pub app_type: ApplicationType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub self_hosted_domains: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub destinations: Vec<AccessDestination>,

    /// Policy identifiers, in precedence order
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "policy_ids"
    )]
    pub policies: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_duration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors_headers: Option<CorsHeaders>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saas_app: Option<SaasApplication>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_criteria: Vec<TargetContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_redirect_to_identity: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_binding_cookie: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_idps: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_deny_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_deny_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_non_identity_deny_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_only_cookie_attribute: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site_cookie_attribute: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_interstitial: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_launcher_visible: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_auth_401_redirect: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_pages: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_launcher_logo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_bg_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub footer_links: Vec<FooterLink>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landing_page_design: Option<LandingPageDesign>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_app_launcher_login_page: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_authenticate_via_warp: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_preflight_bypass: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scim_config: Option<ScimConfig>,
}

/// Policies come back either as bare identifiers or as full policy objects.
fn policy_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PolicyRef {
        Id(String),
        Object { id: String },
    }

    let refs = Option::<Vec<PolicyRef>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(refs
        .into_iter()
        .map(|r| match r {
            PolicyRef::Id(id) | PolicyRef::Object { id } => id,
        })
        .collect())
}
