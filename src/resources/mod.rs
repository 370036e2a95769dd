//! Resource types: schema declarations plus the CRUD handlers behind them.
//!
//! Each handler maps the attribute tree held in [`ResourceData`] to typed API
//! requests and writes the service's answer back. Every mutating operation
//! ends with a Read so the stored attributes always reflect the service.

use async_trait::async_trait;

use crate::client::CloudflareApi;
use crate::error::{Result, SchemaError};
use crate::schema::Schema;
use crate::state::ResourceData;

pub mod access_application;
pub mod teams_location;

/// Lifecycle entry points of a resource type.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Create the remote object from configuration, then Read it back.
    async fn create(&self, d: &mut ResourceData, client: &dyn CloudflareApi) -> Result<()>;

    /// Refresh attributes from the service. A vanished object clears the id
    /// instead of failing.
    async fn read(&self, d: &mut ResourceData, client: &dyn CloudflareApi) -> Result<()>;

    /// Replace the remote object with the configuration, then Read it back.
    async fn update(&self, d: &mut ResourceData, client: &dyn CloudflareApi) -> Result<()>;

    /// Delete the remote object, then Read to reconcile.
    async fn delete(&self, d: &mut ResourceData, client: &dyn CloudflareApi) -> Result<()>;

    /// Resolve a compound import id held in `d` into populated resource data.
    async fn import(&self, d: ResourceData, client: &dyn CloudflareApi)
    -> Result<Vec<ResourceData>>;
}

/// A registered resource type.
pub struct ResourceDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub deprecation_message: Option<&'static str>,
    pub schema: fn() -> Schema,
    pub handler: &'static dyn ResourceHandler,
}

impl std::fmt::Debug for ResourceDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceDefinition")
            .field("name", &self.name)
            .field("deprecated", &self.deprecation_message.is_some())
            .finish()
    }
}

const TEAMS_LOCATION_DESCRIPTION: &str = "Provides a Cloudflare Teams Location resource. Teams Locations are referenced when creating secure web gateway policies.";

static RESOURCES: [ResourceDefinition; 3] = [
    ResourceDefinition {
        name: "cloudflare_access_application",
        description: "Provides a Cloudflare Access Application resource. Access Applications are used to restrict access to a whole application using an authorisation gateway managed by Cloudflare.",
        deprecation_message: None,
        schema: access_application::schema::access_application_schema,
        handler: &access_application::AccessApplicationResource,
    },
    ResourceDefinition {
        name: "cloudflare_teams_location",
        description: TEAMS_LOCATION_DESCRIPTION,
        deprecation_message: Some(
            "`cloudflare_teams_location` is now deprecated and will be removed in the next major version. Use `cloudflare_zero_trust_dns_location` instead.",
        ),
        schema: teams_location::schema::teams_location_schema,
        handler: &teams_location::TeamsLocationResource,
    },
    ResourceDefinition {
        name: "cloudflare_zero_trust_dns_location",
        description: TEAMS_LOCATION_DESCRIPTION,
        deprecation_message: None,
        schema: teams_location::schema::teams_location_schema,
        handler: &teams_location::TeamsLocationResource,
    },
];

/// All registered resource types, in listing order.
pub fn registry() -> &'static [ResourceDefinition] {
    &RESOURCES
}

pub fn lookup(name: &str) -> Result<&'static ResourceDefinition> {
    RESOURCES
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| SchemaError::UnknownResource(name.to_string()).into())
}

/// Non-empty string attribute the operation cannot proceed without.
pub(crate) fn required_string(d: &ResourceData, key: &str) -> Result<String> {
    d.string(key).ok_or_else(|| {
        SchemaError::Parse {
            field: key.to_string(),
            message: "required field is not set".to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_and_unknown() {
        assert_eq!(
            lookup("cloudflare_zero_trust_dns_location").unwrap().name,
            "cloudflare_zero_trust_dns_location"
        );
        let err = lookup("cloudflare_tunnel").unwrap_err();
        assert_eq!(err.to_string(), "unknown resource type \"cloudflare_tunnel\"");
    }

    #[test]
    fn test_location_aliases_share_schema() {
        let legacy = lookup("cloudflare_teams_location").unwrap();
        let current = lookup("cloudflare_zero_trust_dns_location").unwrap();
        assert!(legacy.deprecation_message.unwrap().contains("cloudflare_zero_trust_dns_location"));
        assert!(current.deprecation_message.is_none());

        let a: Vec<_> = (legacy.schema)().iter().map(|(n, _)| n).collect();
        let b: Vec<_> = (current.schema)().iter().map(|(n, _)| n).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_required_string() {
        let mut d = ResourceData::default();
        assert!(required_string(&d, "account_id").is_err());
        d.set("account_id", "acct");
        assert_eq!(required_string(&d, "account_id").unwrap(), "acct");
    }
}
