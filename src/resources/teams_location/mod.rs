//! Gateway DNS location resource.
//!
//! Registered as `cloudflare_zero_trust_dns_location` and under the
//! deprecated name `cloudflare_teams_location`; both share this handler.

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{ResourceHandler, required_string};
use crate::client::CloudflareApi;
use crate::client::models::{LocationNetwork, TeamsLocation};
use crate::error::{ApiError, Error, Result, SchemaError};
use crate::state::ResourceData;

pub mod endpoints;
pub mod schema;

pub use endpoints::{expand_endpoints, flatten_endpoints};

/// Import id layout
const IMPORT_FORMAT: &str = "accountID/teamsLocationID";

/// Handler for both location resource names.
pub struct TeamsLocationResource;

/// Source networks from the `networks` set.
fn expand_networks(d: &ResourceData) -> Result<Vec<LocationNetwork>> {
    match d.get("networks") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(_)) => d.blocks("networks"),
        Some(_) => Err(SchemaError::Parse {
            field: "networks".to_string(),
            message: "error parsing network list".to_string(),
        }
        .into()),
    }
}

fn flatten_networks(networks: &[LocationNetwork]) -> Value {
    Value::Array(
        networks
            .iter()
            .map(|n| json!({ "network": n.network }))
            .collect(),
    )
}

/// Request body for create and update.
///
/// Client-supplied DNS destination ids are only sent when non-empty.
pub fn expand_location(d: &ResourceData) -> Result<TeamsLocation> {
    Ok(TeamsLocation {
        id: d.id().to_string(),
        name: d.string("name").unwrap_or_default(),
        networks: expand_networks(d)?,
        client_default: d.flag("client_default"),
        ecs_support: Some(d.flag("ecs_support")),
        endpoints: expand_endpoints(d.get("endpoints"))?,
        dns_destination_ips_id: d.string("dns_destination_ips_id"),
        dns_destination_ipv6_block_id: d.string("dns_destination_ipv6_block_id"),
        ..Default::default()
    })
}

/// Write every attribute the service reports.
pub fn flatten_location(d: &mut ResourceData, location: &TeamsLocation) {
    d.set("name", location.name.as_str());
    d.set("networks", flatten_networks(&location.networks));
    d.set("ip", location.ip.as_str());
    d.set("doh_subdomain", location.doh_subdomain.as_str());
    d.set("anonymized_logs_enabled", location.anonymized_logs_enabled);
    d.set("ipv4_destination", location.ipv4_destination.as_str());
    d.set("ipv4_destination_backup", location.ipv4_destination_backup.as_str());
    d.set("client_default", location.client_default);
    d.set("ecs_support", location.ecs_support.unwrap_or(false));
    d.set(
        "dns_destination_ipv6_block_id",
        location.dns_destination_ipv6_block_id.clone().unwrap_or_default(),
    );
    d.set(
        "dns_destination_ips_id",
        location.dns_destination_ips_id.clone().unwrap_or_default(),
    );
    d.set("endpoints", flatten_endpoints(location.endpoints.as_ref()));
}

#[async_trait]
impl ResourceHandler for TeamsLocationResource {
    async fn create(&self, d: &mut ResourceData, client: &dyn CloudflareApi) -> Result<()> {
        let account_id = required_string(d, "account_id")?;
        let context = format!("error creating Teams Location for account {:?}", account_id);
        let location = expand_location(d).map_err(|e| Error::remote(&context, e))?;

        log::debug!("Creating Cloudflare Teams Location from struct: {:?}", location);

        let created = client
            .create_teams_location(&account_id, location)
            .await
            .map_err(|e| Error::remote(&context, e))?;

        d.set_id(created.id);
        self.read(d, client).await
    }

    async fn read(&self, d: &mut ResourceData, client: &dyn CloudflareApi) -> Result<()> {
        let account_id = required_string(d, "account_id")?;

        let location = match client.get_teams_location(&account_id, d.id()).await {
            Ok(location) => location,
            Err(e) if e.is_not_found() => {
                log::info!("Teams Location {} no longer exists", d.id());
                d.clear_id();
                return Ok(());
            }
            Err(e) => {
                return Err(Error::remote(
                    format!("error finding Teams Location {:?}", d.id()),
                    e,
                ));
            }
        };

        flatten_location(d, &location);
        Ok(())
    }

    async fn update(&self, d: &mut ResourceData, client: &dyn CloudflareApi) -> Result<()> {
        let account_id = required_string(d, "account_id")?;
        let context = format!("error updating Teams Location for account {:?}", account_id);
        let location = expand_location(d).map_err(|e| Error::remote(&context, e))?;

        log::debug!("Updating Cloudflare Teams Location from struct: {:?}", location);

        let updated = client
            .update_teams_location(&account_id, location)
            .await
            .map_err(|e| Error::remote(&context, e))?;
        if updated.id.is_empty() {
            return Err(ApiError::InvalidResponse(
                "failed to find Teams Location ID in update response; resource was empty"
                    .to_string(),
            )
            .into());
        }

        self.read(d, client).await
    }

    async fn delete(&self, d: &mut ResourceData, client: &dyn CloudflareApi) -> Result<()> {
        let account_id = required_string(d, "account_id")?;
        let id = d.id().to_string();

        log::debug!("Deleting Cloudflare Teams Location using ID: {}", id);

        let deleted = client.delete_teams_location(&account_id, &id).await;
        let refreshed = self.read(d, client).await;

        deleted.map_err(|e| {
            Error::remote(
                format!("error deleting Teams Location for account {:?}", account_id),
                e,
            )
        })?;
        refreshed
    }

    async fn import(
        &self,
        mut d: ResourceData,
        client: &dyn CloudflareApi,
    ) -> Result<Vec<ResourceData>> {
        let raw = d.id().to_string();
        let (account_id, location_id) = raw
            .split_once('/')
            .filter(|(account, location)| !account.is_empty() && !location.is_empty())
            .ok_or_else(|| SchemaError::InvalidImportId {
                id: raw.clone(),
                format: IMPORT_FORMAT,
            })?;

        log::debug!(
            "Importing Cloudflare Teams Location: id {} for account {}",
            location_id,
            account_id
        );

        d.set("account_id", account_id);
        d.set_id(location_id);
        self.read(&mut d, client).await?;

        Ok(vec![d])
    }
}
