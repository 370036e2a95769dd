//! Access application resource.
//!
//! Each nested block has its own module with an `expand_*` function reading
//! the attribute tree and a `flatten_*` function writing the service's answer
//! back. This module assembles them into the full request and runs the
//! lifecycle against the account or zone the application lives in.

use async_trait::async_trait;
use serde_json::Value;

use super::ResourceHandler;
use crate::client::CloudflareApi;
use crate::client::models::{AccessApplication, AccessScope, ApplicationType, SaasApplication};
use crate::error::{ApiError, Error, Result, SchemaError};
use crate::state::ResourceData;

pub mod cors;
pub mod destinations;
pub mod presentation;
pub mod saas;
pub mod schema;
pub mod scim;
pub mod targets;

pub use cors::{expand_cors_headers, flatten_cors_headers};
pub use destinations::{expand_destinations, flatten_destinations};
pub use presentation::{
    expand_footer_links, expand_landing_page_design, flatten_footer_links,
    flatten_landing_page_design,
};
pub use saas::{expand_saas_app, flatten_saas_app};
pub use scim::{expand_scim_config, flatten_scim_config};
pub use targets::{expand_target_criteria, flatten_target_criteria};

/// Import id layouts
const IMPORT_FORMAT: &str = "account/accountID/applicationID\" or \"zone/zoneID/applicationID";

pub struct AccessApplicationResource;

/// Account or zone the application is managed under.
pub fn access_scope(d: &ResourceData) -> Result<AccessScope> {
    if let Some(account_id) = d.string("account_id") {
        return Ok(AccessScope::Account(account_id));
    }
    if let Some(zone_id) = d.string("zone_id") {
        return Ok(AccessScope::Zone(zone_id));
    }
    Err(SchemaError::MissingScope.into())
}

/// Request body for create and update.
pub fn expand_access_application(d: &ResourceData) -> Result<AccessApplication> {
    let app_type = d
        .string("type")
        .map(|t| t.parse::<ApplicationType>())
        .transpose()?
        .unwrap_or_default();

    Ok(AccessApplication {
        id: d.id().to_string(),
        name: d.string("name").unwrap_or_default(),
        domain: d.string("domain"),
        domain_type: d.string("domain_type"),
        app_type,
        self_hosted_domains: d.strings("self_hosted_domains")?,
        destinations: expand_destinations(d)?,
        policies: d.strings("policies")?,
        session_duration: d.string("session_duration"),
        cors_headers: expand_cors_headers(d)?,
        saas_app: expand_saas_app(d)?,
        target_criteria: expand_target_criteria(d)?,
        auto_redirect_to_identity: d.opt_flag("auto_redirect_to_identity"),
        enable_binding_cookie: d.opt_flag("enable_binding_cookie"),
        allowed_idps: d.strings("allowed_idps")?,
        custom_deny_message: d.string("custom_deny_message"),
        custom_deny_url: d.string("custom_deny_url"),
        custom_non_identity_deny_url: d.string("custom_non_identity_deny_url"),
        http_only_cookie_attribute: d.opt_flag("http_only_cookie_attribute"),
        same_site_cookie_attribute: d.string("same_site_cookie_attribute"),
        logo_url: d.string("logo_url"),
        skip_interstitial: d.opt_flag("skip_interstitial"),
        app_launcher_visible: d.opt_flag("app_launcher_visible"),
        service_auth_401_redirect: d.opt_flag("service_auth_401_redirect"),
        custom_pages: d.strings("custom_pages")?,
        tags: d.strings("tags")?,
        app_launcher_logo_url: d.string("app_launcher_logo_url"),
        header_bg_color: d.string("header_bg_color"),
        bg_color: d.string("bg_color"),
        footer_links: expand_footer_links(d)?,
        landing_page_design: expand_landing_page_design(d)?,
        skip_app_launcher_login_page: d.opt_flag("skip_app_launcher_login_page"),
        allow_authenticate_via_warp: d.opt_flag("allow_authenticate_via_warp"),
        options_preflight_bypass: d.opt_flag("options_preflight_bypass"),
        scim_config: expand_scim_config(d)?,
        ..Default::default()
    })
}

/// Write every attribute the service reports.
pub fn flatten_access_application(d: &mut ResourceData, app: &AccessApplication) {
    let cors_headers = flatten_cors_headers(d, app.cors_headers.as_ref());
    let saas_app = flatten_saas_app(d, app.saas_app.as_ref());
    let scim_config = flatten_scim_config(d, app.scim_config.as_ref());
    let footer_links = flatten_footer_links(d, &app.footer_links);
    let landing_page_design = flatten_landing_page_design(d, app.landing_page_design.as_ref());
    let target_criteria = flatten_target_criteria(d, &app.target_criteria);

    let text = |v: &Option<String>| v.clone().unwrap_or_default();

    d.set("name", app.name.as_str());
    d.set("aud", app.aud.as_str());
    d.set("domain", text(&app.domain));
    d.set("domain_type", text(&app.domain_type));
    d.set("type", app.app_type.as_str());
    d.set("self_hosted_domains", app.self_hosted_domains.clone());
    d.set("destinations", flatten_destinations(&app.destinations));
    d.set("policies", app.policies.clone());
    d.set("session_duration", text(&app.session_duration));
    d.set("cors_headers", cors_headers);
    d.set("saas_app", saas_app);
    d.set("target_criteria", target_criteria);
    d.set(
        "auto_redirect_to_identity",
        app.auto_redirect_to_identity.unwrap_or(false),
    );
    d.set("enable_binding_cookie", app.enable_binding_cookie.unwrap_or(false));
    d.set("allowed_idps", app.allowed_idps.clone());
    d.set("custom_deny_message", text(&app.custom_deny_message));
    d.set("custom_deny_url", text(&app.custom_deny_url));
    d.set(
        "custom_non_identity_deny_url",
        text(&app.custom_non_identity_deny_url),
    );
    d.set("http_only_cookie_attribute", app.http_only_cookie_attribute);
    d.set(
        "same_site_cookie_attribute",
        text(&app.same_site_cookie_attribute),
    );
    d.set("logo_url", text(&app.logo_url));
    d.set("skip_interstitial", app.skip_interstitial.unwrap_or(false));
    d.set("app_launcher_visible", app.app_launcher_visible.unwrap_or(true));
    d.set(
        "service_auth_401_redirect",
        app.service_auth_401_redirect.unwrap_or(false),
    );
    d.set("custom_pages", app.custom_pages.clone());
    d.set("tags", app.tags.clone());
    d.set("app_launcher_logo_url", text(&app.app_launcher_logo_url));
    d.set("header_bg_color", text(&app.header_bg_color));
    d.set("bg_color", text(&app.bg_color));
    d.set("footer_links", footer_links);
    d.set("landing_page_design", landing_page_design);
    d.set(
        "skip_app_launcher_login_page",
        app.skip_app_launcher_login_page.unwrap_or(false),
    );
    d.set("allow_authenticate_via_warp", app.allow_authenticate_via_warp);
    d.set(
        "options_preflight_bypass",
        app.options_preflight_bypass.unwrap_or(false),
    );
    d.set("scim_config", scim_config);
}

/// Keep the OIDC client secret from a create response; later reads never return it.
fn store_client_secret(d: &mut ResourceData, app: &AccessApplication) {
    let Some(SaasApplication::Oidc(oidc)) = &app.saas_app else {
        return;
    };
    let Some(secret) = oidc.client_secret.as_ref().filter(|s| !s.is_empty()) else {
        return;
    };
    if let Some(Value::Object(block)) = d
        .attributes_mut()
        .get_mut("saas_app")
        .and_then(|v| v.get_mut(0))
    {
        block.insert(
            "client_secret".to_string(),
            Value::String(secret.expose().to_string()),
        );
    }
}

#[async_trait]
impl ResourceHandler for AccessApplicationResource {
    async fn create(&self, d: &mut ResourceData, client: &dyn CloudflareApi) -> Result<()> {
        let scope = access_scope(d)?;
        let context = format!("error creating Access Application for {scope}");
        let app = expand_access_application(d).map_err(|e| Error::remote(&context, e))?;

        log::debug!("Creating Cloudflare Access Application from struct: {:?}", app);

        let created = client
            .create_access_application(&scope, app)
            .await
            .map_err(|e| Error::remote(&context, e))?;

        d.set_id(created.id.as_str());
        d.set("aud", created.aud.as_str());
        store_client_secret(d, &created);

        self.read(d, client).await
    }

    async fn read(&self, d: &mut ResourceData, client: &dyn CloudflareApi) -> Result<()> {
        let scope = access_scope(d)?;

        let app = match client.get_access_application(&scope, d.id()).await {
            Ok(app) => app,
            Err(e) if e.is_not_found() => {
                log::info!("Access Application {} no longer exists", d.id());
                d.clear_id();
                return Ok(());
            }
            Err(e) => {
                return Err(Error::remote(
                    format!("error finding Access Application {:?}", d.id()),
                    e,
                ));
            }
        };

        flatten_access_application(d, &app);
        Ok(())
    }

    async fn update(&self, d: &mut ResourceData, client: &dyn CloudflareApi) -> Result<()> {
        let scope = access_scope(d)?;
        let context = format!("error updating Access Application for {scope}");
        let app = expand_access_application(d).map_err(|e| Error::remote(&context, e))?;

        log::debug!("Updating Cloudflare Access Application from struct: {:?}", app);

        let updated = client
            .update_access_application(&scope, app)
            .await
            .map_err(|e| Error::remote(&context, e))?;
        if updated.id.is_empty() {
            return Err(ApiError::InvalidResponse(
                "failed to find Access Application ID in update response; resource was empty"
                    .to_string(),
            )
            .into());
        }

        self.read(d, client).await
    }

    async fn delete(&self, d: &mut ResourceData, client: &dyn CloudflareApi) -> Result<()> {
        let scope = access_scope(d)?;
        let id = d.id().to_string();

        log::debug!("Deleting Cloudflare Access Application using ID: {}", id);

        let deleted = client.delete_access_application(&scope, &id).await;
        let refreshed = self.read(d, client).await;

        deleted.map_err(|e| {
            Error::remote(format!("error deleting Access Application for {scope}"), e)
        })?;
        refreshed
    }

    async fn import(
        &self,
        mut d: ResourceData,
        client: &dyn CloudflareApi,
    ) -> Result<Vec<ResourceData>> {
        let raw = d.id().to_string();
        let invalid = || SchemaError::InvalidImportId {
            id: raw.clone(),
            format: IMPORT_FORMAT,
        };

        let mut parts = raw.splitn(3, '/');
        let (Some(kind), Some(scope_id), Some(app_id)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid().into());
        };
        if scope_id.is_empty() || app_id.is_empty() {
            return Err(invalid().into());
        }
        let scope_key = match kind {
            "account" => "account_id",
            "zone" => "zone_id",
            _ => return Err(invalid().into()),
        };

        log::debug!(
            "Importing Cloudflare Access Application: id {} for {} {}",
            app_id,
            kind,
            scope_id
        );

        d.set(scope_key, scope_id);
        d.set_id(app_id);
        self.read(&mut d, client).await?;

        Ok(vec![d])
    }
}
