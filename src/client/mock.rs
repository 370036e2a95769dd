//! Mock Cloudflare API client for testing
//!
//! Provides an in-memory implementation of the API traits for unit testing
//! without making real API calls. Server-assigned fields are filled in the
//! way the service does it, so handlers can be exercised end to end.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{AccessApplicationApi, TeamsLocationApi};
use super::models::{
    AccessApplication, AccessScope, LocationEndpoints, SaasApplication, TeamsLocation,
};
use crate::error::{ApiError, INVALID_LOCATION_MESSAGE, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockCloudflareClient::new()
///     .with_locations(vec![TeamsLocationBuilder::new("loc-1").build()])
///     .await;
///
/// let location = mock.get_teams_location("acct", "loc-1").await?;
/// ```
#[derive(Default)]
pub struct MockCloudflareClient {
    /// Locations keyed by id
    locations: Arc<Mutex<BTreeMap<String, TeamsLocation>>>,
    /// Applications keyed by id
    applications: Arc<Mutex<BTreeMap<String, AccessApplication>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Answer updates with an empty id
    empty_update_id: Arc<Mutex<bool>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
    /// Sequence for assigned ids
    next_id: Arc<Mutex<usize>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub get_location: usize,
    pub create_location: usize,
    pub update_location: usize,
    pub delete_location: usize,
    pub get_application: usize,
    pub create_application: usize,
    pub update_application: usize,
    pub delete_application: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.get_location
            + self.create_location
            + self.update_location
            + self.delete_location
            + self.get_application
            + self.create_application
            + self.update_application
            + self.delete_application
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called, e.g. "create_teams_location"
    pub method: String,
    /// Account or zone the call was scoped to
    pub scope: String,
    /// Request payload, when the call carries one
    pub body: Option<serde_json::Value>,
}

impl MockCloudflareClient {
    /// Create a new mock client with empty stores.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed locations returned by get/update/delete.
    pub async fn with_locations(self, locations: Vec<TeamsLocation>) -> Self {
        {
            let mut store = self.locations.lock().await;
            for location in locations {
                store.insert(location.id.clone(), location);
            }
        }
        self
    }

    /// Seed applications returned by get/update/delete.
    pub async fn with_applications(self, applications: Vec<AccessApplication>) -> Self {
        {
            let mut store = self.applications.lock().await;
            for app in applications {
                store.insert(app.id.clone(), app);
            }
        }
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Answer every update with an empty id.
    pub async fn with_empty_update_id(self) -> Self {
        *self.empty_update_id.lock().await = true;
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Current stored copy of a location.
    pub async fn location(&self, id: &str) -> Option<TeamsLocation> {
        self.locations.lock().await.get(id).cloned()
    }

    /// Current stored copy of an application.
    pub async fn application(&self, id: &str) -> Option<AccessApplication> {
        self.applications.lock().await.get(id).cloned()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn capture_request<B: serde::Serialize>(&self, method: &str, scope: &str, body: Option<&B>) {
        let mut requests = self.captured_requests.lock().await;
        requests.push(CapturedRequest {
            method: method.to_string(),
            scope: scope.to_string(),
            body: body.and_then(|b| serde_json::to_value(b).ok()),
        });
    }

    async fn next_id(&self) -> usize {
        let mut next = self.next_id.lock().await;
        *next += 1;
        *next
    }

    fn invalid_location() -> ApiError {
        ApiError::BadRequest(format!("2003: {}", INVALID_LOCATION_MESSAGE))
    }
}

/// Fill the fields the Gateway service derives from a location.
fn assign_location_fields(location: &mut TeamsLocation, n: usize) {
    location.ip = format!("2001:db8::{n}");
    location.doh_subdomain = format!("mocksub{n}");
    location.ipv4_destination = "172.64.36.1".to_string();
    location.ipv4_destination_backup = "172.64.36.2".to_string();
    if location.dns_destination_ips_id.is_none() {
        location.dns_destination_ips_id = Some(format!("mock-dns-ips-{n}"));
    }
    if location.dns_destination_ipv6_block_id.is_none() {
        location.dns_destination_ipv6_block_id = Some(format!("mock-ipv6-block-{n}"));
    }
    let endpoints = location.endpoints.get_or_insert_with(|| {
        let mut defaults = LocationEndpoints::default();
        defaults.ipv4.enabled = true;
        defaults.doh.endpoint.enabled = true;
        defaults
    });
    endpoints.dot.endpoint.authentication_enabled = endpoints.dot.require_token;
    endpoints.doh.endpoint.authentication_enabled = endpoints.doh.require_token;
}

// ============================================================================
// TeamsLocationApi Implementation
// ============================================================================

#[async_trait]
impl TeamsLocationApi for MockCloudflareClient {
    async fn get_teams_location(
        &self,
        account_id: &str,
        location_id: &str,
    ) -> Result<TeamsLocation> {
        self.capture_request::<()>("get_teams_location", account_id, None)
            .await;
        self.check_error().await?;
        self.call_count.lock().await.get_location += 1;

        self.locations
            .lock()
            .await
            .get(location_id)
            .cloned()
            .ok_or_else(|| Self::invalid_location().into())
    }

    async fn create_teams_location(
        &self,
        account_id: &str,
        mut location: TeamsLocation,
    ) -> Result<TeamsLocation> {
        self.capture_request("create_teams_location", account_id, Some(&location))
            .await;
        self.check_error().await?;
        self.call_count.lock().await.create_location += 1;

        let n = self.next_id().await;
        location.id = format!("mock-location-{n}");
        assign_location_fields(&mut location, n);

        self.locations
            .lock()
            .await
            .insert(location.id.clone(), location.clone());
        Ok(location)
    }

    async fn update_teams_location(
        &self,
        account_id: &str,
        mut location: TeamsLocation,
    ) -> Result<TeamsLocation> {
        self.capture_request("update_teams_location", account_id, Some(&location))
            .await;
        self.check_error().await?;
        self.call_count.lock().await.update_location += 1;

        let mut store = self.locations.lock().await;
        let Some(existing) = store.get(&location.id) else {
            return Err(Self::invalid_location().into());
        };
        location.ip = existing.ip.clone();
        location.doh_subdomain = existing.doh_subdomain.clone();
        location.ipv4_destination = existing.ipv4_destination.clone();
        location.ipv4_destination_backup = existing.ipv4_destination_backup.clone();
        if location.dns_destination_ips_id.is_none() {
            location.dns_destination_ips_id = existing.dns_destination_ips_id.clone();
        }
        if location.dns_destination_ipv6_block_id.is_none() {
            location.dns_destination_ipv6_block_id = existing.dns_destination_ipv6_block_id.clone();
        }
        if location.endpoints.is_none() {
            location.endpoints = existing.endpoints.clone();
        }
        if let Some(endpoints) = location.endpoints.as_mut() {
            endpoints.dot.endpoint.authentication_enabled = endpoints.dot.require_token;
            endpoints.doh.endpoint.authentication_enabled = endpoints.doh.require_token;
        }
        store.insert(location.id.clone(), location.clone());

        if *self.empty_update_id.lock().await {
            location.id.clear();
        }
        Ok(location)
    }

    async fn delete_teams_location(&self, account_id: &str, location_id: &str) -> Result<()> {
        self.capture_request::<()>("delete_teams_location", account_id, None)
            .await;
        self.check_error().await?;
        self.call_count.lock().await.delete_location += 1;

        match self.locations.lock().await.remove(location_id) {
            Some(_) => Ok(()),
            None => Err(Self::invalid_location().into()),
        }
    }
}

// ============================================================================
// AccessApplicationApi Implementation
// ============================================================================

#[async_trait]
impl AccessApplicationApi for MockCloudflareClient {
    async fn get_access_application(
        &self,
        scope: &AccessScope,
        app_id: &str,
    ) -> Result<AccessApplication> {
        self.capture_request::<()>("get_access_application", &scope.to_string(), None)
            .await;
        self.check_error().await?;
        self.call_count.lock().await.get_application += 1;

        self.applications
            .lock()
            .await
            .get(app_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("access application {app_id}")).into())
    }

    async fn create_access_application(
        &self,
        scope: &AccessScope,
        mut app: AccessApplication,
    ) -> Result<AccessApplication> {
        self.capture_request("create_access_application", &scope.to_string(), Some(&app))
            .await;
        self.check_error().await?;
        self.call_count.lock().await.create_application += 1;

        let n = self.next_id().await;
        app.id = format!("mock-app-{n}");
        app.aud = format!("mock-aud-{n}");

        match app.saas_app.as_mut() {
            Some(SaasApplication::Oidc(oidc)) => {
                oidc.client_id = Some(format!("mock-client-{n}"));
                oidc.client_secret = Some(format!("mock-secret-{n}").into());
                oidc.public_key = Some(format!("mock-public-key-{n}"));
            }
            Some(SaasApplication::Saml(saml)) => {
                saml.idp_entity_id = Some(format!("https://mock.cloudflareaccess.com/{n}"));
                saml.public_key = Some(format!("mock-public-key-{n}"));
                saml.sso_endpoint = Some(format!("https://mock.cloudflareaccess.com/sso/{n}"));
            }
            None => {}
        }
        let response = app.clone();

        // The OIDC secret is only ever returned by the create call
        if let Some(SaasApplication::Oidc(oidc)) = app.saas_app.as_mut() {
            oidc.client_secret = None;
        }

        self.applications.lock().await.insert(app.id.clone(), app);
        Ok(response)
    }

    async fn update_access_application(
        &self,
        scope: &AccessScope,
        mut app: AccessApplication,
    ) -> Result<AccessApplication> {
        self.capture_request("update_access_application", &scope.to_string(), Some(&app))
            .await;
        self.check_error().await?;
        self.call_count.lock().await.update_application += 1;

        let mut store = self.applications.lock().await;
        let Some(existing) = store.get(&app.id) else {
            return Err(ApiError::NotFound(format!("access application {}", app.id)).into());
        };
        app.aud = existing.aud.clone();
        match (app.saas_app.as_mut(), existing.saas_app.as_ref()) {
            (Some(SaasApplication::Oidc(new)), Some(SaasApplication::Oidc(old))) => {
                new.client_id = old.client_id.clone();
                new.client_secret = None;
                new.public_key = old.public_key.clone();
            }
            (Some(SaasApplication::Saml(new)), Some(SaasApplication::Saml(old))) => {
                new.idp_entity_id = old.idp_entity_id.clone();
                new.public_key = old.public_key.clone();
                new.sso_endpoint = old.sso_endpoint.clone();
            }
            _ => {}
        }
        store.insert(app.id.clone(), app.clone());

        if *self.empty_update_id.lock().await {
            app.id.clear();
        }
        Ok(app)
    }

    async fn delete_access_application(&self, scope: &AccessScope, app_id: &str) -> Result<()> {
        self.capture_request::<()>("delete_access_application", &scope.to_string(), None)
            .await;
        self.check_error().await?;
        self.call_count.lock().await.delete_application += 1;

        match self.applications.lock().await.remove(app_id) {
            Some(_) => Ok(()),
            None => Err(ApiError::NotFound(format!("access application {app_id}")).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::OidcSaasApp;

    #[tokio::test]
    async fn test_unknown_location_reports_invalid_id() {
        let mock = MockCloudflareClient::new();
        let err = mock.get_teams_location("acct", "missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains(INVALID_LOCATION_MESSAGE));
    }

    #[tokio::test]
    async fn test_create_location_assigns_computed_fields() {
        let mock = MockCloudflareClient::new();
        let created = mock
            .create_teams_location(
                "acct",
                TeamsLocation {
                    name: "office".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(created.id, "mock-location-1");
        assert!(!created.doh_subdomain.is_empty());
        assert!(created.endpoints.unwrap().ipv4.enabled);
        assert_eq!(mock.call_counts().await.create_location, 1);
    }

    #[tokio::test]
    async fn test_oidc_secret_only_returned_on_create() {
        let mock = MockCloudflareClient::new();
        let scope = AccessScope::Account("acct".into());
        let app = AccessApplication {
            name: "sso".into(),
            saas_app: Some(SaasApplication::Oidc(OidcSaasApp::default())),
            ..Default::default()
        };

        let created = mock.create_access_application(&scope, app).await.unwrap();
        let Some(SaasApplication::Oidc(oidc)) = created.saas_app else {
            panic!("expected OIDC");
        };
        assert_eq!(oidc.client_secret.unwrap().expose(), "mock-secret-1");

        let fetched = mock.get_access_application(&scope, &created.id).await.unwrap();
        let Some(SaasApplication::Oidc(oidc)) = fetched.saas_app else {
            panic!("expected OIDC");
        };
        assert!(oidc.client_secret.is_none());
        assert_eq!(oidc.client_id.as_deref(), Some("mock-client-1"));
    }

    #[tokio::test]
    async fn test_error_is_consumed_once() {
        let mock = MockCloudflareClient::new()
            .with_error(ApiError::ServerError("boom".into()))
            .await;
        let scope = AccessScope::Zone("z".into());
        assert!(mock.delete_access_application(&scope, "x").await.is_err());
        let err = mock.delete_access_application(&scope, "x").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(mock.call_counts().await.total(), 1);
    }
}
