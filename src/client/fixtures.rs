//! Test fixtures and builders for API model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)] // Builder methods are available for future tests

use super::models::{
    AccessApplication, ApplicationType, CorsHeaders, LocationEndpoints, LocationNetwork,
    SaasApplication, ScimConfig, TeamsLocation,
};

// ============================================================================
// TeamsLocationBuilder
// ============================================================================

/// Builder for creating test TeamsLocation instances, as the service returns them.
///
/// # Example
/// ```ignore
/// let location = TeamsLocationBuilder::new("loc-1")
///     .name("office")
///     .network("192.0.2.0/24")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct TeamsLocationBuilder {
    location: TeamsLocation,
}

impl TeamsLocationBuilder {
    /// Create a new builder with the given ID and server-assigned defaults.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            location: TeamsLocation {
                name: format!("Location {}", &id),
                ip: "2001:db8::53".to_string(),
                doh_subdomain: "fixture0sub".to_string(),
                ipv4_destination: "172.64.36.1".to_string(),
                ipv4_destination_backup: "172.64.36.2".to_string(),
                dns_destination_ips_id: Some("dns-ips-fixture".to_string()),
                dns_destination_ipv6_block_id: Some("ipv6-block-fixture".to_string()),
                id,
                ..Default::default()
            },
        }
    }

    /// Set the location name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.location.name = name.into();
        self
    }

    /// Add a source network.
    pub fn network(mut self, cidr: impl Into<String>) -> Self {
        self.location.networks.push(LocationNetwork::new(cidr));
        self
    }

    pub fn client_default(mut self, value: bool) -> Self {
        self.location.client_default = value;
        self
    }

    pub fn ecs_support(mut self, value: bool) -> Self {
        self.location.ecs_support = Some(value);
        self
    }

    pub fn endpoints(mut self, endpoints: LocationEndpoints) -> Self {
        self.location.endpoints = Some(endpoints);
        self
    }

    /// Build the TeamsLocation.
    pub fn build(self) -> TeamsLocation {
        self.location
    }
}

// ============================================================================
// AccessApplicationBuilder
// ============================================================================

/// Builder for creating test AccessApplication instances.
///
/// # Example
/// ```ignore
/// let app = AccessApplicationBuilder::new("app-1")
///     .name("wiki")
///     .domain("wiki.example.com")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct AccessApplicationBuilder {
    app: AccessApplication,
}

impl AccessApplicationBuilder {
    /// Create a new builder with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            app: AccessApplication {
                name: format!("Application {}", &id),
                aud: format!("aud-{}", &id),
                session_duration: Some("24h".to_string()),
                app_launcher_visible: Some(true),
                id,
                ..Default::default()
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.app.name = name.into();
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.app.domain = Some(domain.into());
        self
    }

    pub fn app_type(mut self, app_type: ApplicationType) -> Self {
        self.app.app_type = app_type;
        self
    }

    pub fn cors(mut self, cors: CorsHeaders) -> Self {
        self.app.cors_headers = Some(cors);
        self
    }

    pub fn saas(mut self, saas: SaasApplication) -> Self {
        self.app.app_type = ApplicationType::Saas;
        self.app.saas_app = Some(saas);
        self
    }

    pub fn scim(mut self, scim: ScimConfig) -> Self {
        self.app.scim_config = Some(scim);
        self
    }

    pub fn policies(mut self, policies: &[&str]) -> Self {
        self.app.policies = policies.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Build the AccessApplication.
    pub fn build(self) -> AccessApplication {
        self.app
    }
}
