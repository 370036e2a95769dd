//! Wire models for the Zero Trust API

mod access_application;
mod saas;
mod scim;
mod teams_location;

pub use access_application::{
    AccessApplication, AccessDestination, AccessScope, ApplicationType, CorsHeaders,
    DestinationType, FooterLink, InfrastructureProtocol, LandingPageDesign, TargetContext,
};
pub use saas::{
    ClaimSource, HybridAndImplicitOptions, OidcClaim, OidcSaasApp, RefreshTokenOptions,
    SaasApplication, SamlAttribute, SamlSaasApp,
};
pub use scim::{
    ScimAuthentication, ScimAuthenticationSet, ScimConfig, ScimMapping, ScimMappingOperations,
};
pub use teams_location::{
    Ipv4Endpoint, LocationEndpoints, LocationNetwork, NetworkEndpoint, TeamsLocation,
    TokenEndpoint,
};
