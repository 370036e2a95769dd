//! Attribute declarations of `cloudflare_access_application`.

use crate::client::models::ScimAuthentication;
use crate::schema::{DiffSuppress, Field, Schema, Validator, ValueType};

const APPLICATION_TYPES: &[&str] = &[
    "app_launcher",
    "bookmark",
    "biso",
    "dash_sso",
    "saas",
    "self_hosted",
    "ssh",
    "vnc",
    "warp",
    "infrastructure",
];

const INFRASTRUCTURE: DiffSuppress = DiffSuppress::WhenFieldIn {
    field: "type",
    values: &["infrastructure"],
};

const NO_SESSION: DiffSuppress = DiffSuppress::WhenFieldIn {
    field: "type",
    values: &["bookmark", "infrastructure"],
};

fn destination_schema() -> Schema {
    Schema::new()
        .field(
            "type",
            Field::string()
                .optional()
                .default("public")
                .validate(Validator::OneOf(&["public", "private"]))
                .describe("The destination type."),
        )
        .field(
            "uri",
            Field::string()
                .required()
                .describe("The URI of the destination. Public destinations can include a domain and path with wildcards. Private destinations are an early access feature and gated behind a feature flag."),
        )
}

fn cors_schema() -> Schema {
    Schema::new()
        .field(
            "allowed_methods",
            Field::set_of(ValueType::String)
                .optional()
                .describe("List of methods to expose via CORS."),
        )
        .field(
            "allowed_origins",
            Field::set_of(ValueType::String)
                .optional()
                .describe("List of origins permitted to make CORS requests."),
        )
        .field(
            "allowed_headers",
            Field::set_of(ValueType::String)
                .optional()
                .describe("List of HTTP headers to expose via CORS."),
        )
        .field(
            "allow_all_methods",
            Field::bool()
                .optional()
                .describe("Value to determine whether all methods are exposed."),
        )
        .field(
            "allow_all_origins",
            Field::bool()
                .optional()
                .describe("Value to determine whether all origins are permitted to make CORS requests."),
        )
        .field(
            "allow_all_headers",
            Field::bool()
                .optional()
                .describe("Value to determine whether all HTTP headers are exposed."),
        )
        .field(
            "allow_credentials",
            Field::bool()
                .optional()
                .describe("Value to determine if credentials (cookies, authorization headers, or TLS client certificates) are included with requests."),
        )
        .field(
            "max_age",
            Field::int()
                .optional()
                .validate(Validator::IntBetween(-1, 86400))
                .describe("The maximum time a preflight request will be cached."),
        )
}

fn claim_source_schema() -> Schema {
    Schema::new()
        .field(
            "name",
            Field::string()
                .required()
                .describe("The name of the attribute as provided by the IDP."),
        )
        .field(
            "name_by_idp",
            Field::map_of(ValueType::String)
                .optional()
                .describe("A mapping from IdP ID to claim name."),
        )
}

fn custom_claim_schema() -> Schema {
    Schema::new()
        .field(
            "name",
            Field::string()
                .optional()
                .describe("The name of the attribute as provided to the SaaS app."),
        )
        .field(
            "scope",
            Field::string()
                .optional()
                .validate(Validator::OneOf(&["groups", "profile", "email", "openid"]))
                .describe("The scope of the claim."),
        )
        .field(
            "required",
            Field::bool()
                .optional()
                .describe("True if the attribute must be always present."),
        )
        .field(
            "source",
            Field::block_list(claim_source_schema()).required().max_items(1),
        )
}

fn custom_attribute_schema() -> Schema {
    Schema::new()
        .field(
            "name",
            Field::string()
                .optional()
                .describe("The name of the attribute as provided to the SaaS app."),
        )
        .field(
            "name_format",
            Field::string()
                .optional()
                .validate(Validator::OneOf(&[
                    "urn:oasis:names:tc:SAML:2.0:attrname-format:unspecified",
                    "urn:oasis:names:tc:SAML:2.0:attrname-format:basic",
                    "urn:oasis:names:tc:SAML:2.0:attrname-format:uri",
                ]))
                .describe("A globally unique name for an identity or service provider."),
        )
        .field(
            "friendly_name",
            Field::string()
                .optional()
                .describe("A friendly name for the attribute as provided to the SaaS app."),
        )
        .field(
            "required",
            Field::bool()
                .optional()
                .describe("True if the attribute must be always present."),
        )
        .field(
            "source",
            Field::block_list(claim_source_schema()).required().max_items(1),
        )
}

fn saas_schema() -> Schema {
    Schema::new()
        .field(
            "auth_type",
            Field::string()
                .optional_computed()
                .force_new()
                .validate(Validator::OneOf(&["oidc", "saml"]))
                .describe("The authentication type of the SaaS application."),
        )
        .field(
            "public_key",
            Field::string()
                .computed()
                .describe("The public certificate that will be used to verify identities."),
        )
        // OIDC
        .field(
            "client_id",
            Field::string()
                .computed()
                .describe("The application client id."),
        )
        .field(
            "client_secret",
            Field::string()
                .computed()
                .sensitive()
                .conceal_in_state()
                .describe("The application client secret, only returned on initial apply."),
        )
        .field(
            "redirect_uris",
            Field::set_of(ValueType::String)
                .optional()
                .describe("The permitted URL's for Cloudflare to return Authorization codes and Access/ID tokens."),
        )
        .field(
            "grant_types",
            Field::set_of(ValueType::String)
                .optional_computed()
                .validate(Validator::OneOf(&[
                    "authorization_code",
                    "authorization_code_with_pkce",
                    "refresh_tokens",
                    "hybrid",
                    "implicit",
                ]))
                .describe("The OIDC flows supported by this application."),
        )
        .field(
            "scopes",
            Field::set_of(ValueType::String)
                .optional_computed()
                .validate(Validator::OneOf(&["openid", "groups", "email", "profile"]))
                .describe("Define the user information shared with access."),
        )
        .field(
            "app_launcher_url",
            Field::string()
                .optional()
                .describe("The URL where this applications tile redirects users."),
        )
        .field(
            "group_filter_regex",
            Field::string()
                .optional()
                .describe("A regex to filter Cloudflare groups returned in ID token and userinfo endpoint."),
        )
        .field(
            "access_token_lifetime",
            Field::string()
                .optional()
                .validate(Validator::Duration)
                .describe("The lifetime of the Access Token after creation."),
        )
        .field(
            "allow_pkce_without_client_secret",
            Field::bool()
                .optional()
                .describe("Allow PKCE flow without a client secret."),
        )
        .field(
            "refresh_token_options",
            Field::block_list(Schema::new().field(
                "lifetime",
                Field::string()
                    .optional()
                    .validate(Validator::Duration)
                    .describe("How long a refresh token will be valid for after creation."),
            ))
            .optional()
            .describe("Refresh token grant options."),
        )
        .field(
            "custom_claim",
            Field::block_list(custom_claim_schema())
                .optional()
                .describe("Custom claim mapped from IDPs."),
        )
        .field(
            "hybrid_and_implicit_options",
            Field::block_list(
                Schema::new()
                    .field(
                        "return_id_token_from_authorization_endpoint",
                        Field::bool().optional(),
                    )
                    .field(
                        "return_access_token_from_authorization_endpoint",
                        Field::bool().optional(),
                    ),
            )
            .optional()
            .max_items(1)
            .describe("Hybrid and implicit flow options."),
        )
        // SAML
        .field(
            "sp_entity_id",
            Field::string()
                .optional()
                .describe("A globally unique name for an identity or service provider."),
        )
        .field(
            "consumer_service_url",
            Field::string()
                .optional()
                .describe("The service provider's endpoint that is responsible for receiving and parsing a SAML assertion."),
        )
        .field(
            "name_id_format",
            Field::string()
                .optional()
                .validate(Validator::OneOf(&["email", "id"]))
                .describe("The format of the name identifier sent to the SaaS application."),
        )
        .field(
            "custom_attribute",
            Field::block_list(custom_attribute_schema())
                .optional()
                .describe("Custom attribute mapped from IDPs."),
        )
        .field(
            "idp_entity_id",
            Field::string()
                .computed()
                .describe("The unique identifier for the SaaS application."),
        )
        .field(
            "sso_endpoint",
            Field::string()
                .computed()
                .describe("The endpoint where the SaaS application will send login requests."),
        )
        .field(
            "default_relay_state",
            Field::string()
                .optional()
                .describe("The relay state used if not provided by the identity provider."),
        )
        .field(
            "name_id_transform_jsonata",
            Field::string()
                .optional()
                .describe("A JSONata expression that transforms an application's user identities into a NameID value for its SAML assertion."),
        )
        .field(
            "saml_attribute_transform_jsonata",
            Field::string()
                .optional()
                .describe("A JSONata expression that transforms an application's user identities into attribute assertions in the SAML response."),
        )
}

fn target_criteria_schema() -> Schema {
    Schema::new()
        .field(
            "port",
            Field::int()
                .required()
                .validate(Validator::IntBetween(1, 65535))
                .describe("The port that the targets use for the chosen communication protocol."),
        )
        .field(
            "protocol",
            Field::string()
                .required()
                .validate(Validator::OneOf(&["SSH", "RDP"]))
                .describe("The communication protocol your application secures."),
        )
        .field(
            "target_attributes",
            Field::block_list(
                Schema::new()
                    .field(
                        "name",
                        Field::string()
                            .required()
                            .describe("The key of the attribute."),
                    )
                    .field(
                        "values",
                        Field::list_of(ValueType::String)
                            .required()
                            .describe("The values of the attribute."),
                    ),
            )
            .required()
            .describe("Contains a map of target attribute keys to target attribute values."),
        )
}

fn footer_link_schema() -> Schema {
    Schema::new()
        .field(
            "name",
            Field::string()
                .optional()
                .describe("The name of the footer link."),
        )
        .field(
            "url",
            Field::string()
                .optional()
                .describe("The URL of the footer link."),
        )
}

fn landing_page_schema() -> Schema {
    Schema::new()
        .field("title", Field::string().optional().describe("The title of the landing page."))
        .field(
            "message",
            Field::string()
                .optional()
                .describe("The message of the landing page."),
        )
        .field(
            "button_text_color",
            Field::string()
                .optional()
                .describe("The button text color of the landing page."),
        )
        .field(
            "button_color",
            Field::string()
                .optional()
                .describe("The button color of the landing page."),
        )
        .field(
            "image_url",
            Field::string()
                .optional()
                .describe("The URL of the image to be displayed in the landing page."),
        )
}

fn scim_authentication_schema() -> Schema {
    Schema::new()
        .field(
            "scheme",
            Field::string()
                .required()
                .validate(Validator::OneOf(&ScimAuthentication::SCHEMES))
                .describe("The authentication scheme to use when making SCIM requests to this application."),
        )
        .field(
            "user",
            Field::string()
                .optional()
                .describe("User name used to authenticate with the remote SCIM service."),
        )
        .field(
            "password",
            Field::string()
                .optional()
                .sensitive()
                .conceal_in_state(),
        )
        .field(
            "token",
            Field::string()
                .optional()
                .sensitive()
                .conceal_in_state()
                .describe("Token used to authenticate with the remote SCIM service."),
        )
        .field(
            "client_id",
            Field::string()
                .optional()
                .describe("Client ID used to authenticate when generating a token for authenticating with the remote SCIM service."),
        )
        .field(
            "client_secret",
            Field::string()
                .optional()
                .sensitive()
                .conceal_in_state()
                .describe("Secret used to authenticate when generating a token for authenticating with the remove SCIM service."),
        )
        .field(
            "authorization_url",
            Field::string()
                .optional()
                .describe("URL used to generate the auth code used during token generation."),
        )
        .field(
            "token_url",
            Field::string()
                .optional()
                .describe("URL used to generate the token used to authenticate with the remote SCIM service."),
        )
        .field(
            "scopes",
            Field::set_of(ValueType::String)
                .optional()
                .describe("The authorization scopes to request when generating the token used to authenticate with the remove SCIM service."),
        )
}

fn scim_mapping_schema() -> Schema {
    Schema::new()
        .field(
            "schema",
            Field::string()
                .required()
                .validate(Validator::Matches {
                    pattern: "^urn:.*",
                    message: "schema must begin with \"urn:\"",
                })
                .describe("Which SCIM resource type this mapping applies to."),
        )
        .field(
            "enabled",
            Field::bool()
                .optional()
                .describe("Whether or not this mapping is enabled."),
        )
        .field(
            "filter",
            Field::string()
                .optional()
                .describe("A filter expression to apply to resources before provisioning them."),
        )
        .field(
            "transform_jsonata",
            Field::string()
                .optional()
                .describe("A JSONata expression that transforms the resource before provisioning it in the application."),
        )
        .field(
            "operations",
            Field::block_list(
                Schema::new()
                    .field(
                        "create",
                        Field::bool()
                            .optional()
                            .describe("Whether or not this mapping applies to create (POST) operations."),
                    )
                    .field(
                        "update",
                        Field::bool()
                            .optional()
                            .describe("Whether or not this mapping applies to update (PATCH/PUT) operations."),
                    )
                    .field(
                        "delete",
                        Field::bool()
                            .optional()
                            .describe("Whether or not this mapping applies to DELETE operations."),
                    ),
            )
            .optional()
            .max_items(1)
            .describe("Whether or not this mapping applies to creates, updates, or deletes."),
        )
        .field(
            "strictness",
            Field::string()
                .optional()
                .validate(Validator::OneOf(&["strict", "passthrough"]))
                .describe("How strictly to adhere to outbound resource schemas when provisioning to this mapping."),
        )
}

fn scim_schema() -> Schema {
    Schema::new()
        .field(
            "enabled",
            Field::bool()
                .optional()
                .describe("Whether SCIM provisioning is turned on for this application."),
        )
        .field(
            "remote_uri",
            Field::string()
                .required()
                .describe("The base URI for the application's SCIM-compatible API."),
        )
        .field(
            "idp_uid",
            Field::string()
                .required()
                .describe("The UID of the IdP to use as the source for SCIM resources to provision to this application."),
        )
        .field(
            "deactivate_on_delete",
            Field::bool()
                .optional()
                .describe("If false, propagates DELETE requests to the target application for SCIM resources. If true, sets 'active' to false on the SCIM resource."),
        )
        .field(
            "authentication",
            Field::block_list(scim_authentication_schema())
                .optional()
                .describe("Attributes for configuring HTTP Basic, OAuth Bearer token, or OAuth 2 authentication schemes for SCIM provisioning to an application."),
        )
        .field(
            "mappings",
            Field::block_list(scim_mapping_schema())
                .optional()
                .describe("A list of mappings to apply to SCIM resources before provisioning them in this application."),
        )
}

pub fn access_application_schema() -> Schema {
    Schema::new()
        .field(
            "account_id",
            Field::string()
                .optional_computed()
                .force_new()
                .conflicts_with(&["zone_id"])
                .describe("The account identifier to target for the resource."),
        )
        .field(
            "zone_id",
            Field::string()
                .optional_computed()
                .force_new()
                .conflicts_with(&["account_id"])
                .describe("The zone identifier to target for the resource."),
        )
        .field(
            "aud",
            Field::string()
                .computed()
                .describe("Application Audience (AUD) Tag of the application."),
        )
        .field(
            "name",
            Field::string()
                .optional_computed()
                .describe("Friendly name of the Access Application."),
        )
        .field(
            "domain",
            Field::string()
                .optional_computed()
                .diff_suppress(INFRASTRUCTURE)
                .describe("The primary hostname and path that Access will secure."),
        )
        .field(
            "domain_type",
            Field::string()
                .optional_computed()
                .validate(Validator::OneOf(&["public", "private"]))
                .diff_suppress(INFRASTRUCTURE)
                .describe("The type of the primary domain."),
        )
        .field(
            "destinations",
            Field::block_list(destination_schema())
                .optional()
                .conflicts_with(&["self_hosted_domains"])
                .describe("A destination secured by Access. Only present for self_hosted, vnc, and ssh applications."),
        )
        .field(
            "self_hosted_domains",
            Field::set_of(ValueType::String)
                .optional()
                .conflicts_with(&["destinations"])
                .deprecated("Use `destinations` instead")
                .describe("List of public domains secured by Access."),
        )
        .field(
            "type",
            Field::string()
                .optional()
                .default("self_hosted")
                .validate(Validator::OneOf(APPLICATION_TYPES))
                .describe("The application type."),
        )
        .field(
            "policies",
            Field::list_of(ValueType::String)
                .optional()
                .describe("The policies associated with the application, in ascending order of precedence."),
        )
        .field(
            "session_duration",
            Field::string()
                .optional()
                .default("24h")
                .validate(Validator::Duration)
                .diff_suppress(NO_SESSION)
                .describe("How often a user will be forced to re-authorise."),
        )
        .field(
            "cors_headers",
            Field::block_list(cors_schema())
                .optional()
                .describe("CORS configuration for the Access Application."),
        )
        .field(
            "saas_app",
            Field::block_list(saas_schema())
                .optional()
                .max_items(1)
                .describe("SaaS configuration for the Access Application."),
        )
        .field(
            "target_criteria",
            Field::block_list(target_criteria_schema())
                .optional()
                .describe("The payload for an infrastructure application which defines the port, protocol, and target attributes."),
        )
        .field(
            "auto_redirect_to_identity",
            Field::bool()
                .optional()
                .default(false)
                .describe("Option to skip identity provider selection if only one is configured in `allowed_idps`."),
        )
        .field(
            "enable_binding_cookie",
            Field::bool()
                .optional()
                .default(false)
                .describe("Option to provide increased security against compromised authorization tokens and CSRF attacks."),
        )
        .field(
            "allowed_idps",
            Field::set_of(ValueType::String)
                .optional()
                .describe("The identity providers selected for the application."),
        )
        .field(
            "custom_deny_message",
            Field::string()
                .optional()
                .describe("Option that returns a custom error message when a user is denied access to the application."),
        )
        .field(
            "custom_deny_url",
            Field::string()
                .optional()
                .describe("Option that redirects to a custom URL when a user is denied access to the application via identity based rules."),
        )
        .field(
            "custom_non_identity_deny_url",
            Field::string()
                .optional()
                .describe("Option that redirects to a custom URL when a user is denied access to the application via non identity rules."),
        )
        .field(
            "http_only_cookie_attribute",
            Field::bool()
                .optional()
                .describe("Option to add the `HttpOnly` cookie flag to access tokens."),
        )
        .field(
            "same_site_cookie_attribute",
            Field::string()
                .optional()
                .validate(Validator::OneOf(&["none", "lax", "strict"]))
                .describe("Defines the same-site cookie setting for access tokens."),
        )
        .field(
            "logo_url",
            Field::string()
                .optional()
                .describe("Image URL for the logo shown in the app launcher dashboard."),
        )
        .field(
            "skip_interstitial",
            Field::bool()
                .optional()
                .default(false)
                .describe("Option to skip the authorization interstitial when using the CLI."),
        )
        .field(
            "app_launcher_visible",
            Field::bool()
                .optional()
                .default(true)
                .diff_suppress(INFRASTRUCTURE)
                .describe("Option to show/hide applications in App Launcher."),
        )
        .field(
            "service_auth_401_redirect",
            Field::bool()
                .optional()
                .default(false)
                .describe("Option to return a 401 status code in service authentication rules on failed requests."),
        )
        .field(
            "custom_pages",
            Field::set_of(ValueType::String)
                .optional()
                .describe("The custom pages selected for the application."),
        )
        .field(
            "tags",
            Field::set_of(ValueType::String)
                .optional()
                .describe("The itags associated with the application."),
        )
        .field(
            "app_launcher_logo_url",
            Field::string()
                .optional()
                .describe("The logo URL of the app launcher."),
        )
        .field(
            "header_bg_color",
            Field::string()
                .optional()
                .describe("The background color of the header bar in the app launcher."),
        )
        .field(
            "bg_color",
            Field::string()
                .optional()
                .describe("The background color of the app launcher."),
        )
        .field(
            "footer_links",
            Field::block_set(footer_link_schema())
                .optional()
                .describe("The footer links of the app launcher."),
        )
        .field(
            "landing_page_design",
            Field::block_list(landing_page_schema())
                .optional()
                .max_items(1)
                .describe("The landing page design of the app launcher."),
        )
        .field(
            "skip_app_launcher_login_page",
            Field::bool()
                .optional()
                .default(false)
                .describe("Option to skip the App Launcher landing page."),
        )
        .field(
            "allow_authenticate_via_warp",
            Field::bool()
                .optional()
                .describe("When set to true, users can authenticate to this application using their WARP session."),
        )
        .field(
            "options_preflight_bypass",
            Field::bool()
                .optional()
                .default(false)
                .describe("Allows options preflight requests to bypass Access authentication and go directly to the origin. Cannot turn on if cors_headers is set."),
        )
        .field(
            "scim_config",
            Field::block_list(scim_schema())
                .optional()
                .max_items(1)
                .describe("Configuration for provisioning to this application via SCIM."),
        )
}
