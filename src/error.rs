//! Error types for the provider

use std::time::Duration;
use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message fragment the Gateway API uses when a location identifier no longer resolves.
pub const INVALID_LOCATION_MESSAGE: &str = "Location ID is invalid";

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A remote failure wrapped with the operation and resource it belongs to
    #[error("{context}: {source}")]
    Remote {
        context: String,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl Error {
    /// Wrap a failure with operation context, e.g. `error finding Teams Location "abc"`.
    pub fn remote(context: impl Into<String>, source: Error) -> Self {
        Error::Remote {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Whether the remote service reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Api(err) => err.is_not_found(),
            Error::Remote { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Run `ztprov init` to set up your API token.")]
    Unauthorized,

    #[error("Access denied. The API token lacks permission for this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Failure reported inside the response envelope, with the service's own code
    #[error("{message} ({code})")]
    Api { code: i64, message: String },
}

impl ApiError {
    /// Classify "not found" from the structured kind, falling back to the
    /// Gateway message text for responses that carry no usable status.
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::NotFound(_) => true,
            ApiError::Api { code, message } => {
                *code == 404 || message.contains(INVALID_LOCATION_MESSAGE)
            }
            ApiError::BadRequest(message) | ApiError::ServerError(message) => {
                message.contains(INVALID_LOCATION_MESSAGE)
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Errors raised while reading or checking the attribute tree
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    /// The attribute tree does not have the shape the field declares
    #[error("error parsing {field}: {message}")]
    Parse { field: String, message: String },

    /// A business rule spanning several attributes was violated
    #[error("{0}")]
    Invalid(String),

    #[error("failed to parse {field}: value must be one of {expected}")]
    UnknownVariant {
        field: String,
        value: String,
        expected: String,
    },

    #[error("invalid id (\"{id}\") specified, should be in format \"{format}\"")]
    InvalidImportId { id: String, format: &'static str },

    #[error("either account_id or zone_id must be set")]
    MissingScope,

    #[error("configuration is invalid:\n  {}", .0.join("\n  "))]
    Diagnostics(Vec<String>),

    #[error("unknown resource type \"{0}\"")]
    UnknownResource(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `ztprov init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("API token not configured. Run `ztprov init` or set CLOUDFLARE_API_TOKEN.")]
    MissingApiToken,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
