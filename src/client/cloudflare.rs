//! Cloudflare API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::api::{AccessApplicationApi, TeamsLocationApi};
use super::models::{AccessApplication, AccessScope, TeamsLocation};
use crate::error::{ApiError, Result};
use crate::secret::SecretString;

/// Cloudflare API base URL
const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Path of the v4 API below a custom host
const API_PATH: &str = "/client/v4";

/// Client-side request budget per second
const RATE_LIMIT_PER_SECOND: NonZeroU32 = match NonZeroU32::new(4) {
    Some(n) => n,
    None => panic!("rate limit must be non-zero"),
};

/// Response envelope shared by every v4 endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,

    #[serde(default)]
    errors: Vec<ResponseInfo>,

    result: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseInfo {
    #[serde(default)]
    code: i64,

    #[serde(default)]
    message: String,
}

/// Joined envelope error messages, e.g. `7003: Could not route to /zones/x`.
fn describe_errors(errors: &[ResponseInfo]) -> Option<String> {
    if errors.is_empty() {
        return None;
    }
    Some(
        errors
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join("; "),
    )
}

/// Cloudflare API client
pub struct CloudflareClient {
    http: HttpClient,
    base_url: String,
    token: SecretString,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl CloudflareClient {
    /// Create a client against the public API.
    #[cfg(test)]
    pub fn new(token: SecretString) -> Result<Self> {
        Self::with_host(token, None)
    }

    /// Create a client, optionally against a custom host such as a mock server.
    pub fn with_host(token: SecretString, host: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = match host {
            Some(host) => format!("{}{}", host.trim_end_matches('/'), API_PATH),
            None => API_BASE_URL.to_string(),
        };
        log::debug!("Using API base URL {}", base_url);

        Ok(Self {
            http,
            base_url,
            token,
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_second(RATE_LIMIT_PER_SECOND))),
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an authenticated API request and unwrap the response envelope.
    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        log::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .bearer_auth(self.token.expose());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Self::status_error(status, &text, retry_after).into());
        }

        let envelope: Envelope<T> = serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        if !envelope.success {
            let first = envelope.errors.first().cloned();
            return Err(ApiError::Api {
                code: first.as_ref().map(|e| e.code).unwrap_or_default(),
                message: describe_errors(&envelope.errors)
                    .unwrap_or_else(|| "request was not successful".to_string()),
            }
            .into());
        }

        envelope
            .result
            .ok_or_else(|| ApiError::InvalidResponse("response carried no result".to_string()).into())
    }

    /// Map a non-success status to an error, preferring the envelope's messages.
    fn status_error(status: StatusCode, body: &str, retry_after: Option<u64>) -> ApiError {
        let detail = serde_json::from_str::<Envelope<serde_json::Value>>(body)
            .ok()
            .and_then(|e| describe_errors(&e.errors))
            .unwrap_or_else(|| body.to_string());

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(detail),
            StatusCode::TOO_MANY_REQUESTS => {
                ApiError::RateLimit(Duration::from_secs(retry_after.unwrap_or(60)))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(detail)
            }
            status if status.is_server_error() => ApiError::ServerError(detail),
            status => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
        }
    }
}

/// Delete endpoints answer with the removed id only.
#[derive(Debug, Deserialize)]
struct Deleted {
    #[allow(dead_code)]
    #[serde(default)]
    id: Option<String>,
}

#[async_trait]
impl AccessApplicationApi for CloudflareClient {
    async fn get_access_application(
        &self,
        scope: &AccessScope,
        app_id: &str,
    ) -> Result<AccessApplication> {
        let path = format!("{}/access/apps/{}", scope.path_prefix(), app_id);
        self.request::<_, ()>(Method::GET, &path, None).await
    }

    async fn create_access_application(
        &self,
        scope: &AccessScope,
        app: AccessApplication,
    ) -> Result<AccessApplication> {
        let path = format!("{}/access/apps", scope.path_prefix());
        self.request(Method::POST, &path, Some(&app)).await
    }

    async fn update_access_application(
        &self,
        scope: &AccessScope,
        app: AccessApplication,
    ) -> Result<AccessApplication> {
        let path = format!("{}/access/apps/{}", scope.path_prefix(), app.id);
        self.request(Method::PUT, &path, Some(&app)).await
    }

    async fn delete_access_application(&self, scope: &AccessScope, app_id: &str) -> Result<()> {
        let path = format!("{}/access/apps/{}", scope.path_prefix(), app_id);
        let _: Deleted = self.request::<_, ()>(Method::DELETE, &path, None).await?;
        Ok(())
    }
}

#[async_trait]
impl TeamsLocationApi for CloudflareClient {
    async fn get_teams_location(
        &self,
        account_id: &str,
        location_id: &str,
    ) -> Result<TeamsLocation> {
        let path = format!("/accounts/{}/gateway/locations/{}", account_id, location_id);
        self.request::<_, ()>(Method::GET, &path, None).await
    }

    async fn create_teams_location(
        &self,
        account_id: &str,
        location: TeamsLocation,
    ) -> Result<TeamsLocation> {
        let path = format!("/accounts/{}/gateway/locations", account_id);
        self.request(Method::POST, &path, Some(&location)).await
    }

    async fn update_teams_location(
        &self,
        account_id: &str,
        location: TeamsLocation,
    ) -> Result<TeamsLocation> {
        let path = format!("/accounts/{}/gateway/locations/{}", account_id, location.id);
        self.request(Method::PUT, &path, Some(&location)).await
    }

    async fn delete_teams_location(&self, account_id: &str, location_id: &str) -> Result<()> {
        let path = format!("/accounts/{}/gateway/locations/{}", account_id, location_id);
        let _: Deleted = self.request::<_, ()>(Method::DELETE, &path, None).await?;
        Ok(())
    }
}
