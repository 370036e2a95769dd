//! Access application API trait
//!
//! Applications live either under an account or under a zone; every call
//! takes the [`AccessScope`] that selects the path prefix.

use async_trait::async_trait;

use crate::client::models::{AccessApplication, AccessScope};
use crate::error::Result;

/// Access application operations for the Cloudflare API
#[async_trait]
pub trait AccessApplicationApi: Send + Sync {
    // ========================================================================
    // Read Operations
    // ========================================================================

    /// Get one application by identifier.
    ///
    /// A missing application surfaces as an error for which
    /// [`Error::is_not_found`](crate::error::Error::is_not_found) holds.
    async fn get_access_application(
        &self,
        scope: &AccessScope,
        app_id: &str,
    ) -> Result<AccessApplication>;

    // ========================================================================
    // Write Operations
    // ========================================================================

    /// Create an application. The response carries the new id and audience tag,
    /// plus the OIDC client secret for SAAS applications.
    async fn create_access_application(
        &self,
        scope: &AccessScope,
        app: AccessApplication,
    ) -> Result<AccessApplication>;

    /// Replace an application. `app.id` selects the target.
    async fn update_access_application(
        &self,
        scope: &AccessScope,
        app: AccessApplication,
    ) -> Result<AccessApplication>;

    async fn delete_access_application(&self, scope: &AccessScope, app_id: &str) -> Result<()>;
}
