//! Gateway DNS location API trait

use async_trait::async_trait;

use crate::client::models::TeamsLocation;
use crate::error::Result;

/// Gateway location operations for the Cloudflare API
///
/// Locations are account scoped. Updates are full replacements.
#[async_trait]
pub trait TeamsLocationApi: Send + Sync {
    /// Get one location by identifier.
    ///
    /// The service answers an unknown identifier with a "Location ID is
    /// invalid" failure rather than a 404.
    async fn get_teams_location(&self, account_id: &str, location_id: &str)
    -> Result<TeamsLocation>;

    async fn create_teams_location(
        &self,
        account_id: &str,
        location: TeamsLocation,
    ) -> Result<TeamsLocation>;

    /// Replace a location. `location.id` selects the target.
    async fn update_teams_location(
        &self,
        account_id: &str,
        location: TeamsLocation,
    ) -> Result<TeamsLocation>;

    async fn delete_teams_location(&self, account_id: &str, location_id: &str) -> Result<()>;
}
