//! Repository ownership re-linking.

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::entity::organization::Model;
use crate::store::repos;

use super::Result;

/// Sweep every repository under `login/` into this organization.
///
/// Repository ownership is established by string-matching the owner prefix
/// of `full_name` at creation time, so a rename or a freshly resolved
/// organization leaves previously created rows pointing at a user or at
/// nothing. This is a bulk, non-transactional rewrite of ownership
/// references: an eventual-consistency mechanism, not foreign-key
/// integrity. It creates and deletes nothing.
///
/// Returns the number of repositories relinked.
pub async fn relink_repositories(db: &DatabaseConnection, organization: &Model) -> Result<u64> {
    if organization.login.is_empty() {
        return Ok(0);
    }

    let count = repos::relink_owner(
        db,
        organization.host_type,
        &organization.login,
        organization.id,
    )
    .await?;

    if count > 0 {
        info!(
            login = %organization.login,
            count,
            "relinked repositories to organization"
        );
    }
    Ok(count)
}
