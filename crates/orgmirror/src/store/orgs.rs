use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entity::host_type::HostType;
use crate::entity::organization::{ActiveModel, Column, Entity as Organization, Model};
use crate::host::RemoteOrg;

use super::errors::Result;

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// Find an organization by its host-assigned numeric id.
pub async fn find_by_remote_id(
    db: &DatabaseConnection,
    host: HostType,
    remote_id: i64,
) -> Result<Option<Model>> {
    let found = Organization::find()
        .filter(Column::HostType.eq(host))
        .filter(Column::RemoteId.eq(remote_id))
        .one(db)
        .await?;
    Ok(found)
}

/// Find an organization by login, case-insensitively.
pub async fn find_by_login(
    db: &DatabaseConnection,
    host: HostType,
    login: &str,
) -> Result<Option<Model>> {
    let found = Organization::find()
        .filter(Column::HostType.eq(host))
        .filter(Expr::expr(Func::lower(Expr::col(Column::Login))).eq(login.to_lowercase()))
        .one(db)
        .await?;
    Ok(found)
}

/// Find an organization by its internal id.
pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>> {
    let found = Organization::find_by_id(id).one(db).await?;
    Ok(found)
}

// ─── Writes ──────────────────────────────────────────────────────────────────

/// Whether a remote snapshot carries anything the local record does not.
fn differs(model: &Model, remote: &RemoteOrg) -> bool {
    model.login != remote.login
        || model.name != remote.name
        || model.site != remote.site
        || model.email != remote.email
        || model.location != remote.location
        || model.bio != remote.bio
}

/// Insert a brand-new organization from a remote snapshot.
///
/// A unique violation here means a concurrent writer inserted the same
/// organization first. Callers detect it via
/// [`StoreError::is_unique_violation`](super::StoreError::is_unique_violation)
/// and re-resolve.
pub async fn insert_from_remote(
    db: &DatabaseConnection,
    host: HostType,
    remote: &RemoteOrg,
) -> Result<Model> {
    let model = ActiveModel {
        id: Set(Uuid::new_v4()),
        host_type: Set(host),
        remote_id: Set(Some(remote.id)),
        login: Set(remote.login.clone()),
        name: Set(remote.name.clone()),
        site: Set(remote.site.clone()),
        email: Set(remote.email.clone()),
        location: Set(remote.location.clone()),
        bio: Set(remote.bio.clone()),
        hidden: Set(false),
        last_synced_at: Set(None),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(db)
    .await?;
    Ok(model)
}

/// Insert a placeholder row for a login we have not fetched yet.
///
/// The row has no remote id; the first successful sync assigns one.
pub async fn insert_placeholder(
    db: &DatabaseConnection,
    host: HostType,
    login: &str,
) -> Result<Model> {
    let model = ActiveModel {
        id: Set(Uuid::new_v4()),
        host_type: Set(host),
        remote_id: Set(None),
        login: Set(login.to_string()),
        name: Set(None),
        site: Set(None),
        email: Set(None),
        location: Set(None),
        bio: Set(None),
        hidden: Set(false),
        last_synced_at: Set(None),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(db)
    .await?;
    Ok(model)
}

/// Overwrite a record's login and profile from a remote snapshot.
///
/// `remote_id` is immutable once set: with `adopt_remote_id` the remote's id
/// is written only onto a record that has none. When neither adoption nor any
/// profile field applies, the record is returned untouched without issuing a
/// write.
pub async fn apply_remote(
    db: &DatabaseConnection,
    model: Model,
    remote: &RemoteOrg,
    adopt_remote_id: bool,
) -> Result<Model> {
    let adopt = adopt_remote_id && model.remote_id.is_none();
    if !adopt && !differs(&model, remote) {
        return Ok(model);
    }

    let mut active: ActiveModel = model.into();
    if adopt {
        active.remote_id = Set(Some(remote.id));
    }
    active.login = Set(remote.login.clone());
    active.name = Set(remote.name.clone());
    active.site = Set(remote.site.clone());
    active.email = Set(remote.email.clone());
    active.location = Set(remote.location.clone());
    active.bio = Set(remote.bio.clone());

    let updated = active.update(db).await?;
    Ok(updated)
}

/// Delete an organization record.
pub async fn delete(db: &DatabaseConnection, model: Model) -> Result<()> {
    model.delete(db).await?;
    Ok(())
}

/// Record that a full sync just completed for this organization.
pub async fn touch_synced(db: &DatabaseConnection, model: Model) -> Result<Model> {
    let mut active: ActiveModel = model.into();
    active.last_synced_at = Set(Some(Utc::now().fixed_offset()));
    let updated = active.update(db).await?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(id: i64, login: &str) -> RemoteOrg {
        RemoteOrg {
            id,
            login: login.to_string(),
            name: Some("Name".to_string()),
            site: None,
            email: None,
            location: None,
            bio: None,
        }
    }

    fn model(remote_id: Option<i64>, login: &str) -> Model {
        Model {
            id: Uuid::new_v4(),
            host_type: HostType::GitHub,
            remote_id,
            login: login.to_string(),
            name: Some("Name".to_string()),
            site: None,
            email: None,
            location: None,
            bio: None,
            hidden: false,
            last_synced_at: None,
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn test_differs_detects_login_change() {
        assert!(differs(&model(Some(1), "old"), &remote(1, "new")));
        assert!(!differs(&model(Some(1), "same"), &remote(1, "same")));
    }

    #[test]
    fn test_differs_detects_profile_change() {
        let mut r = remote(1, "same");
        r.bio = Some("updated".to_string());
        assert!(differs(&model(Some(1), "same"), &r));
    }

    #[tokio::test]
    async fn test_apply_remote_skips_write_when_unchanged() {
        use sea_orm::{DatabaseBackend, MockDatabase};

        // No exec results appended: any write would error the mock.
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let m = model(Some(1), "same");
        let out = apply_remote(&db, m.clone(), &remote(1, "same"), false)
            .await
            .unwrap();
        assert_eq!(out, m);
    }
}
