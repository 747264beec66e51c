use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::warn;
use uuid::Uuid;

use crate::entity::host_type::HostType;
use crate::entity::repository::{ActiveModel, Column, Entity as Repository, Model};

use super::errors::{Result, StoreError};

/// Number of retry attempts for the bulk relink statement.
const RELINK_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds, doubled on each retry.
const RELINK_BACKOFF_MS: u64 = 100;

/// Find a repository by owner-qualified name, case-insensitively.
pub async fn find_by_full_name(
    db: &DatabaseConnection,
    host: HostType,
    full_name: &str,
) -> Result<Option<Model>> {
    let found = Repository::find()
        .filter(Column::HostType.eq(host))
        .filter(Expr::expr(Func::lower(Expr::col(Column::FullName))).eq(full_name.to_lowercase()))
        .one(db)
        .await?;
    Ok(found)
}

/// Insert a repository stub if none exists for this full name.
///
/// Idempotent under races: if a concurrent writer inserts the same name
/// first, the unique violation is swallowed and the winner's row returned.
pub async fn upsert_stub(
    db: &DatabaseConnection,
    host: HostType,
    full_name: &str,
    organization_id: Option<Uuid>,
) -> Result<Model> {
    if let Some(existing) = find_by_full_name(db, host, full_name).await? {
        return Ok(existing);
    }

    let inserted = ActiveModel {
        id: Set(Uuid::new_v4()),
        host_type: Set(host),
        full_name: Set(full_name.to_string()),
        organization_id: Set(organization_id),
        user_id: Set(None),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(db)
    .await;

    match inserted {
        Ok(model) => Ok(model),
        Err(err) => {
            let err = StoreError::from(err);
            if err.is_unique_violation() {
                find_by_full_name(db, host, full_name)
                    .await?
                    .ok_or_else(|| StoreError::NotFound {
                        context: format!("{host}/{full_name}"),
                    })
            } else {
                Err(err)
            }
        }
    }
}

/// Escape LIKE metacharacters so a login is matched literally.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

async fn relink_owner_inner(
    db: &DatabaseConnection,
    host: HostType,
    login: &str,
    organization_id: Uuid,
) -> Result<u64> {
    let pattern = format!("{}/%", escape_like(&login.to_lowercase()));

    let result = Repository::update_many()
        .col_expr(Column::OrganizationId, Expr::value(organization_id))
        .col_expr(Column::UserId, Expr::value(Option::<Uuid>::None))
        .filter(Column::HostType.eq(host))
        .filter(
            Expr::expr(Func::lower(Expr::col(Column::FullName)))
                .like(LikeExpr::new(pattern).escape('\\')),
        )
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Point every repository under `login/` at the given organization.
///
/// Matching is by the `login/` prefix of `full_name`, case-insensitive, with
/// LIKE metacharacters in the login escaped. Any previous user ownership is
/// cleared in the same statement. Transient database errors are retried with
/// exponential backoff.
///
/// Returns the number of repositories relinked.
pub async fn relink_owner(
    db: &DatabaseConnection,
    host: HostType,
    login: &str,
    organization_id: Uuid,
) -> Result<u64> {
    let mut backoff_ms = RELINK_BACKOFF_MS;
    let mut attempt = 0;

    loop {
        match relink_owner_inner(db, host, login, organization_id).await {
            Ok(count) => return Ok(count),
            Err(e) if e.is_transient() && attempt < RELINK_RETRIES => {
                attempt += 1;
                warn!(
                    attempt,
                    backoff_ms,
                    error = %e,
                    "relink failed, retrying"
                );
                tokio::time::sleep(tokio::time::Duration::from_millis(backoff_ms)).await;
                backoff_ms *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
