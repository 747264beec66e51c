//! Identity resolution for remote organizations.
//!
//! A remote organization is identified by a stable numeric id and a mutable
//! login, and the local mirror may know either, both, or neither. Resolution
//! maps a fetched snapshot onto exactly one local record:
//!
//! - both keys agree: fast path, the record is used as-is;
//! - id matches but login drifted: a remote rename, healed by updating the
//!   login (after reaping a stale record squatting on the new login);
//! - only the login matches: the local record predates our knowledge of the
//!   id, so re-verify it against the host and either adopt it or, if the
//!   login was reused by a different remote entity, delete it;
//! - neither matches: create.
//!
//! The id always outranks the login. The login only ever detects renames
//! and collisions; it never overrides a confirmed id match.

use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use crate::entity::organization::Model;
use crate::host::{HostClient, OrgSelector, RemoteOrg};
use crate::store::orgs;

use super::{ReconcileError, Result};

/// How a remote snapshot was mapped onto a local record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Existing record matched by id with the same login.
    Unchanged,
    /// Existing record matched by id; its login was updated.
    Renamed,
    /// Existing login-only record verified and assigned its remote id.
    Adopted,
    /// No local record matched; a new one was created.
    Created,
}

impl Resolution {
    /// Whether this resolution changed or newly established the record's
    /// login, which is what makes repository re-linking worthwhile.
    pub fn establishes_login(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Resolve a remote snapshot to its canonical local record.
///
/// A unique-constraint violation during the write means a concurrent
/// resolver committed first; the store state has changed under us, so
/// re-read and re-run resolution once. A second violation propagates.
pub async fn resolve<C>(
    db: &DatabaseConnection,
    client: &C,
    remote: &RemoteOrg,
) -> Result<(Model, Resolution)>
where
    C: HostClient + ?Sized,
{
    match resolve_once(db, client, remote).await {
        Err(ReconcileError::Store(e)) if e.is_unique_violation() => {
            debug!(
                remote_id = remote.id,
                login = %remote.login,
                "lost a write race, re-resolving"
            );
            resolve_once(db, client, remote).await
        }
        other => other,
    }
}

async fn resolve_once<C>(
    db: &DatabaseConnection,
    client: &C,
    remote: &RemoteOrg,
) -> Result<(Model, Resolution)>
where
    C: HostClient + ?Sized,
{
    let host = client.host_type();

    let by_id = orgs::find_by_remote_id(db, host, remote.id).await?;
    let by_login = if remote.login.is_empty() {
        None
    } else {
        orgs::find_by_login(db, host, &remote.login).await?
    };

    if let Some(record) = by_id {
        if record.login.eq_ignore_ascii_case(&remote.login) {
            // Fast path: identity and login both agree, no writes.
            return Ok((record, Resolution::Unchanged));
        }

        // Rename heal. The new login may still be held by another local
        // record; reap it if the host no longer backs it.
        if let Some(holder) = by_login {
            if holder.id != record.id {
                reap_stale_holder(db, client, holder).await?;
            }
        }
        let model = orgs::apply_remote(db, record, remote, false).await?;
        info!(
            remote_id = remote.id,
            login = %model.login,
            "healed organization rename"
        );
        return Ok((model, Resolution::Renamed));
    }

    if let Some(candidate) = by_login {
        // The login matches a record whose id we never confirmed. Ask the
        // host about the candidate's own identity before trusting it: by
        // its recorded id when known, by its login otherwise.
        let selector = match candidate.remote_id {
            Some(id) => OrgSelector::Id(id),
            None => OrgSelector::login(candidate.login.clone()),
        };

        match client.fetch_org(&selector).await {
            Ok(fresh)
                if fresh.id == remote.id
                    && candidate.remote_id.is_none_or(|id| id == remote.id) =>
            {
                let model = orgs::apply_remote(db, candidate, remote, true).await?;
                info!(
                    remote_id = remote.id,
                    login = %model.login,
                    "adopted login-matched organization"
                );
                return Ok((model, Resolution::Adopted));
            }
            Ok(_) => {
                // The login was reused by a different remote entity.
                info!(
                    login = %candidate.login,
                    "deleting organization whose login was reused remotely"
                );
                orgs::delete(db, candidate).await?;
            }
            Err(e) if e.is_ignorable() => {
                // Existence could not be confirmed; treat as absent. A
                // false negative under remote eventual consistency deletes
                // a live record here, which the next sync recreates.
                info!(
                    login = %candidate.login,
                    error = %e,
                    "deleting organization that could not be verified remotely"
                );
                orgs::delete(db, candidate).await?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let model = orgs::insert_from_remote(db, host, remote).await?;
    info!(
        remote_id = remote.id,
        login = %model.login,
        "created organization"
    );
    Ok((model, Resolution::Created))
}

/// Verify a record holding a contested login and delete it if stale.
///
/// The holder survives only when a fetch by its own login comes back with
/// its own recorded id. An ignorable fetch error or a different id means
/// the login no longer belongs to it.
async fn reap_stale_holder<C>(db: &DatabaseConnection, client: &C, holder: Model) -> Result<()>
where
    C: HostClient + ?Sized,
{
    let selector = OrgSelector::login(holder.login.clone());
    match client.fetch_org(&selector).await {
        Ok(fresh) if holder.remote_id == Some(fresh.id) => {
            // Still alive and still owns the login. Leave it; the unique
            // index will reject the rename and surface the conflict.
            Ok(())
        }
        Ok(_) => {
            info!(login = %holder.login, "deleting stale login holder");
            orgs::delete(db, holder).await?;
            Ok(())
        }
        Err(e) if e.is_ignorable() => {
            info!(
                login = %holder.login,
                error = %e,
                "deleting unverifiable login holder"
            );
            orgs::delete(db, holder).await?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
