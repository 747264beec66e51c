//! Per-organization sync orchestration.

use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::entity::host_type::HostType;
use crate::entity::organization::Model;
use crate::host::{HostClient, OrgSelector};
use crate::jobs::{Job, JobQueue};
use crate::store::orgs;

use super::{Result, relink, resolver};

/// Outcome of a sync pass.
#[derive(Debug)]
pub enum SyncOutcome {
    /// The remote's existence could not be confirmed; nothing was touched.
    Skipped,
    /// The organization was resolved and refreshed.
    Completed {
        /// The canonical local record, with `last_synced_at` stamped.
        organization: Model,
        /// Repository upsert jobs handed to the queue.
        jobs_enqueued: usize,
        /// Repositories swept into this organization by the re-linker.
        repos_relinked: u64,
    },
}

/// Run a full sync pass for one organization.
///
/// Fetches the remote by id or login, resolves it onto the canonical local
/// record, re-links repositories when the resolution changed or established
/// a login, fans out one [`Job::UpsertRepository`] per remote repository,
/// and stamps `last_synced_at`.
///
/// An ignorable fetch error (not found, rate limited, forbidden, network)
/// aborts the pass as [`SyncOutcome::Skipped`] without mutating local state.
/// The same class of error on the repository listing only empties the
/// fan-out; the organization itself still syncs.
pub async fn sync<C, Q>(
    db: &DatabaseConnection,
    client: &C,
    queue: &Q,
    selector: &OrgSelector,
) -> Result<SyncOutcome>
where
    C: HostClient + ?Sized,
    Q: JobQueue + ?Sized,
{
    let remote = match client.fetch_org(selector).await {
        Ok(remote) => remote,
        Err(e) if e.is_ignorable() => {
            info!(%selector, error = %e, "remote existence unconfirmed, skipping sync");
            return Ok(SyncOutcome::Skipped);
        }
        Err(e) => return Err(e.into()),
    };

    let (organization, resolution) = resolver::resolve(db, client, &remote).await?;

    let repos_relinked = if resolution.establishes_login() {
        relink::relink_repositories(db, &organization).await?
    } else {
        0
    };

    let jobs_enqueued = match client.list_org_repos(&organization.login).await {
        Ok(repos) => {
            let mut count = 0usize;
            for repo in repos {
                queue
                    .enqueue(Job::UpsertRepository {
                        host: organization.host_type,
                        full_name: repo.full_name,
                    })
                    .await?;
                count += 1;
            }
            count
        }
        Err(e) if e.is_ignorable() => {
            warn!(
                login = %organization.login,
                error = %e,
                "repository listing unavailable, fanning out nothing"
            );
            0
        }
        Err(e) => return Err(e.into()),
    };

    let organization = orgs::touch_synced(db, organization).await?;
    info!(
        login = %organization.login,
        ?resolution,
        jobs_enqueued,
        repos_relinked,
        "organization sync completed"
    );

    Ok(SyncOutcome::Completed {
        organization,
        jobs_enqueued,
        repos_relinked,
    })
}

/// Create an empty placeholder record for a login and request its sync.
///
/// The sync is requested by an explicit enqueue after the insert commits,
/// so a failed insert never leaves a queued job behind.
pub async fn create_placeholder<Q>(
    db: &DatabaseConnection,
    queue: &Q,
    host: HostType,
    login: &str,
) -> Result<Model>
where
    Q: JobQueue + ?Sized,
{
    let model = orgs::insert_placeholder(db, host, login).await?;
    queue
        .enqueue(Job::SyncOrganization {
            host,
            selector: OrgSelector::login(login),
        })
        .await?;
    Ok(model)
}
