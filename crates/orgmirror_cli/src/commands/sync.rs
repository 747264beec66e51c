use orgmirror::db;
use orgmirror::github::GitHubClient;
use orgmirror::host::OrgSelector;
use orgmirror::jobs::{ChannelQueue, Job};
use orgmirror::reconcile::{self, SyncOutcome};
use orgmirror::store::{orgs, repos};
use tracing::warn;

use crate::config::Config;

/// A numeric argument addresses an organization by its host-assigned id,
/// anything else by login.
fn parse_selector(arg: &str) -> OrgSelector {
    match arg.parse::<i64>() {
        Ok(id) => OrgSelector::Id(id),
        Err(_) => OrgSelector::login(arg),
    }
}

pub(crate) async fn handle_sync(
    targets: Vec<String>,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = config
        .github
        .token
        .clone()
        .ok_or("GitHub token not configured (set ORGMIRROR_GITHUB_TOKEN)")?;
    let client = GitHubClient::from_token(token)?;

    let db = db::connect(database_url).await?;
    let (queue, mut jobs) = ChannelQueue::new();

    for target in &targets {
        let selector = parse_selector(target);
        match reconcile::sync(&db, &client, &queue, &selector).await? {
            SyncOutcome::Skipped => {
                println!("{target}: skipped (remote existence unconfirmed)");
            }
            SyncOutcome::Completed {
                organization,
                jobs_enqueued,
                repos_relinked,
            } => {
                println!(
                    "{target}: synced as {} ({} repos queued, {} relinked)",
                    organization.login, jobs_enqueued, repos_relinked
                );
            }
        }
    }

    // Drain the repository fan-out inline. A worker deployment would consume
    // the same jobs from a real queue instead.
    drop(queue);
    let mut created = 0usize;
    while let Some(job) = jobs.recv().await {
        match job {
            Job::UpsertRepository { host, full_name } => {
                let owner = full_name.split('/').next().unwrap_or(&full_name);
                let organization_id = orgs::find_by_login(&db, host, owner)
                    .await?
                    .map(|org| org.id);
                repos::upsert_stub(&db, host, &full_name, organization_id).await?;
                created += 1;
            }
            Job::SyncOrganization { selector, .. } => {
                warn!(%selector, "nested organization sync left for a worker");
            }
        }
    }
    println!("Upserted {created} repository records.");

    Ok(())
}
