//! Octocrab-backed GitHub client.

use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

use crate::entity::host_type::HostType;
use crate::host::{HostClient, OrgSelector, RemoteOrg, RemoteRepo, Result};

use super::error::classify;
use super::types::{GithubOrg, GithubRepo};

/// Repositories fetched per page. GitHub caps this at 100.
const REPOS_PER_PAGE: usize = 100;

/// A [`HostClient`] for the GitHub REST API.
#[derive(Clone)]
pub struct GitHubClient {
    octo: Octocrab,
}

impl GitHubClient {
    /// Create an authenticated client from a personal access token.
    pub fn from_token(token: impl Into<String>) -> Result<Self> {
        let octo = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .map_err(|e| classify(e, "client"))?;
        Ok(Self { octo })
    }

    /// Create a client around an existing Octocrab instance.
    pub fn from_octocrab(octo: Octocrab) -> Self {
        Self { octo }
    }
}

#[async_trait]
impl HostClient for GitHubClient {
    fn host_type(&self) -> HostType {
        HostType::GitHub
    }

    async fn fetch_org(&self, selector: &OrgSelector) -> Result<RemoteOrg> {
        // The id route keeps working after a rename, the login route does
        // not. Identity resolution depends on that difference.
        let route = match selector {
            OrgSelector::Id(id) => format!("/organizations/{id}"),
            OrgSelector::Login(login) => format!("/orgs/{login}"),
        };
        debug!(%selector, %route, "fetching organization");

        let org: GithubOrg = self
            .octo
            .get(&route, None::<&()>)
            .await
            .map_err(|e| classify(e, &route))?;
        Ok(org.into())
    }

    async fn list_org_repos(&self, login: &str) -> Result<Vec<RemoteRepo>> {
        let mut repos = Vec::new();
        let mut page = 1u32;

        loop {
            let route =
                format!("/orgs/{login}/repos?type=all&per_page={REPOS_PER_PAGE}&page={page}");
            let batch: Vec<GithubRepo> = self
                .octo
                .get(&route, None::<&()>)
                .await
                .map_err(|e| classify(e, &route))?;

            let count = batch.len();
            debug!(login, page, count, "fetched repository page");
            repos.extend(batch.into_iter().map(RemoteRepo::from));

            // A short page means we are done.
            if count < REPOS_PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(repos)
    }
}
