use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entity::host_type::HostType;

use super::errors::Result;

/// The two ways a remote organization can be addressed.
///
/// The numeric id is the stable identity the host assigns once and never
/// reuses. The login is the human-facing handle and can be renamed or even
/// reassigned to a different entity over time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgSelector {
    /// Address by the host-assigned numeric id.
    Id(i64),
    /// Address by the current login.
    Login(String),
}

impl OrgSelector {
    /// Build a login selector.
    #[inline]
    pub fn login(login: impl Into<String>) -> Self {
        Self::Login(login.into())
    }

    /// The numeric id, if this selector carries one.
    #[inline]
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Login(_) => None,
        }
    }
}

impl std::fmt::Display for OrgSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Login(login) => write!(f, "{login}"),
        }
    }
}

/// An organization as reported by a code host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOrg {
    /// Host-assigned numeric id.
    pub id: i64,
    /// Current login on the host.
    pub login: String,
    /// Display name.
    pub name: Option<String>,
    /// Website URL.
    pub site: Option<String>,
    /// Public contact email.
    pub email: Option<String>,
    /// Free-form location string.
    pub location: Option<String>,
    /// Profile description.
    pub bio: Option<String>,
}

/// A repository as reported by a code host, reduced to what sync needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    /// Owner-qualified name, `owner/name`.
    pub full_name: String,
}

/// Trait for code hosting platform clients.
///
/// Implementors map their platform's wire types and error shapes onto
/// [`RemoteOrg`] / [`RemoteRepo`] and [`HostError`](super::HostError). A
/// fetch by id and a fetch by login must go through whatever distinct
/// endpoints the host provides, so that an id lookup still succeeds after
/// the organization has been renamed.
#[async_trait]
pub trait HostClient: Send + Sync {
    /// The host this client connects to.
    fn host_type(&self) -> HostType;

    /// Fetch a single organization by id or login.
    async fn fetch_org(&self, selector: &OrgSelector) -> Result<RemoteOrg>;

    /// List all repositories owned by an organization.
    ///
    /// Handles pagination internally and returns the complete list.
    async fn list_org_repos(&self, login: &str) -> Result<Vec<RemoteRepo>>;
}
