//! Orgmirror - a local mirror of code-host organizations.
//!
//! This library keeps a relational mirror of "organization" entities from a
//! code-hosting platform, reconciling each freshly fetched remote record onto
//! the correct local row. Remote organizations are addressable by two keys -
//! a stable numeric id and a mutable login - and the two can drift apart
//! (renames), collide (a login reused by a different entity), or disagree
//! transiently. The reconciliation engine in [`reconcile`] heals all of that
//! without ever producing duplicate or orphaned local rows.
//!
//! # Features
//!
//! - `github` - Enables the octocrab-backed GitHub [`host::HostClient`].
//! - `migrate` - Enables database migration support and
//!   [`connect_and_migrate`].
//! - `sqlite` - Enables the SQLite backend (on by default).
//!
//! # Example
//!
//! ```ignore
//! use orgmirror::{connect_and_migrate, jobs::ChannelQueue, reconcile};
//! use orgmirror::host::OrgSelector;
//!
//! let db = connect_and_migrate("sqlite://orgmirror.db?mode=rwc").await?;
//! let client = orgmirror::github::GitHubClient::from_token(token)?;
//! let (queue, mut jobs) = ChannelQueue::new();
//!
//! let outcome = reconcile::sync(&db, &client, &queue, &OrgSelector::login("rails")).await?;
//! ```

pub mod db;
pub mod entity;
pub mod host;
pub mod jobs;
pub mod reconcile;
pub mod store;

#[cfg(feature = "github")]
pub mod github;

#[cfg(feature = "migrate")]
pub mod migration;

pub use db::connect;
#[cfg(feature = "migrate")]
pub use db::connect_and_migrate;
pub use entity::prelude::*;
pub use host::{HostClient, HostError, OrgSelector, RemoteOrg, RemoteRepo, short_error_message};
pub use jobs::{Job, JobQueue};
pub use reconcile::{ReconcileError, Resolution, SyncOutcome};
pub use store::StoreError;
