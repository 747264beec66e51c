//! GitHub API client for organization operations.
//!
//! This module provides the octocrab-backed [`GitHubClient`] that implements
//! [`HostClient`](crate::host::HostClient) against the GitHub REST API.
//!
//! # Module Structure
//!
//! - [`client`] - The `HostClient` implementation
//! - `error` - Classification of octocrab errors into `HostError`
//! - [`types`] - Wire types for the endpoints sync uses
//!
//! ```ignore
//! use orgmirror::github::GitHubClient;
//! use orgmirror::host::{HostClient, OrgSelector};
//!
//! let client = GitHubClient::from_token(token)?;
//! let org = client.fetch_org(&OrgSelector::login("rails")).await?;
//! ```

mod client;
mod error;
mod types;

pub use client::GitHubClient;
pub use types::{GithubOrg, GithubRepo};
