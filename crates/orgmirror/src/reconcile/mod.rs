//! The reconciliation engine.
//!
//! Given a freshly fetched remote organization, [`resolver::resolve`] finds
//! the local record it belongs to, healing renames and login collisions
//! along the way. [`sync`] wraps that into the full per-organization pass:
//! fetch, resolve, relink repositories, fan out repository jobs, stamp the
//! sync time.
//!
//! Concurrency model: no transaction spans the remote fetch and the local
//! write. Two workers can race into the create branch; the schema's unique
//! indexes arbitrate, and the loser re-reads and re-resolves once.

mod relink;
mod resolver;
mod sync;

use thiserror::Error;

use crate::host::HostError;
use crate::jobs::JobError;
use crate::store::StoreError;

pub use relink::relink_repositories;
pub use resolver::{Resolution, resolve};
pub use sync::{SyncOutcome, create_placeholder, sync};

/// Errors that can occur during reconciliation.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Non-ignorable host error.
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Job fan-out failure.
    #[error("Job error: {0}")]
    Job(#[from] JobError),
}

/// Result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, ReconcileError>;
