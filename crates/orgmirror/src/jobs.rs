//! Background job descriptions and queueing.
//!
//! Sync never creates repository records inline. Each repository the host
//! reports becomes an [`Job::UpsertRepository`] handed to a [`JobQueue`], so
//! a slow or huge organization cannot stall the sync transaction. The
//! in-process [`ChannelQueue`] covers the single-binary deployment; an
//! external queue can implement the trait the same way.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::entity::host_type::HostType;
use crate::host::OrgSelector;

/// A unit of deferred work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Job {
    /// Run a full sync for one organization.
    SyncOrganization {
        host: HostType,
        selector: OrgSelector,
    },
    /// Ensure a repository record exists for this full name.
    UpsertRepository { host: HostType, full_name: String },
}

/// Errors from enqueueing work.
#[derive(Debug, Error)]
pub enum JobError {
    /// The receiving side of the queue is gone.
    #[error("Job queue closed")]
    QueueClosed,
}

/// Sink for deferred work.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Hand a job off for later execution.
    async fn enqueue(&self, job: Job) -> Result<(), JobError>;
}

/// In-process queue over an unbounded tokio channel.
#[derive(Clone)]
pub struct ChannelQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl ChannelQueue {
    /// Create a queue and the receiver that drains it.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Job>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl JobQueue for ChannelQueue {
    async fn enqueue(&self, job: Job) -> Result<(), JobError> {
        self.tx.send(job).map_err(|_| JobError::QueueClosed)
    }
}
