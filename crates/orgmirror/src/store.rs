//! Persistence layer over the organizations and repositories tables.
//!
//! All queries that involve logins or full names go through `lower()` so
//! lookups match the case-insensitive unique indexes the schema declares.
//! The write paths deliberately let unique violations escape as
//! [`StoreError`] values so the resolver can use them as a concurrency
//! signal.

mod errors;
pub mod orgs;
pub mod repos;

pub use errors::{Result, StoreError};
