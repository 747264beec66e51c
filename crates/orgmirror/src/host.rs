//! Host-agnostic trait for code forge clients.
//!
//! This module defines the `HostClient` trait that provides a unified
//! interface for fetching organization data from different code hosting
//! platforms, plus the error taxonomy reconciliation depends on.
//!
//! # Example
//!
//! ```ignore
//! use orgmirror::host::{HostClient, OrgSelector};
//!
//! async fn show<C: HostClient>(client: &C) -> Result<(), orgmirror::HostError> {
//!     let org = client.fetch_org(&OrgSelector::login("rails")).await?;
//!     println!("{} (#{})", org.login, org.id);
//!     Ok(())
//! }
//! ```

mod errors;
mod types;

pub use errors::{HostError, Result, short_error_message};
pub use types::{HostClient, OrgSelector, RemoteOrg, RemoteRepo};

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_host_error_api() {
        let err = HostError::api("Something went wrong");
        assert!(err.to_string().contains("API error"));
        assert!(err.to_string().contains("Something went wrong"));
    }

    #[test]
    fn test_host_error_not_found() {
        let err = HostError::not_found("orgs/rails");
        assert!(err.to_string().contains("Not found"));
        assert!(err.to_string().contains("orgs/rails"));
    }

    #[test]
    fn test_host_error_is_rate_limited() {
        let rate_limited = HostError::RateLimited {
            reset_at: Utc::now(),
        };
        assert!(rate_limited.is_rate_limited());
        assert!(!HostError::api("some error").is_rate_limited());
    }

    #[test]
    fn test_host_error_ignorable_variants() {
        assert!(HostError::not_found("orgs/gone").is_ignorable());
        assert!(
            HostError::RateLimited {
                reset_at: Utc::now(),
            }
            .is_ignorable()
        );
        assert!(HostError::forbidden("abuse detection").is_ignorable());
        assert!(HostError::network("connection reset").is_ignorable());
    }

    #[test]
    fn test_host_error_non_ignorable_variants() {
        assert!(!HostError::AuthRequired.is_ignorable());
        assert!(!HostError::api("bad payload").is_ignorable());
        assert!(!HostError::internal("unexpected state").is_ignorable());
    }

    #[test]
    fn test_org_selector_display() {
        assert_eq!(OrgSelector::Id(4223).to_string(), "#4223");
        assert_eq!(OrgSelector::login("rails").to_string(), "rails");
    }

    #[test]
    fn test_org_selector_id() {
        assert_eq!(OrgSelector::Id(7).id(), Some(7));
        assert_eq!(OrgSelector::login("rails").id(), None);
    }

    #[test]
    fn test_org_selector_serde_round_trip() {
        let selector = OrgSelector::login("rails");
        let json = serde_json::to_string(&selector).unwrap();
        let back: OrgSelector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selector);
    }

    #[test]
    fn test_short_error_message_single_line() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        assert_eq!(short_error_message(&err), "file not found");
    }

    #[test]
    fn test_short_error_message_multiline() {
        let err = std::io::Error::other("first line\nsecond line\nthird line");
        assert_eq!(short_error_message(&err), "first line");
    }
}
