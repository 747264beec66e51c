//! Mapping octocrab errors onto the host error taxonomy.

use chrono::Utc;

use crate::host::HostError;

/// Whether a 403 body is GitHub's rate-limit refusal rather than a plain
/// permission denial. GitHub signals both primary and secondary limits
/// through the message text.
pub(super) fn looks_rate_limited(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("rate limit") || lower.contains("abuse detection")
}

/// Classify an octocrab error into a [`HostError`].
///
/// `resource` names what was being fetched, for the NotFound message.
pub(super) fn classify(err: octocrab::Error, resource: &str) -> HostError {
    match &err {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            match status {
                404 => HostError::not_found(resource),
                401 => HostError::AuthRequired,
                403 if looks_rate_limited(&source.message) => HostError::RateLimited {
                    reset_at: Utc::now(),
                },
                403 => HostError::forbidden(source.message.clone()),
                429 => HostError::RateLimited {
                    reset_at: Utc::now(),
                },
                _ => HostError::api(format!("{status}: {}", source.message)),
            }
        }
        octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } => {
            HostError::api(err.to_string())
        }
        _ => HostError::network(err.to_string()),
    }
}
