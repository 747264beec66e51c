use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur when interacting with a code host.
#[derive(Debug, Error)]
pub enum HostError {
    /// API error from the host.
    #[error("API error: {message}")]
    Api { message: String },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Resets at {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    /// Authentication required or failed.
    #[error("Authentication required")]
    AuthRequired,

    /// Resource not found (org, repo, etc.).
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Access denied by the host for a non-rate-limit reason.
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Network or connection error.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Unexpected/internal error.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl HostError {
    /// Create an API error.
    #[inline]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a not found error.
    #[inline]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a forbidden error.
    #[inline]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a network error.
    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error is a rate limit error.
    #[inline]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Check if this error means remote existence could not be confirmed.
    ///
    /// Reconciliation treats these as "no answer" rather than "does not
    /// exist": the sync is skipped (or the verification resolves against the
    /// unverifiable record) instead of propagating a failure. Anything else
    /// is a real fault and surfaces to the caller.
    #[inline]
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::RateLimited { .. } | Self::Forbidden { .. } | Self::Network { .. }
        )
    }
}

/// Extract a short error message suitable for display.
///
/// Takes the first line of an error message, which is useful for errors
/// that include backtraces or multi-line details.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, HostError>;
