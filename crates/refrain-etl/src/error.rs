//! Error types for the enrichment pipeline.

use thiserror::Error;

/// Errors that can occur while talking to the external services.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// An HTTP request to an external service failed.
    #[error("HTTP error from {source_name}: {message}")]
    Http {
        source_name: String,
        message: String,
    },

    /// The external service reported a rate limit.
    #[error("rate limited by {source_name}")]
    RateLimited { source_name: String },

    /// The external service rejected the configured credentials.
    #[error("authentication with {source_name} failed: {message}")]
    Auth {
        source_name: String,
        message: String,
    },

    /// The requested entity was not found at the external service.
    #[error("not found: {entity} at {source_name}")]
    NotFound {
        entity: String,
        source_name: String,
    },

    /// A response body could not be parsed.
    #[error("parse error from {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// Transport-level request failure.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// A malformed entity reference.
    #[error(transparent)]
    Reference(#[from] refrain_core::Error),
}

impl EnrichError {
    /// Returns `true` when the error is transient and the operation may
    /// succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::RateLimited { .. })
    }

    /// Returns `true` when the error is a rate-limit response.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Result type for enrichment operations.
pub type EnrichResult<T> = std::result::Result<T, EnrichError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        let err = EnrichError::Http {
            source_name: "Spotify".to_string(),
            message: "server error".to_string(),
        };
        assert!(err.is_transient());

        let err = EnrichError::RateLimited {
            source_name: "Genius".to_string(),
        };
        assert!(err.is_transient());
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_permanent_errors() {
        let err = EnrichError::NotFound {
            entity: "album abc123".to_string(),
            source_name: "Spotify".to_string(),
        };
        assert!(!err.is_transient());
        assert!(!err.is_rate_limited());

        let err = EnrichError::Auth {
            source_name: "Spotify".to_string(),
            message: "bad client secret".to_string(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn test_reference_error_flows_through() {
        let core_err = refrain_core::Error::InvalidReference {
            reference: "garbage".to_string(),
            reason: "expected at least namespace:kind:id".to_string(),
        };
        let err: EnrichError = core_err.into();
        assert!(matches!(err, EnrichError::Reference(_)));
        assert!(err.to_string().contains("garbage"));
    }
}
