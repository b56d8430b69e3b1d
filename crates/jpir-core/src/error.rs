//! Error types for fetch and store operations.
//!
//! This module defines [`DataError`], which covers the failures the I/O
//! collaborators (providers, roster sources, artifact stores) can hit. The
//! derivation engine in `jpir-metrics` never produces these: it degrades to
//! absent fields instead of failing.

use thiserror::Error;

/// Errors that can occur while fetching raw payloads or writing artifacts.
#[derive(Error, Debug)]
pub enum DataError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit exceeded by a provider.
    #[error("Rate limited by {provider}: retry after {retry_after:?}")]
    RateLimited {
        /// The provider that rate limited the request.
        provider: String,
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// The requested security code is unknown to the provider.
    #[error("Unknown security code: {0}")]
    CodeNotFound(String),

    /// The provider responded but carried no usable payload for the code.
    #[error("No data available for {code}: {detail}")]
    DataNotAvailable {
        /// The security code that was requested.
        code: String,
        /// What was missing.
        detail: String,
    },

    /// Error parsing a provider response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error writing an artifact.
    #[error("Store error: {0}")]
    Store(String),

    /// The requested provider is not configured.
    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`DataError`].
pub type Result<T> = std::result::Result<T, DataError>;
