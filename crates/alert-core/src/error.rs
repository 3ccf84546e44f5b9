//! Error types for gateway operations.

use thiserror::Error;

/// Errors that can occur when calling an external gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway could not be reached or returned a transport-level failure.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),

    /// The gateway answered, but with something we could not use.
    #[error("invalid gateway response: {0}")]
    InvalidResponse(String),

    /// The gateway call did not finish in time.
    #[error("gateway timed out")]
    Timeout,

    /// The gateway is misconfigured (missing key, bad URL, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Local I/O failed while producing or consuming an artifact.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
