//! Error types for the account service and resource directory.

use thiserror::Error;

/// Error type for directory operations.
///
/// Represents the failure modes of talking to the account service: transport
/// problems, rejected credentials, unexpected statuses and malformed listings.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Network-related errors (connect, TLS, reading the body)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// XML listing could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Credentials or token were rejected (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Any other unexpected HTTP status
    #[error("Bad request: ({status}) {reason}")]
    BadRequest { status: u16, reason: String },
    /// No resource matched the requested name
    #[error("Unable to find resource: {0}")]
    NotFound(String),
    /// A registered device advertises no connection URI
    #[error("Device is not reachable: {0}")]
    Unreachable(String),
}

/// Convenience Result type alias for directory operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
