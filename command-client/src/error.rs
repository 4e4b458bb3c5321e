//! Error types for the command client

use thiserror::Error;

/// Errors that can occur while sending player commands
#[derive(Debug, Error)]
pub enum CommandError {
    /// Network or transport level failure (DNS, connect, read)
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The player answered with a status other than 200
    #[error("Bad request: ({status}) {reason}")]
    Http {
        /// HTTP status code returned by the player
        status: u16,
        /// Reason phrase returned alongside the status
        reason: String,
    },

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON-RPC reply carried an `error` member
    #[error("JSON-RPC error {code}: {message}")]
    Rpc {
        /// Error code from the reply
        code: i64,
        /// Error message from the reply
        message: String,
    },
}
