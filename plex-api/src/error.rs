use command_client::CommandError;
use thiserror::Error;

/// High-level API errors for player operations
///
/// Abstracts the transport details of the command client into failures a
/// caller can act on.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network communication error
    ///
    /// The player or server could not be reached, or the connection dropped
    /// mid-request.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The target answered with a non-success status
    #[error("Bad request: ({status}) {reason}")]
    BadRequest { status: u16, reason: String },

    /// JSON-RPC error reply from the player
    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    /// Invalid parameter value or unsupported target for an operation
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The player reported no active media player
    #[error("No active player")]
    NoActivePlayer,
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<CommandError> for ApiError {
    fn from(error: CommandError) -> Self {
        match error {
            CommandError::Network(msg) => ApiError::NetworkError(msg),
            CommandError::Http { status, reason } => ApiError::BadRequest { status, reason },
            CommandError::Parse(msg) => ApiError::ParseError(msg),
            CommandError::Rpc { code, message } => ApiError::RpcError { code, message },
        }
    }
}
