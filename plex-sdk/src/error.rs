use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Directory error: {0}")]
    Discovery(#[from] plex_discovery::DiscoveryError),

    #[error("Connection error: {0}")]
    Resolve(#[from] plex_connect::ResolveError),

    #[error("API error: {0}")]
    Api(#[from] plex_api::ApiError),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Player '{0}' has no direct address")]
    NoDirectAddress(String),

    #[error("No active player on '{0}'")]
    NoActivePlayer(String),

    #[error("Device not addressable: {0}")]
    DeviceNotAddressable(String),
}

pub type Result<T> = std::result::Result<T, SdkError>;
