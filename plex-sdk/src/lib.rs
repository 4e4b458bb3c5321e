//! # Plex SDK
//!
//! Sign in, find a server, connect to it through whichever of its addresses
//! answers, and remote-control the players attached to it.
//!
//! ```rust,no_run
//! use plex_sdk::{DirectoryConfig, PlexAccount};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), plex_sdk::SdkError> {
//!     plex_sdk::logging::init_logging_from_env().ok();
//!
//!     let account = PlexAccount::sign_in(DirectoryConfig::default(), "jane", "secret").await?;
//!     let resource = account.resource("Media Server").await?;
//!     let session = account.connect(&resource, None).await?;
//!
//!     let player = session.client("Living Room")?;
//!     if session.is_playing_media()? {
//!         player.pause()?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! plex-sdk (accounts, sessions, player handles)
//!     ↓
//! plex-discovery (account directory)   plex-connect (endpoint resolution)
//!     ↓
//! plex-api (typed player commands)
//!     ↓
//! command-client (HTTP + JSON-RPC transport)
//! ```

pub use account::{resolution_request, PlexAccount};
pub use device::DeviceHandle;
pub use error::{Result, SdkError};
pub use player::{CommandRoute, Player, PlayerInfo};
pub use server::{ServerSession, CLIENTS_PATH};

// Commonly used types from the underlying crates
pub use plex_api::{Navigation, Playback, SubtitleMode, TimelineEntry};
pub use plex_connect::{AddressForm, ResolverConfig, ServerConnection};
pub use plex_discovery::{ClientIdentity, DirectoryConfig, RegisteredDevice, Resource};

pub mod logging;

mod account;
mod device;
mod error;
mod player;
mod remote;
mod server;
