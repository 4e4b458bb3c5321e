//! Plex account and resource directory library
//!
//! This crate signs in to the account service and lists the servers, players
//! and registered devices available to the account, together with every
//! connection each of them advertises.
//!
//! # Quick Start
//!
//! ```no_run
//! use plex_discovery::{AccountClient, DirectoryConfig, find_resource};
//!
//! # async fn run() -> plex_discovery::Result<()> {
//! let client = AccountClient::new(DirectoryConfig::default())?;
//! let user = client.sign_in("jane", "secret").await?;
//!
//! let resources = client.resources(&user.authentication_token).await?;
//! let server = find_resource(&resources, "Media Server")?;
//! for connection in &server.connections {
//!     println!("{}:{} (local: {})", connection.address, connection.port, connection.local);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Listings are trusted for address material only: whether any connection is
//! live is decided by `plex-connect`.

mod account;
mod config;
mod error;
pub mod device;
pub mod resource;
pub mod user;

pub use account::{AccountClient, DEVICES_PATH, RESOURCES_PATH, SIGN_IN_PATH};
pub use config::{ClientIdentity, DirectoryConfig, DEFAULT_BASE_URL};
pub use device::RegisteredDevice;
pub use error::{DiscoveryError, Result};
pub use resource::{find_resource, Connection, Resource, DEFAULT_PORT};
pub use user::User;
