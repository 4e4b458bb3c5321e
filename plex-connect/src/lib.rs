//! Connection resolution for Plex resources
//!
//! A resource (server or player) usually advertises several endpoints: a LAN
//! address, a public address, TLS and plain variants. This crate probes them
//! concurrently and returns one live connection.
//!
//! ```rust,no_run
//! use plex_connect::{Endpoint, HttpProbe, ResolutionRequest, Resolver};
//!
//! # async fn run() -> Result<(), plex_connect::ResolveError> {
//! let request = ResolutionRequest::new(
//!     "Media Server",
//!     vec![
//!         Endpoint::new("https", "192.168.1.10", 32400, true),
//!         Endpoint::new("https", "203.0.113.7", 32400, false),
//!     ],
//! )
//! .owned(true);
//!
//! let resolver = Resolver::new(HttpProbe::new());
//! let resolution = resolver.resolve(&request, "token").await?;
//! println!("connected via {}", resolution.address);
//! # Ok(())
//! # }
//! ```
//!
//! ## Selection policy
//!
//! - Non-owners never probe local endpoints.
//! - Local endpoints rank before remote ones; the secure form ranks before
//!   the plain form of the same endpoint.
//! - All probes are awaited before choosing, so the highest-ranked success
//!   wins regardless of which probe answered first.

mod config;
mod endpoint;
mod error;
mod http_probe;
pub mod policy;
mod probe;
mod resolver;

pub use config::ResolverConfig;
pub use endpoint::{AddressForm, Endpoint};
pub use error::{AttemptFailure, ResolveError};
pub use http_probe::{HttpProbe, ServerConnection};
pub use policy::{ProbeAttempt, ResolutionRequest};
pub use probe::{Probe, ProbeContext, ProbeFailure, ProbeResult};
pub use resolver::{Resolution, ResolutionState, Resolver};
