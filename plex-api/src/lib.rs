//! Type-safe player command API
//!
//! Players are remote-controlled with plain HTTP `GET` commands, either sent
//! straight to the player or relayed through its media server, plus a small
//! JSON-RPC surface for stream switching. This crate describes each command
//! as an operation type and executes it through the internal
//! `command-client` crate.

pub mod client;
pub mod error;
pub mod operation;
pub mod operations;
pub mod rpc;
pub mod target;

pub use client::PlexClient;
pub use command_client::Pair;
pub use error::{ApiError, Result};
pub use operation::PlayerOperation;
pub use operations::{
    MirrorDetails, MirrorDetailsOperation, Navigation, NavigationOperation, PlayMedia, PlayMediaOperation,
    Playback, PlaybackOperation, Timeline, TimelineEntry, TimelineOperation,
};
pub use rpc::{GetActivePlayers, InputInfo, RpcOperation, SetAudioStream, SetSubtitle, SubtitleMode};
pub use target::Target;
pub use xmltree::Element;
