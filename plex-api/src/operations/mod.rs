//! Player operations
//!
//! - [`navigation`] and [`playback`]: argument-less remote-control commands
//! - [`play_media`]: start a play queue from a server
//! - [`mirror`]: show a media item's detail screen
//! - [`timeline`]: poll what a player is doing

pub mod mirror;
pub mod navigation;
pub mod play_media;
pub mod playback;
pub mod timeline;

pub use mirror::{MirrorDetails, MirrorDetailsOperation};
pub use navigation::{Navigation, NavigationOperation};
pub use play_media::{PlayMedia, PlayMediaOperation};
pub use playback::{Playback, PlaybackOperation};
pub use timeline::{Timeline, TimelineEntry, TimelineOperation};
