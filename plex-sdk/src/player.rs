//! Player handle

use plex_api::{
    Element, GetActivePlayers, InputInfo, MirrorDetails, MirrorDetailsOperation, Navigation, NavigationOperation,
    PlayMedia, PlayMediaOperation, Playback, PlaybackOperation, SetAudioStream, SetSubtitle, SubtitleMode, Target,
    TimelineEntry,
};
use tracing::info;

use crate::error::{Result, SdkError};
use crate::remote::remote_control_methods;
use crate::server::ServerSession;

/// Attributes a server reports for an attached player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerInfo {
    pub name: String,
    pub host: Option<String>,
    pub address: Option<String>,
    pub port: Option<u16>,
    pub machine_identifier: Option<String>,
    pub title: Option<String>,
    pub version: Option<String>,
    pub platform: Option<String>,
    pub protocol: Option<String>,
    pub product: Option<String>,
    pub device_class: Option<String>,
    pub protocol_version: Option<String>,
    pub protocol_capabilities: Vec<String>,
    pub state: Option<String>,
}

impl PlayerInfo {
    pub(crate) fn from_element(element: &Element) -> Self {
        let attr = |name: &str| element.attributes.get(name).cloned();
        Self {
            name: attr("name").unwrap_or_default(),
            host: attr("host"),
            address: attr("address"),
            port: attr("port").and_then(|p| p.parse().ok()),
            machine_identifier: attr("machineIdentifier"),
            title: attr("title"),
            version: attr("version"),
            platform: attr("platform"),
            protocol: attr("protocol"),
            product: attr("product"),
            device_class: attr("deviceClass"),
            protocol_version: attr("protocolVersion"),
            protocol_capabilities: attr("protocolCapabilities")
                .map(|caps| {
                    caps.split(',')
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            state: attr("state"),
        }
    }
}

/// How player commands are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandRoute {
    /// Relayed by the server the player is attached to
    #[default]
    Server,
    /// Sent to the player's own HTTP port
    Direct,
}

/// A player attached to a server
///
/// ```rust,no_run
/// # fn run(session: plex_sdk::ServerSession) -> plex_sdk::Result<()> {
/// let player = session.client("Living Room")?;
/// player.pause()?;
/// player.move_down()?;
/// player.select()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Player {
    info: PlayerInfo,
    server: ServerSession,
    route: CommandRoute,
}

impl Player {
    pub fn new(info: PlayerInfo, server: ServerSession) -> Self {
        Self {
            info,
            server,
            route: CommandRoute::default(),
        }
    }

    pub fn info(&self) -> &PlayerInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn server(&self) -> &ServerSession {
        &self.server
    }

    pub fn route(&self) -> CommandRoute {
        self.route
    }

    pub fn set_route(&mut self, route: CommandRoute) {
        self.route = route;
    }

    pub fn with_route(mut self, route: CommandRoute) -> Self {
        self.route = route;
        self
    }

    fn direct_target(&self) -> Result<Target> {
        match (&self.info.address, self.info.port) {
            (Some(address), Some(port)) if !address.is_empty() => Ok(Target::direct(address.clone(), port)),
            _ => Err(SdkError::NoDirectAddress(self.info.name.clone())),
        }
    }

    fn target(&self) -> Result<Target> {
        match self.route {
            CommandRoute::Direct => self.direct_target(),
            CommandRoute::Server => {
                let address = self
                    .info
                    .address
                    .clone()
                    .ok_or_else(|| SdkError::NoDirectAddress(self.info.name.clone()))?;
                Ok(Target::via_server(
                    self.server.base_url(),
                    self.server.connection().token(),
                    address,
                ))
            }
        }
    }

    pub fn navigation(&self, command: Navigation) -> Result<()> {
        info!(player = %self.info.name, "{}", command);
        Ok(self
            .server
            .http_client()
            .execute::<NavigationOperation>(&self.target()?, &command)?)
    }

    pub fn playback(&self, command: Playback) -> Result<()> {
        info!(player = %self.info.name, "{}", command);
        Ok(self
            .server
            .http_client()
            .execute::<PlaybackOperation>(&self.target()?, &command)?)
    }

    remote_control_methods!();

    /// Start a play queue created on this player's server
    pub fn play_media(&self, play_queue_id: u64, key: &str, offset: u64) -> Result<()> {
        let request = PlayMedia::new(self.server.machine_identifier(), play_queue_id, key).with_offset(offset);
        Ok(self
            .server
            .http_client()
            .execute::<PlayMediaOperation>(&self.target()?, &request)?)
    }

    /// Open the detail screen of `key` on the player
    ///
    /// Always sent directly; the player fetches the details from the server
    /// host and port this session resolved to.
    pub fn navigate(&self, key: &str) -> Result<()> {
        let connection = self.server.connection();
        let (address, port) = connection.host_and_port().ok_or_else(|| {
            SdkError::Api(plex_api::ApiError::InvalidParameter(format!(
                "server URL '{}' has no host and port",
                connection.base_url
            )))
        })?;

        let request = MirrorDetails {
            key: key.to_string(),
            machine_identifier: connection.machine_identifier.clone(),
            address,
            port,
        };
        Ok(self
            .server
            .http_client()
            .execute::<MirrorDetailsOperation>(&self.direct_target()?, &request)?)
    }

    pub fn timeline(&self) -> Result<Vec<TimelineEntry>> {
        self.server.timeline()
    }

    pub fn is_playing_media(&self) -> Result<bool> {
        self.server.is_playing_media()
    }

    /// Id of the player's active media player, if any
    pub fn player_id(&self) -> Result<Option<i64>> {
        Ok(self.server.http_client().call(&self.direct_target()?, &GetActivePlayers)?)
    }

    fn active_player_id(&self) -> Result<i64> {
        self.player_id()?
            .ok_or_else(|| SdkError::NoActivePlayer(self.info.name.clone()))
    }

    /// Switch subtitles: next track, on or off
    pub fn subtitle(&self, mode: SubtitleMode) -> Result<()> {
        let operation = SetSubtitle {
            player_id: self.active_player_id()?,
            mode,
        };
        Ok(self.server.http_client().call(&self.direct_target()?, &operation)?)
    }

    /// Switch to the next audio stream
    pub fn switch_language(&self) -> Result<()> {
        let operation = SetAudioStream {
            player_id: self.active_player_id()?,
        };
        Ok(self.server.http_client().call(&self.direct_target()?, &operation)?)
    }

    /// Toggle the on-screen info panel
    pub fn show_info(&self) -> Result<()> {
        Ok(self.server.http_client().call(&self.direct_target()?, &InputInfo)?)
    }
}
