//! Session with a resolved media server

use std::sync::Arc;

use plex_api::{Element, Pair, PlexClient, Target, Timeline, TimelineEntry, TimelineOperation};
use plex_connect::ServerConnection;
use tracing::info;

use crate::error::{Result, SdkError};
use crate::player::{Player, PlayerInfo};

/// Server path listing the players attached to a server
pub const CLIENTS_PATH: &str = "clients";

/// A live session with one media server
///
/// Produced by [`crate::PlexAccount::connect`] from the connection that won
/// resolution. Requests are blocking.
#[derive(Debug, Clone)]
pub struct ServerSession {
    connection: Arc<ServerConnection>,
    client: PlexClient,
}

impl ServerSession {
    pub fn new(connection: ServerConnection) -> Self {
        Self::with_client(connection, PlexClient::new())
    }

    /// Session sending requests through a custom client
    pub fn with_client(connection: ServerConnection, client: PlexClient) -> Self {
        Self {
            connection: Arc::new(connection),
            client,
        }
    }

    pub fn connection(&self) -> &ServerConnection {
        &self.connection
    }

    pub fn machine_identifier(&self) -> &str {
        &self.connection.machine_identifier
    }

    pub fn base_url(&self) -> &str {
        &self.connection.base_url
    }

    pub(crate) fn http_client(&self) -> &PlexClient {
        &self.client
    }

    pub(crate) fn target(&self) -> Target {
        Target::server(self.connection.base_url.clone(), self.connection.token())
    }

    /// Authenticated `GET` of a server path
    pub fn query(&self, path: &str, params: &[Pair]) -> Result<Option<Element>> {
        Ok(self.client.query(&self.target(), path, params)?)
    }

    /// Players currently attached to this server
    pub fn clients(&self) -> Result<Vec<Player>> {
        let Some(container) = self.query(CLIENTS_PATH, &[])? else {
            return Ok(Vec::new());
        };

        Ok(container
            .children
            .iter()
            .filter_map(|node| node.as_element())
            .filter(|element| element.name == "Server")
            .map(|element| Player::new(PlayerInfo::from_element(element), self.clone()))
            .collect())
    }

    /// Find an attached player by name, ignoring case
    pub fn client(&self, name: &str) -> Result<Player> {
        let search = name.to_lowercase();
        info!("Looking for player: {}", search);
        self.clients()?
            .into_iter()
            .find(|player| player.name().to_lowercase() == search)
            .ok_or_else(|| SdkError::PlayerNotFound(name.to_string()))
    }

    /// Poll the server's timeline
    pub fn timeline(&self) -> Result<Vec<TimelineEntry>> {
        Ok(self
            .client
            .execute::<TimelineOperation>(&self.target(), &Timeline::default())?)
    }

    /// Whether any timeline entry reports playing media
    pub fn is_playing_media(&self) -> Result<bool> {
        Ok(plex_api::operations::timeline::is_playing(&self.timeline()?))
    }
}
