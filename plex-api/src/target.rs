use std::fmt;

use command_client::Pair;

/// Where a player command is delivered
///
/// A player can be addressed on its own HTTP port, relayed through the
/// media server it is attached to, or reached as a registered device
/// through its connection URI.
#[derive(Clone, PartialEq, Eq)]
pub enum Target {
    /// The player's own HTTP port: `http://address:port/player/<path>`
    Direct { address: String, port: u16 },

    /// Relayed by a server: `<server>/system/players/<address>/<path>`
    ViaServer {
        server_url: String,
        token: String,
        player_address: String,
    },

    /// A registered device: `<base_url>/player/<path>`
    Device {
        base_url: String,
        client_identifier: String,
        token: String,
    },

    /// A media server's own API: `<base_url>/<path>`
    Server { base_url: String, token: String },
}

impl Target {
    pub fn direct(address: impl Into<String>, port: u16) -> Self {
        Target::Direct {
            address: address.into(),
            port,
        }
    }

    pub fn via_server(server_url: impl Into<String>, token: impl Into<String>, player_address: impl Into<String>) -> Self {
        Target::ViaServer {
            server_url: trim(server_url.into()),
            token: token.into(),
            player_address: player_address.into(),
        }
    }

    pub fn device(base_url: impl Into<String>, client_identifier: impl Into<String>, token: impl Into<String>) -> Self {
        Target::Device {
            base_url: trim(base_url.into()),
            client_identifier: client_identifier.into(),
            token: token.into(),
        }
    }

    pub fn server(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Target::Server {
            base_url: trim(base_url.into()),
            token: token.into(),
        }
    }

    /// Absolute URL for a command path
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        match self {
            Target::Direct { address, port } => format!("http://{}:{}/player/{}", address, port, path),
            Target::ViaServer {
                server_url,
                player_address,
                ..
            } => format!("{}/system/players/{}/{}", server_url, player_address, path),
            Target::Device { base_url, .. } => format!("{}/player/{}", base_url, path),
            Target::Server { base_url, .. } => format!("{}/{}", base_url, path),
        }
    }

    /// Headers every request to this target carries
    pub fn headers(&self) -> Vec<Pair> {
        match self {
            Target::Direct { .. } => Vec::new(),
            Target::ViaServer { token, .. } | Target::Server { token, .. } => {
                vec![("X-Plex-Token".to_string(), token.clone())]
            }
            Target::Device {
                client_identifier,
                token,
                ..
            } => vec![
                ("X-Plex-Token".to_string(), token.clone()),
                ("X-Plex-Target-Client-Identifier".to_string(), client_identifier.clone()),
            ],
        }
    }

    /// Base URL of the player's JSON-RPC endpoint, if this target exposes one
    pub fn rpc_base(&self) -> Option<String> {
        match self {
            Target::Direct { address, port } => Some(format!("http://{}:{}", address, port)),
            _ => None,
        }
    }

    /// Devices answer with bodies that are not always XML
    pub(crate) fn is_lenient(&self) -> bool {
        matches!(self, Target::Device { .. })
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Direct { address, port } => f
                .debug_struct("Direct")
                .field("address", address)
                .field("port", port)
                .finish(),
            Target::ViaServer {
                server_url,
                player_address,
                ..
            } => f
                .debug_struct("ViaServer")
                .field("server_url", server_url)
                .field("player_address", player_address)
                .finish_non_exhaustive(),
            Target::Device {
                base_url,
                client_identifier,
                ..
            } => f
                .debug_struct("Device")
                .field("base_url", base_url)
                .field("client_identifier", client_identifier)
                .finish_non_exhaustive(),
            Target::Server { base_url, .. } => f
                .debug_struct("Server")
                .field("base_url", base_url)
                .finish_non_exhaustive(),
        }
    }
}

fn trim(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
