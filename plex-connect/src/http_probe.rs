//! HTTP probe against a media server's root endpoint.
//!
//! A server answers an authenticated `GET /` with a `MediaContainer` carrying
//! its identity. A well-formed answer proves the address is live and the
//! token is accepted.

use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::probe::{Probe, ProbeContext, ProbeFailure};

/// Live, authenticated connection to a media server.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConnection {
    /// Base URL the server answered on
    pub base_url: String,
    token: String,
    pub machine_identifier: String,
    pub friendly_name: Option<String>,
    pub version: Option<String>,
    pub platform: Option<String>,
}

impl ServerConnection {
    /// Connection to an already known server, without probing it
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, machine_identifier: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            machine_identifier: machine_identifier.into(),
            friendly_name: None,
            version: None,
            platform: None,
        }
    }

    /// Token accepted by this server
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Absolute URL for a server path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Split the base URL into host and port, as players expect them
    pub fn host_and_port(&self) -> Option<(String, u16)> {
        let authority = self.base_url.split("//").nth(1)?.split('/').next()?;
        let (host, port) = authority.rsplit_once(':')?;
        Some((host.trim_matches(|c| c == '[' || c == ']').to_string(), port.parse().ok()?))
    }
}

impl fmt::Debug for ServerConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConnection")
            .field("base_url", &self.base_url)
            .field("machine_identifier", &self.machine_identifier)
            .field("friendly_name", &self.friendly_name)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct RootContainer {
    #[serde(rename = "@machineIdentifier")]
    machine_identifier: Option<String>,
    #[serde(rename = "@friendlyName")]
    friendly_name: Option<String>,
    #[serde(rename = "@version")]
    version: Option<String>,
    #[serde(rename = "@platform")]
    platform: Option<String>,
}

/// Probe that issues one authenticated `GET /` per attempt.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    http: reqwest::Client,
    headers: Vec<(String, String)>,
}

impl HttpProbe {
    pub fn new() -> Self {
        Self::with_headers(Vec::new())
    }

    /// Probe sending extra identification headers with every attempt
    pub fn with_headers(headers: Vec<(String, String)>) -> Self {
        Self {
            http: reqwest::Client::new(),
            headers,
        }
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Probe for HttpProbe {
    type Session = ServerConnection;

    async fn probe(&self, context: &ProbeContext) -> Result<ServerConnection, ProbeFailure> {
        let base_url = context.address.trim_end_matches('/').to_string();
        debug!("Probing {}", base_url);

        let mut request = self
            .http
            .get(format!("{}/", base_url))
            .timeout(context.timeout)
            .header("Accept", "application/xml")
            .header("X-Plex-Token", context.token());
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProbeFailure::Timeout(context.timeout)
            } else {
                ProbeFailure::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProbeFailure::Unauthorized(format!("HTTP {}", status.as_u16())));
        }
        if !status.is_success() {
            return Err(ProbeFailure::Network(format!("HTTP {}", status.as_u16())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProbeFailure::Network(e.to_string()))?;

        parse_identity(&base_url, context.token(), &body)
    }
}

fn parse_identity(base_url: &str, token: &str, body: &str) -> Result<ServerConnection, ProbeFailure> {
    let root: RootContainer =
        quick_xml::de::from_str(body).map_err(|e| ProbeFailure::MalformedResponse(e.to_string()))?;

    let machine_identifier = root
        .machine_identifier
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ProbeFailure::MalformedResponse("missing machineIdentifier".to_string()))?;

    Ok(ServerConnection {
        base_url: base_url.to_string(),
        token: token.to_string(),
        machine_identifier,
        friendly_name: root.friendly_name,
        version: root.version,
        platform: root.platform,
    })
}
