//! Resource listing parsing.
//!
//! The account service answers `api/resources` with a `MediaContainer` of
//! `Device` elements, each carrying the `Connection` elements through which
//! the resource may be reached.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{DiscoveryError, Result};

/// Port servers listen on when a listing omits it
pub const DEFAULT_PORT: u16 = 32400;

/// A server or player registered to the account.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub name: String,
    /// Token to present to this resource (differs from the account token for shared servers)
    pub access_token: Option<String>,
    pub product: Option<String>,
    pub product_version: Option<String>,
    pub platform: Option<String>,
    pub platform_version: Option<String>,
    pub device: Option<String>,
    pub client_identifier: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_seen_at: Option<DateTime<Utc>>,
    /// Comma separated capability list, e.g. "server" or "client,player"
    pub provides: Option<String>,
    /// Whether the signed-in account owns this resource
    pub owned: bool,
    pub home: bool,
    pub synced: bool,
    pub presence: bool,
    pub connections: Vec<Connection>,
}

impl Resource {
    /// Whether the resource advertises the given capability
    pub fn provides(&self, capability: &str) -> bool {
        self.provides
            .as_deref()
            .map(|p| p.split(',').any(|c| c.trim() == capability))
            .unwrap_or(false)
    }
}

/// One advertised way of reaching a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub protocol: String,
    pub address: String,
    pub port: u16,
    /// Fully formed URI; may be a TLS host name rather than the raw address
    pub uri: Option<String>,
    /// Whether the connection is on the resource's own network
    pub local: bool,
}

#[derive(Debug, Deserialize)]
struct MediaContainer {
    #[serde(rename = "Device", default)]
    devices: Vec<ResourceXml>,
}

#[derive(Debug, Deserialize)]
struct ResourceXml {
    #[serde(rename = "@name")]
    name: Option<String>,
    #[serde(rename = "@accessToken")]
    access_token: Option<String>,
    #[serde(rename = "@product")]
    product: Option<String>,
    #[serde(rename = "@productVersion")]
    product_version: Option<String>,
    #[serde(rename = "@platform")]
    platform: Option<String>,
    #[serde(rename = "@platformVersion")]
    platform_version: Option<String>,
    #[serde(rename = "@device")]
    device: Option<String>,
    #[serde(rename = "@clientIdentifier")]
    client_identifier: Option<String>,
    #[serde(rename = "@createdAt")]
    created_at: Option<String>,
    #[serde(rename = "@lastSeenAt")]
    last_seen_at: Option<String>,
    #[serde(rename = "@provides")]
    provides: Option<String>,
    #[serde(rename = "@owned")]
    owned: Option<String>,
    #[serde(rename = "@home")]
    home: Option<String>,
    #[serde(rename = "@synced")]
    synced: Option<String>,
    #[serde(rename = "@presence")]
    presence: Option<String>,
    #[serde(rename = "Connection", default)]
    connections: Vec<ConnectionXml>,
}

#[derive(Debug, Deserialize)]
struct ConnectionXml {
    #[serde(rename = "@protocol")]
    protocol: Option<String>,
    #[serde(rename = "@address")]
    address: Option<String>,
    #[serde(rename = "@port")]
    port: Option<String>,
    #[serde(rename = "@uri")]
    uri: Option<String>,
    #[serde(rename = "@local")]
    local: Option<String>,
}

/// Parse an `api/resources` listing.
///
/// # Errors
///
/// Returns `DiscoveryError::ParseError` if the XML is malformed.
pub fn parse_resources(xml: &str) -> Result<Vec<Resource>> {
    let container: MediaContainer = quick_xml::de::from_str(xml)
        .map_err(|e| DiscoveryError::ParseError(format!("Failed to parse resources XML: {}", e)))?;

    Ok(container.devices.into_iter().map(ResourceXml::into_resource).collect())
}

/// Find a resource by name, ignoring case.
pub fn find_resource<'a>(resources: &'a [Resource], name: &str) -> Result<&'a Resource> {
    let search = name.to_lowercase();
    tracing::info!("Looking for resource: {}", search);
    resources
        .iter()
        .find(|r| r.name.to_lowercase() == search)
        .ok_or_else(|| {
            tracing::info!("Unable to find resource: {}", search);
            DiscoveryError::NotFound(name.to_string())
        })
}

impl ResourceXml {
    fn into_resource(self) -> Resource {
        Resource {
            name: self.name.unwrap_or_default(),
            access_token: self.access_token,
            product: self.product,
            product_version: self.product_version,
            platform: self.platform,
            platform_version: self.platform_version,
            device: self.device,
            client_identifier: self.client_identifier,
            created_at: parse_timestamp(self.created_at.as_deref()),
            last_seen_at: parse_timestamp(self.last_seen_at.as_deref()),
            provides: self.provides,
            owned: parse_flag(self.owned.as_deref()),
            home: parse_flag(self.home.as_deref()),
            synced: parse_flag(self.synced.as_deref()),
            presence: parse_flag(self.presence.as_deref()),
            connections: self
                .connections
                .into_iter()
                .filter_map(ConnectionXml::into_connection)
                .collect(),
        }
    }
}

impl ConnectionXml {
    /// Connections without an address are useless and dropped
    fn into_connection(self) -> Option<Connection> {
        let address = self.address.filter(|a| !a.is_empty())?;
        Some(Connection {
            protocol: self.protocol.unwrap_or_else(|| "http".to_string()),
            address,
            port: self
                .port
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            uri: self.uri.filter(|u| !u.is_empty()),
            local: parse_flag(self.local.as_deref()),
        })
    }
}

/// Interpret a boolean attribute ("1"/"0" or "true"/"false").
pub(crate) fn parse_flag(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1") | Some("true") | Some("True"))
}

/// Interpret an epoch-seconds attribute.
pub(crate) fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let seconds: i64 = value?.trim().parse().ok()?;
    DateTime::<Utc>::from_timestamp(seconds, 0)
}
